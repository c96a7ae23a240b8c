//! Player business logic - roster entries and their descriptive fields.
//!
//! Assignment fields (`team_id`, `bid_amount`, `is_assigned`) are never written here;
//! see [`crate::core::assignment`].

use crate::{
    core::tournament,
    entities::{Player, player},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*, sea_query::Expr};
use tracing::{info, instrument};

/// A validated candidate player, from a single create or a roster import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCreate {
    /// Employee id, unique per tournament
    pub emp_id: String,
    /// Display name
    pub name: String,
    /// Free-text role label
    pub player_type: String,
    /// Optional photo file name
    pub image_filename: Option<String>,
}

impl PlayerCreate {
    /// Creates a candidate without an image.
    pub fn new(
        emp_id: impl Into<String>,
        name: impl Into<String>,
        player_type: impl Into<String>,
    ) -> Self {
        Self {
            emp_id: emp_id.into(),
            name: name.into(),
            player_type: player_type.into(),
            image_filename: None,
        }
    }

    /// Trims every field and rejects blank required ones.
    pub fn normalized(self) -> Result<Self> {
        let emp_id = required(&self.emp_id, "emp_id")?;
        let name = required(&self.name, "name")?;
        let player_type = required(&self.player_type, "type")?;
        let image_filename = self
            .image_filename
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty());

        Ok(Self {
            emp_id,
            name,
            player_type,
            image_filename,
        })
    }

    /// Builds an unassigned player row for a tournament.
    pub(crate) fn into_active_model(self, tournament_id: i64) -> player::ActiveModel {
        player::ActiveModel {
            tournament_id: Set(tournament_id),
            team_id: Set(None),
            emp_id: Set(self.emp_id),
            name: Set(self.name),
            player_type: Set(self.player_type),
            bid_amount: Set(0.0),
            is_assigned: Set(false),
            image_filename: Set(self.image_filename),
            ..Default::default()
        }
    }
}

fn required(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation {
            message: format!("{field} is required"),
        });
    }
    Ok(trimmed.to_string())
}

pub(crate) fn duplicate_emp_id(emp_id: &str) -> String {
    format!("player with emp_id '{emp_id}' already exists in tournament")
}

/// Partial update of a player's descriptive fields.
#[derive(Debug, Clone, Default)]
pub struct PlayerUpdate {
    /// New display name
    pub name: Option<String>,
    /// New role label
    pub player_type: Option<String>,
}

/// Finds a player by business key within a tournament.
pub async fn find_player<C>(conn: &C, tournament_id: i64, emp_id: &str) -> Result<Option<player::Model>>
where
    C: ConnectionTrait,
{
    Player::find()
        .filter(player::Column::TournamentId.eq(tournament_id))
        .filter(player::Column::EmpId.eq(emp_id))
        .one(conn)
        .await
        .map_err(Into::into)
}

/// Adds an unassigned player to a tournament.
///
/// # Errors
/// - `Validation` if a required field is blank
/// - `TournamentNotFound` if the tournament does not exist
/// - `DuplicateKey` if the `emp_id` is already used in the tournament
#[instrument(skip(db, candidate), fields(emp_id = %candidate.emp_id))]
pub async fn create_player(
    db: &DatabaseConnection,
    tournament_id: i64,
    candidate: PlayerCreate,
) -> Result<player::Model> {
    let candidate = candidate.normalized()?;
    tournament::require_tournament(db, tournament_id).await?;

    let emp_id = candidate.emp_id.clone();
    let player = candidate
        .into_active_model(tournament_id)
        .insert(db)
        .await
        .map_err(|e| Error::from_write(e, duplicate_emp_id(&emp_id)))?;

    info!(player_id = player.id, "Created player");
    Ok(player)
}

/// Finds a player by business key within a tournament.
pub async fn get_player(
    db: &DatabaseConnection,
    tournament_id: i64,
    emp_id: &str,
) -> Result<Option<player::Model>> {
    find_player(db, tournament_id, emp_id).await
}

/// Lists every player in a tournament ordered by `emp_id`.
pub async fn list_players(db: &DatabaseConnection, tournament_id: i64) -> Result<Vec<player::Model>> {
    Player::find()
        .filter(player::Column::TournamentId.eq(tournament_id))
        .order_by_asc(player::Column::EmpId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists players still waiting to be sold, ordered by `emp_id`.
pub async fn list_unassigned_players(
    db: &DatabaseConnection,
    tournament_id: i64,
) -> Result<Vec<player::Model>> {
    Player::find()
        .filter(player::Column::TournamentId.eq(tournament_id))
        .filter(player::Column::IsAssigned.eq(false))
        .order_by_asc(player::Column::EmpId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Unassigned players in any tournament whose `emp_id` or name contains `partial`.
pub async fn search_unassigned(
    db: &DatabaseConnection,
    partial: &str,
    limit: u64,
) -> Result<Vec<player::Model>> {
    Player::find()
        .filter(player::Column::IsAssigned.eq(false))
        .filter(
            player::Column::EmpId
                .contains(partial)
                .or(player::Column::Name.contains(partial)),
        )
        .order_by_asc(player::Column::EmpId)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Updates a player's name and/or type. Assignment state is left alone.
pub async fn update_player(
    db: &DatabaseConnection,
    tournament_id: i64,
    emp_id: &str,
    update: PlayerUpdate,
) -> Result<player::Model> {
    let existing = find_player(db, tournament_id, emp_id)
        .await?
        .ok_or_else(|| Error::PlayerNotFound {
            emp_id: emp_id.to_string(),
        })?;

    let mut active: player::ActiveModel = existing.into();
    if let Some(name) = update.name {
        active.name = Set(required(&name, "name")?);
    }
    if let Some(player_type) = update.player_type {
        active.player_type = Set(required(&player_type, "type")?);
    }

    active.update(db).await.map_err(Into::into)
}

/// Records a photo for an `emp_id` in every tournament it appears in.
///
/// Returns the number of player rows updated.
pub async fn set_player_image(db: &DatabaseConnection, emp_id: &str, filename: &str) -> Result<u64> {
    let filename = required(filename, "image filename")?;

    let result = Player::update_many()
        .col_expr(player::Column::ImageFilename, Expr::value(Some(filename)))
        .filter(player::Column::EmpId.eq(emp_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::PlayerNotFound {
            emp_id: emp_id.to_string(),
        });
    }
    Ok(result.rows_affected)
}
