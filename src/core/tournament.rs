//! Tournament business logic - creation with teams, lookups, overview and cascade delete.

use crate::{
    auth::Principal,
    core::team::{NewTeam, insert_team},
    entities::{Player, Team, Tournament, player, team, tournament},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// A team together with the players it has bought.
#[derive(Debug, Clone)]
pub struct TeamRoster {
    /// The team
    pub team: team::Model,
    /// Players currently assigned to the team
    pub players: Vec<player::Model>,
}

/// Everything about a tournament in one value.
#[derive(Debug, Clone)]
pub struct TournamentOverview {
    /// The tournament itself
    pub tournament: tournament::Model,
    /// Teams with their assigned players, in name order
    pub teams: Vec<TeamRoster>,
    /// Every player in the tournament, assigned or not
    pub players: Vec<player::Model>,
}

impl TournamentOverview {
    /// Players not yet sold to any team.
    pub fn unassigned(&self) -> impl Iterator<Item = &player::Model> {
        self.players.iter().filter(|p| !p.is_assigned)
    }
}

/// Loads a tournament or fails with `TournamentNotFound`.
pub async fn require_tournament<C>(conn: &C, tournament_id: i64) -> Result<tournament::Model>
where
    C: ConnectionTrait,
{
    Tournament::find_by_id(tournament_id)
        .one(conn)
        .await?
        .ok_or(Error::TournamentNotFound { id: tournament_id })
}

/// Creates a tournament and its initial teams in one transaction.
///
/// Each team starts with its remaining budget equal to its total budget.
#[instrument(skip(db, actor, teams), fields(actor = %actor.username, teams = teams.len()))]
pub async fn create_tournament(
    db: &DatabaseConnection,
    actor: &Principal,
    name: String,
    teams: Vec<NewTeam>,
) -> Result<tournament::Model> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Tournament name cannot be empty".to_string(),
        });
    }
    for team in &teams {
        team.validate()?;
    }

    let txn = db.begin().await?;

    let created = tournament::ActiveModel {
        name: Set(name),
        created_at: Set(chrono::Utc::now()),
        created_by: Set(actor.username.clone()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for team in &teams {
        insert_team(&txn, created.id, team).await?;
    }

    txn.commit().await?;
    info!(tournament_id = created.id, "Created tournament");
    Ok(created)
}

/// Finds a tournament by id.
pub async fn get_tournament_by_id(
    db: &DatabaseConnection,
    tournament_id: i64,
) -> Result<Option<tournament::Model>> {
    Tournament::find_by_id(tournament_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists all tournaments, newest first.
pub async fn list_tournaments(db: &DatabaseConnection) -> Result<Vec<tournament::Model>> {
    Tournament::find()
        .order_by_desc(tournament::Column::CreatedAt)
        .order_by_desc(tournament::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Renames a tournament.
pub async fn rename_tournament(
    db: &DatabaseConnection,
    tournament_id: i64,
    name: String,
) -> Result<tournament::Model> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Tournament name cannot be empty".to_string(),
        });
    }

    let existing = require_tournament(db, tournament_id).await?;
    let mut active: tournament::ActiveModel = existing.into();
    active.name = Set(name);
    active.update(db).await.map_err(Into::into)
}

/// Deletes a tournament together with its teams and players.
#[instrument(skip(db, actor), fields(actor = %actor.username))]
pub async fn delete_tournament(
    db: &DatabaseConnection,
    actor: &Principal,
    tournament_id: i64,
) -> Result<()> {
    let txn = db.begin().await?;
    require_tournament(&txn, tournament_id).await?;

    // Dependents first so this holds even where foreign keys are not enforced
    let players = Player::delete_many()
        .filter(player::Column::TournamentId.eq(tournament_id))
        .exec(&txn)
        .await?;
    let teams = Team::delete_many()
        .filter(team::Column::TournamentId.eq(tournament_id))
        .exec(&txn)
        .await?;
    Tournament::delete_by_id(tournament_id).exec(&txn).await?;

    txn.commit().await?;
    info!(
        tournament_id,
        teams = teams.rows_affected,
        players = players.rows_affected,
        "Deleted tournament"
    );
    Ok(())
}

/// Loads a tournament with its teams, each team's players, and the full roster.
pub async fn tournament_overview(
    db: &DatabaseConnection,
    tournament_id: i64,
) -> Result<TournamentOverview> {
    let tournament = require_tournament(db, tournament_id).await?;

    let teams = Team::find()
        .filter(team::Column::TournamentId.eq(tournament_id))
        .order_by_asc(team::Column::Name)
        .all(db)
        .await?;
    let players = Player::find()
        .filter(player::Column::TournamentId.eq(tournament_id))
        .order_by_asc(player::Column::EmpId)
        .all(db)
        .await?;

    let teams = teams
        .into_iter()
        .map(|team| {
            let roster = players
                .iter()
                .filter(|p| p.team_id == Some(team.id))
                .cloned()
                .collect();
            TeamRoster {
                team,
                players: roster,
            }
        })
        .collect();

    Ok(TournamentOverview {
        tournament,
        teams,
        players,
    })
}
