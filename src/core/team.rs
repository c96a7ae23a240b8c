//! Team business logic - creation, budget updates, captains and deletion.
//!
//! Budget fields are only changed through the ledger (`rebase` on update) and team
//! deletion goes through the assignment engine so the team's players survive as
//! unassigned roster entries.

use crate::{
    auth::Principal,
    core::{assignment, ledger, tournament},
    entities::{Player, Team, player, team},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Request to create a team.
#[derive(Debug, Clone)]
pub struct NewTeam {
    /// Team name, unique within the tournament
    pub name: String,
    /// Starting (and total) budget
    pub budget: f64,
}

impl NewTeam {
    /// Creates a team request.
    pub fn new(name: impl Into<String>, budget: f64) -> Self {
        Self {
            name: name.into(),
            budget,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation {
                message: "Team name cannot be empty".to_string(),
            });
        }
        ledger::validate_amount(self.budget)
    }
}

/// Request to update a team's name and, optionally, its total budget.
#[derive(Debug, Clone)]
pub struct TeamUpdate {
    /// New team name
    pub name: String,
    /// New total budget; the amount already spent is preserved
    pub total_budget: Option<f64>,
}

/// Captain and vice-captain choice; `None` clears the slot.
#[derive(Debug, Clone, Default)]
pub struct CaptainSelection {
    /// `emp_id` of the captain
    pub captain_id: Option<String>,
    /// `emp_id` of the vice-captain
    pub vice_captain_id: Option<String>,
}

/// Result of a team update.
#[derive(Debug, Clone)]
pub struct TeamUpdateOutcome {
    /// The team after the update
    pub team: team::Model,
    /// Shortfall when the new total is below what the team already spent
    pub overspent: Option<f64>,
}

/// Inserts a team row inside an open connection or transaction.
pub(crate) async fn insert_team<C>(conn: &C, tournament_id: i64, new_team: &NewTeam) -> Result<team::Model>
where
    C: ConnectionTrait,
{
    new_team.validate()?;
    let name = new_team.name.trim().to_string();

    let model = team::ActiveModel {
        tournament_id: Set(tournament_id),
        name: Set(name.clone()),
        total_budget: Set(new_team.budget),
        remaining_budget: Set(new_team.budget),
        captain_id: Set(None),
        vice_captain_id: Set(None),
        ..Default::default()
    };

    model.insert(conn).await.map_err(|e| {
        Error::from_write(e, format!("team name '{name}' already exists in this tournament"))
    })
}

/// Finds a team by id within a tournament.
///
/// # Errors
/// `TeamNotFound` if the team does not exist or belongs to another tournament.
pub async fn find_team_in_tournament<C>(conn: &C, tournament_id: i64, team_id: i64) -> Result<team::Model>
where
    C: ConnectionTrait,
{
    Team::find_by_id(team_id)
        .filter(team::Column::TournamentId.eq(tournament_id))
        .one(conn)
        .await?
        .ok_or(Error::TeamNotFound { id: team_id })
}

/// Creates a team whose remaining budget starts equal to its total budget.
#[instrument(skip(db, new_team), fields(name = %new_team.name))]
pub async fn create_team(
    db: &DatabaseConnection,
    tournament_id: i64,
    new_team: NewTeam,
) -> Result<team::Model> {
    new_team.validate()?;
    tournament::require_tournament(db, tournament_id).await?;

    let team = insert_team(db, tournament_id, &new_team).await?;
    info!(team_id = team.id, "Created team");
    Ok(team)
}

/// Finds a team by id within a tournament, returning None if absent.
pub async fn get_team(
    db: &DatabaseConnection,
    tournament_id: i64,
    team_id: i64,
) -> Result<Option<team::Model>> {
    Team::find_by_id(team_id)
        .filter(team::Column::TournamentId.eq(tournament_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists a tournament's teams in name order.
pub async fn list_teams(db: &DatabaseConnection, tournament_id: i64) -> Result<Vec<team::Model>> {
    Team::find()
        .filter(team::Column::TournamentId.eq(tournament_id))
        .order_by_asc(team::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists the players currently assigned to a team, highest bid first.
pub async fn team_players(
    db: &DatabaseConnection,
    tournament_id: i64,
    team_id: i64,
) -> Result<Vec<player::Model>> {
    Player::find()
        .filter(player::Column::TournamentId.eq(tournament_id))
        .filter(player::Column::TeamId.eq(team_id))
        .order_by_desc(player::Column::BidAmount)
        .order_by_asc(player::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Renames a team and, when a new total budget is given, rebases its ledger.
#[instrument(skip(db, update))]
pub async fn update_team(
    db: &DatabaseConnection,
    tournament_id: i64,
    team_id: i64,
    update: TeamUpdate,
) -> Result<TeamUpdateOutcome> {
    let name = update.name.trim().to_string();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Team name cannot be empty".to_string(),
        });
    }

    let txn = db.begin().await?;
    let existing = find_team_in_tournament(&txn, tournament_id, team_id).await?;

    let mut active: team::ActiveModel = existing.into();
    active.name = Set(name.clone());
    active.update(&txn).await.map_err(|e| {
        Error::from_write(e, format!("team name '{name}' already exists in this tournament"))
    })?;

    let overspent = match update.total_budget {
        Some(total) => ledger::rebase(&txn, team_id, total).await?.overspent,
        None => None,
    };

    let team = find_team_in_tournament(&txn, tournament_id, team_id).await?;
    txn.commit().await?;

    Ok(TeamUpdateOutcome { team, overspent })
}

/// Deletes a team. Its players stay in the tournament as unassigned; no budget is
/// credited since the team's ledger goes away with it.
///
/// Returns the number of players that were released.
#[instrument(skip(db, actor), fields(actor = %actor.username))]
pub async fn delete_team(
    db: &DatabaseConnection,
    actor: &Principal,
    tournament_id: i64,
    team_id: i64,
) -> Result<u64> {
    let txn = db.begin().await?;
    let team = find_team_in_tournament(&txn, tournament_id, team_id).await?;

    let released = assignment::force_unassign_all(&txn, team.id).await?;
    Team::delete_by_id(team.id).exec(&txn).await?;

    txn.commit().await?;
    info!(team_id, released, "Deleted team");
    Ok(released)
}

/// Sets (or clears) the captain and vice-captain. Each must be a member of the team.
#[instrument(skip(db))]
pub async fn set_captains(
    db: &DatabaseConnection,
    tournament_id: i64,
    team_id: i64,
    selection: CaptainSelection,
) -> Result<team::Model> {
    let team = find_team_in_tournament(db, tournament_id, team_id).await?;

    for (emp_id, label) in [
        (&selection.captain_id, "Captain"),
        (&selection.vice_captain_id, "Vice-captain"),
    ] {
        if let Some(emp_id) = emp_id {
            let member = Player::find()
                .filter(player::Column::EmpId.eq(emp_id.as_str()))
                .filter(player::Column::TeamId.eq(team_id))
                .one(db)
                .await?;
            if member.is_none() {
                return Err(Error::Validation {
                    message: format!("{label} must be a member of this team"),
                });
            }
        }
    }

    let mut active: team::ActiveModel = team.into();
    active.captain_id = Set(selection.captain_id);
    active.vice_captain_id = Set(selection.vice_captain_id);
    active.update(db).await.map_err(Into::into)
}
