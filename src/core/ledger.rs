//! Budget ledger - the only writer of `teams.remaining_budget`.
//!
//! Every operation is generic over [`ConnectionTrait`] so it runs inside the caller's
//! transaction. Debits are conditional updates (`remaining_budget >= amount`), which keeps
//! the sufficiency check honest even when two debits against the same team race.

use crate::{
    entities::{Player, Team, player, team},
    errors::{Error, Result},
};
use sea_orm::{prelude::*, sea_query::Expr};
use tracing::{debug, instrument, warn};

/// Outcome of changing a team's total budget.
#[derive(Debug, Clone)]
pub struct BudgetRebase {
    /// The team after the change
    pub team: team::Model,
    /// Amount already committed to players, carried over unchanged
    pub spent: f64,
    /// How far the new total falls short of `spent`, if it does
    pub overspent: Option<f64>,
}

/// Result of checking a team's ledger against its assigned players.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerAudit {
    /// Team that was audited
    pub team_id: i64,
    /// Stored total budget
    pub total_budget: f64,
    /// Stored remaining budget
    pub remaining_budget: f64,
    /// Sum of bids of players currently assigned to the team
    pub committed: f64,
    /// Whether `remaining_budget == total_budget - committed`
    pub consistent: bool,
}

const LEDGER_EPSILON: f64 = 1e-6;

/// Rejects amounts that are negative, NaN or infinite.
pub(crate) fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

async fn load_team<C>(conn: &C, team_id: i64) -> Result<team::Model>
where
    C: ConnectionTrait,
{
    Team::find_by_id(team_id)
        .one(conn)
        .await?
        .ok_or(Error::TeamNotFound { id: team_id })
}

/// Takes `amount` out of the team's remaining budget.
///
/// # Errors
/// - `InvalidAmount` if the amount is negative or not finite
/// - `TeamNotFound` if the team does not exist
/// - `InsufficientBudget` if `remaining_budget < amount`
#[instrument(skip(conn))]
pub async fn debit<C>(conn: &C, team_id: i64, amount: f64) -> Result<team::Model>
where
    C: ConnectionTrait,
{
    validate_amount(amount)?;
    load_team(conn, team_id).await?;

    let result = Team::update_many()
        .col_expr(
            team::Column::RemainingBudget,
            Expr::col(team::Column::RemainingBudget).sub(amount),
        )
        .filter(team::Column::Id.eq(team_id))
        .filter(team::Column::RemainingBudget.gte(amount))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        let team = load_team(conn, team_id).await?;
        return Err(Error::InsufficientBudget {
            remaining: team.remaining_budget,
            required: amount,
        });
    }

    let team = load_team(conn, team_id).await?;
    debug!(remaining = team.remaining_budget, "Debited team budget");
    Ok(team)
}

/// Gives `amount` back to the team's remaining budget.
///
/// The amount must be one that was previously debited; no upper bound is checked.
#[instrument(skip(conn))]
pub async fn credit<C>(conn: &C, team_id: i64, amount: f64) -> Result<team::Model>
where
    C: ConnectionTrait,
{
    validate_amount(amount)?;
    load_team(conn, team_id).await?;

    Team::update_many()
        .col_expr(
            team::Column::RemainingBudget,
            Expr::col(team::Column::RemainingBudget).add(amount),
        )
        .filter(team::Column::Id.eq(team_id))
        .exec(conn)
        .await?;

    let team = load_team(conn, team_id).await?;
    debug!(remaining = team.remaining_budget, "Credited team budget");
    Ok(team)
}

/// Changes a team's total budget while keeping what it already spent.
///
/// `new_remaining = new_total - (old_total - old_remaining)`. A new total below the amount
/// already spent leaves the remaining budget negative; that is reported through
/// [`BudgetRebase::overspent`] rather than corrected.
#[instrument(skip(conn))]
pub async fn rebase<C>(conn: &C, team_id: i64, new_total_budget: f64) -> Result<BudgetRebase>
where
    C: ConnectionTrait,
{
    validate_amount(new_total_budget)?;
    let before = load_team(conn, team_id).await?;
    let spent = before.spent();

    // SET expressions see the old row, so total_budget on the right is the old total
    Team::update_many()
        .col_expr(team::Column::TotalBudget, Expr::value(new_total_budget))
        .col_expr(
            team::Column::RemainingBudget,
            Expr::col(team::Column::RemainingBudget)
                .add(new_total_budget)
                .sub(Expr::col(team::Column::TotalBudget)),
        )
        .filter(team::Column::Id.eq(team_id))
        .exec(conn)
        .await?;

    let team = load_team(conn, team_id).await?;
    let overspent = (team.remaining_budget < 0.0).then(|| -team.remaining_budget);
    if let Some(shortfall) = overspent {
        warn!(
            team_id,
            new_total_budget, spent, shortfall, "Team budget set below amount already spent"
        );
    }

    Ok(BudgetRebase {
        team,
        spent,
        overspent,
    })
}

/// Restores every team in a tournament to its full budget.
///
/// Only valid once the tournament has no assigned players left. Returns the number of
/// teams touched.
pub async fn reset_budgets<C>(conn: &C, tournament_id: i64) -> Result<u64>
where
    C: ConnectionTrait,
{
    let result = Team::update_many()
        .col_expr(team::Column::RemainingBudget, Expr::col(team::Column::TotalBudget).into())
        .filter(team::Column::TournamentId.eq(tournament_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Sums the bids of the players currently assigned to a team.
pub async fn committed_spend<C>(conn: &C, team_id: i64) -> Result<f64>
where
    C: ConnectionTrait,
{
    let players = Player::find()
        .filter(player::Column::TeamId.eq(team_id))
        .filter(player::Column::IsAssigned.eq(true))
        .all(conn)
        .await?;

    Ok(players.iter().map(|p| p.bid_amount).sum())
}

/// Checks that a team's stored remaining budget matches its assigned players.
pub async fn audit_team<C>(conn: &C, team_id: i64) -> Result<LedgerAudit>
where
    C: ConnectionTrait,
{
    let team = load_team(conn, team_id).await?;
    let committed = committed_spend(conn, team_id).await?;
    let consistent =
        (team.total_budget - committed - team.remaining_budget).abs() < LEDGER_EPSILON;

    if !consistent {
        warn!(
            team_id,
            total = team.total_budget,
            remaining = team.remaining_budget,
            committed,
            "Team ledger does not match assigned players"
        );
    }

    Ok(LedgerAudit {
        team_id,
        total_budget: team.total_budget,
        remaining_budget: team.remaining_budget,
        committed,
        consistent,
    })
}
