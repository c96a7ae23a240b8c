//! Assignment engine - the only writer of a player's `team_id`, `bid_amount` and
//! `is_assigned`.
//!
//! Each operation runs in a single database transaction. The player-row update and the
//! matching ledger debit or credit commit together; any error drops the transaction
//! and rolls both back.
//!
//! A player is either *unassigned* (`team_id` null, bid 0) or *assigned* to exactly one
//! team. `assign_player` only moves a player out of the unassigned state, through a
//! conditional update, so two concurrent assignments of the same player cannot both
//! succeed.

use crate::{
    auth::Principal,
    core::{
        ledger,
        player::{PlayerCreate, duplicate_emp_id, find_player},
        team::find_team_in_tournament,
    },
    entities::{Player, Team, player, team},
    errors::{Error, Result},
};
use sea_orm::{TransactionTrait, prelude::*, sea_query::Expr};
use tracing::{info, instrument};

/// Request to sell a player to a team.
#[derive(Debug, Clone)]
pub struct AssignPlayer {
    /// Tournament both the team and the player belong to
    pub tournament_id: i64,
    /// Buying team
    pub team_id: i64,
    /// Player's business key
    pub emp_id: String,
    /// Amount debited from the team
    pub bid_amount: f64,
}

/// What happens to the player row when it leaves a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Release {
    /// Back to unassigned, row kept
    Reset,
    /// Row deleted
    Remove,
}

/// Zero bids are allowed; negative and non-finite bids are not.
fn validate_bid(bid_amount: f64) -> Result<()> {
    ledger::validate_amount(bid_amount)
}

/// Sells an unassigned player to a team.
///
/// Steps, in one transaction: resolve the team in the tournament, check its remaining
/// budget, mark the player assigned only if it is still unassigned, then debit the team.
///
/// # Errors
/// - `InvalidAmount` for a negative or non-finite bid
/// - `TeamNotFound` if the team is not in the tournament
/// - `InsufficientBudget` if the team cannot afford the bid
/// - `PlayerNotFound` if no such player exists in the tournament
/// - `AlreadyAssigned` if the player was already sold
#[instrument(
    skip(db, actor, request),
    fields(
        actor = %actor.username,
        tournament_id = request.tournament_id,
        team_id = request.team_id,
        emp_id = %request.emp_id,
        bid = request.bid_amount
    )
)]
pub async fn assign_player(
    db: &DatabaseConnection,
    actor: &Principal,
    mut request: AssignPlayer,
) -> Result<player::Model> {
    validate_bid(request.bid_amount)?;
    request.emp_id = request.emp_id.trim().to_string();

    let txn = db.begin().await?;

    let team = find_team_in_tournament(&txn, request.tournament_id, request.team_id).await?;
    if team.remaining_budget < request.bid_amount {
        return Err(Error::InsufficientBudget {
            remaining: team.remaining_budget,
            required: request.bid_amount,
        });
    }

    let claimed = Player::update_many()
        .col_expr(player::Column::TeamId, Expr::value(Some(team.id)))
        .col_expr(player::Column::BidAmount, Expr::value(request.bid_amount))
        .col_expr(player::Column::IsAssigned, Expr::value(true))
        .filter(player::Column::TournamentId.eq(request.tournament_id))
        .filter(player::Column::EmpId.eq(request.emp_id.as_str()))
        .filter(player::Column::IsAssigned.eq(false))
        .exec(&txn)
        .await?;

    if claimed.rows_affected == 0 {
        let existing = find_player(&txn, request.tournament_id, &request.emp_id).await?;
        return Err(match existing {
            Some(_) => Error::AlreadyAssigned {
                emp_id: request.emp_id,
            },
            None => Error::PlayerNotFound {
                emp_id: request.emp_id,
            },
        });
    }

    let team = ledger::debit(&txn, team.id, request.bid_amount).await?;

    let player = find_player(&txn, request.tournament_id, &request.emp_id)
        .await?
        .ok_or_else(|| Error::PlayerNotFound {
            emp_id: request.emp_id.clone(),
        })?;

    txn.commit().await?;
    info!(remaining = team.remaining_budget, "Player assigned");
    Ok(player)
}

/// Takes a player off a team, refunds the bid and returns the player to the pool.
///
/// # Errors
/// `PlayerNotFound` if the player is not on that team in that tournament.
#[instrument(skip(db, actor), fields(actor = %actor.username))]
pub async fn unassign_player(
    db: &DatabaseConnection,
    actor: &Principal,
    tournament_id: i64,
    team_id: i64,
    emp_id: &str,
) -> Result<player::Model> {
    release_from_team(db, tournament_id, team_id, emp_id, Release::Reset).await
}

/// Takes a player off a team, refunds the bid and deletes the player.
///
/// Returns the deleted row.
#[instrument(skip(db, actor), fields(actor = %actor.username))]
pub async fn remove_player_from_team(
    db: &DatabaseConnection,
    actor: &Principal,
    tournament_id: i64,
    team_id: i64,
    emp_id: &str,
) -> Result<player::Model> {
    release_from_team(db, tournament_id, team_id, emp_id, Release::Remove).await
}

async fn release_from_team(
    db: &DatabaseConnection,
    tournament_id: i64,
    team_id: i64,
    emp_id: &str,
    release: Release,
) -> Result<player::Model> {
    let emp_id = emp_id.trim();
    let txn = db.begin().await?;

    let player = Player::find()
        .filter(player::Column::TournamentId.eq(tournament_id))
        .filter(player::Column::TeamId.eq(team_id))
        .filter(player::Column::EmpId.eq(emp_id))
        .one(&txn)
        .await?
        .ok_or_else(|| Error::PlayerNotFound {
            emp_id: emp_id.to_string(),
        })?;

    let team = ledger::credit(&txn, team_id, player.bid_amount).await?;
    clear_captaincy(&txn, team_id, &player.emp_id).await?;

    let released = match release {
        Release::Reset => {
            reset_players(&txn, player::Column::Id.eq(player.id)).await?;
            find_player(&txn, tournament_id, emp_id)
                .await?
                .ok_or_else(|| Error::PlayerNotFound {
                    emp_id: emp_id.to_string(),
                })?
        }
        Release::Remove => {
            Player::delete_by_id(player.id).exec(&txn).await?;
            player
        }
    };

    txn.commit().await?;
    info!(
        emp_id,
        ?release,
        remaining = team.remaining_budget,
        "Player released from team"
    );
    Ok(released)
}

/// Deletes a player from a tournament, refunding the team first if the player was sold.
///
/// Returns the deleted row.
#[instrument(skip(db, actor), fields(actor = %actor.username))]
pub async fn delete_player(
    db: &DatabaseConnection,
    actor: &Principal,
    tournament_id: i64,
    emp_id: &str,
) -> Result<player::Model> {
    let emp_id = emp_id.trim();
    let txn = db.begin().await?;

    let player = find_player(&txn, tournament_id, emp_id)
        .await?
        .ok_or_else(|| Error::PlayerNotFound {
            emp_id: emp_id.to_string(),
        })?;

    if let Some(team_id) = player.team_id {
        ledger::credit(&txn, team_id, player.bid_amount).await?;
        clear_captaincy(&txn, team_id, &player.emp_id).await?;
    }

    Player::delete_by_id(player.id).exec(&txn).await?;
    txn.commit().await?;

    info!(emp_id, "Deleted player");
    Ok(player)
}

/// Returns every player of a team to the pool without crediting the team.
///
/// Used when the team itself is being deleted. Returns the number of players released.
pub async fn force_unassign_all<C>(conn: &C, team_id: i64) -> Result<u64>
where
    C: ConnectionTrait,
{
    reset_players(conn, player::Column::TeamId.eq(team_id)).await
}

/// Adds a brand-new player straight onto a team at a given bid.
///
/// The insert and the debit commit together; a duplicate `emp_id` leaves the team's
/// budget untouched.
#[instrument(skip(db, actor, candidate), fields(actor = %actor.username, emp_id = %candidate.emp_id))]
pub async fn sign_player(
    db: &DatabaseConnection,
    actor: &Principal,
    tournament_id: i64,
    team_id: i64,
    candidate: PlayerCreate,
    bid_amount: f64,
) -> Result<player::Model> {
    validate_bid(bid_amount)?;
    let candidate = candidate.normalized()?;

    let txn = db.begin().await?;

    let team = find_team_in_tournament(&txn, tournament_id, team_id).await?;
    if team.remaining_budget < bid_amount {
        return Err(Error::InsufficientBudget {
            remaining: team.remaining_budget,
            required: bid_amount,
        });
    }

    let emp_id = candidate.emp_id.clone();
    let mut row = candidate.into_active_model(tournament_id);
    row.team_id = sea_orm::Set(Some(team.id));
    row.bid_amount = sea_orm::Set(bid_amount);
    row.is_assigned = sea_orm::Set(true);

    let player = row
        .insert(&txn)
        .await
        .map_err(|e| Error::from_write(e, duplicate_emp_id(&emp_id)))?;

    ledger::debit(&txn, team.id, bid_amount).await?;
    txn.commit().await?;

    info!(player_id = player.id, "Player signed directly to team");
    Ok(player)
}

async fn reset_players<C>(conn: &C, condition: sea_orm::sea_query::SimpleExpr) -> Result<u64>
where
    C: ConnectionTrait,
{
    let result = Player::update_many()
        .col_expr(player::Column::TeamId, Expr::value(Option::<i64>::None))
        .col_expr(player::Column::BidAmount, Expr::value(0.0))
        .col_expr(player::Column::IsAssigned, Expr::value(false))
        .filter(condition)
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// A player leaving a team cannot stay its captain or vice-captain.
async fn clear_captaincy<C>(conn: &C, team_id: i64, emp_id: &str) -> Result<()>
where
    C: ConnectionTrait,
{
    for column in [team::Column::CaptainId, team::Column::ViceCaptainId] {
        Team::update_many()
            .col_expr(column, Expr::value(Option::<String>::None))
            .filter(team::Column::Id.eq(team_id))
            .filter(column.eq(emp_id))
            .exec(conn)
            .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{
        core::{ledger::audit_team, status::auction_status, team as team_ops},
        test_utils::*,
    };
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn request(tournament_id: i64, team_id: i64, emp_id: &str, bid_amount: f64) -> AssignPlayer {
        AssignPlayer {
            tournament_id,
            team_id,
            emp_id: emp_id.to_string(),
            bid_amount,
        }
    }

    #[tokio::test]
    async fn test_assign_rejects_invalid_bids() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        for bid in [-10.0, f64::NAN, f64::INFINITY] {
            let result = assign_player(&db, &test_auctioneer(), request(1, 1, "E1", bid)).await;
            assert!(matches!(result, Err(Error::InvalidAmount { amount: _ })));
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_assign_team_not_found() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<team::Model>::new()])
            .into_connection();

        let result = assign_player(&db, &test_auctioneer(), request(1, 999, "E1", 10.0)).await;
        assert!(matches!(result, Err(Error::TeamNotFound { id: 999 })));

        Ok(())
    }

    #[tokio::test]
    async fn test_assign_player_debits_team() -> Result<()> {
        let (db, tournament, team, _players) = setup_auction(1, 1000.0).await?;

        let player =
            assign_player(&db, &test_auctioneer(), request(tournament.id, team.id, "E1", 250.0))
                .await?;

        assert!(player.is_assigned);
        assert_eq!(player.team_id, Some(team.id));
        assert_eq!(player.bid_amount, 250.0);
        assert_eq!(reload_team(&db, team.id).await?.remaining_budget, 750.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_assign_zero_bid_is_accepted() -> Result<()> {
        let (db, tournament, team, _players) = setup_auction(1, 100.0).await?;

        let player =
            assign_player(&db, &test_auctioneer(), request(tournament.id, team.id, "E1", 0.0))
                .await?;

        assert!(player.is_assigned);
        assert_eq!(reload_team(&db, team.id).await?.remaining_budget, 100.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_insufficient_budget_rejection() -> Result<()> {
        let (db, tournament, team, _players) = setup_auction(1, 50.0).await?;

        let result =
            assign_player(&db, &test_auctioneer(), request(tournament.id, team.id, "E1", 100.0))
                .await;
        assert!(matches!(
            result,
            Err(Error::InsufficientBudget {
                remaining: 50.0,
                required: 100.0
            })
        ));

        assert_eq!(reload_team(&db, team.id).await?.remaining_budget, 50.0);
        let player = reload_player(&db, tournament.id, "E1").await?;
        assert!(!player.is_assigned);
        assert!(player.team_id.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_assign_unknown_player() -> Result<()> {
        let (db, tournament, team, _players) = setup_auction(1, 1000.0).await?;

        let result =
            assign_player(&db, &test_auctioneer(), request(tournament.id, team.id, "E404", 10.0))
                .await;
        assert!(matches!(result, Err(Error::PlayerNotFound { emp_id: _ })));
        assert_eq!(reload_team(&db, team.id).await?.remaining_budget, 1000.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_assign_team_from_other_tournament() -> Result<()> {
        let (db, tournament, _team, _players) = setup_auction(1, 1000.0).await?;
        let other = create_test_tournament(&db, "Other Cup").await?;
        let foreign_team = create_test_team(&db, other.id, "Foreign", 1000.0).await?;

        let result = assign_player(
            &db,
            &test_auctioneer(),
            request(tournament.id, foreign_team.id, "E1", 10.0),
        )
        .await;
        assert!(matches!(result, Err(Error::TeamNotFound { id: _ })));

        Ok(())
    }

    #[tokio::test]
    async fn test_second_assignment_is_rejected() -> Result<()> {
        let (db, tournament, team, _players) = setup_auction(1, 1000.0).await?;
        let rival = create_test_team(&db, tournament.id, "Rival", 1000.0).await?;

        assign_player(&db, &test_auctioneer(), request(tournament.id, team.id, "E1", 100.0))
            .await?;
        let result =
            assign_player(&db, &test_auctioneer(), request(tournament.id, rival.id, "E1", 200.0))
                .await;

        assert!(matches!(result, Err(Error::AlreadyAssigned { emp_id: _ })));
        assert_eq!(reload_team(&db, team.id).await?.remaining_budget, 900.0);
        assert_eq!(reload_team(&db, rival.id).await?.remaining_budget, 1000.0);

        let player = reload_player(&db, tournament.id, "E1").await?;
        assert_eq!(player.team_id, Some(team.id));
        assert_eq!(player.bid_amount, 100.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_assignment_succeeds_once() -> Result<()> {
        let (db, tournament, team, _players) = setup_auction(1, 1000.0).await?;
        let rival = create_test_team(&db, tournament.id, "Rival", 1000.0).await?;
        let auctioneer = test_auctioneer();

        let (first, second) = tokio::join!(
            assign_player(&db, &auctioneer, request(tournament.id, team.id, "E1", 300.0)),
            assign_player(&db, &auctioneer, request(tournament.id, rival.id, "E1", 400.0)),
        );

        let outcomes = [first, second];
        let successes = outcomes.iter().filter(|r| r.is_ok()).count();
        let already = outcomes
            .iter()
            .filter(|r| matches!(r, Err(Error::AlreadyAssigned { .. })))
            .count();
        assert_eq!(successes, 1);
        assert_eq!(already, 1);

        // Exactly one debit happened
        let spent =
            reload_team(&db, team.id).await?.spent() + reload_team(&db, rival.id).await?.spent();
        let player = reload_player(&db, tournament.id, "E1").await?;
        assert_eq!(spent, player.bid_amount);
        assert!(audit_team(&db, team.id).await?.consistent);
        assert!(audit_team(&db, rival.id).await?.consistent);

        Ok(())
    }

    #[tokio::test]
    async fn test_assign_unassign_round_trip() -> Result<()> {
        let (db, tournament, team, _players) = setup_auction(1, 1000.0).await?;
        let before = reload_team(&db, team.id).await?.remaining_budget;

        assign_player(&db, &test_auctioneer(), request(tournament.id, team.id, "E1", 100.0))
            .await?;
        let player = unassign_player(&db, &test_auctioneer(), tournament.id, team.id, "E1").await?;

        assert!(!player.is_assigned);
        assert!(player.team_id.is_none());
        assert_eq!(player.bid_amount, 0.0);
        assert_eq!(reload_team(&db, team.id).await?.remaining_budget, before);

        // Back in the pool, so it can be sold again
        assign_player(&db, &test_auctioneer(), request(tournament.id, team.id, "E1", 50.0))
            .await?;
        assert_eq!(reload_team(&db, team.id).await?.remaining_budget, 950.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_unassign_requires_membership() -> Result<()> {
        let (db, tournament, team, _players) = setup_auction(1, 1000.0).await?;
        let rival = create_test_team(&db, tournament.id, "Rival", 1000.0).await?;
        assign_player(&db, &test_auctioneer(), request(tournament.id, team.id, "E1", 100.0))
            .await?;

        let result = unassign_player(&db, &test_auctioneer(), tournament.id, rival.id, "E1").await;
        assert!(matches!(result, Err(Error::PlayerNotFound { emp_id: _ })));
        assert_eq!(reload_team(&db, rival.id).await?.remaining_budget, 1000.0);
        assert_eq!(reload_team(&db, team.id).await?.remaining_budget, 900.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_player_from_team_deletes_and_credits() -> Result<()> {
        let (db, tournament, team, _players) = setup_auction(2, 1000.0).await?;
        assign_player(&db, &test_auctioneer(), request(tournament.id, team.id, "E1", 300.0))
            .await?;

        let removed =
            remove_player_from_team(&db, &test_admin(), tournament.id, team.id, "E1").await?;
        assert_eq!(removed.emp_id, "E1");

        assert!(find_player(&db, tournament.id, "E1").await?.is_none());
        assert_eq!(reload_team(&db, team.id).await?.remaining_budget, 1000.0);
        assert_eq!(auction_status(&db, tournament.id).await?.total, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_player_credits_team() -> Result<()> {
        let (db, tournament, team, _players) = setup_auction(2, 1000.0).await?;
        assign_player(&db, &test_auctioneer(), request(tournament.id, team.id, "E1", 400.0))
            .await?;

        delete_player(&db, &test_admin(), tournament.id, "E1").await?;
        assert_eq!(reload_team(&db, team.id).await?.remaining_budget, 1000.0);

        // Unassigned players are simply removed
        delete_player(&db, &test_admin(), tournament.id, "E2").await?;
        assert_eq!(auction_status(&db, tournament.id).await?.total, 0);

        let missing = delete_player(&db, &test_admin(), tournament.id, "E2").await;
        assert!(matches!(missing, Err(Error::PlayerNotFound { emp_id: _ })));

        Ok(())
    }

    #[tokio::test]
    async fn test_release_clears_captaincy() -> Result<()> {
        let (db, tournament, team, _players) = setup_auction(2, 1000.0).await?;
        assign_player(&db, &test_auctioneer(), request(tournament.id, team.id, "E1", 100.0))
            .await?;
        assign_player(&db, &test_auctioneer(), request(tournament.id, team.id, "E2", 100.0))
            .await?;
        team_ops::set_captains(
            &db,
            tournament.id,
            team.id,
            team_ops::CaptainSelection {
                captain_id: Some("E1".to_string()),
                vice_captain_id: Some("E2".to_string()),
            },
        )
        .await?;

        unassign_player(&db, &test_auctioneer(), tournament.id, team.id, "E1").await?;

        let reloaded = reload_team(&db, team.id).await?;
        assert!(reloaded.captain_id.is_none());
        assert_eq!(reloaded.vice_captain_id.as_deref(), Some("E2"));

        Ok(())
    }

    #[tokio::test]
    async fn test_force_unassign_all_does_not_credit() -> Result<()> {
        let (db, tournament, team, _players) = setup_auction(3, 1000.0).await?;
        for emp_id in ["E1", "E2", "E3"] {
            assign_player(&db, &test_auctioneer(), request(tournament.id, team.id, emp_id, 100.0))
                .await?;
        }

        let released = force_unassign_all(&db, team.id).await?;
        assert_eq!(released, 3);

        // The team row keeps its debits; only its deletion makes that moot
        assert_eq!(reload_team(&db, team.id).await?.remaining_budget, 700.0);
        for emp_id in ["E1", "E2", "E3"] {
            let player = reload_player(&db, tournament.id, emp_id).await?;
            assert!(!player.is_assigned);
            assert_eq!(player.bid_amount, 0.0);
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_sign_player_inserts_and_debits() -> Result<()> {
        let (db, tournament, team) = setup_with_team(1000.0).await?;

        let player = sign_player(
            &db,
            &test_admin(),
            tournament.id,
            team.id,
            PlayerCreate::new("E50", "Meera", "Wicket-keeper"),
            200.0,
        )
        .await?;

        assert!(player.is_assigned);
        assert_eq!(player.team_id, Some(team.id));
        assert_eq!(reload_team(&db, team.id).await?.remaining_budget, 800.0);

        // Duplicate emp_id: rejected, nothing debited
        let result = sign_player(
            &db,
            &test_admin(),
            tournament.id,
            team.id,
            PlayerCreate::new("E50", "Someone Else", "Bowler"),
            100.0,
        )
        .await;
        assert!(matches!(result, Err(Error::DuplicateKey { message: _ })));
        assert_eq!(reload_team(&db, team.id).await?.remaining_budget, 800.0);

        // Over budget: rejected, nothing inserted
        let result = sign_player(
            &db,
            &test_admin(),
            tournament.id,
            team.id,
            PlayerCreate::new("E51", "Big Hitter", "Batsman"),
            5000.0,
        )
        .await;
        assert!(matches!(result, Err(Error::InsufficientBudget { .. })));
        assert!(find_player(&db, tournament.id, "E51").await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_ledger_balances_over_mixed_operations() -> Result<()> {
        let (db, tournament, team, _players) = setup_auction(5, 1000.0).await?;
        let rival = create_test_team(&db, tournament.id, "Rival", 600.0).await?;
        let auctioneer = test_auctioneer();

        assign_player(&db, &auctioneer, request(tournament.id, team.id, "E1", 150.0)).await?;
        assign_player(&db, &auctioneer, request(tournament.id, rival.id, "E2", 275.5)).await?;
        assign_player(&db, &auctioneer, request(tournament.id, team.id, "E3", 90.0)).await?;
        let _ = assign_player(&db, &auctioneer, request(tournament.id, rival.id, "E4", 999.0)).await;
        unassign_player(&db, &auctioneer, tournament.id, team.id, "E1").await?;
        assign_player(&db, &auctioneer, request(tournament.id, rival.id, "E1", 120.0)).await?;
        delete_player(&db, &test_admin(), tournament.id, "E3").await?;
        let _ = assign_player(&db, &auctioneer, request(tournament.id, team.id, "E2", 10.0)).await;

        for team_id in [team.id, rival.id] {
            let audit = audit_team(&db, team_id).await?;
            assert!(audit.consistent, "ledger drifted for team {team_id}: {audit:?}");
            assert!(audit.remaining_budget >= 0.0);
            assert!(audit.committed <= audit.total_budget);
        }

        // is_assigned always mirrors team_id
        for player in crate::core::player::list_players(&db, tournament.id).await? {
            assert_eq!(player.is_assigned, player.team_id.is_some());
            if !player.is_assigned {
                assert_eq!(player.bid_amount, 0.0);
            }
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_keys_are_trimmed() -> Result<()> {
        let (db, tournament, team, _players) = setup_auction(2, 1000.0).await?;
        let auctioneer = test_auctioneer();

        let sold =
            assign_player(&db, &auctioneer, request(tournament.id, team.id, " E1 ", 100.0)).await?;
        assert_eq!(sold.emp_id, "E1");
        assert_eq!(sold.team_id, Some(team.id));

        unassign_player(&db, &auctioneer, tournament.id, team.id, "E1\t").await?;
        assign_player(&db, &auctioneer, request(tournament.id, team.id, "E1", 50.0)).await?;
        remove_player_from_team(&db, &auctioneer, tournament.id, team.id, "  E1").await?;
        delete_player(&db, &test_admin(), tournament.id, " E2 ").await?;

        assert!(find_player(&db, tournament.id, "E1").await?.is_none());
        assert!(find_player(&db, tournament.id, "E2").await?.is_none());
        assert_eq!(reload_team(&db, team.id).await?.remaining_budget, 1000.0);

        Ok(())
    }

    /// Rounds each race is repeated for.
    const RACE_ROUNDS: usize = 20;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_assignments_of_one_player() -> Result<()> {
        let (_dir, db) = setup_file_db().await?;
        let db = std::sync::Arc::new(db);

        for round in 0..RACE_ROUNDS {
            let tournament = create_test_tournament(&db, &format!("Race {round}")).await?;
            let home = create_test_team(&db, tournament.id, "Home", 1000.0).await?;
            let away = create_test_team(&db, tournament.id, "Away", 1000.0).await?;
            create_test_player(&db, tournament.id, "E1").await?;

            let tournament_id = tournament.id;
            let (home_id, away_id) = (home.id, away.id);
            let first = tokio::spawn({
                let db = db.clone();
                async move {
                    let bid = request(tournament_id, home_id, "E1", 300.0);
                    assign_player(&db, &test_auctioneer(), bid).await
                }
            });
            let second = tokio::spawn({
                let db = db.clone();
                async move {
                    let bid = request(tournament_id, away_id, "E1", 400.0);
                    assign_player(&db, &test_auctioneer(), bid).await
                }
            });
            let outcomes = [first.await.unwrap(), second.await.unwrap()];

            let successes = outcomes.iter().filter(|r| r.is_ok()).count();
            let already = outcomes
                .iter()
                .filter(|r| matches!(r, Err(Error::AlreadyAssigned { .. })))
                .count();
            assert_eq!(successes, 1, "round {round}: {outcomes:?}");
            assert_eq!(already, 1, "round {round}: {outcomes:?}");

            let player = reload_player(&db, tournament.id, "E1").await?;
            let spent =
                reload_team(&db, home.id).await?.spent() + reload_team(&db, away.id).await?.spent();
            assert_eq!(spent, player.bid_amount);
            assert!(audit_team(&*db, home.id).await?.consistent);
            assert!(audit_team(&*db, away.id).await?.consistent);
        }

        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_debits_against_one_team() -> Result<()> {
        let (_dir, db) = setup_file_db().await?;
        let db = std::sync::Arc::new(db);

        for round in 0..RACE_ROUNDS {
            let tournament = create_test_tournament(&db, &format!("Race {round}")).await?;
            let buyer = create_test_team(&db, tournament.id, "Buyer", 100.0).await?;
            create_test_player(&db, tournament.id, "E1").await?;
            create_test_player(&db, tournament.id, "E2").await?;

            let (tournament_id, buyer_id) = (tournament.id, buyer.id);
            let tasks = ["E1", "E2"].map(|emp_id| {
                let db = db.clone();
                tokio::spawn(async move {
                    let bid = request(tournament_id, buyer_id, emp_id, 60.0);
                    assign_player(&db, &test_auctioneer(), bid).await
                })
            });
            let mut outcomes = Vec::with_capacity(tasks.len());
            for task in tasks {
                outcomes.push(task.await.unwrap());
            }

            let successes = outcomes.iter().filter(|r| r.is_ok()).count();
            let insufficient = outcomes
                .iter()
                .filter(|r| matches!(r, Err(Error::InsufficientBudget { .. })))
                .count();
            assert_eq!(successes, 1, "round {round}: {outcomes:?}");
            assert_eq!(insufficient, 1, "round {round}: {outcomes:?}");

            let audit = audit_team(&*db, buyer.id).await?;
            assert!(audit.consistent, "round {round}: {audit:?}");
            assert_eq!(audit.remaining_budget, 40.0);
            assert_eq!(auction_status(&db, tournament.id).await?.assigned, 1);
        }

        Ok(())
    }
}
