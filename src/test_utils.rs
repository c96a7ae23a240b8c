//! Shared test utilities for `AuctionBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating tournaments, teams and players with sensible defaults.

use crate::{
    auth::{Principal, Role},
    core::{
        assignment::{self, AssignPlayer},
        player::{self, PlayerCreate},
        team::{self, NewTeam},
    },
    entities::{self, Team},
    errors::{Error, Result},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a file-backed `SQLite` database in a temporary directory.
///
/// In-memory databases are private to a single connection, so tests that race two
/// operations need a real file for the pool to open several connections to. Keep the
/// returned `TempDir` alive for as long as the connection is used.
pub async fn setup_file_db() -> Result<(tempfile::TempDir, DatabaseConnection)> {
    let dir = tempfile::TempDir::new()?;
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("auction.db").display());
    let db = sea_orm::Database::connect(&url).await?;
    crate::config::database::create_tables(&db).await?;
    Ok((dir, db))
}

/// Admin principal named "admin".
pub fn test_admin() -> Principal {
    Principal::new("admin", Role::Admin)
}

/// Auctioneer principal named "auctioneer".
pub fn test_auctioneer() -> Principal {
    Principal::new("auctioneer", Role::Auctioneer)
}

/// Creates a tournament with no teams.
pub async fn create_test_tournament(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::tournament::Model> {
    let tournament = entities::tournament::ActiveModel {
        name: Set(name.to_string()),
        created_at: Set(chrono::Utc::now()),
        created_by: Set("admin".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(tournament)
}

/// Creates a team with the full budget remaining.
pub async fn create_test_team(
    db: &DatabaseConnection,
    tournament_id: i64,
    name: &str,
    budget: f64,
) -> Result<entities::team::Model> {
    team::create_team(db, tournament_id, NewTeam::new(name, budget)).await
}

/// Creates an unassigned player.
///
/// # Defaults
/// * `name`: "Player {emp_id}"
/// * `player_type`: "Batsman"
pub async fn create_test_player(
    db: &DatabaseConnection,
    tournament_id: i64,
    emp_id: &str,
) -> Result<entities::player::Model> {
    player::create_player(
        db,
        tournament_id,
        PlayerCreate::new(emp_id, format!("Player {emp_id}"), "Batsman"),
    )
    .await
}

/// Sets up a tournament with one team called "Test Team".
/// Returns (db, tournament, team).
pub async fn setup_with_team(
    budget: f64,
) -> Result<(
    DatabaseConnection,
    entities::tournament::Model,
    entities::team::Model,
)> {
    let db = setup_test_db().await?;
    let tournament = create_test_tournament(&db, "Test Cup").await?;
    let team = create_test_team(&db, tournament.id, "Test Team", budget).await?;
    Ok((db, tournament, team))
}

/// Sets up a tournament with one team and `player_count` unassigned players `E1..En`.
pub async fn setup_auction(
    player_count: usize,
    budget: f64,
) -> Result<(
    DatabaseConnection,
    entities::tournament::Model,
    entities::team::Model,
    Vec<entities::player::Model>,
)> {
    let (db, tournament, team) = setup_with_team(budget).await?;
    let mut players = Vec::with_capacity(player_count);
    for n in 1..=player_count {
        players.push(create_test_player(&db, tournament.id, &format!("E{n}")).await?);
    }
    Ok((db, tournament, team, players))
}

/// Assigns a player as the test auctioneer.
pub async fn assign_test_player(
    db: &DatabaseConnection,
    tournament_id: i64,
    team_id: i64,
    emp_id: &str,
    bid_amount: f64,
) -> Result<entities::player::Model> {
    assignment::assign_player(
        db,
        &test_auctioneer(),
        AssignPlayer {
            tournament_id,
            team_id,
            emp_id: emp_id.to_string(),
            bid_amount,
        },
    )
    .await
}

/// Re-reads a team from the database.
pub async fn reload_team(db: &DatabaseConnection, team_id: i64) -> Result<entities::team::Model> {
    Team::find_by_id(team_id)
        .one(db)
        .await?
        .ok_or(Error::TeamNotFound { id: team_id })
}

/// Re-reads a player from the database.
pub async fn reload_player(
    db: &DatabaseConnection,
    tournament_id: i64,
    emp_id: &str,
) -> Result<entities::player::Model> {
    player::find_player(db, tournament_id, emp_id)
        .await?
        .ok_or_else(|| Error::PlayerNotFound {
            emp_id: emp_id.to_string(),
        })
}

