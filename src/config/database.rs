//! Database configuration module for `AuctionBuddy`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so foreign keys (including the tournament cascade) follow the entity relations. The
//! composite unique keys the entities cannot express are added as explicit indexes.

use crate::entities::{Player, Team, Tournament, player, team};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema, sea_query::Index};
use tracing::{debug, info};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/auction_buddy.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable, falling back
/// to a local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database and makes sure all tables exist.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to database at {}", database_url);

    if database_url == DEFAULT_DATABASE_URL {
        std::fs::create_dir_all("data")?;
    }

    let db = Database::connect(&database_url).await?;
    create_tables(&db).await?;
    info!("Database ready");
    Ok(db)
}

/// Creates the tournaments, teams and players tables and their unique indexes.
///
/// Safe to run on every start: every statement is `IF NOT EXISTS`.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    // Owners before dependents so foreign keys resolve
    let mut tournament_table = schema.create_table_from_entity(Tournament);
    let mut team_table = schema.create_table_from_entity(Team);
    let mut player_table = schema.create_table_from_entity(Player);

    tournament_table.if_not_exists();
    team_table.if_not_exists();
    player_table.if_not_exists();

    db.execute(builder.build(&tournament_table)).await?;
    db.execute(builder.build(&team_table)).await?;
    db.execute(builder.build(&player_table)).await?;

    let team_name_index = Index::create()
        .name("idx_teams_tournament_name")
        .table(Team)
        .col(team::Column::TournamentId)
        .col(team::Column::Name)
        .unique()
        .if_not_exists()
        .to_owned();
    let player_emp_id_index = Index::create()
        .name("idx_players_tournament_emp_id")
        .table(Player)
        .col(player::Column::TournamentId)
        .col(player::Column::EmpId)
        .unique()
        .if_not_exists()
        .to_owned();

    db.execute(builder.build(&team_name_index)).await?;
    db.execute(builder.build(&player_emp_id_index)).await?;

    Ok(())
}
