//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the AuctionBuddy application,
//! including all slash commands, permission checks, autocomplete handlers, and bot
//! context management.

/// Per-command permission checks
pub mod checks;
/// Discord command implementations (tournament, team, player, auction, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, error replies, roster uploads)
pub mod handlers;

use crate::{
    auth::StaffDirectory,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tracing::{error, info, instrument, warn};

/// Shared data available to all bot commands.
/// This structure holds the database connection and the staff directory used by
/// the permission checks.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Who may run which commands
    pub staff: StaffDirectory,
}

impl BotData {
    /// Creates a new `BotData` instance.
    #[must_use]
    pub const fn new(database: DatabaseConnection, staff: StaffDirectory) -> Self {
        Self { database, staff }
    }
}

/// Every command the bot registers.
#[must_use]
pub fn all_commands() -> Vec<poise::Command<BotData, Error>> {
    vec![
        commands::ping(),
        commands::help(),
        commands::tournament(),
        commands::team(),
        commands::player(),
        commands::assign(),
        commands::unassign(),
        commands::release(),
        commands::sign(),
        commands::status(),
    ]
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            if matches!(error, Error::Database(_) | Error::Framework(_) | Error::Fmt(_)) {
                error!("Error in command `{}`: {:?}", ctx.command().name, error);
            } else {
                warn!("Command `{}` rejected: {}", ctx.command().name, error);
            }
            if let Err(e) = ctx.say(handlers::error_reply::user_message(&error)).await {
                error!("Failed to send error message: {}", e);
            }
        }
        poise::FrameworkError::CommandCheckFailed { error, ctx, .. } => {
            let message = error.map_or_else(
                || "⛔ You are not allowed to use this command.".to_string(),
                |e| handlers::error_reply::user_message(&e),
            );
            if let Err(e) = ctx.say(message).await {
                error!("Failed to send permission message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Connects to Discord and serves commands until the client stops.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: all_commands(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;

    Ok(())
}

pub use commands::*;
pub use handlers::*;
