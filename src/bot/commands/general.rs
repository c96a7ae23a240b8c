//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't require database operations
//! and provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**AuctionBuddy Help**\n\
        Here is a summary of all available commands for AuctionBuddy.\n\n\
        **Auction Commands** (auctioneers)\n\
        • `/assign <tournament> <team> <emp_id> <bid>` - Sells a player to a team.\n\
        • `/unassign <tournament> <team> <emp_id>` - Returns a player to the pool and refunds the team.\n\
        • `/release <tournament> <team> <emp_id>` - Removes a player from a team and the roster.\n\
        • `/status <tournament>` - Shows auction progress.\n\n\
        **Management Commands** (admins)\n\
        • `/tournament <subcommand>` - Manage tournaments (create, list, info, rename, delete).\n\
        • `/team <subcommand>` - Manage teams (add, list, edit, delete, captains, audit).\n\
        • `/player <subcommand>` - Manage players (add, list, edit, delete, image, import).\n\
        • `/sign <tournament> <team> <emp_id> <name> <type> <bid>` - Adds a new player straight to a team.\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
