//! Tournament Discord commands - create, list, info, rename and delete.

use crate::{
    core::team::NewTeam,
    errors::{Error, Result},
};

/// Parses a team list such as `"Lions:1000, Tigers:800.50"`.
///
/// Entries are separated by commas or semicolons; each is `name:budget`.
pub fn parse_team_list(input: &str) -> Result<Vec<NewTeam>> {
    input
        .split([',', ';'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (name, budget) = entry.rsplit_once(':').ok_or_else(|| Error::Validation {
                message: format!("Team '{entry}' must be written as name:budget"),
            })?;
            let budget = budget.trim().parse::<f64>().map_err(|_| Error::Validation {
                message: format!("Budget for team '{}' is not a number", name.trim()),
            })?;
            Ok(NewTeam::new(name.trim(), budget))
        })
        .collect()
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::parse_team_list;
    use crate::{
        bot::{BotData, checks},
        core::{status, tournament},
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Parent command for managing tournaments.
    #[poise::command(
        slash_command,
        subcommands(
            "tournament_create",
            "tournament_list",
            "tournament_info",
            "tournament_rename",
            "tournament_delete"
        )
    )]
    pub async fn tournament(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Tournament management command. Available subcommands:\n\
            `/tournament create` - Create a tournament with its teams\n\
            `/tournament list` - List all tournaments\n\
            `/tournament info` - Show teams, budgets and rosters\n\
            `/tournament rename` - Rename a tournament\n\
            `/tournament delete` - Delete a tournament with its teams and players";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Creates a tournament, optionally with its initial teams.
    #[poise::command(slash_command, rename = "create", check = "checks::is_admin")]
    pub async fn tournament_create(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Tournament name"] name: String,
        #[description = "Teams as name:budget, comma separated (e.g. 'Lions:1000, Tigers:1000')"]
        teams: Option<String>,
    ) -> Result<()> {
        let actor = checks::actor(&ctx)?;
        let teams = teams.as_deref().map(parse_team_list).transpose()?.unwrap_or_default();
        let team_count = teams.len();

        let created =
            tournament::create_tournament(&ctx.data().database, &actor, name, teams).await?;

        ctx.say(format!(
            "✅ Created tournament **{}** (ID {}) with {team_count} team{}.",
            created.name,
            created.id,
            if team_count == 1 { "" } else { "s" }
        ))
        .await?;
        Ok(())
    }

    /// Lists all tournaments, newest first.
    #[poise::command(slash_command, rename = "list", check = "checks::is_known_user")]
    pub async fn tournament_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let tournaments = tournament::list_tournaments(&ctx.data().database).await?;

        if tournaments.is_empty() {
            ctx.say("🏆 No tournaments yet. Create one with `/tournament create`.")
                .await?;
            return Ok(());
        }

        let mut response = String::from("🏆 **Tournaments**\n\n");
        for t in tournaments {
            writeln!(
                &mut response,
                "• **{}** (ID {}) - created {} by {}",
                t.name,
                t.id,
                t.created_at.format("%Y-%m-%d"),
                t.created_by
            )?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Shows a tournament's teams, their budgets and rosters.
    #[poise::command(slash_command, rename = "info", check = "checks::is_known_user")]
    pub async fn tournament_info(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Tournament ID"] tournament_id: i64,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let overview = tournament::tournament_overview(db, tournament_id).await?;
        let progress = status::auction_status(db, tournament_id).await?;

        let mut response = format!("🏆 **{}**\n", overview.tournament.name);
        writeln!(
            &mut response,
            "{} sold, {} waiting\n",
            progress.assigned, progress.remaining
        )?;

        for roster in &overview.teams {
            let team = &roster.team;
            writeln!(
                &mut response,
                "**{}** (ID {}) - ${:.2} left of ${:.2}",
                team.name, team.id, team.remaining_budget, team.total_budget
            )?;
            for p in &roster.players {
                let badge = if team.captain_id.as_deref() == Some(p.emp_id.as_str()) {
                    " (C)"
                } else if team.vice_captain_id.as_deref() == Some(p.emp_id.as_str()) {
                    " (VC)"
                } else {
                    ""
                };
                writeln!(
                    &mut response,
                    "  • {} `{}` {}{badge} - ${:.2}",
                    p.name, p.emp_id, p.player_type, p.bid_amount
                )?;
            }
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Renames a tournament.
    #[poise::command(slash_command, rename = "rename", check = "checks::is_admin")]
    pub async fn tournament_rename(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Tournament ID"] tournament_id: i64,
        #[description = "New name"] name: String,
    ) -> Result<()> {
        let renamed =
            tournament::rename_tournament(&ctx.data().database, tournament_id, name).await?;
        ctx.say(format!("✅ Tournament {} is now **{}**.", renamed.id, renamed.name))
            .await?;
        Ok(())
    }

    /// Deletes a tournament with all of its teams and players.
    #[poise::command(slash_command, rename = "delete", check = "checks::is_admin")]
    pub async fn tournament_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Tournament ID"] tournament_id: i64,
    ) -> Result<()> {
        let actor = checks::actor(&ctx)?;
        tournament::delete_tournament(&ctx.data().database, &actor, tournament_id).await?;
        ctx.say(format!("🗑️ Deleted tournament {tournament_id} with its teams and players."))
            .await?;
        Ok(())
    }
}

pub use inner::*;
