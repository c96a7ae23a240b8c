//! Player Discord commands - roster management and CSV import.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, checks, handlers::roster_upload},
        core::{
            assignment,
            player::{self, PlayerCreate, PlayerUpdate},
            roster::{self, ImportMode},
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::fmt::Write;

    /// Longest roster listing sent in one message.
    const MAX_LISTED: usize = 40;

    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum ImportChoice {
        #[name = "append"]
        Append,
        #[name = "replace"]
        Replace,
    }

    impl From<ImportChoice> for ImportMode {
        fn from(choice: ImportChoice) -> Self {
            match choice {
                ImportChoice::Append => Self::Append,
                ImportChoice::Replace => Self::Replace,
            }
        }
    }

    /// Parent command for managing players.
    #[poise::command(
        slash_command,
        subcommands(
            "player_add",
            "player_list",
            "player_edit",
            "player_delete",
            "player_image",
            "player_import"
        )
    )]
    pub async fn player(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Player management command. Available subcommands:\n\
            `/player add` - Add a player to the auction pool\n\
            `/player list` - List a tournament's players\n\
            `/player edit` - Change a player's name or type\n\
            `/player delete` - Delete a player (refunds their team)\n\
            `/player image` - Set a player's photo file\n\
            `/player import` - Load players from a CSV file (emp_id, name, type)";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds an unassigned player to a tournament.
    #[poise::command(slash_command, rename = "add", check = "checks::is_admin")]
    pub async fn player_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Tournament ID"] tournament_id: i64,
        #[description = "Employee ID"] emp_id: String,
        #[description = "Player name"] name: String,
        #[description = "Player type (e.g. Batsman, Bowler)"] player_type: String,
    ) -> Result<()> {
        let created = player::create_player(
            &ctx.data().database,
            tournament_id,
            PlayerCreate::new(emp_id, name, player_type),
        )
        .await?;

        ctx.say(format!(
            "✅ Added **{}** (`{}`) to the auction pool.",
            created.name, created.emp_id
        ))
        .await?;
        Ok(())
    }

    /// Lists a tournament's players.
    #[poise::command(slash_command, rename = "list", check = "checks::is_known_user")]
    pub async fn player_list(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Tournament ID"] tournament_id: i64,
        #[description = "Only players still up for auction (default: false)"]
        unassigned_only: Option<bool>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let players = if unassigned_only.unwrap_or(false) {
            player::list_unassigned_players(db, tournament_id).await?
        } else {
            player::list_players(db, tournament_id).await?
        };

        if players.is_empty() {
            ctx.say("🧢 No players found.").await?;
            return Ok(());
        }

        let mut response = format!("🧢 **Players** ({})\n\n", players.len());
        for p in players.iter().take(MAX_LISTED) {
            let state = if p.is_assigned {
                format!("sold for ${:.2}", p.bid_amount)
            } else {
                "available".to_string()
            };
            writeln!(
                &mut response,
                "• `{}` {} - {} ({state})",
                p.emp_id, p.name, p.player_type
            )?;
        }
        if players.len() > MAX_LISTED {
            writeln!(&mut response, "_... and {} more_", players.len() - MAX_LISTED)?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Changes a player's name or type.
    #[poise::command(slash_command, rename = "edit", check = "checks::is_admin")]
    pub async fn player_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Tournament ID"] tournament_id: i64,
        #[description = "Employee ID"] emp_id: String,
        #[description = "New name"] name: Option<String>,
        #[description = "New player type"] player_type: Option<String>,
    ) -> Result<()> {
        let updated = player::update_player(
            &ctx.data().database,
            tournament_id,
            &emp_id,
            PlayerUpdate { name, player_type },
        )
        .await?;

        ctx.say(format!(
            "✅ Updated `{}`: {} ({}).",
            updated.emp_id, updated.name, updated.player_type
        ))
        .await?;
        Ok(())
    }

    /// Deletes a player. A sold player's bid goes back to their team.
    #[poise::command(slash_command, rename = "delete", check = "checks::is_admin")]
    pub async fn player_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Tournament ID"] tournament_id: i64,
        #[description = "Employee ID"] emp_id: String,
    ) -> Result<()> {
        let actor = checks::actor(&ctx)?;
        let deleted =
            assignment::delete_player(&ctx.data().database, &actor, tournament_id, &emp_id)
                .await?;

        let refund = if deleted.is_assigned {
            format!(" ${:.2} refunded to their team.", deleted.bid_amount)
        } else {
            String::new()
        };
        ctx.say(format!("🗑️ Deleted **{}** (`{}`).{refund}", deleted.name, deleted.emp_id))
            .await?;
        Ok(())
    }

    /// Records a photo file name for a player in every tournament they play in.
    #[poise::command(slash_command, rename = "image", check = "checks::is_admin")]
    pub async fn player_image(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Employee ID"] emp_id: String,
        #[description = "Image file name"] filename: String,
    ) -> Result<()> {
        let updated = player::set_player_image(&ctx.data().database, &emp_id, &filename).await?;
        ctx.say(format!("🖼️ Image set for `{emp_id}` in {updated} tournament(s)."))
            .await?;
        Ok(())
    }

    /// Loads players from a CSV file with `emp_id`, `name` and `type` columns.
    #[poise::command(slash_command, rename = "import", check = "checks::is_admin")]
    pub async fn player_import(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Tournament ID"] tournament_id: i64,
        #[description = "CSV file with emp_id, name and type columns"] file: serenity::Attachment,
        #[description = "append (default) keeps existing players; replace clears them first"]
        mode: Option<ImportChoice>,
    ) -> Result<()> {
        if !file.filename.to_lowercase().ends_with(".csv") {
            ctx.say("❌ Please upload a .csv file.").await?;
            return Ok(());
        }

        ctx.defer().await?;

        let actor = checks::actor(&ctx)?;
        let bytes = file.download().await?;
        let rows = roster_upload::parse_roster_csv(&bytes)?;
        let mode = mode.map_or_else(ImportMode::default, ImportMode::from);

        let report =
            roster::import_roster(&ctx.data().database, &actor, tournament_id, rows, mode).await?;

        let mut response = format!("📥 **Imported {}** ({} mode)\n", file.filename, report.mode);
        writeln!(
            &mut response,
            "Rows: {} | Added: {} | Skipped: {}",
            report.total_rows, report.added, report.skipped
        )?;
        if !report.errors.is_empty() {
            response.push_str("\n**Problems:**\n");
            for line in &report.errors {
                writeln!(&mut response, "• {line}")?;
            }
        }

        ctx.say(response).await?;
        Ok(())
    }
}

pub use inner::*;
