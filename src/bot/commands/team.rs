//! Team Discord commands - add, list, edit, delete, captains and ledger audit.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, checks},
        core::{
            ledger,
            team::{self, CaptainSelection, NewTeam, TeamUpdate},
        },
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Parent command for managing teams.
    #[poise::command(
        slash_command,
        subcommands(
            "team_add",
            "team_list",
            "team_edit",
            "team_delete",
            "team_roster",
            "team_captains",
            "team_audit"
        )
    )]
    pub async fn team(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Team management command. Available subcommands:\n\
            `/team add` - Add a team to a tournament\n\
            `/team list` - List a tournament's teams and budgets\n\
            `/team edit` - Rename a team or change its total budget\n\
            `/team delete` - Delete a team; its players go back to the pool\n\
            `/team roster` - Show the players a team has bought\n\
            `/team captains` - Choose captain and vice-captain\n\
            `/team audit` - Check a team's budget against its players";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a team to a tournament.
    #[poise::command(slash_command, rename = "add", check = "checks::is_admin")]
    pub async fn team_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Tournament ID"] tournament_id: i64,
        #[description = "Team name"] name: String,
        #[description = "Total budget"] budget: f64,
    ) -> Result<()> {
        let created =
            team::create_team(&ctx.data().database, tournament_id, NewTeam::new(name, budget))
                .await?;

        ctx.say(format!(
            "✅ Added team **{}** (ID {}) with ${:.2}.",
            created.name, created.id, created.total_budget
        ))
        .await?;
        Ok(())
    }

    /// Lists a tournament's teams with their budgets.
    #[poise::command(slash_command, rename = "list", check = "checks::is_known_user")]
    pub async fn team_list(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Tournament ID"] tournament_id: i64,
    ) -> Result<()> {
        let teams = team::list_teams(&ctx.data().database, tournament_id).await?;

        if teams.is_empty() {
            ctx.say("👥 No teams in this tournament yet. Add one with `/team add`.")
                .await?;
            return Ok(());
        }

        let mut response = String::from("👥 **Teams**\n\n");
        for t in teams {
            writeln!(
                &mut response,
                "• **{}** (ID {}) - ${:.2} left, ${:.2} spent of ${:.2}",
                t.name,
                t.id,
                t.remaining_budget,
                t.spent(),
                t.total_budget
            )?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Renames a team and optionally changes its total budget.
    ///
    /// The amount already spent is kept, so the remaining budget moves by the same
    /// amount as the total.
    #[poise::command(slash_command, rename = "edit", check = "checks::is_admin")]
    pub async fn team_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Tournament ID"] tournament_id: i64,
        #[description = "Team ID"] team_id: i64,
        #[description = "New team name"] name: String,
        #[description = "New total budget"] total_budget: Option<f64>,
    ) -> Result<()> {
        let outcome = team::update_team(
            &ctx.data().database,
            tournament_id,
            team_id,
            TeamUpdate { name, total_budget },
        )
        .await?;

        let mut response = format!(
            "✅ Updated team **{}**: ${:.2} left of ${:.2}.",
            outcome.team.name, outcome.team.remaining_budget, outcome.team.total_budget
        );
        if let Some(shortfall) = outcome.overspent {
            write!(
                &mut response,
                "\n⚠️ The team has already spent ${shortfall:.2} more than its new budget."
            )?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Deletes a team. Its players return to the pool.
    #[poise::command(slash_command, rename = "delete", check = "checks::is_admin")]
    pub async fn team_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Tournament ID"] tournament_id: i64,
        #[description = "Team ID"] team_id: i64,
    ) -> Result<()> {
        let actor = checks::actor(&ctx)?;
        let released =
            team::delete_team(&ctx.data().database, &actor, tournament_id, team_id).await?;

        ctx.say(format!(
            "🗑️ Deleted team {team_id}. {released} player{} returned to the pool.",
            if released == 1 { "" } else { "s" }
        ))
        .await?;
        Ok(())
    }

    /// Shows the players a team has bought, most expensive first.
    #[poise::command(slash_command, rename = "roster", check = "checks::is_known_user")]
    pub async fn team_roster(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Tournament ID"] tournament_id: i64,
        #[description = "Team ID"] team_id: i64,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let buyer = team::find_team_in_tournament(db, tournament_id, team_id).await?;
        let players = team::team_players(db, tournament_id, team_id).await?;

        let mut response = format!(
            "👥 **{}** - {} player{}, ${:.2} spent\n\n",
            buyer.name,
            players.len(),
            if players.len() == 1 { "" } else { "s" },
            buyer.spent()
        );
        for p in &players {
            writeln!(
                &mut response,
                "• {} `{}` {} - ${:.2}",
                p.name, p.emp_id, p.player_type, p.bid_amount
            )?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Chooses a team's captain and vice-captain. Leave a slot empty to clear it.
    #[poise::command(slash_command, rename = "captains", check = "checks::is_admin")]
    pub async fn team_captains(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Tournament ID"] tournament_id: i64,
        #[description = "Team ID"] team_id: i64,
        #[description = "Captain's employee ID"] captain: Option<String>,
        #[description = "Vice-captain's employee ID"] vice_captain: Option<String>,
    ) -> Result<()> {
        let updated = team::set_captains(
            &ctx.data().database,
            tournament_id,
            team_id,
            CaptainSelection {
                captain_id: captain,
                vice_captain_id: vice_captain,
            },
        )
        .await?;

        ctx.say(format!(
            "✅ **{}** captain: {}, vice-captain: {}.",
            updated.name,
            updated.captain_id.as_deref().unwrap_or("none"),
            updated.vice_captain_id.as_deref().unwrap_or("none")
        ))
        .await?;
        Ok(())
    }

    /// Checks that a team's remaining budget matches the bids of its players.
    #[poise::command(slash_command, rename = "audit", check = "checks::is_auction_staff")]
    pub async fn team_audit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Tournament ID"] tournament_id: i64,
        #[description = "Team ID"] team_id: i64,
    ) -> Result<()> {
        let db = &ctx.data().database;
        team::find_team_in_tournament(db, tournament_id, team_id).await?;
        let audit = ledger::audit_team(db, team_id).await?;

        let verdict = if audit.consistent {
            "🟢 Budget matches the roster."
        } else {
            "🔴 Budget does not match the roster!"
        };
        ctx.say(format!(
            "{verdict}\nTotal ${:.2} | Committed ${:.2} | Remaining ${:.2}",
            audit.total_budget, audit.committed, audit.remaining_budget
        ))
        .await?;
        Ok(())
    }
}

pub use inner::*;
