//! Auction floor commands - `assign`, `unassign`, `release`, `sign` and `status`.
//!
//! These are the commands an auctioneer runs while the sale is live. Every budget
//! change goes through the assignment engine.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, checks, handlers::autocomplete},
        core::{
            assignment::{self, AssignPlayer},
            player::PlayerCreate,
            status, team,
        },
        errors::{Error, Result},
    };

    /// Sells a player to a team for a bid.
    #[poise::command(slash_command, prefix_command, check = "checks::is_auction_staff")]
    pub async fn assign(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Tournament ID"] tournament_id: i64,
        #[description = "Buying team ID"] team_id: i64,
        #[description = "Employee ID of the player"]
        #[autocomplete = "autocomplete::autocomplete_unassigned_emp_id"]
        emp_id: String,
        #[description = "Winning bid"] bid: f64,
    ) -> Result<()> {
        let actor = checks::actor(&ctx)?;
        let db = &ctx.data().database;

        let sold = assignment::assign_player(
            db,
            &actor,
            AssignPlayer {
                tournament_id,
                team_id,
                emp_id,
                bid_amount: bid,
            },
        )
        .await?;
        let buyer = team::find_team_in_tournament(db, tournament_id, team_id).await?;

        ctx.say(format!(
            "🔨 **SOLD!** {} (`{}`) to **{}** for ${:.2}. ${:.2} left in their budget.",
            sold.name, sold.emp_id, buyer.name, sold.bid_amount, buyer.remaining_budget
        ))
        .await?;
        Ok(())
    }

    /// Takes a player off a team, refunds the bid and puts them back up for auction.
    #[poise::command(slash_command, prefix_command, check = "checks::is_auction_staff")]
    pub async fn unassign(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Tournament ID"] tournament_id: i64,
        #[description = "Team ID"] team_id: i64,
        #[description = "Employee ID of the player"] emp_id: String,
    ) -> Result<()> {
        let actor = checks::actor(&ctx)?;
        let db = &ctx.data().database;

        let player =
            assignment::unassign_player(db, &actor, tournament_id, team_id, &emp_id).await?;
        let team = team::find_team_in_tournament(db, tournament_id, team_id).await?;

        ctx.say(format!(
            "↩️ {} (`{}`) is back in the pool. **{}** now has ${:.2}.",
            player.name, player.emp_id, team.name, team.remaining_budget
        ))
        .await?;
        Ok(())
    }

    /// Removes a player from a team and from the tournament, refunding the bid.
    #[poise::command(slash_command, check = "checks::is_auction_staff")]
    pub async fn release(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Tournament ID"] tournament_id: i64,
        #[description = "Team ID"] team_id: i64,
        #[description = "Employee ID of the player"] emp_id: String,
    ) -> Result<()> {
        let actor = checks::actor(&ctx)?;
        let removed = assignment::remove_player_from_team(
            &ctx.data().database,
            &actor,
            tournament_id,
            team_id,
            &emp_id,
        )
        .await?;

        ctx.say(format!(
            "🗑️ Removed {} (`{}`); ${:.2} refunded.",
            removed.name, removed.emp_id, removed.bid_amount
        ))
        .await?;
        Ok(())
    }

    /// Adds a brand-new player straight onto a team at a given price.
    #[poise::command(slash_command, check = "checks::is_admin")]
    pub async fn sign(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Tournament ID"] tournament_id: i64,
        #[description = "Team ID"] team_id: i64,
        #[description = "Employee ID"] emp_id: String,
        #[description = "Player name"] name: String,
        #[description = "Player type"] player_type: String,
        #[description = "Price paid"] bid: f64,
    ) -> Result<()> {
        let actor = checks::actor(&ctx)?;
        let signed = assignment::sign_player(
            &ctx.data().database,
            &actor,
            tournament_id,
            team_id,
            PlayerCreate::new(emp_id, name, player_type),
            bid,
        )
        .await?;

        ctx.say(format!(
            "✍️ Signed {} (`{}`) to team {team_id} for ${:.2}.",
            signed.name, signed.emp_id, signed.bid_amount
        ))
        .await?;
        Ok(())
    }

    /// Shows how far the auction has progressed.
    #[poise::command(slash_command, prefix_command, check = "checks::is_known_user")]
    pub async fn status(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Tournament ID"] tournament_id: i64,
    ) -> Result<()> {
        let progress = status::auction_status(&ctx.data().database, tournament_id).await?;
        let bar = status::format_progress_bar(progress.progress_percent(), Some(15));

        let headline = if progress.is_complete {
            "🏁 **Auction complete!**"
        } else {
            "📣 **Auction in progress**"
        };
        ctx.say(format!(
            "{headline}\n{bar}\nSold: {} | Waiting: {} | Total: {}",
            progress.assigned, progress.remaining, progress.total
        ))
        .await?;
        Ok(())
    }
}

pub use inner::*;
