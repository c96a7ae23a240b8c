//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggests players that are still up for auction, so the auctioneer does not have to
//! remember employee ids mid-sale.

use crate::{bot::BotData, core::player, errors::Error};

/// Discord autocomplete limit
const MAX_SUGGESTIONS: u64 = 25;

/// Provides autocomplete suggestions for unassigned players' `emp_id`s.
///
/// Matches the partial input against both the `emp_id` and the player's name, and
/// returns the `emp_id` so it can be passed straight to the command.
pub async fn autocomplete_unassigned_emp_id(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = &ctx.data().database;

    let Ok(players) = player::search_unassigned(db, partial.trim(), MAX_SUGGESTIONS).await else {
        return Vec::new();
    };

    let mut matching: Vec<String> = players.into_iter().map(|p| p.emp_id).collect();
    matching.dedup();
    matching
}
