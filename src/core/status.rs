//! Auction status reporting.
//!
//! Read-only counts over a tournament's players. Nothing here writes to the store.

use crate::{
    entities::{Player, player},
    errors::Result,
};
use sea_orm::{PaginatorTrait, prelude::*};

/// Progress of an auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuctionStatus {
    /// Players in the tournament
    pub total: u64,
    /// Players sold to a team
    pub assigned: u64,
    /// Players still waiting
    pub remaining: u64,
    /// `true` once nobody is left to sell, including when there was nobody to begin with
    pub is_complete: bool,
}

impl AuctionStatus {
    /// Builds a status from raw counts.
    #[must_use]
    pub fn from_counts(total: u64, assigned: u64) -> Self {
        let remaining = total.saturating_sub(assigned);
        Self {
            total,
            assigned,
            remaining,
            is_complete: remaining == 0,
        }
    }

    /// Share of players already sold, 0-100. An empty auction counts as 100%.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Player counts stay far below 2^52
    pub fn progress_percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }

        (self.assigned as f64 / self.total as f64) * 100.0
    }
}

/// Counts the players of a tournament and how many have been sold.
///
/// An unknown tournament simply has no players, so it reports as complete.
pub async fn auction_status(db: &DatabaseConnection, tournament_id: i64) -> Result<AuctionStatus> {
    let total = Player::find()
        .filter(player::Column::TournamentId.eq(tournament_id))
        .count(db)
        .await?;
    let assigned = Player::find()
        .filter(player::Column::TournamentId.eq(tournament_id))
        .filter(player::Column::IsAssigned.eq(true))
        .count(db)
        .await?;

    Ok(AuctionStatus::from_counts(total, assigned))
}

/// Generates a progress bar string for visual representation.
///
/// Creates a text-based progress bar like: `[████████░░] 80.0%`
#[must_use]
pub fn format_progress_bar(progress_percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped_progress = progress_percent.clamp(0.0, 100.0);
    // clamped_progress is in [0, 100] and length is small, so the cast stays in range
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped_progress / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    let filled_str = "█".repeat(filled);
    let empty_str = "░".repeat(empty);

    format!("[{filled_str}{empty_str}] {progress_percent:.1}%")
}
