//! Unified error type for the auction ledger and the bot layer.
//!
//! Business outcomes (not found, insufficient budget, already assigned, duplicate key,
//! validation) are distinct variants so callers can render each one differently.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// All errors produced by `AuctionBuddy`.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// No tournament with this id
    #[error("Tournament {id} not found")]
    TournamentNotFound {
        /// Tournament id that was looked up
        id: i64,
    },

    /// No team with this id in the tournament
    #[error("Team {id} not found")]
    TeamNotFound {
        /// Team id that was looked up
        id: i64,
    },

    /// No player with this emp_id in the requested scope
    #[error("Player '{emp_id}' not found")]
    PlayerNotFound {
        /// Business key of the player
        emp_id: String,
    },

    /// The team cannot afford the bid
    #[error("Insufficient budget: {remaining:.2} remaining, {required:.2} required")]
    InsufficientBudget {
        /// Team's remaining budget at the time of the check
        remaining: f64,
        /// Amount the operation needed
        required: f64,
    },

    /// The player was no longer unassigned when the assignment committed
    #[error("Player '{emp_id}' is already assigned to a team")]
    AlreadyAssigned {
        /// Business key of the player
        emp_id: String,
    },

    /// A unique constraint rejected the write
    #[error("Duplicate entry: {message}")]
    DuplicateKey {
        /// Which key collided
        message: String,
    },

    /// Malformed input at a collaborator boundary
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// Monetary amount that is negative or not a finite number
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// The principal lacks the role required by the operation
    #[error("User '{username}' with role '{role}' is not allowed to do this")]
    Forbidden {
        /// Resolved username
        username: String,
        /// Resolved role
        role: String,
    },

    /// I/O failure (config file, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or unreadable environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Formatting a reply failed
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl Error {
    /// True for the not-found family (tournament, team, player).
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TournamentNotFound { .. } | Self::TeamNotFound { .. } | Self::PlayerNotFound { .. }
        )
    }

    /// Converts a database error into `DuplicateKey` when it is a unique constraint
    /// violation, leaving every other error as `Database`.
    pub fn from_write(err: DbErr, key: impl Into<String>) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::DuplicateKey {
                message: key.into(),
            },
            _ => Self::Database(err),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_family() {
        assert!(Error::TeamNotFound { id: 1 }.is_not_found());
        assert!(Error::TournamentNotFound { id: 1 }.is_not_found());
        assert!(
            Error::PlayerNotFound {
                emp_id: "E1".to_string()
            }
            .is_not_found()
        );
        assert!(
            !Error::InsufficientBudget {
                remaining: 1.0,
                required: 2.0
            }
            .is_not_found()
        );
    }

    #[test]
    fn test_messages_are_distinguishable() {
        let team = Error::TeamNotFound { id: 7 }.to_string();
        let budget = Error::InsufficientBudget {
            remaining: 50.0,
            required: 100.0,
        }
        .to_string();
        let taken = Error::AlreadyAssigned {
            emp_id: "E7".to_string(),
        }
        .to_string();

        assert_eq!(team, "Team 7 not found");
        assert_eq!(budget, "Insufficient budget: 50.00 remaining, 100.00 required");
        assert_eq!(taken, "Player 'E7' is already assigned to a team");
    }

    #[test]
    fn test_non_unique_db_error_stays_database() {
        let err = Error::from_write(DbErr::Custom("boom".to_string()), "emp_id 'E1'");
        assert!(matches!(err, Error::Database(_)));
    }
}
