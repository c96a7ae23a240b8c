//! User-facing wording for errors returned by commands.

use crate::errors::Error;

/// Turns an error into the message shown in Discord.
///
/// Business outcomes get their own wording; infrastructure failures get a generic
/// message and are logged by the caller.
#[must_use]
pub fn user_message(error: &Error) -> String {
    match error {
        Error::TournamentNotFound { id } => {
            format!("❌ Tournament {id} not found. Use `/tournament list` to see tournaments.")
        }
        Error::TeamNotFound { id } => {
            format!("❌ Team {id} not found in this tournament. Use `/team list` to see teams.")
        }
        Error::PlayerNotFound { emp_id } => format!("❌ Player '{emp_id}' not found."),
        Error::InsufficientBudget {
            remaining,
            required,
        } => format!(
            "💸 Insufficient budget! The team has ${remaining:.2} left but the bid is ${required:.2}."
        ),
        Error::AlreadyAssigned { emp_id } => {
            format!("⚠️ Player '{emp_id}' has already been taken by another team.")
        }
        Error::DuplicateKey { message } => format!("⚠️ Already exists: {message}."),
        Error::Validation { message } => format!("❌ {message}"),
        Error::InvalidAmount { amount } => {
            format!("❌ Invalid amount {amount}: must be a non-negative number.")
        }
        Error::Forbidden { username, role } => {
            format!("⛔ {username} ({role}) is not allowed to use this command.")
        }
        Error::Config { .. }
        | Error::Database(_)
        | Error::Io(_)
        | Error::EnvVar(_)
        | Error::Fmt(_)
        | Error::Framework(_) => "❌ Something went wrong. Please try again later.".to_string(),
    }
}
