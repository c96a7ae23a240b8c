//! Roster import - bulk loading of already-parsed player rows into a tournament.
//!
//! Rows are validated one by one. A bad or duplicate row is skipped and reported; it
//! never aborts the import. The import as a whole runs in one transaction.

use crate::{
    auth::Principal,
    core::{
        ledger,
        player::{PlayerCreate, duplicate_emp_id, find_player},
        tournament::require_tournament,
    },
    entities::{Player, Team, player, team},
    errors::{Error, Result},
};
use sea_orm::{TransactionTrait, prelude::*, sea_query::Expr};
use std::fmt;
use tracing::{info, instrument, warn};

/// One candidate row from a roster sheet.
pub type RosterRow = PlayerCreate;

/// Error lines kept in a report before the rest are summarised.
const MAX_REPORTED_ERRORS: usize = 10;

/// Values spreadsheet exports use for an empty cell.
const PLACEHOLDERS: [&str; 2] = ["nan", "none"];

/// How an import treats players already in the tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Delete the tournament's players first
    Replace,
    /// Keep existing players; duplicates are skipped
    #[default]
    Append,
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replace => write!(f, "replace"),
            Self::Append => write!(f, "append"),
        }
    }
}

/// Outcome of an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    /// Mode the import ran in
    pub mode: ImportMode,
    /// Rows received
    pub total_rows: usize,
    /// Players inserted
    pub added: usize,
    /// Rows rejected or skipped as duplicates
    pub skipped: usize,
    /// Per-row error lines, capped
    pub errors: Vec<String>,
}

/// Spreadsheet row number of a zero-based data row. The header is row 1.
const fn sheet_row(index: usize) -> usize {
    index + 2
}

fn cell(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || PLACEHOLDERS.contains(&trimmed.to_lowercase().as_str()) {
        return Err(Error::Validation {
            message: format!("{field} is required"),
        });
    }
    Ok(trimmed.to_string())
}

fn clean_row(row: RosterRow) -> Result<RosterRow> {
    let candidate = RosterRow {
        emp_id: cell(&row.emp_id, "emp_id")?,
        name: cell(&row.name, "name")?,
        player_type: cell(&row.player_type, "type")?,
        image_filename: row.image_filename,
    };
    candidate.normalized()
}

fn cap_errors(mut errors: Vec<String>) -> Vec<String> {
    if errors.len() > MAX_REPORTED_ERRORS {
        let hidden = errors.len() - MAX_REPORTED_ERRORS;
        errors.truncate(MAX_REPORTED_ERRORS);
        errors.push(format!("... and {hidden} more errors"));
    }
    errors
}

/// Loads roster rows into a tournament.
///
/// In [`ImportMode::Replace`] every existing player is deleted first. Sold players are
/// deleted too, so team budgets are restored in full and captaincies cleared.
///
/// # Errors
/// - `Validation` if `rows` is empty
/// - `TournamentNotFound` if the tournament does not exist
///
/// Row-level problems are reported in [`ImportReport::errors`] instead.
#[instrument(skip(db, actor, rows), fields(actor = %actor.username, rows = rows.len()))]
pub async fn import_roster(
    db: &DatabaseConnection,
    actor: &Principal,
    tournament_id: i64,
    rows: Vec<RosterRow>,
    mode: ImportMode,
) -> Result<ImportReport> {
    if rows.is_empty() {
        return Err(Error::Validation {
            message: "Roster is empty".to_string(),
        });
    }

    let txn = db.begin().await?;
    require_tournament(&txn, tournament_id).await?;

    if mode == ImportMode::Replace {
        let removed = Player::delete_many()
            .filter(player::Column::TournamentId.eq(tournament_id))
            .exec(&txn)
            .await?;
        ledger::reset_budgets(&txn, tournament_id).await?;
        Team::update_many()
            .col_expr(team::Column::CaptainId, Expr::value(Option::<String>::None))
            .col_expr(team::Column::ViceCaptainId, Expr::value(Option::<String>::None))
            .filter(team::Column::TournamentId.eq(tournament_id))
            .exec(&txn)
            .await?;
        info!(removed = removed.rows_affected, "Cleared roster before import");
    }

    let total_rows = rows.len();
    let mut added = 0;
    let mut errors = Vec::new();

    for (index, row) in rows.into_iter().enumerate() {
        let line = sheet_row(index);
        let candidate = match clean_row(row) {
            Ok(candidate) => candidate,
            Err(Error::Validation { message }) => {
                errors.push(format!("Row {line}: {message}"));
                continue;
            }
            Err(e) => return Err(e),
        };

        if find_player(&txn, tournament_id, &candidate.emp_id).await?.is_some() {
            errors.push(format!("Row {line}: Duplicate emp_id '{}'", candidate.emp_id));
            continue;
        }

        let emp_id = candidate.emp_id.clone();
        match candidate.into_active_model(tournament_id).insert(&txn).await {
            Ok(_) => added += 1,
            Err(e) => match Error::from_write(e, duplicate_emp_id(&emp_id)) {
                Error::DuplicateKey { .. } => {
                    errors.push(format!("Row {line}: Duplicate emp_id '{emp_id}'"));
                }
                other => return Err(other),
            },
        }
    }

    txn.commit().await?;

    let skipped = errors.len();
    if skipped > 0 {
        warn!(skipped, "Some roster rows were skipped");
    }
    info!(added, skipped, %mode, "Imported roster");

    Ok(ImportReport {
        mode,
        total_rows,
        added,
        skipped,
        errors: cap_errors(errors),
    })
}
