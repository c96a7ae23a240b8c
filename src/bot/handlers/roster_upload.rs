//! Roster spreadsheet parsing for the `/player import` command.
//!
//! Turns an uploaded CSV file into [`RosterRow`]s. Header names are matched after
//! trimming and lowercasing; cell values are passed through untouched so the import
//! itself decides what counts as blank.

use crate::{
    core::roster::RosterRow,
    errors::{Error, Result},
};

const REQUIRED_COLUMNS: [&str; 3] = ["emp_id", "name", "type"];
const IMAGE_COLUMN: &str = "image_filename";

fn read_error(e: &csv::Error) -> Error {
    Error::Validation {
        message: format!("Could not read roster file: {e}"),
    }
}

/// Parses CSV bytes with an `emp_id,name,type[,image_filename]` header.
///
/// # Errors
/// `Validation` if the file is not valid CSV, has no data rows, or lacks a required column.
pub fn parse_roster_csv(bytes: &[u8]) -> Result<Vec<RosterRow>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| read_error(&e))?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let position = |name: &str| headers.iter().position(|h| h == name);
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|&c| position(c).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(Error::Validation {
            message: format!("Missing columns: {}", missing.join(", ")),
        });
    }

    let [emp_id_at, name_at, type_at] = REQUIRED_COLUMNS.map(|c| position(c).unwrap_or_default());
    let image_at = position(IMAGE_COLUMN);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| read_error(&e))?;
        let field = |at: usize| record.get(at).unwrap_or_default().to_string();
        rows.push(RosterRow {
            emp_id: field(emp_id_at),
            name: field(name_at),
            player_type: field(type_at),
            image_filename: image_at.map(field).filter(|f| !f.trim().is_empty()),
        });
    }

    if rows.is_empty() {
        return Err(Error::Validation {
            message: "File is empty".to_string(),
        });
    }
    Ok(rows)
}
