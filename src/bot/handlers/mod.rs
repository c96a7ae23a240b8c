//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions such as autocomplete,
//! error replies and roster file uploads.

/// Autocomplete handlers for player ids
pub mod autocomplete;
/// User-facing wording for errors
pub mod error_reply;
/// Roster spreadsheet parsing
pub mod roster_upload;
