//! Core business logic - framework-agnostic auction operations.
//!
//! Nothing in here knows about Discord. Every function takes a database handle (or a
//! transaction) and returns structured data or an [`crate::errors::Error`].

/// Player assignment engine
pub mod assignment;
/// Team budget ledger
pub mod ledger;
/// Player administration
pub mod player;
/// Bulk roster import
pub mod roster;
/// Auction progress reporting
pub mod status;
/// Team administration
pub mod team;
/// Tournament administration
pub mod tournament;
