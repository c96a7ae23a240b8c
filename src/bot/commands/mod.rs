//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Auction floor commands: assign, unassign, release, sign, status
pub mod auction;

/// General utility commands
pub mod general;

/// Player and roster management commands
pub mod player;

/// Team management commands
pub mod team;

/// Tournament management commands
pub mod tournament;

// Export commands
pub use auction::*;
pub use general::*;
pub use player::*;
pub use team::*;
pub use tournament::*;
