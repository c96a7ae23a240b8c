//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod player;
pub mod team;
pub mod tournament;

// Re-export specific types to avoid conflicts
pub use player::{Column as PlayerColumn, Entity as Player, Model as PlayerModel};
pub use team::{Column as TeamColumn, Entity as Team, Model as TeamModel};
pub use tournament::{Column as TournamentColumn, Entity as Tournament, Model as TournamentModel};
