//! Tournament entity - The top-level owner of teams and players.
//!
//! Deleting a tournament removes its teams and players.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Tournament database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tournaments")]
pub struct Model {
    /// Unique identifier for the tournament
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Office Premier League 2026")
    pub name: String,
    /// When the tournament was created
    pub created_at: DateTimeUtc,
    /// Username of the principal that created it
    pub created_by: String,
}

/// Defines relationships between Tournament and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One tournament has many teams
    #[sea_orm(has_many = "super::team::Entity")]
    Teams,
    /// One tournament has many players
    #[sea_orm(has_many = "super::player::Entity")]
    Players,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teams.def()
    }
}

impl Related<super::player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Players.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
