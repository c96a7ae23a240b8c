//! Player entity - A roster entry that can be sold to one team.
//!
//! `is_assigned` mirrors `team_id.is_some()`, and `bid_amount` is 0 while the
//! player is unassigned. `emp_id` is the business key, unique per tournament.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Player database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "players")]
pub struct Model {
    /// Unique identifier for the player row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning tournament
    pub tournament_id: i64,
    /// Team the player was sold to, `None` while unassigned
    pub team_id: Option<i64>,
    /// Employee id, the business key used across tournaments
    pub emp_id: String,
    /// Player's display name
    pub name: String,
    /// Free-text role label (e.g., "Batsman", "All-rounder")
    #[sea_orm(column_name = "type")]
    pub player_type: String,
    /// Amount debited from the team for this player
    pub bid_amount: f64,
    /// Whether the player is on a team
    pub is_assigned: bool,
    /// Photo file name, shared by every tournament the `emp_id` plays in
    pub image_filename: Option<String>,
}

/// Defines relationships between Player and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each player belongs to one tournament
    #[sea_orm(
        belongs_to = "super::tournament::Entity",
        from = "Column::TournamentId",
        to = "super::tournament::Column::Id",
        on_delete = "Cascade"
    )]
    Tournament,
    /// An assigned player belongs to one team
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamId",
        to = "super::team::Column::Id",
        on_delete = "SetNull"
    )]
    Team,
}

impl Related<super::tournament::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tournament.def()
    }
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
