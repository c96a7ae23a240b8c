//! Team entity - A bidding side in a tournament auction.
//!
//! `remaining_budget` is derived state: it always equals `total_budget` minus the
//! bids of the players currently assigned to the team, and only the budget ledger
//! writes it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Team database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    /// Unique identifier for the team
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning tournament
    pub tournament_id: i64,
    /// Team name, unique within the tournament
    pub name: String,
    /// Budget the team started the auction with
    pub total_budget: f64,
    /// Budget not yet spent on assigned players
    pub remaining_budget: f64,
    /// `emp_id` of the captain, must be a member of this team
    pub captain_id: Option<String>,
    /// `emp_id` of the vice-captain, must be a member of this team
    pub vice_captain_id: Option<String>,
}

impl Model {
    /// Amount already committed to assigned players.
    #[must_use]
    pub fn spent(&self) -> f64 {
        self.total_budget - self.remaining_budget
    }
}

/// Defines relationships between Team and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each team belongs to one tournament
    #[sea_orm(
        belongs_to = "super::tournament::Entity",
        from = "Column::TournamentId",
        to = "super::tournament::Column::Id",
        on_delete = "Cascade"
    )]
    Tournament,
    /// One team has many assigned players
    #[sea_orm(has_many = "super::player::Entity")]
    Players,
}

impl Related<super::tournament::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tournament.def()
    }
}

impl Related<super::player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Players.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
