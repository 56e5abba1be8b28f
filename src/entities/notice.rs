//! Notice entity - Admin announcements pinned to the room's notice board.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Notice database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notices")]
pub struct Model {
    /// Unique identifier for the notice
    #[sea_orm(primary_key)]
    pub id: i64,
    /// `user_id` of the room admin - identifies the room
    pub admin_id: String,
    /// Notice headline
    pub title: String,
    /// Notice body
    pub content: String,
    /// When the notice was posted
    pub created_at: DateTimeUtc,
}

/// Notice has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
