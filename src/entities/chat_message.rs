//! Chat message entity - In-room messages between housemates.
//!
//! Functionally outside the ledger core, but the notification rules need the
//! sender identity to exclude the author from their own message alert.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Chat message database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "chat_messages")]
pub struct Model {
    /// Unique identifier for the message
    #[sea_orm(primary_key)]
    pub id: i64,
    /// `user_id` of the room admin - identifies the room
    pub admin_id: String,
    /// Author's auth identity
    pub sender_id: String,
    /// Author's display name
    pub sender_name: String,
    /// Message body
    pub content: String,
    /// When the message was sent
    pub created_at: DateTimeUtc,
}

/// `ChatMessage` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
