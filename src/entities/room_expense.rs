//! Room expense entity - Shared expenses visible to the whole room.
//!
//! Each room expense is owned by the room (scoped by `admin_id`) and carries
//! a category, amount, and the name of whoever fronted the money. Creating a
//! room expense always creates a matching outflow purse transaction.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Room expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "room_expenses")]
pub struct Model {
    /// Unique identifier for the expense
    #[sea_orm(primary_key)]
    pub id: i64,
    /// `user_id` of the room admin - identifies the room
    pub admin_id: String,
    /// Calendar date the expense happened on
    pub date: Date,
    /// Expense category: `"Food"`, `"Rent"`, `"Electricity"`, `"Internet"`,
    /// `"Water"`, or `"Misc"`
    pub category: String,
    /// Amount in rupees, always positive
    pub amount: f64,
    /// Free-text description
    pub description: String,
    /// Display name of the member who paid
    pub paid_by_name: String,
    /// When the row was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `RoomExpense` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each room expense has exactly one paired outflow purse transaction
    #[sea_orm(has_many = "super::purse_transaction::Entity")]
    PurseTransactions,
}

impl Related<super::purse_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurseTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
