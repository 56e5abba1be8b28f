//! Purse transaction entity - The shared cash ledger of a room.
//!
//! The purse balance is never stored; it is always recomputed as the sum of
//! inflows minus outflows over this table. `expense_id` links an outflow back
//! to the room expense that created it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction direction: money entering the purse
pub const TYPE_INFLOW: &str = "inflow";
/// Transaction direction: money leaving the purse
pub const TYPE_OUTFLOW: &str = "outflow";

/// Purse transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purse_transactions")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// `user_id` of the room admin - identifies the room
    pub admin_id: String,
    /// Direction of the transaction: `"inflow"` or `"outflow"`
    pub tx_type: String,
    /// Amount in rupees, always positive; direction comes from `tx_type`
    pub amount: f64,
    /// Calendar date of the transaction
    pub date: Date,
    /// Free-text description
    pub description: String,
    /// Room expense this outflow was created for, if any
    pub expense_id: Option<i64>,
    /// When the row was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `PurseTransaction` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// An outflow may belong to the room expense that produced it
    #[sea_orm(
        belongs_to = "super::room_expense::Entity",
        from = "Column::ExpenseId",
        to = "super::room_expense::Column::Id"
    )]
    RoomExpense,
}

impl Related<super::room_expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoomExpense.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// True for inflow transactions.
    #[must_use]
    pub fn is_inflow(&self) -> bool {
        self.tx_type == TYPE_INFLOW
    }
}
