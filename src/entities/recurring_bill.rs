//! Recurring bill entity - Fixed monthly obligations (rent, internet, ...).
//!
//! Bills never generate ledger entries themselves; they only drive due-date
//! reminders. Setting `active` to false suppresses reminders without losing
//! the bill's history.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Recurring bill database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recurring_bills")]
pub struct Model {
    /// Unique identifier for the bill
    #[sea_orm(primary_key)]
    pub id: i64,
    /// `user_id` of the room admin - identifies the room
    pub admin_id: String,
    /// Human-readable bill name (e.g. "Rent", "Netflix")
    pub name: String,
    /// Amount due each month in rupees
    pub amount: f64,
    /// Day of the month the bill is due, 1-31
    pub due_day: u32,
    /// Bill category for display grouping
    pub category: String,
    /// Whether due-date reminders fire for this bill
    pub active: bool,
}

/// `RecurringBill` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
