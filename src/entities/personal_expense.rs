//! Personal expense entity - Private per-member spending.
//!
//! Scoped strictly to one member; no cross-member visibility and no effect
//! on the shared purse.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Personal expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "personal_expenses")]
pub struct Model {
    /// Unique identifier for the expense
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning member's auth identity
    pub user_id: String,
    /// Calendar date the expense happened on
    pub date: Date,
    /// Personal category: `"Travel"`, `"Shopping"`, `"Food"`, `"Health"`,
    /// `"Entertainment"`, or `"Others"`
    pub category: String,
    /// Amount in rupees, always positive
    pub amount: f64,
    /// Free-text description
    pub description: String,
    /// When the row was created
    pub created_at: DateTimeUtc,
}

/// `PersonalExpense` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
