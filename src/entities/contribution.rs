//! Contribution entity - A member's dues for one term of one month.
//!
//! A row exists only once someone marks the contribution paid; absence of a
//! row for a (member, year, month, term) key means unpaid. Marking unpaid
//! deletes the row again. Logical unique key:
//! (`admin_id`, `user_id`, `year`, `month`, `term`).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Contribution database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "monthly_contributions")]
pub struct Model {
    /// Unique identifier for the contribution row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// `user_id` of the room admin - identifies the room
    pub admin_id: String,
    /// Member this contribution belongs to
    pub user_id: String,
    /// Member display name captured at mark time
    pub user_name: String,
    /// Calendar year, e.g. 2025
    pub year: i32,
    /// Calendar month, 1-12
    pub month: u32,
    /// Term within the month, 1-3
    pub term: u32,
    /// Always true for a materialized row
    pub paid: bool,
    /// When the contribution was marked paid
    pub paid_at: Option<DateTimeUtc>,
    /// `user_id` of whoever marked it paid
    pub marked_by: String,
}

/// Contribution has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
