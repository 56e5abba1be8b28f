//! Profile entity - Represents one account, either a room admin or a member.
//!
//! A room is identified by its admin's `user_id`. A member belongs to a room
//! once `approved` is true and `admin_id` points at the room admin's `user_id`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Profile database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    /// Unique identifier for the profile row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// External auth identity of this account
    pub user_id: String,
    /// `user_id` of the room admin this member belongs to; None for admins
    pub admin_id: Option<String>,
    /// Display name
    pub name: String,
    /// WhatsApp-capable phone number, if the member shared one
    pub mobile_number: Option<String>,
    /// Whether the admin has approved this member into the room
    pub approved: bool,
    /// Room-level daily food budget; stored on the admin's row only.
    /// None means the configured default applies.
    pub daily_food_budget: Option<f64>,
}

/// Profile has no modeled relationships; room scoping is by `admin_id` value
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// True when this profile is a room admin (it has no admin above it).
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.admin_id.is_none()
    }
}
