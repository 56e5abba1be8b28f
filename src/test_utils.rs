//! Shared test utilities.
//!
//! Common helpers for setting up in-memory test databases and building test
//! rooms, members, and ledger rows with sensible defaults.

use crate::{
    core::{ledger, member, purse},
    entities::{profile, purse_transaction, room_expense},
    errors::Result,
    events::EventBus,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a room admin profile with a phone number.
pub async fn create_test_admin(db: &DatabaseConnection, user_id: &str) -> Result<profile::Model> {
    member::register_admin(db, user_id, "Admin", Some(format!("91900000{user_id}"))).await
}

/// Creates an already-approved room member with a phone number.
pub async fn create_test_member(
    db: &DatabaseConnection,
    admin_id: &str,
    user_id: &str,
    name: &str,
) -> Result<profile::Model> {
    let model = profile::ActiveModel {
        user_id: Set(user_id.to_string()),
        admin_id: Set(Some(admin_id.to_string())),
        name: Set(name.to_string()),
        mobile_number: Set(Some(format!("91900000{user_id}"))),
        approved: Set(true),
        daily_food_budget: Set(None),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Adds a purse inflow with default date and description.
pub async fn add_test_inflow(
    db: &DatabaseConnection,
    bus: &EventBus,
    admin_id: &str,
    amount: f64,
) -> Result<purse_transaction::Model> {
    purse::add_transaction(
        db,
        bus,
        purse::NewPurseTransaction {
            admin_id: admin_id.to_string(),
            tx_type: purse_transaction::TYPE_INFLOW.to_string(),
            amount,
            date: test_date(),
            description: "Test inflow".to_string(),
        },
    )
    .await
}

/// Adds a purse outflow with default date and description.
pub async fn add_test_outflow(
    db: &DatabaseConnection,
    bus: &EventBus,
    admin_id: &str,
    amount: f64,
) -> Result<purse_transaction::Model> {
    purse::add_transaction(
        db,
        bus,
        purse::NewPurseTransaction {
            admin_id: admin_id.to_string(),
            tx_type: purse_transaction::TYPE_OUTFLOW.to_string(),
            amount,
            date: test_date(),
            description: "Test outflow".to_string(),
        },
    )
    .await
}

/// Records a room expense with its paired ledger entry.
pub async fn record_test_expense(
    db: &DatabaseConnection,
    bus: &EventBus,
    admin_id: &str,
    category: &str,
    amount: f64,
    date: NaiveDate,
) -> Result<(room_expense::Model, purse_transaction::Model)> {
    ledger::record_expense_with_ledger_entry(
        db,
        bus,
        ledger::NewRoomExpense {
            admin_id: admin_id.to_string(),
            date,
            category: category.to_string(),
            amount,
            description: "Test expense".to_string(),
            paid_by_name: "Tester".to_string(),
        },
    )
    .await
}

/// A detached profile model for pure-function tests; not persisted.
#[must_use]
pub fn stub_profile(
    user_id: &str,
    admin_id: Option<&str>,
    name: &str,
    approved: bool,
) -> profile::Model {
    profile::Model {
        id: 0,
        user_id: user_id.to_string(),
        admin_id: admin_id.map(ToString::to_string),
        name: name.to_string(),
        mobile_number: Some(format!("91900000{user_id}")),
        approved,
        daily_food_budget: None,
    }
}

/// A detached purse transaction for pure-function tests; not persisted.
#[must_use]
pub fn stub_transaction(id: i64, tx_type: &str, amount: f64) -> purse_transaction::Model {
    purse_transaction::Model {
        id,
        admin_id: "admin".to_string(),
        tx_type: tx_type.to_string(),
        amount,
        date: test_date(),
        description: String::new(),
        expense_id: None,
        created_at: Utc::now(),
    }
}

/// A detached room expense for pure-function tests; not persisted.
#[must_use]
pub fn stub_expense(id: i64, category: &str, amount: f64, date: NaiveDate) -> room_expense::Model {
    room_expense::Model {
        id,
        admin_id: "admin".to_string(),
        date,
        category: category.to_string(),
        amount,
        description: String::new(),
        paid_by_name: "Tester".to_string(),
        created_at: Utc::now(),
    }
}

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap_or_default()
}
