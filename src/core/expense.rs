//! Room expense business logic.
//!
//! Creation always goes through the ledger engine so the expense row and its
//! outflow purse entry commit together. Update and delete are admin-only and
//! keep the paired ledger entry in sync within the same database transaction.

use crate::{
    core::{ledger, member},
    entities::{RoomExpense as RoomExpenseEntity, profile, purse_transaction, room_expense},
    errors::{Error, Result},
    events::EventBus,
};
use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, QueryOrder, Set, TransactionTrait, prelude::*};

/// Allowed room expense categories.
pub const ROOM_CATEGORIES: [&str; 6] = ["Food", "Rent", "Electricity", "Internet", "Water", "Misc"];

/// The category that counts against the daily food budget.
pub const CATEGORY_FOOD: &str = "Food";

/// Rejects category strings outside [`ROOM_CATEGORIES`].
///
/// # Errors
/// Returns [`Error::UnknownCategory`] for any other string.
pub fn validate_room_category(category: &str) -> Result<()> {
    if ROOM_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(Error::UnknownCategory {
            category: category.to_string(),
        })
    }
}

/// Records a new room expense with its paired outflow ledger entry.
/// Any approved member may do this.
///
/// # Errors
/// Propagates validation and database errors from the ledger engine.
pub async fn create_expense(
    db: &DatabaseConnection,
    bus: &EventBus,
    new: ledger::NewRoomExpense,
) -> Result<(room_expense::Model, purse_transaction::Model)> {
    ledger::record_expense_with_ledger_entry(db, bus, new).await
}

/// Retrieves all expenses for a room, newest date first.
///
/// # Errors
/// Returns database errors.
pub async fn list_expenses(
    db: &DatabaseConnection,
    admin_id: &str,
) -> Result<Vec<room_expense::Model>> {
    RoomExpenseEntity::find()
        .filter(room_expense::Column::AdminId.eq(admin_id))
        .order_by_desc(room_expense::Column::Date)
        .order_by_desc(room_expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Updates an expense's date, category, amount, or description. Admin only.
/// The paired outflow transaction is rewritten in the same database
/// transaction so the ledger pairing stays intact.
///
/// # Errors
/// Returns [`Error::AdminRequired`] for non-admin callers,
/// [`Error::ExpenseNotFound`] for a missing row, and validation errors for
/// bad amounts or categories.
pub async fn update_expense(
    db: &DatabaseConnection,
    caller: &profile::Model,
    expense_id: i64,
    date: NaiveDate,
    category: String,
    amount: f64,
    description: String,
) -> Result<room_expense::Model> {
    ledger::validate_positive_amount(amount)?;
    validate_room_category(&category)?;

    let txn = db.begin().await?;

    let existing = RoomExpenseEntity::find_by_id(expense_id)
        .one(&txn)
        .await?
        .ok_or(Error::ExpenseNotFound { id: expense_id })?;

    member::ensure_room_admin(caller, &existing.admin_id)?;

    let mut expense_model: room_expense::ActiveModel = existing.into();
    expense_model.date = Set(date);
    expense_model.category = Set(category);
    expense_model.amount = Set(amount);
    expense_model.description = Set(description.clone());
    let updated = expense_model.update(&txn).await?;

    // Keep the paired outflow in sync
    let paired = crate::entities::PurseTransaction::find()
        .filter(purse_transaction::Column::ExpenseId.eq(expense_id))
        .one(&txn)
        .await?;
    if let Some(tx_row) = paired {
        let mut tx_model: purse_transaction::ActiveModel = tx_row.into();
        tx_model.date = Set(date);
        tx_model.amount = Set(amount);
        tx_model.description = Set(description);
        tx_model.update(&txn).await?;
    }

    txn.commit().await?;
    Ok(updated)
}

/// Deletes an expense together with its paired outflow transaction. Admin
/// only.
///
/// # Errors
/// Returns [`Error::AdminRequired`] for non-admin callers and
/// [`Error::ExpenseNotFound`] when the row does not exist.
pub async fn delete_expense(
    db: &DatabaseConnection,
    caller: &profile::Model,
    expense_id: i64,
) -> Result<()> {
    let txn = db.begin().await?;

    let existing = RoomExpenseEntity::find_by_id(expense_id)
        .one(&txn)
        .await?
        .ok_or(Error::ExpenseNotFound { id: expense_id })?;

    member::ensure_room_admin(caller, &existing.admin_id)?;

    crate::entities::PurseTransaction::delete_many()
        .filter(purse_transaction::Column::ExpenseId.eq(expense_id))
        .exec(&txn)
        .await?;
    existing.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_validate_room_category() {
        for cat in ROOM_CATEGORIES {
            assert!(validate_room_category(cat).is_ok());
        }
        assert!(matches!(
            validate_room_category("Travel").unwrap_err(),
            Error::UnknownCategory { .. }
        ));
    }

    #[tokio::test]
    async fn test_list_expenses_scoped_by_room() -> Result<()> {
        let db = setup_test_db().await?;
        let bus = EventBus::new();

        record_test_expense(&db, &bus, "admin_a", "Food", 100.0, date("2025-06-05")).await?;
        record_test_expense(&db, &bus, "admin_b", "Rent", 5000.0, date("2025-06-01")).await?;

        let room_a = list_expenses(&db, "admin_a").await?;
        assert_eq!(room_a.len(), 1);
        assert_eq!(room_a[0].category, "Food");

        let room_b = list_expenses(&db, "admin_b").await?;
        assert_eq!(room_b.len(), 1);
        assert_eq!(room_b[0].amount, 5000.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_expense_requires_admin() -> Result<()> {
        let db = setup_test_db().await?;
        let bus = EventBus::new();
        let admin = create_test_admin(&db, "admin").await?;
        let other_member = create_test_member(&db, "admin", "member1", "Ravi").await?;

        let (expense, _) =
            record_test_expense(&db, &bus, "admin", "Food", 100.0, date("2025-06-05")).await?;

        // Member cannot edit
        let result = update_expense(
            &db,
            &other_member,
            expense.id,
            expense.date,
            "Food".to_string(),
            120.0,
            "edited".to_string(),
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::AdminRequired { .. }));

        // Admin can
        let updated = update_expense(
            &db,
            &admin,
            expense.id,
            expense.date,
            "Food".to_string(),
            120.0,
            "edited".to_string(),
        )
        .await?;
        assert_eq!(updated.amount, 120.0);
        assert_eq!(updated.description, "edited");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_expense_keeps_pairing_in_sync() -> Result<()> {
        let db = setup_test_db().await?;
        let bus = EventBus::new();
        let admin = create_test_admin(&db, "admin").await?;

        let (expense, _) =
            record_test_expense(&db, &bus, "admin", "Food", 100.0, date("2025-06-05")).await?;

        update_expense(
            &db,
            &admin,
            expense.id,
            date("2025-06-06"),
            "Misc".to_string(),
            80.0,
            "corrected".to_string(),
        )
        .await?;

        let paired = crate::entities::PurseTransaction::find()
            .filter(purse_transaction::Column::ExpenseId.eq(expense.id))
            .one(&db)
            .await?
            .unwrap();
        assert_eq!(paired.amount, 80.0);
        assert_eq!(paired.date, date("2025-06-06"));
        assert_eq!(paired.description, "corrected");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_expense_removes_ledger_entry() -> Result<()> {
        let db = setup_test_db().await?;
        let bus = EventBus::new();
        let admin = create_test_admin(&db, "admin").await?;

        let (expense, _) =
            record_test_expense(&db, &bus, "admin", "Food", 100.0, date("2025-06-05")).await?;

        delete_expense(&db, &admin, expense.id).await?;

        assert!(list_expenses(&db, "admin").await?.is_empty());
        let txs = crate::core::purse::list_transactions(&db, "admin").await?;
        assert!(txs.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_expense_errors() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_admin(&db, "admin").await?;

        let result = delete_expense(&db, &admin, 999).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::ExpenseNotFound { id: 999 }
        ));

        Ok(())
    }
}
