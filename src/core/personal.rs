//! Personal expense business logic.
//!
//! Personal expenses are private to one member. They never touch the shared
//! purse and no other member (admin included) can list or delete them
//! through this module's API; every operation is scoped by the owner's
//! `user_id`.

use crate::{
    core::ledger,
    entities::{PersonalExpense as PersonalExpenseEntity, personal_expense},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{DatabaseConnection, QueryOrder, Set, prelude::*};

/// Allowed personal expense categories.
pub const PERSONAL_CATEGORIES: [&str; 6] = [
    "Travel",
    "Shopping",
    "Food",
    "Health",
    "Entertainment",
    "Others",
];

/// Creates a personal expense for `user_id`.
///
/// # Errors
/// Returns [`Error::InvalidAmount`] or [`Error::UnknownCategory`] before any
/// write, plus database errors.
pub async fn create_personal_expense(
    db: &DatabaseConnection,
    user_id: &str,
    date: NaiveDate,
    category: String,
    amount: f64,
    description: String,
) -> Result<personal_expense::Model> {
    ledger::validate_positive_amount(amount)?;
    if !PERSONAL_CATEGORIES.contains(&category.as_str()) {
        return Err(Error::UnknownCategory { category });
    }

    let model = personal_expense::ActiveModel {
        user_id: Set(user_id.to_string()),
        date: Set(date),
        category: Set(category),
        amount: Set(amount),
        description: Set(description),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Retrieves one member's personal expenses, newest date first.
///
/// # Errors
/// Returns database errors.
pub async fn list_personal_expenses(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<personal_expense::Model>> {
    PersonalExpenseEntity::find()
        .filter(personal_expense::Column::UserId.eq(user_id))
        .order_by_desc(personal_expense::Column::Date)
        .order_by_desc(personal_expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a personal expense owned by `user_id`. A row belonging to
/// someone else is treated as not found rather than revealing it exists.
///
/// # Errors
/// Returns [`Error::PersonalExpenseNotFound`] when no owned row matches.
pub async fn delete_personal_expense(
    db: &DatabaseConnection,
    user_id: &str,
    expense_id: i64,
) -> Result<()> {
    let existing = PersonalExpenseEntity::find_by_id(expense_id)
        .filter(personal_expense::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or(Error::PersonalExpenseNotFound { id: expense_id })?;

    existing.delete(db).await?;
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

    #[tokio::test]
    async fn test_create_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_personal_expense(
            &db,
            "member1",
            date("2025-06-05"),
            "Travel".to_string(),
            0.0,
            "bus".to_string(),
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { .. }));

        let result = create_personal_expense(
            &db,
            "member1",
            date("2025-06-05"),
            "Rent".to_string(),
            50.0,
            "not personal".to_string(),
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::UnknownCategory { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_strict_user_scoping() -> Result<()> {
        let db = setup_test_db().await?;

        let mine = create_personal_expense(
            &db,
            "member1",
            date("2025-06-05"),
            "Shopping".to_string(),
            300.0,
            "shoes".to_string(),
        )
        .await?;
        create_personal_expense(
            &db,
            "member2",
            date("2025-06-06"),
            "Health".to_string(),
            450.0,
            "pharmacy".to_string(),
        )
        .await?;

        // Each member only sees their own rows
        let member1_rows = list_personal_expenses(&db, "member1").await?;
        assert_eq!(member1_rows.len(), 1);
        assert_eq!(member1_rows[0].description, "shoes");

        // Another member cannot delete my expense
        let result = delete_personal_expense(&db, "member2", mine.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::PersonalExpenseNotFound { .. }
        ));

        delete_personal_expense(&db, "member1", mine.id).await?;
        assert!(list_personal_expenses(&db, "member1").await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_personal_expenses_do_not_touch_purse() -> Result<()> {
        let db = setup_test_db().await?;

        create_personal_expense(
            &db,
            "member1",
            date("2025-06-05"),
            "Entertainment".to_string(),
            250.0,
            "movie".to_string(),
        )
        .await?;

        let txs = crate::core::purse::list_transactions(&db, "admin").await?;
        assert!(txs.is_empty());

        Ok(())
    }
}
