//! Recurring bill business logic.
//!
//! Bills are fixed monthly obligations managed by the room admin. They never
//! touch the purse ledger; the notification sweep reads them to remind the
//! room the day before a bill is due.

use crate::{
    core::member,
    entities::{RecurringBill as RecurringBillEntity, profile, recurring_bill},
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, QueryOrder, Set, prelude::*};

/// Input for creating or replacing a bill's editable fields.
#[derive(Debug, Clone)]
pub struct BillFields {
    /// Human-readable bill name
    pub name: String,
    /// Monthly amount in rupees
    pub amount: f64,
    /// Day of the month the bill falls due, 1-31
    pub due_day: u32,
    /// Display category
    pub category: String,
}

fn validate_fields(fields: &BillFields) -> Result<()> {
    if fields.name.trim().is_empty() {
        return Err(Error::MissingField { field: "name" });
    }
    if !fields.amount.is_finite() || fields.amount <= 0.0 {
        return Err(Error::InvalidAmount {
            amount: fields.amount,
        });
    }
    if !(1..=31).contains(&fields.due_day) {
        return Err(Error::MissingField { field: "due_day" });
    }
    Ok(())
}

/// Creates a recurring bill for the caller's room. Admin only. New bills
/// start active.
///
/// # Errors
/// Returns [`Error::AdminRequired`] for non-admin callers plus validation
/// and database errors.
pub async fn create_bill(
    db: &DatabaseConnection,
    caller: &profile::Model,
    fields: BillFields,
) -> Result<recurring_bill::Model> {
    member::ensure_room_admin(caller, &caller.user_id)?;
    validate_fields(&fields)?;

    let model = recurring_bill::ActiveModel {
        admin_id: Set(caller.user_id.clone()),
        name: Set(fields.name.trim().to_string()),
        amount: Set(fields.amount),
        due_day: Set(fields.due_day),
        category: Set(fields.category),
        active: Set(true),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Retrieves all bills for a room ordered by due day.
///
/// # Errors
/// Returns database errors.
pub async fn list_bills(
    db: &DatabaseConnection,
    admin_id: &str,
) -> Result<Vec<recurring_bill::Model>> {
    RecurringBillEntity::find()
        .filter(recurring_bill::Column::AdminId.eq(admin_id))
        .order_by_asc(recurring_bill::Column::DueDay)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Rewrites a bill's editable fields. Admin only.
///
/// # Errors
/// Returns [`Error::BillNotFound`] for a missing row,
/// [`Error::AdminRequired`] for non-admin callers, plus validation errors.
pub async fn update_bill(
    db: &DatabaseConnection,
    caller: &profile::Model,
    bill_id: i64,
    fields: BillFields,
) -> Result<recurring_bill::Model> {
    validate_fields(&fields)?;

    let existing = RecurringBillEntity::find_by_id(bill_id)
        .one(db)
        .await?
        .ok_or(Error::BillNotFound { id: bill_id })?;

    member::ensure_room_admin(caller, &existing.admin_id)?;

    let mut model: recurring_bill::ActiveModel = existing.into();
    model.name = Set(fields.name.trim().to_string());
    model.amount = Set(fields.amount);
    model.due_day = Set(fields.due_day);
    model.category = Set(fields.category);
    model.update(db).await.map_err(Into::into)
}

/// Turns a bill's reminders on or off without deleting its history. Admin
/// only.
///
/// # Errors
/// Returns [`Error::BillNotFound`] for a missing row and
/// [`Error::AdminRequired`] for non-admin callers.
pub async fn set_bill_active(
    db: &DatabaseConnection,
    caller: &profile::Model,
    bill_id: i64,
    active: bool,
) -> Result<recurring_bill::Model> {
    let existing = RecurringBillEntity::find_by_id(bill_id)
        .one(db)
        .await?
        .ok_or(Error::BillNotFound { id: bill_id })?;

    member::ensure_room_admin(caller, &existing.admin_id)?;

    let mut model: recurring_bill::ActiveModel = existing.into();
    model.active = Set(active);
    model.update(db).await.map_err(Into::into)
}

/// Deletes a bill. Admin only.
///
/// # Errors
/// Returns [`Error::BillNotFound`] for a missing row and
/// [`Error::AdminRequired`] for non-admin callers.
pub async fn delete_bill(
    db: &DatabaseConnection,
    caller: &profile::Model,
    bill_id: i64,
) -> Result<()> {
    let existing = RecurringBillEntity::find_by_id(bill_id)
        .one(db)
        .await?
        .ok_or(Error::BillNotFound { id: bill_id })?;

    member::ensure_room_admin(caller, &existing.admin_id)?;

    existing.delete(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    fn rent(due_day: u32) -> BillFields {
        BillFields {
            name: "Rent".to_string(),
            amount: 12000.0,
            due_day,
            category: "Rent".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_bill_validation() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_admin(&db, "admin").await?;

        let mut fields = rent(1);
        fields.name = "  ".to_string();
        assert!(matches!(
            create_bill(&db, &admin, fields).await.unwrap_err(),
            Error::MissingField { field: "name" }
        ));

        let mut fields = rent(1);
        fields.amount = -5.0;
        assert!(matches!(
            create_bill(&db, &admin, fields).await.unwrap_err(),
            Error::InvalidAmount { .. }
        ));

        let fields = rent(32);
        assert!(matches!(
            create_bill(&db, &admin, fields).await.unwrap_err(),
            Error::MissingField { field: "due_day" }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_member_cannot_manage_bills() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_admin(&db, "admin").await?;
        let room_member = create_test_member(&db, "admin", "member1", "Ravi").await?;

        assert!(matches!(
            create_bill(&db, &room_member, rent(1)).await.unwrap_err(),
            Error::AdminRequired { .. }
        ));

        let bill = create_bill(&db, &admin, rent(1)).await?;
        assert!(matches!(
            set_bill_active(&db, &room_member, bill.id, false)
                .await
                .unwrap_err(),
            Error::AdminRequired { .. }
        ));
        assert!(matches!(
            delete_bill(&db, &room_member, bill.id).await.unwrap_err(),
            Error::AdminRequired { .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_bill_lifecycle() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_admin(&db, "admin").await?;

        let bill = create_bill(&db, &admin, rent(5)).await?;
        assert!(bill.active);

        let updated = update_bill(
            &db,
            &admin,
            bill.id,
            BillFields {
                name: "Rent + maintenance".to_string(),
                amount: 13000.0,
                due_day: 3,
                category: "Rent".to_string(),
            },
        )
        .await?;
        assert_eq!(updated.amount, 13000.0);
        assert_eq!(updated.due_day, 3);

        let toggled = set_bill_active(&db, &admin, bill.id, false).await?;
        assert!(!toggled.active);
        // Still listed, just inactive
        assert_eq!(list_bills(&db, "admin").await?.len(), 1);

        delete_bill(&db, &admin, bill.id).await?;
        assert!(list_bills(&db, "admin").await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_bills_ordered_by_due_day() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_admin(&db, "admin").await?;

        create_bill(&db, &admin, rent(20)).await?;
        create_bill(
            &db,
            &admin,
            BillFields {
                name: "Internet".to_string(),
                amount: 800.0,
                due_day: 3,
                category: "Internet".to_string(),
            },
        )
        .await?;

        let bills = list_bills(&db, "admin").await?;
        assert_eq!(bills[0].name, "Internet");
        assert_eq!(bills[1].name, "Rent");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_bill_errors() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_admin(&db, "admin").await?;

        let result = update_bill(&db, &admin, 77, rent(1)).await;
        assert!(matches!(result.unwrap_err(), Error::BillNotFound { id: 77 }));

        Ok(())
    }
}
