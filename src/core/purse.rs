//! Purse business logic - the shared cash pool of a room.
//!
//! Standalone inflows ("Add Money") and outflows ("Pay Now") are inserted
//! here; outflows created for a room expense go through the ledger engine
//! instead so the pairing invariant holds.

use crate::{
    core::{ledger, member},
    entities::{PurseTransaction as PurseTransactionEntity, profile, purse_transaction},
    errors::{Error, Result},
    events::{DomainEvent, EventBus},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{DatabaseConnection, QueryOrder, Set, TransactionTrait, prelude::*};

/// Input for a standalone purse transaction.
#[derive(Debug, Clone)]
pub struct NewPurseTransaction {
    /// Room the transaction belongs to (admin's `user_id`)
    pub admin_id: String,
    /// `"inflow"` or `"outflow"`
    pub tx_type: String,
    /// Positive amount in rupees
    pub amount: f64,
    /// Calendar date of the transaction
    pub date: NaiveDate,
    /// Free-text description
    pub description: String,
}

/// Inserts a standalone purse transaction and emits a
/// [`DomainEvent::TransactionRecorded`].
///
/// # Errors
/// Returns [`Error::InvalidAmount`] for non-positive amounts and
/// [`Error::MissingField`] when `tx_type` is neither inflow nor outflow.
pub async fn add_transaction(
    db: &DatabaseConnection,
    bus: &EventBus,
    new: NewPurseTransaction,
) -> Result<purse_transaction::Model> {
    ledger::validate_positive_amount(new.amount)?;
    if new.tx_type != purse_transaction::TYPE_INFLOW
        && new.tx_type != purse_transaction::TYPE_OUTFLOW
    {
        return Err(Error::MissingField { field: "tx_type" });
    }

    let model = purse_transaction::ActiveModel {
        admin_id: Set(new.admin_id.clone()),
        tx_type: Set(new.tx_type.clone()),
        amount: Set(new.amount),
        date: Set(new.date),
        description: Set(new.description),
        expense_id: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let row = model.insert(db).await?;

    bus.emit(DomainEvent::TransactionRecorded {
        transaction_id: row.id,
        admin_id: new.admin_id,
        tx_type: new.tx_type,
        amount: new.amount,
    });

    Ok(row)
}

/// Retrieves the full transaction history for a room, newest first.
///
/// # Errors
/// Returns database errors.
pub async fn list_transactions(
    db: &DatabaseConnection,
    admin_id: &str,
) -> Result<Vec<purse_transaction::Model>> {
    PurseTransactionEntity::find()
        .filter(purse_transaction::Column::AdminId.eq(admin_id))
        .order_by_desc(purse_transaction::Column::CreatedAt)
        .order_by_desc(purse_transaction::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Computes the current purse balance for a room from its transaction log.
///
/// # Errors
/// Returns database errors.
pub async fn current_balance(db: &DatabaseConnection, admin_id: &str) -> Result<f64> {
    let txs = list_transactions(db, admin_id).await?;
    Ok(ledger::balance(&txs))
}

/// Deletes a standalone purse transaction. Admin only. Transactions paired
/// with a room expense must be removed by deleting the expense so the
/// pairing invariant survives.
///
/// # Errors
/// Returns [`Error::AdminRequired`] for non-admin callers,
/// [`Error::TransactionNotFound`] for a missing row, and
/// [`Error::ExpenseNotFound`] when the transaction is paired to an expense.
pub async fn delete_transaction(
    db: &DatabaseConnection,
    caller: &profile::Model,
    transaction_id: i64,
) -> Result<()> {
    let txn = db.begin().await?;

    let existing = PurseTransactionEntity::find_by_id(transaction_id)
        .one(&txn)
        .await?
        .ok_or(Error::TransactionNotFound { id: transaction_id })?;

    member::ensure_room_admin(caller, &existing.admin_id)?;

    if let Some(expense_id) = existing.expense_id {
        // Paired entries only go away with their expense
        return Err(Error::ExpenseNotFound { id: expense_id });
    }

    existing.delete(&txn).await?;
    txn.commit().await?;
    Ok(())
}
