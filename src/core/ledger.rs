//! Ledger engine - derives every monetary aggregate from raw collections.
//!
//! The purse balance is never stored as a mutable counter; it is recomputed
//! from the transaction log on every read, which avoids lost-update races on
//! a single balance field. All aggregate functions here are pure reductions
//! over a supplied snapshot and carry no internal state.

use crate::{
    core::expense,
    entities::{purse_transaction, room_expense},
    errors::{Error, Result},
    events::{DomainEvent, EventBus},
};
use chrono::{Datelike, NaiveDate, Utc};
use sea_orm::{DatabaseConnection, Set, TransactionTrait, prelude::*};
use std::collections::HashMap;

/// Partitioned inflow/outflow sums over a purse transaction snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PurseTotals {
    /// Sum of all inflow amounts
    pub inflow: f64,
    /// Sum of all outflow amounts
    pub outflow: f64,
}

/// Input for recording a room expense together with its ledger entry.
#[derive(Debug, Clone)]
pub struct NewRoomExpense {
    /// Room the expense belongs to (admin's `user_id`)
    pub admin_id: String,
    /// Calendar date of the expense
    pub date: NaiveDate,
    /// One of the room expense categories
    pub category: String,
    /// Positive amount in rupees
    pub amount: f64,
    /// Free-text description
    pub description: String,
    /// Display name of the member who paid
    pub paid_by_name: String,
}

/// Rejects amounts that are not strictly positive finite numbers.
///
/// # Errors
/// Returns [`Error::InvalidAmount`] for zero, negative, NaN, or infinite
/// amounts.
pub fn validate_positive_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

/// Computes the purse balance: sum of inflows minus sum of outflows.
/// An empty snapshot yields 0.
#[must_use]
pub fn balance(transactions: &[purse_transaction::Model]) -> f64 {
    transactions.iter().fold(0.0, |acc, tx| {
        if tx.is_inflow() {
            acc + tx.amount
        } else {
            acc - tx.amount
        }
    })
}

/// Computes partitioned inflow and outflow totals.
#[must_use]
pub fn totals(transactions: &[purse_transaction::Model]) -> PurseTotals {
    transactions
        .iter()
        .fold(PurseTotals::default(), |mut acc, tx| {
            if tx.is_inflow() {
                acc.inflow += tx.amount;
            } else {
                acc.outflow += tx.amount;
            }
            acc
        })
}

/// Sums expenses dated in the given calendar year and month.
#[must_use]
pub fn monthly_total(expenses: &[room_expense::Model], year: i32, month: u32) -> f64 {
    expenses
        .iter()
        .filter(|e| e.date.year() == year && e.date.month() == month)
        .map(|e| e.amount)
        .sum()
}

/// Groups expenses by category and sums amounts per group.
#[must_use]
pub fn category_breakdown(expenses: &[room_expense::Model]) -> HashMap<String, f64> {
    let mut breakdown: HashMap<String, f64> = HashMap::new();
    for e in expenses {
        *breakdown.entry(e.category.clone()).or_insert(0.0) += e.amount;
    }
    breakdown
}

/// Sums Food-category expenses per calendar date.
#[must_use]
pub fn daily_food_totals(expenses: &[room_expense::Model]) -> HashMap<NaiveDate, f64> {
    let mut daily: HashMap<NaiveDate, f64> = HashMap::new();
    for e in expenses {
        if e.category == expense::CATEGORY_FOOD {
            *daily.entry(e.date).or_insert(0.0) += e.amount;
        }
    }
    daily
}

/// Returns the dates whose Food total strictly exceeds the daily budget,
/// sorted ascending. Dates with no Food spending never appear, so they are
/// neither over nor under budget.
#[must_use]
pub fn over_budget_days(expenses: &[room_expense::Model], daily_budget: f64) -> Vec<NaiveDate> {
    let mut days: Vec<NaiveDate> = daily_food_totals(expenses)
        .into_iter()
        .filter(|&(_, total)| total > daily_budget)
        .map(|(date, _)| date)
        .collect();
    days.sort_unstable();
    days
}

/// Computes the rounded percentage change of this month's total versus last
/// month's, relative to `now`. When last month's total is 0 the change is
/// defined as 0 rather than surfacing a division by zero.
#[must_use]
pub fn month_over_month_change(expenses: &[room_expense::Model], now: NaiveDate) -> i64 {
    let this_total = monthly_total(expenses, now.year(), now.month());
    let (last_year, last_month) = if now.month() == 1 {
        (now.year() - 1, 12)
    } else {
        (now.year(), now.month() - 1)
    };
    let last_total = monthly_total(expenses, last_year, last_month);

    if last_total == 0.0 {
        return 0;
    }

    // Cast safety: percentage magnitudes here are far below i64 range.
    #[allow(clippy::cast_possible_truncation)]
    let change = (((this_total - last_total) / last_total) * 100.0).round() as i64;
    change
}

/// Records a room expense together with its paired outflow purse transaction
/// as one database transaction.
///
/// The pairing invariant (every room expense has exactly one equal-amount
/// outflow ledger entry) must hold even under a mid-operation failure, so
/// both inserts commit or neither does.
///
/// # Errors
/// Returns [`Error::InvalidAmount`] or [`Error::UnknownCategory`] before any
/// write, and database errors from either insert.
pub async fn record_expense_with_ledger_entry(
    db: &DatabaseConnection,
    bus: &EventBus,
    new: NewRoomExpense,
) -> Result<(room_expense::Model, purse_transaction::Model)> {
    validate_positive_amount(new.amount)?;
    expense::validate_room_category(&new.category)?;
    if new.paid_by_name.trim().is_empty() {
        return Err(Error::MissingField {
            field: "paid_by_name",
        });
    }

    let now = Utc::now();
    let txn = db.begin().await?;

    let expense_model = room_expense::ActiveModel {
        admin_id: Set(new.admin_id.clone()),
        date: Set(new.date),
        category: Set(new.category.clone()),
        amount: Set(new.amount),
        description: Set(new.description.clone()),
        paid_by_name: Set(new.paid_by_name),
        created_at: Set(now),
        ..Default::default()
    };
    let expense_row = expense_model.insert(&txn).await?;

    let tx_model = purse_transaction::ActiveModel {
        admin_id: Set(new.admin_id.clone()),
        tx_type: Set(purse_transaction::TYPE_OUTFLOW.to_string()),
        amount: Set(new.amount),
        date: Set(new.date),
        description: Set(new.description),
        expense_id: Set(Some(expense_row.id)),
        created_at: Set(now),
        ..Default::default()
    };
    let tx_row = tx_model.insert(&txn).await?;

    txn.commit().await?;

    bus.emit(DomainEvent::ExpenseRecorded {
        expense_id: expense_row.id,
        admin_id: new.admin_id,
        amount: new.amount,
    });

    Ok((expense_row, tx_row))
}
