//! Contribution scheduling - term classification and paid/unpaid tracking.
//!
//! A month is split into three fixed terms by day-of-month: 1st-10th,
//! 11th-20th, and 21st onward. Dues are tracked per (member, year, month,
//! term); a database row exists only while the contribution is marked paid,
//! so unpaid is always the absence state.

use crate::{
    core::member,
    entities::{Contribution as ContributionEntity, contribution, profile},
    errors::Result,
    events::{DomainEvent, EventBus},
};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use sea_orm::{DatabaseConnection, QueryOrder, Set, prelude::*};

/// One of the three fixed contribution windows within a calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Term {
    /// Days 1-10
    One,
    /// Days 11-20
    Two,
    /// Days 21 onward
    Three,
}

impl Term {
    /// The term's 1-based number as stored in the database.
    #[must_use]
    pub const fn number(self) -> u32 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Human-readable date range label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::One => "1st - 10th",
            Self::Two => "11th - 20th",
            Self::Three => "21st - end of month",
        }
    }

    /// All three terms, in order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::One, Self::Two, Self::Three]
    }
}

/// Classifies a day-of-month into its term. Days past 31 cannot occur on a
/// real calendar; anything above 20 lands in term three.
#[must_use]
pub const fn term_for_day(day: u32) -> Term {
    match day {
        1..=10 => Term::One,
        11..=20 => Term::Two,
        _ => Term::Three,
    }
}

/// The term the given date falls in.
#[must_use]
pub fn current_term(date: NaiveDate) -> Term {
    term_for_day(date.day())
}

/// Paid/unpaid state of one member for one term.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContributionStatus {
    /// Whether the contribution is marked paid
    pub paid: bool,
    /// When it was marked paid, if it is
    pub paid_at: Option<DateTime<Utc>>,
    /// Who marked it, if it is paid
    pub marked_by: Option<String>,
}

/// Identifies one contribution slot: a member's dues for one term of one
/// month in one room.
#[derive(Debug, Clone)]
pub struct ContributionKey {
    /// Room (admin's `user_id`)
    pub admin_id: String,
    /// Member the dues belong to
    pub user_id: String,
    /// Member display name, captured on first mark
    pub user_name: String,
    /// Calendar year
    pub year: i32,
    /// Calendar month, 1-12
    pub month: u32,
    /// Term within the month
    pub term: Term,
}

/// Looks up a member's status for a term within an already-fetched month of
/// contribution rows. Absence of a row means unpaid.
#[must_use]
pub fn status(
    contributions: &[contribution::Model],
    user_id: &str,
    term: Term,
) -> ContributionStatus {
    contributions
        .iter()
        .find(|c| c.user_id == user_id && c.term == term.number())
        .map_or_else(ContributionStatus::default, |c| ContributionStatus {
            paid: c.paid,
            paid_at: c.paid_at,
            marked_by: Some(c.marked_by.clone()),
        })
}

/// Retrieves all contribution rows for a room and month.
///
/// # Errors
/// Returns database errors.
pub async fn list_for_month(
    db: &DatabaseConnection,
    admin_id: &str,
    year: i32,
    month: u32,
) -> Result<Vec<contribution::Model>> {
    ContributionEntity::find()
        .filter(contribution::Column::AdminId.eq(admin_id))
        .filter(contribution::Column::Year.eq(year))
        .filter(contribution::Column::Month.eq(month))
        .order_by_asc(contribution::Column::Term)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Marks a contribution paid, inserting the row on first mark and updating
/// it on repeat marks. Idempotent: marking twice leaves one logical record
/// with `paid = true`.
///
/// # Errors
/// Returns database errors.
pub async fn mark_paid(
    db: &DatabaseConnection,
    bus: &EventBus,
    key: ContributionKey,
    marked_by: &str,
    now: DateTime<Utc>,
) -> Result<contribution::Model> {
    let existing = find_by_key(db, &key).await?;

    let row = if let Some(row) = existing {
        let mut model: contribution::ActiveModel = row.into();
        model.paid = Set(true);
        model.paid_at = Set(Some(now));
        model.marked_by = Set(marked_by.to_string());
        model.update(db).await?
    } else {
        let model = contribution::ActiveModel {
            admin_id: Set(key.admin_id.clone()),
            user_id: Set(key.user_id.clone()),
            user_name: Set(key.user_name.clone()),
            year: Set(key.year),
            month: Set(key.month),
            term: Set(key.term.number()),
            paid: Set(true),
            paid_at: Set(Some(now)),
            marked_by: Set(marked_by.to_string()),
            ..Default::default()
        };
        model.insert(db).await?
    };

    bus.emit(DomainEvent::ContributionMarked {
        admin_id: key.admin_id,
        user_id: key.user_id,
        year: key.year,
        month: key.month,
        term: key.term.number(),
    });

    Ok(row)
}

/// Reverts a contribution to unpaid by deleting its row. A missing row is a
/// no-op, not an error.
///
/// # Errors
/// Returns database errors.
pub async fn mark_unpaid(db: &DatabaseConnection, bus: &EventBus, key: &ContributionKey) -> Result<()> {
    let existing = find_by_key(db, key).await?;

    if let Some(row) = existing {
        row.delete(db).await?;
        bus.emit(DomainEvent::ContributionCleared {
            admin_id: key.admin_id.clone(),
            user_id: key.user_id.clone(),
            year: key.year,
            month: key.month,
            term: key.term.number(),
        });
    }

    Ok(())
}

/// The members of a room that have no paid contribution for the term.
#[must_use]
pub fn unpaid_members(
    members: &[profile::Model],
    contributions: &[contribution::Model],
    term: Term,
) -> Vec<profile::Model> {
    members
        .iter()
        .filter(|m| !status(contributions, &m.user_id, term).paid)
        .cloned()
        .collect()
}

/// Unpaid members for a term, fetched fresh from the database.
///
/// # Errors
/// Returns database errors.
pub async fn unpaid_members_for_term(
    db: &DatabaseConnection,
    admin_id: &str,
    year: i32,
    month: u32,
    term: Term,
) -> Result<Vec<profile::Model>> {
    let members = member::room_members(db, admin_id).await?;
    let contributions = list_for_month(db, admin_id, year, month).await?;
    Ok(unpaid_members(&members, &contributions, term))
}

async fn find_by_key(
    db: &DatabaseConnection,
    key: &ContributionKey,
) -> Result<Option<contribution::Model>> {
    ContributionEntity::find()
        .filter(contribution::Column::AdminId.eq(&key.admin_id))
        .filter(contribution::Column::UserId.eq(&key.user_id))
        .filter(contribution::Column::Year.eq(key.year))
        .filter(contribution::Column::Month.eq(key.month))
        .filter(contribution::Column::Term.eq(key.term.number()))
        .one(db)
        .await
        .map_err(Into::into)
}
