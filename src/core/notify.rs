//! Notification rules - decides whether an alert fires, for whom, and with
//! what text.
//!
//! This module only constructs [`NotificationIntent`] values; actual
//! delivery happens behind the [`MessageGateway`] trait, and per-recipient
//! delivery failures are collected and logged without ever failing the
//! mutation that triggered the alert.

use crate::{
    core::{contribution, contribution::Term, member, purse},
    entities::{
        Profile as ProfileEntity, RecurringBill as RecurringBillEntity, chat_message, notice,
        profile, purse_transaction, recurring_bill, room_expense,
    },
    errors::{Error, Result},
};
use chrono::{Datelike, Days, NaiveDate};
use sea_orm::{DatabaseConnection, prelude::*};
use tracing::{info, warn};

/// Day of the month on which term-one contribution reminders fire.
pub const TERM1_REMINDER_DAY: u32 = 10;
/// Day of the month on which term-two contribution reminders fire.
pub const TERM2_REMINDER_DAY: u32 = 20;
/// First day of the month from which term-three reminders fire. Note the
/// open-ended window: reminders repeat daily from the 28th through month
/// end. This matches the shipped product rule and is kept as-is pending
/// clarification.
pub const TERM3_REMINDER_FROM_DAY: u32 = 28;

/// One person a message can be delivered to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    /// Display name
    pub name: String,
    /// Phone number in E.164 form (a leading `+` is added if missing)
    pub phone: String,
}

/// A decided-but-undelivered alert: who gets which text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationIntent {
    /// Everyone this message goes to
    pub recipients: Vec<Recipient>,
    /// Message text
    pub body: String,
}

/// The kind of ledger event that just committed, for the low-balance rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerEventKind {
    /// A room expense (always an outflow)
    Expense,
    /// A standalone inflow transaction
    Inflow,
    /// A standalone outflow transaction
    Outflow,
}

/// Abstracts the external message delivery service. Implementations own the
/// provider protocol and credentials; the core never sees either.
pub trait MessageGateway {
    /// Delivers one message to one recipient.
    ///
    /// # Errors
    /// Returns the provider's error text when delivery fails.
    fn send(&self, recipient: &Recipient, body: &str) -> std::result::Result<(), String>;
}

/// Gateway that only logs, used by the sweep binary when no real provider
/// is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingGateway;

impl MessageGateway for LoggingGateway {
    fn send(&self, recipient: &Recipient, body: &str) -> std::result::Result<(), String> {
        info!(phone = %recipient.phone, name = %recipient.name, "would deliver: {body}");
        Ok(())
    }
}

/// Outcome of dispatching one intent: who got the message and which
/// recipients failed.
#[derive(Debug, Default)]
pub struct DeliveryReport {
    /// Phone numbers successfully delivered to
    pub delivered: Vec<String>,
    /// Per-recipient failures, already logged
    pub failures: Vec<Error>,
}

/// Builds deliverable recipients from room members, skipping anyone without
/// a phone number and normalizing to a leading `+`.
#[must_use]
pub fn recipients_from(members: &[profile::Model]) -> Vec<Recipient> {
    members
        .iter()
        .filter_map(|m| {
            m.mobile_number.as_ref().map(|phone| Recipient {
                name: m.name.clone(),
                phone: if phone.starts_with('+') {
                    phone.clone()
                } else {
                    format!("+{phone}")
                },
            })
        })
        .collect()
}

/// Alert for a freshly committed room expense; goes to every room member.
#[must_use]
pub fn on_expense_committed(
    expense: &room_expense::Model,
    members: &[profile::Model],
) -> NotificationIntent {
    let label = if expense.description.is_empty() {
        &expense.category
    } else {
        &expense.description
    };
    NotificationIntent {
        recipients: recipients_from(members),
        body: format!(
            "💸 New expense added: ₹{} for \"{}\" ({}) on {}",
            expense.amount, label, expense.category, expense.date
        ),
    }
}

/// Alert for a freshly committed standalone purse transaction; goes to every
/// room member.
#[must_use]
pub fn on_transaction_committed(
    tx: &purse_transaction::Model,
    members: &[profile::Model],
) -> NotificationIntent {
    let body = if tx.is_inflow() {
        let label = if tx.description.is_empty() {
            "Money Added"
        } else {
            &tx.description
        };
        format!("💰 ₹{} added to purse: \"{label}\"", tx.amount)
    } else {
        let label = if tx.description.is_empty() {
            "Expense"
        } else {
            &tx.description
        };
        format!("💳 ₹{} spent from purse: \"{label}\"", tx.amount)
    };
    NotificationIntent {
        recipients: recipients_from(members),
        body,
    }
}

/// Alert for a new chat message; the sender never gets their own message
/// back.
#[must_use]
pub fn on_chat_message(
    msg: &chat_message::Model,
    members: &[profile::Model],
) -> NotificationIntent {
    let others: Vec<profile::Model> = members
        .iter()
        .filter(|m| m.user_id != msg.sender_id)
        .cloned()
        .collect();
    NotificationIntent {
        recipients: recipients_from(&others),
        body: format!("💬 {}: {}", msg.sender_name, msg.content),
    }
}

/// Alert for a freshly posted notice; goes to every room member.
#[must_use]
pub fn on_notice_posted(n: &notice::Model, members: &[profile::Model]) -> NotificationIntent {
    NotificationIntent {
        recipients: recipients_from(members),
        body: format!("📢 New Notice: \"{}\"\n{}", n.title, n.content),
    }
}

/// Decides whether a low-balance alert fires in addition to the primary
/// event alert. Only spend events (expenses and outflows) can trigger it;
/// an inflow never does, even when the balance stays below the threshold,
/// because the action just improved it. That asymmetry is the shipped
/// policy, kept deliberately.
#[must_use]
pub fn low_balance_alert(
    kind: LedgerEventKind,
    new_balance: f64,
    threshold: f64,
    members: &[profile::Model],
) -> Option<NotificationIntent> {
    if kind == LedgerEventKind::Inflow || new_balance >= threshold {
        return None;
    }
    Some(NotificationIntent {
        recipients: recipients_from(members),
        body: format!("⚠️ Purse balance low: ₹{new_balance} (below ₹{threshold})"),
    })
}

/// Maps a calendar day to the term being reminded about, if any. Days
/// 10 and 20 close terms one and two; days 28 and later all remind about
/// term three (see [`TERM3_REMINDER_FROM_DAY`]).
#[must_use]
pub const fn reminder_term_for_day(day: u32) -> Option<Term> {
    if day == TERM1_REMINDER_DAY {
        Some(Term::One)
    } else if day == TERM2_REMINDER_DAY {
        Some(Term::Two)
    } else if day >= TERM3_REMINDER_FROM_DAY {
        Some(Term::Three)
    } else {
        None
    }
}

/// Emits one contribution reminder per unpaid member per room when `today`
/// is a reminder day; otherwise empty.
///
/// # Errors
/// Returns database errors.
pub async fn contribution_reminder_sweep(
    db: &DatabaseConnection,
    today: NaiveDate,
) -> Result<Vec<NotificationIntent>> {
    let Some(term) = reminder_term_for_day(today.day()) else {
        return Ok(Vec::new());
    };

    let admins = ProfileEntity::find()
        .filter(profile::Column::AdminId.is_null())
        .all(db)
        .await?;

    let mut intents = Vec::new();
    for admin in admins {
        let unpaid = contribution::unpaid_members_for_term(
            db,
            &admin.user_id,
            today.year(),
            today.month(),
            term,
        )
        .await?;

        for m in unpaid {
            let recipients = recipients_from(std::slice::from_ref(&m));
            if recipients.is_empty() {
                continue;
            }
            intents.push(NotificationIntent {
                recipients,
                body: format!(
                    "⏰ {}, your Term {} ({}) contribution for {}/{} is still unpaid.",
                    m.name,
                    term.number(),
                    term.label(),
                    today.month(),
                    today.year()
                ),
            });
        }
    }

    Ok(intents)
}

/// Emits one reminder per room member for every active bill due tomorrow,
/// with the room's current purse balance in the message.
///
/// # Errors
/// Returns database errors.
pub async fn bill_reminder_sweep(
    db: &DatabaseConnection,
    today: NaiveDate,
) -> Result<Vec<NotificationIntent>> {
    let Some(tomorrow) = today.checked_add_days(Days::new(1)) else {
        return Ok(Vec::new());
    };

    let due_bills = RecurringBillEntity::find()
        .filter(recurring_bill::Column::Active.eq(true))
        .filter(recurring_bill::Column::DueDay.eq(tomorrow.day()))
        .all(db)
        .await?;

    let mut intents = Vec::new();
    for bill in due_bills {
        let members = member::room_members(db, &bill.admin_id).await?;
        let balance = purse::current_balance(db, &bill.admin_id).await?;

        for m in &members {
            let recipients = recipients_from(std::slice::from_ref(m));
            if recipients.is_empty() {
                continue;
            }
            intents.push(NotificationIntent {
                recipients,
                body: format!(
                    "📅 {} (₹{}) is due tomorrow (day {}). Purse balance: ₹{balance}",
                    bill.name, bill.amount, bill.due_day
                ),
            });
        }
    }

    Ok(intents)
}

/// Delivers an intent through a gateway. Failures are collected per
/// recipient and logged; delivery never aborts on the first failure and the
/// report is returned for operational visibility, not error propagation.
pub fn dispatch<G: MessageGateway>(gateway: &G, intent: &NotificationIntent) -> DeliveryReport {
    let mut report = DeliveryReport::default();

    for recipient in &intent.recipients {
        match gateway.send(recipient, &intent.body) {
            Ok(()) => report.delivered.push(recipient.phone.clone()),
            Err(message) => {
                warn!(phone = %recipient.phone, "delivery failed: {message}");
                report.failures.push(Error::Delivery {
                    recipient: recipient.phone.clone(),
                    message,
                });
            }
        }
    }

    report
}
