//! Domain event bus.
//!
//! Write operations publish a [`DomainEvent`] after their database commit so
//! that external subscribers (a UI refresh loop, a notification dispatcher)
//! can react without the core depending on any specific transport. Emitting
//! with no live subscriber is not an error; events are fire-and-forget.

use tokio::sync::broadcast;

/// Default buffer size for the broadcast channel.
const DEFAULT_CAPACITY: usize = 64;

/// A committed domain-level change.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
    /// A room expense and its paired outflow transaction were committed
    ExpenseRecorded {
        /// Id of the new room expense
        expense_id: i64,
        /// Room the expense belongs to
        admin_id: String,
        /// Expense amount
        amount: f64,
    },
    /// A standalone purse transaction was committed
    TransactionRecorded {
        /// Id of the new transaction
        transaction_id: i64,
        /// Room the transaction belongs to
        admin_id: String,
        /// `"inflow"` or `"outflow"`
        tx_type: String,
        /// Transaction amount
        amount: f64,
    },
    /// A contribution was marked paid
    ContributionMarked {
        /// Room the contribution belongs to
        admin_id: String,
        /// Member whose dues were marked
        user_id: String,
        /// Calendar year
        year: i32,
        /// Calendar month, 1-12
        month: u32,
        /// Term within the month, 1-3
        term: u32,
    },
    /// A contribution was reverted to unpaid (row deleted)
    ContributionCleared {
        /// Room the contribution belonged to
        admin_id: String,
        /// Member whose dues were cleared
        user_id: String,
        /// Calendar year
        year: i32,
        /// Calendar month, 1-12
        month: u32,
        /// Term within the month, 1-3
        term: u32,
    },
}

/// Broadcast bus carrying [`DomainEvent`]s to any number of subscribers.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Creates a bus with the default buffer capacity.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(DEFAULT_CAPACITY);
        Self { sender }
    }

    /// Publishes an event. Lagging or absent subscribers never fail the
    /// write that triggered the event.
    pub fn emit(&self, event: DomainEvent) {
        // send() errors only when there are no receivers; that is fine here
        let _ = self.sender.send(event);
    }

    /// Opens a new subscription receiving every event emitted from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
