//! Unified error types for the whole crate.
//!
//! Every fallible operation returns the crate-wide [`Result`] alias. Database
//! errors are converted automatically via `#[from]`; domain errors carry the
//! values a caller needs to render a useful message.

use thiserror::Error;

/// Unified error type for all roomledger operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or parsing failed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Underlying database error from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Amount failed validation (non-positive, NaN, or infinite)
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// A required field was empty or missing
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field
        field: &'static str,
    },

    /// Category string is not one of the allowed values
    #[error("Unknown category: {category}")]
    UnknownCategory {
        /// The rejected category
        category: String,
    },

    /// Caller is not the room admin for an admin-only mutation.
    /// Real enforcement lives in the external store's row security;
    /// this surfaces the same refusal at the library boundary.
    #[error("Room admin privileges required (caller: {user_id})")]
    AdminRequired {
        /// The non-admin caller
        user_id: String,
    },

    /// Referenced room expense does not exist
    #[error("Room expense not found: {id}")]
    ExpenseNotFound {
        /// Missing row id
        id: i64,
    },

    /// Referenced purse transaction does not exist
    #[error("Purse transaction not found: {id}")]
    TransactionNotFound {
        /// Missing row id
        id: i64,
    },

    /// Referenced recurring bill does not exist
    #[error("Recurring bill not found: {id}")]
    BillNotFound {
        /// Missing row id
        id: i64,
    },

    /// Referenced personal expense does not exist
    #[error("Personal expense not found: {id}")]
    PersonalExpenseNotFound {
        /// Missing row id
        id: i64,
    },

    /// Referenced profile does not exist
    #[error("Profile not found for user: {user_id}")]
    ProfileNotFound {
        /// Missing user id
        user_id: String,
    },

    /// A single recipient could not be reached by the message gateway.
    /// Collected per recipient, logged, never escalated to the caller
    /// of the primary mutation.
    #[error("Delivery to {recipient} failed: {message}")]
    Delivery {
        /// Phone number that could not be reached
        recipient: String,
        /// Gateway error text
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
