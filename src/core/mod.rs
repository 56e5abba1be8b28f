//! Core business logic - framework-agnostic accounting, scheduling, and
//! notification rules.
//!
//! Everything in here operates on entity models and a `SeaORM` connection;
//! nothing knows about HTTP, rendering, or message transports.

pub mod bills;
pub mod contribution;
pub mod expense;
pub mod ledger;
pub mod member;
pub mod notify;
pub mod personal;
pub mod purse;
