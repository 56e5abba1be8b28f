/// Database connection and table creation
pub mod database;

/// Application settings loaded from roomledger.toml with named defaults
pub mod settings;
