//! Trading journal: import broker statements of closed trades, keep them in a local
//! SQLite database, and review profit/loss per day and overall.

pub mod auth;
pub mod commands;
pub mod db;
pub mod error;
pub mod import;
pub mod models;
pub mod stats;

pub use db::Database;
pub use error::{JournalError, Result};
