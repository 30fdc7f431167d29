pub mod import;
pub mod settings;
pub mod stats;
pub mod trades;

pub use import::*;
pub use settings::*;
pub use stats::*;
pub use trades::*;

use rusqlite::Connection;
use std::sync::MutexGuard;
use crate::db::Database;
use crate::error::{JournalError, Result};

fn lock_conn(db: &Database) -> Result<MutexGuard<'_, Connection>> {
    db.conn
        .lock()
        .map_err(|e| JournalError::DatabaseError(e.to_string()))
}
