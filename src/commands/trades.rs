use rusqlite::types::ValueRef;
use crate::db::Database;
use crate::error::{JournalError, Result};
use crate::models::{RawTradeRow, Trade};
use super::lock_conn;

/// Stored rows are read back loosely; numeric columns may hold anything a past import wrote.
fn map_row_to_raw(row: &rusqlite::Row) -> rusqlite::Result<RawTradeRow> {
    Ok(RawTradeRow {
        open_time: value_text(row, 0)?,
        close_time: value_text(row, 1)?,
        trade_type: value_text(row, 2)?,
        item: value_text(row, 3)?,
        volume: value_text(row, 4)?,
        open_price: value_text(row, 5)?,
        close_price: value_text(row, 6)?,
        profit: value_text(row, 7)?,
    })
}

fn value_text(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Option<String>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
    })
}

/// Account numbers that have at least one stored trade.
pub fn list_accounts(db: &Database) -> Result<Vec<String>> {
    let conn = lock_conn(db)?;

    let mut stmt = conn.prepare(
        "SELECT account_number FROM distinct_accounts ORDER BY account_number",
    )?;
    let accounts = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;

    Ok(accounts)
}

/// Every stored trade for an account, in import order, duplicates included.
pub fn get_account_trades(db: &Database, account_number: &str) -> Result<Vec<Trade>> {
    let conn = lock_conn(db)?;

    let mut stmt = conn.prepare(
        "SELECT open_time, close_time, type, item, volume, open_price, close_price, profit
         FROM trades
         WHERE account_number = ?
         ORDER BY created_at ASC, rowid ASC",
    )?;
    let rows = stmt
        .query_map([account_number], map_row_to_raw)?
        .collect::<rusqlite::Result<Vec<RawTradeRow>>>()?;

    if rows.is_empty() {
        return Err(JournalError::NoTrades(account_number.to_string()));
    }

    Ok(rows.iter().map(RawTradeRow::coerce).collect())
}

pub fn delete_account_trades(db: &Database, account_number: &str) -> Result<usize> {
    let conn = lock_conn(db)?;
    let count = conn.execute(
        "DELETE FROM trades WHERE account_number = ?",
        [account_number],
    )?;
    log::info!("Deleted {} trades for account {}", count, account_number);
    Ok(count)
}
