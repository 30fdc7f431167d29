use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::io::Read;
use crate::db::Database;
use crate::error::Result;
use crate::import::parse_statement;
use crate::models::Trade;
use crate::stats::deduplicate;
use super::lock_conn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub account_number: String,
    /// Trade rows found in the statement
    pub parsed: usize,
    pub imported: usize,
    /// Already stored for this account by an earlier import
    pub duplicates: usize,
    /// Collapsed into another row of the same statement, or missing volume/prices
    pub discarded: usize,
    pub skipped_rows: usize,
}

/// Parse a broker statement and store its trades under the statement's account.
pub fn import_statement<R: Read>(db: &Database, reader: R) -> Result<ImportResult> {
    let statement = parse_statement(reader)?;
    let parsed_trades = statement.trades();
    let unique = deduplicate(&parsed_trades);
    let account_number = statement.account_number.clone();

    let mut imported = 0;
    let mut duplicates = 0;

    {
        let mut conn = lock_conn(db)?;
        let tx = conn.transaction()?;
        let now = Utc::now().timestamp();

        for trade in &unique {
            let fingerprint = generate_fingerprint(&account_number, trade);

            let exists: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM trades WHERE account_number = ? AND import_fingerprint = ?)",
                [&account_number, &fingerprint],
                |row| row.get(0),
            )?;

            if exists {
                duplicates += 1;
                continue;
            }

            let id = format!(
                "TRADE-{}-{}",
                Utc::now().timestamp_millis(),
                uuid::Uuid::new_v4().simple()
            );

            tx.execute(
                "INSERT INTO trades (
                    id, account_number, open_time, close_time, type, item,
                    volume, open_price, close_price, profit, import_fingerprint, created_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    id,
                    account_number,
                    trade.open_time,
                    trade.close_time,
                    trade.trade_type,
                    trade.item,
                    trade.volume,
                    trade.open_price,
                    trade.close_price,
                    trade.profit,
                    fingerprint,
                    now,
                ],
            )?;

            imported += 1;
        }

        tx.commit()?;
    }

    let result = ImportResult {
        account_number,
        parsed: parsed_trades.len(),
        imported,
        duplicates,
        discarded: parsed_trades.len() - unique.len(),
        skipped_rows: statement.skipped_rows,
    };

    log::info!(
        "Imported {} trades for account {} ({} already stored, {} discarded)",
        result.imported,
        result.account_number,
        result.duplicates,
        result.discarded
    );

    Ok(result)
}

/// Length-prefixed so no field content can make two different trades collide.
fn generate_fingerprint(account_number: &str, trade: &Trade) -> String {
    let (open_time, close_time, item) = trade.dedup_key();
    [account_number, open_time, close_time, item]
        .iter()
        .fold(String::from("csv"), |mut acc, part| {
            acc.push_str(&format!("|{}:{}", part.len(), part));
            acc
        })
}
