use chrono::Utc;
use serde::{Deserialize, Serialize};
use crate::db::Database;
use crate::error::Result;
use crate::models::TradeSummary;
use crate::stats::summarize;
use super::{get_account_trades, verify_access};

const REPORT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountReport {
    pub account_number: String,
    pub export_date: String,
    pub version: String,
    pub summary: TradeSummary,
}

/// Deduplicated overall stats and per-day breakdown for one account.
pub fn get_account_summary(db: &Database, account_number: &str) -> Result<TradeSummary> {
    let trades = get_account_trades(db, account_number)?;
    let summary = summarize(&trades);

    log::debug!(
        "Account {}: {} stored rows, {} unique trades over {} days",
        account_number,
        trades.len(),
        summary.stats.trade_count,
        summary.days.len()
    );

    Ok(summary)
}

/// Open an account behind the access password.
pub fn select_account(db: &Database, account_number: &str, password: &str) -> Result<TradeSummary> {
    verify_access(db, password)?;
    get_account_summary(db, account_number)
}

pub fn export_account_report(db: &Database, account_number: &str) -> Result<String> {
    let report = AccountReport {
        account_number: account_number.to_string(),
        export_date: Utc::now().to_rfc3339(),
        version: REPORT_VERSION.to_string(),
        summary: get_account_summary(db, account_number)?,
    };

    Ok(serde_json::to_string_pretty(&report)?)
}
