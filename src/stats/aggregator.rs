use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::HashMap;
use crate::models::{DaySummary, PortfolioStats, Trade, TradeSummary};

/// Broker date token format, e.g. "2025.04.02".
pub const DATE_KEY_FORMAT: &str = "%Y.%m.%d";

/// Collapse repeated submissions of the same trade.
///
/// Trades sharing (open time, close time, item) are one trade. The first entry for a key
/// is kept unless it is invalid and a later one is valid. Keys whose surviving entry
/// is still invalid are dropped. Output follows first-insertion order of keys.
pub fn deduplicate(trades: &[Trade]) -> Vec<Trade> {
    let mut index: HashMap<(&str, &str, &str), usize> = HashMap::new();
    let mut kept: Vec<Trade> = Vec::new();

    for trade in trades {
        let key = trade.dedup_key();
        match index.get(&key) {
            Some(&slot) => {
                if !kept[slot].is_valid() && trade.is_valid() {
                    kept[slot] = trade.clone();
                }
            }
            None => {
                index.insert(key, kept.len());
                kept.push(trade.clone());
            }
        }
    }

    let before = kept.len();
    kept.retain(Trade::is_valid);
    log::debug!(
        "deduplicate: {} input, {} distinct keys, {} valid",
        trades.len(),
        before,
        kept.len()
    );

    kept
}

/// Per-day summaries, newest day first.
///
/// Days whose key does not parse as `YYYY.MM.DD` sort after all real dates,
/// ordered among themselves by descending key text.
pub fn group_by_date(trades: &[Trade]) -> Vec<DaySummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut days: Vec<DaySummary> = Vec::new();

    for trade in trades {
        let date = trade.close_date();
        let slot = *index.entry(date).or_insert_with(|| {
            days.push(DaySummary {
                date: date.to_string(),
                total_profit: 0.0,
                trade_count: 0,
                win_count: 0,
                loss_count: 0,
                trades: Vec::new(),
            });
            days.len() - 1
        });

        let day = &mut days[slot];
        day.total_profit += trade.profit;
        day.trade_count += 1;
        if trade.is_win() {
            day.win_count += 1;
        } else if trade.is_loss() {
            day.loss_count += 1;
        }
        day.trades.push(trade.clone());
    }

    days.sort_by(|a, b| compare_date_keys_desc(&a.date, &b.date));
    days
}

pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).ok()
}

fn compare_date_keys_desc(a: &str, b: &str) -> Ordering {
    match (parse_date_key(a), parse_date_key(b)) {
        (Some(da), Some(db)) => db.cmp(&da),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.cmp(a),
    }
}

pub fn compute_overall_stats(trades: &[Trade]) -> PortfolioStats {
    let mut stats = PortfolioStats::default();
    let mut gross_profit = 0.0;
    let mut gross_loss = 0.0;

    for trade in trades {
        stats.total_profit += trade.profit;
        stats.trade_count += 1;
        if trade.is_win() {
            stats.win_count += 1;
            gross_profit += trade.profit;
        } else if trade.is_loss() {
            stats.loss_count += 1;
            gross_loss += trade.profit;
        }
    }

    // Win rate over all trades, break-evens included in the denominator
    stats.win_rate = if stats.trade_count > 0 {
        (stats.win_count as f64 / stats.trade_count as f64) * 100.0
    } else {
        0.0
    };
    stats.avg_profit = if stats.win_count > 0 {
        gross_profit / stats.win_count as f64
    } else {
        0.0
    };
    stats.avg_loss = if stats.loss_count > 0 {
        gross_loss / stats.loss_count as f64
    } else {
        0.0
    };

    stats
}

/// Deduplicate, then aggregate. This is what every view of an account renders.
pub fn summarize(trades: &[Trade]) -> TradeSummary {
    let unique = deduplicate(trades);
    TradeSummary {
        stats: compute_overall_stats(&unique),
        days: group_by_date(&unique),
    }
}
