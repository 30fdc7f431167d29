use serde::{Deserialize, Serialize};
use crate::import::numeric::coerce_f64;

/// One closed position as reported by the broker statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub open_time: String,
    pub close_time: String,
    #[serde(rename = "type")]
    pub trade_type: String, // "buy" | "sell"
    pub item: String,
    pub volume: f64,
    pub open_price: f64,
    pub close_price: f64,
    pub profit: f64,
}

impl Trade {
    /// Volume and both prices strictly positive.
    pub fn is_valid(&self) -> bool {
        self.volume > 0.0 && self.open_price > 0.0 && self.close_price > 0.0
    }

    /// Composite identity used to detect repeated submissions of the same trade.
    pub fn dedup_key(&self) -> (&str, &str, &str) {
        (&self.open_time, &self.close_time, &self.item)
    }

    /// Date token of the close timestamp, e.g. "2025.04.02" for "2025.04.02 13:45:00".
    pub fn close_date(&self) -> &str {
        match self.close_time.split_once(' ') {
            Some((date, _)) => date,
            None => &self.close_time,
        }
    }

    pub fn is_win(&self) -> bool {
        self.profit > 0.0
    }

    pub fn is_loss(&self) -> bool {
        self.profit < 0.0
    }
}

/// Loosely-typed trade row as it arrives from a statement file or a stored record.
///
/// Nothing here is trusted: text fields may be missing and numeric fields may hold
/// anything. [`RawTradeRow::coerce`] is the only way into a [`Trade`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTradeRow {
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub trade_type: Option<String>,
    pub item: Option<String>,
    pub volume: Option<String>,
    pub open_price: Option<String>,
    pub close_price: Option<String>,
    pub profit: Option<String>,
}

impl RawTradeRow {
    /// Never fails: missing text becomes empty, unparseable numbers become 0.
    pub fn coerce(&self) -> Trade {
        Trade {
            open_time: text(&self.open_time),
            close_time: text(&self.close_time),
            trade_type: text(&self.trade_type),
            item: text(&self.item),
            volume: number(&self.volume),
            open_price: number(&self.open_price),
            close_price: number(&self.close_price),
            profit: number(&self.profit),
        }
    }
}

fn text(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

fn number(value: &Option<String>) -> f64 {
    value.as_deref().map(coerce_f64).unwrap_or(0.0)
}
