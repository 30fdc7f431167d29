use serde::{Deserialize, Serialize};
use super::Trade;

/// Aggregated results for every trade closing on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub date: String,
    pub total_profit: f64,
    pub trade_count: usize,
    pub win_count: usize,
    pub loss_count: usize,
    pub trades: Vec<Trade>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStats {
    pub total_profit: f64,
    pub trade_count: usize,
    pub win_count: usize,
    pub loss_count: usize,
    pub win_rate: f64,   // percentage, 0..=100
    pub avg_profit: f64, // mean of winning trades only
    pub avg_loss: f64,   // mean of losing trades only (<= 0)
}

/// Overall statistics plus the per-day breakdown for one trade set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeSummary {
    pub stats: PortfolioStats,
    pub days: Vec<DaySummary>,
}
