pub mod aggregator;

pub use aggregator::{compute_overall_stats, deduplicate, group_by_date, summarize};
