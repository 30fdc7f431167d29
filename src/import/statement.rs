use csv::{ReaderBuilder, StringRecord, Trim};
use regex::Regex;
use std::io::Read;
use std::sync::LazyLock;
use crate::error::{JournalError, Result};
use crate::models::{RawTradeRow, Trade};

const SECTION_MARKER: &str = "Closed Transactions:";
const UNKNOWN_ACCOUNT: &str = "Unknown";

// Closed-transactions column layout of the broker statement
const COL_OPEN_TIME: usize = 1;
const COL_TYPE: usize = 2;
const COL_VOLUME: usize = 3;
const COL_ITEM: usize = 4;
const COL_OPEN_PRICE: usize = 5;
const COL_CLOSE_TIME: usize = 8;
const COL_CLOSE_PRICE: usize = 9;
const COL_PROFIT: usize = 13;

static BROKER_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}\.\d{1,2}\.\d{1,2}").expect("valid timestamp regex")
});

#[derive(Debug, Clone)]
pub struct ParsedStatement {
    pub account_number: String,
    pub rows: Vec<RawTradeRow>,
    /// Rows after the section header that were not trades (balance, credit, totals, ...)
    pub skipped_rows: usize,
}

impl ParsedStatement {
    pub fn trades(&self) -> Vec<Trade> {
        self.rows.iter().map(RawTradeRow::coerce).collect()
    }
}

/// Parse a semicolon-delimited broker statement.
///
/// The account number is the second field of the second record. Trades are read from
/// the records following the `Closed Transactions:` marker and its column-header row.
pub fn parse_statement<R: Read>(reader: R) -> Result<ParsedStatement> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records: Vec<StringRecord> = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        records.push(record);
    }

    let account_number = records
        .get(1)
        .and_then(|record| record.get(1))
        .filter(|field| !field.is_empty())
        .unwrap_or(UNKNOWN_ACCOUNT)
        .to_string();

    let start = records
        .iter()
        .position(|record| record.get(0).map(strip_bom) == Some(SECTION_MARKER))
        .ok_or(JournalError::MissingSection)?;

    let mut rows = Vec::new();
    let mut skipped_rows = 0;

    for (offset, record) in records.iter().skip(start + 2).enumerate() {
        if is_trade_record(record) {
            rows.push(to_raw_row(record));
        } else {
            log::debug!(
                "Skipping statement record {}: {:?}",
                start + 2 + offset + 1,
                record.get(COL_TYPE)
            );
            skipped_rows += 1;
        }
    }

    log::info!(
        "Parsed statement for account {}: {} trades, {} skipped rows",
        account_number,
        rows.len(),
        skipped_rows
    );

    Ok(ParsedStatement {
        account_number,
        rows,
        skipped_rows,
    })
}

pub fn parse_statement_str(content: &str) -> Result<ParsedStatement> {
    parse_statement(content.as_bytes())
}

fn strip_bom(field: &str) -> &str {
    field.trim_start_matches('\u{feff}')
}

fn is_trade_record(record: &StringRecord) -> bool {
    if record.len() <= 1 {
        return false;
    }

    let opens_like_timestamp = record
        .get(COL_OPEN_TIME)
        .is_some_and(|field| BROKER_TIMESTAMP.is_match(field));

    let kind = record.get(COL_TYPE).unwrap_or_default();
    opens_like_timestamp && kind != "balance" && kind != "credit"
}

fn to_raw_row(record: &StringRecord) -> RawTradeRow {
    let field = |idx: usize| record.get(idx).map(str::to_string);

    RawTradeRow {
        open_time: field(COL_OPEN_TIME),
        close_time: field(COL_CLOSE_TIME),
        trade_type: field(COL_TYPE),
        item: field(COL_ITEM),
        volume: field(COL_VOLUME),
        open_price: field(COL_OPEN_PRICE),
        close_price: field(COL_CLOSE_PRICE),
        profit: field(COL_PROFIT),
    }
}
