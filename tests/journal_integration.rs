use trade_journal_lib::commands;
use trade_journal_lib::models::Trade;
use trade_journal_lib::stats::{compute_overall_stats, deduplicate, group_by_date};
use trade_journal_lib::{Database, JournalError};

const APRIL_STATEMENT: &str = "\
Trade History Report;;;;;;;;;;;;;
Account:;51234567;;;;;;;;;;;;
Name:;Demo Trader;;;;;;;;;;;;

Closed Transactions:;;;;;;;;;;;;;
Ticket;Open Time;Type;Volume;Item;Price;S / L;T / P;Close Time;Price;Commission;Taxes;Swap;Profit
1001;2025.04.01 08:00:00;buy;1.00;EURUSD;1.1000;0;0;2025.04.01 12:00:00;1.1020;0;0;0;20.00
1002;2025.04.02 08:00:00;buy;0.50;EURUSD;1.1000;0;0;2025.04.02 12:00:00;1.1020;0;0;0;10.00
1003;2025.04.02 09:00:00;sell;0.50;GBPUSD;1.3000;0;0;2025.04.02 13:00:00;1.3010;0;0;0;-5.00
1002;2025.04.02 08:00:00;buy;0;EURUSD;0;0;0;2025.04.02 12:00:00;0;0;0;0;10.00
1004;2025.04.02 10:00:00;balance;;;;;;;;;;;500.00
";

const MAY_STATEMENT: &str = "\
Trade History Report
Account:;51234567
Closed Transactions:
Ticket;Open Time;Type;Volume;Item;Price;S / L;T / P;Close Time;Price;Commission;Taxes;Swap;Profit
1003;2025.04.02 09:00:00;sell;0.50;GBPUSD;1.3000;0;0;2025.04.02 13:00:00;1.3010;0;0;0;-5.00
2001;2025.05.05 09:00:00;buy;2.00;XAUUSD;2300.00;0;0;2025.05.05 10:00:00;2301.00;0;0;0;0.00
";

fn trade(open: &str, close: &str, item: &str, profit: f64) -> Trade {
    Trade {
        open_time: open.to_string(),
        close_time: close.to_string(),
        trade_type: "buy".to_string(),
        item: item.to_string(),
        volume: 1.0,
        open_price: 1.1,
        close_price: 1.2,
        profit,
    }
}

#[test]
fn test_import_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("journal.db");
    let db_path = db_path.to_str().unwrap();

    {
        let db = Database::new(db_path).unwrap();
        let result = commands::import_statement(&db, APRIL_STATEMENT.as_bytes()).unwrap();
        assert_eq!(result.imported, 3);
        assert_eq!(result.discarded, 1);
    }

    let db = Database::new(db_path).unwrap();
    assert_eq!(commands::list_accounts(&db).unwrap(), vec!["51234567"]);

    let summary = commands::get_account_summary(&db, "51234567").unwrap();
    let dates: Vec<&str> = summary.days.iter().map(|d| d.date.as_str()).collect();
    assert_eq!(dates, vec!["2025.04.02", "2025.04.01"]);
    assert_eq!(summary.days[0].total_profit, 5.0);
    assert_eq!(summary.days[1].total_profit, 20.0);
    assert_eq!(summary.stats.total_profit, 25.0);
    assert_eq!(format!("{:.2}", summary.stats.win_rate), "66.67");
}

#[test]
fn test_overlapping_statements_only_add_new_trades() {
    let db = Database::open_in_memory().unwrap();
    commands::import_statement(&db, APRIL_STATEMENT.as_bytes()).unwrap();

    let result = commands::import_statement(&db, MAY_STATEMENT.as_bytes()).unwrap();
    assert_eq!(result.imported, 1);
    assert_eq!(result.duplicates, 1);

    let summary = commands::get_account_summary(&db, "51234567").unwrap();
    assert_eq!(summary.days[0].date, "2025.05.05");
    assert_eq!(summary.stats.trade_count, 4);

    // break-even trade counts toward neither side
    assert_eq!(summary.stats.win_count, 2);
    assert_eq!(summary.stats.loss_count, 1);
    assert_eq!(summary.stats.win_rate, 50.0);
    assert_eq!(summary.stats.avg_profit, 15.0);
    assert_eq!(summary.stats.avg_loss, -5.0);
}

#[test]
fn test_password_gate_guards_account_selection() {
    let db = Database::open_in_memory().unwrap();
    commands::import_statement(&db, APRIL_STATEMENT.as_bytes()).unwrap();
    commands::set_access_password(&db, None, "test1234").unwrap();

    assert!(matches!(
        commands::select_account(&db, "51234567", "").unwrap_err(),
        JournalError::AccessDenied
    ));
    assert!(commands::select_account(&db, "51234567", "test1234").is_ok());
}

#[test]
fn test_day_and_overall_laws_hold() {
    let input = vec![
        trade("2025.04.01 10:00", "2025.04.02 09:00", "EURUSD", 50.0),
        Trade { volume: 0.0, open_price: 0.0, close_price: 0.0, ..trade("2025.04.01 10:00", "2025.04.02 09:00", "EURUSD", 50.0) },
        trade("2025.04.01 11:00", "2025.04.03 09:00", "EURUSD", -12.0),
        trade("2025.04.01 12:00", "2025.04.03 10:00", "USDJPY", 0.0),
        Trade { open_price: 0.0, ..trade("2025.04.01 13:00", "2025.04.03 11:00", "GBPUSD", 99.0) },
        trade("x", "not-a-date", "EURUSD", 7.5),
    ];

    let unique = deduplicate(&input);
    assert_eq!(unique.len(), 4);
    assert!(unique.iter().all(Trade::is_valid));

    let mut keys: Vec<(&str, &str, &str)> = unique.iter().map(Trade::dedup_key).collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), unique.len());

    let days = group_by_date(&unique);
    let stats = compute_overall_stats(&unique);

    let day_total: f64 = days.iter().map(|d| d.total_profit).sum();
    let day_count: usize = days.iter().map(|d| d.trade_count).sum();
    assert!((day_total - stats.total_profit).abs() < 1e-9);
    assert_eq!(day_count, stats.trade_count);
    assert!((0.0..=100.0).contains(&stats.win_rate));

    assert_eq!(days.last().unwrap().date, "not-a-date");
    assert_eq!(deduplicate(&unique), unique);
}
