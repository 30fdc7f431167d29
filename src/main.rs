use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use trade_journal_lib::commands;
use trade_journal_lib::models::{DaySummary, TradeSummary, UpdateSettingsInput};
use trade_journal_lib::Database;

#[derive(Parser)]
#[command(name = "trade-journal")]
#[command(about = "Import closed-trade statements and review daily profit/loss")]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "TRADE_JOURNAL_DB", default_value = "trading_journal.db")]
    db: PathBuf,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a semicolon-delimited broker statement
    Import {
        file: PathBuf,
    },
    /// List accounts with stored trades
    Accounts,
    /// Show overall and per-day statistics for an account
    Summary {
        account: String,
        /// Access password, if one is set
        #[arg(long, env = "TRADE_JOURNAL_PASSWORD")]
        password: Option<String>,
        /// Show the individual trades of one day (e.g. 2025.04.02)
        #[arg(long)]
        day: Option<String>,
    },
    /// Write a JSON report for an account
    Export {
        account: String,
        #[arg(long, env = "TRADE_JOURNAL_PASSWORD")]
        password: Option<String>,
        /// Output file (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Delete every stored trade of an account
    Delete {
        account: String,
        #[arg(long, env = "TRADE_JOURNAL_PASSWORD")]
        password: Option<String>,
    },
    /// Set or change the access password
    SetPassword {
        new_password: String,
        #[arg(long)]
        current: Option<String>,
    },
    /// Remove the access password
    ClearPassword {
        current: String,
    },
    /// Show or update settings
    Settings {
        #[arg(long)]
        currency: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let db_path = cli.db.to_string_lossy().to_string();
    let db = Database::new(&db_path)
        .with_context(|| format!("Database initialization failed for {}", db_path))?;

    match cli.command {
        Commands::Import { file } => {
            let reader = BufReader::new(
                File::open(&file).with_context(|| format!("Cannot open {}", file.display()))?,
            );
            let result = commands::import_statement(&db, reader)
                .with_context(|| format!("Error parsing statement {}", file.display()))?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("Account: {}", result.account_number);
                println!(
                    "Imported {} of {} trades ({} already stored, {} discarded, {} non-trade rows skipped)",
                    result.imported, result.parsed, result.duplicates, result.discarded, result.skipped_rows
                );
            }
        }
        Commands::Accounts => {
            let accounts = commands::list_accounts(&db)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&accounts)?);
            } else if accounts.is_empty() {
                println!("No trading data yet. Import a statement to get started.");
            } else {
                for account in accounts {
                    println!("{}", account);
                }
            }
        }
        Commands::Summary { account, password, day } => {
            let summary = commands::select_account(&db, &account, password.as_deref().unwrap_or_default())?;
            let currency = commands::get_settings(&db)?.currency;

            match day {
                Some(day) => {
                    let Some(day_summary) = summary.days.iter().find(|d| d.date == day) else {
                        anyhow::bail!("No trades closed on {} for account {}", day, account);
                    };
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(day_summary)?);
                    } else {
                        print_day(day_summary, &currency);
                    }
                }
                None if cli.json => println!("{}", serde_json::to_string_pretty(&summary)?),
                None => print_summary(&account, &summary, &currency),
            }
        }
        Commands::Export { account, password, output } => {
            commands::verify_access(&db, password.as_deref().unwrap_or_default())?;
            let report = commands::export_account_report(&db, &account)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, report)
                        .with_context(|| format!("Cannot write {}", path.display()))?;
                    log::info!("Report written to {}", path.display());
                }
                None => println!("{}", report),
            }
        }
        Commands::Delete { account, password } => {
            commands::verify_access(&db, password.as_deref().unwrap_or_default())?;
            let count = commands::delete_account_trades(&db, &account)?;
            println!("Deleted {} trades for account {}", count, account);
        }
        Commands::SetPassword { new_password, current } => {
            commands::set_access_password(&db, current.as_deref(), &new_password)?;
            println!("Access password set");
        }
        Commands::ClearPassword { current } => {
            commands::clear_access_password(&db, &current)?;
            println!("Access password removed");
        }
        Commands::Settings { currency } => {
            let settings = if currency.is_some() {
                commands::update_settings(&db, UpdateSettingsInput { currency })?
            } else {
                commands::get_settings(&db)?
            };
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}

fn print_summary(account: &str, summary: &TradeSummary, currency: &str) {
    let stats = &summary.stats;

    println!("Account: {}", account);
    println!();
    println!("Total Profit/Loss  {} {:.2}", currency, stats.total_profit);
    println!(
        "Win Rate           {:.1}% ({}/{} trades)",
        stats.win_rate, stats.win_count, stats.trade_count
    );
    println!("Average Win        {} {:.2}", currency, stats.avg_profit);
    println!("Average Loss       {} {:.2}", currency, stats.avg_loss);
    println!();
    println!("{:<12} {:>16} {:>8} {:>10}", "Date", "Profit/Loss", "Trades", "Win/Loss");

    for day in &summary.days {
        println!(
            "{:<12} {:>16.2} {:>8} {:>10}",
            day.date,
            day.total_profit,
            day.trade_count,
            format!("{}/{}", day.win_count, day.loss_count)
        );
    }
}

fn print_day(day: &DaySummary, currency: &str) {
    println!(
        "{}: {} {:.2} over {} trades ({} wins / {} losses)",
        day.date, currency, day.total_profit, day.trade_count, day.win_count, day.loss_count
    );
    println!();
    println!(
        "{:<20} {:<20} {:<6} {:<10} {:>8} {:>12} {:>12} {:>12}",
        "Open Time", "Close Time", "Type", "Item", "Volume", "Open", "Close", "Profit"
    );

    for trade in &day.trades {
        println!(
            "{:<20} {:<20} {:<6} {:<10} {:>8.2} {:>12.5} {:>12.5} {:>12.2}",
            trade.open_time,
            trade.close_time,
            trade.trade_type,
            trade.item,
            trade.volume,
            trade.open_price,
            trade.close_price,
            trade.profit
        );
    }
}
