//! Command dispatcher shared by the CLI and the interactive console.
//!
//! Routes a parsed `Command` to the ledger, saves after every successful
//! mutation and prints the result.

use anyhow::{Context, Result};
use colored::Colorize;
use rust_decimal::Decimal;
use serde_json::json;
use tracing::info;

use savings::config::Config;
use savings::ledger::{round_money, Ledger};
use savings::reports::summarize;
use savings::storage::PlatformStore;
use savings::utils::{format_money, format_rate};

use crate::cli::formatters;
use crate::commands::Command;

/// In-memory ledger plus the store it was loaded from.
pub struct Session {
    pub ledger: Ledger,
    pub store: PlatformStore,
    pub currency_symbol: String,
}

impl Session {
    /// Load the ledger from the configured data directory.
    pub fn open(config: &Config) -> Result<Self> {
        let store = PlatformStore::new(&config.data_dir);
        let ledger = store
            .load()
            .with_context(|| format!("Failed to load platforms from {:?}", store.path()))?;
        Ok(Self {
            ledger,
            store,
            currency_symbol: config.currency_symbol.clone(),
        })
    }

    pub fn save(&self) -> Result<()> {
        self.store
            .save(&self.ledger)
            .with_context(|| format!("Failed to save platforms to {:?}", self.store.path()))
    }

    fn money(&self, value: Decimal) -> String {
        format_money(value, &self.currency_symbol)
    }
}

/// Route a parsed command to its handler
pub fn dispatch_command(
    command: Command,
    session: &mut Session,
    json_output: bool,
) -> Result<()> {
    let mutating = command.is_mutating();

    match command {
        Command::Add {
            name,
            balance,
            rate,
        } => {
            let platform = session.ledger.add_platform(&name, balance, rate)?;
            if json_output {
                println!(
                    "{}",
                    json!({
                        "added": platform.name(),
                        "balance": platform.balance().to_string(),
                        "interest_rate": platform.interest_rate().to_string(),
                    })
                );
            } else {
                println!(
                    "{} Platform '{}' added with balance {} at {}",
                    "✓".green().bold(),
                    platform.name(),
                    format_money(platform.balance(), &session.currency_symbol),
                    format_rate(platform.interest_rate())
                );
            }
        }
        Command::Deposit { name, amount } => {
            let amount = round_money(amount);
            session.ledger.deposit(&name, amount)?;
            print_balance_change(session, &name, amount, "Deposited", json_output);
        }
        Command::Withdraw { name, amount } => {
            let amount = round_money(amount);
            session.ledger.withdraw(&name, amount)?;
            print_balance_change(session, &name, amount, "Withdrew", json_output);
        }
        Command::Interest { name: Some(name) } => {
            let interest = session.ledger.apply_interest(&name)?;
            print_interest(session, &[(name, interest)], json_output);
        }
        Command::Interest { name: None } => {
            let applied = session.ledger.apply_interest_all();
            if applied.is_empty() && !json_output {
                print!("{}", formatters::format_empty_ledger());
            } else {
                print_interest(session, &applied, json_output);
            }
        }
        Command::SetRate { name, rate } => {
            session.ledger.set_interest_rate(&name, rate)?;
            if json_output {
                println!("{}", json!({ "platform": name, "interest_rate": rate.to_string() }));
            } else {
                println!(
                    "{} Interest rate for {} set to {}",
                    "✓".green().bold(),
                    name.bold(),
                    format_rate(rate)
                );
            }
        }
        Command::Summary => {
            let summary = summarize(&session.ledger);
            if json_output {
                println!("{}", formatters::format_summary_json(&summary));
            } else if summary.platforms.is_empty() {
                print!("{}", formatters::format_empty_ledger());
            } else {
                print!(
                    "{}",
                    formatters::format_summary_table(&summary, &session.currency_symbol)
                );
            }
        }
        Command::History { name } => {
            let platform = session
                .ledger
                .get(&name)
                .ok_or_else(|| savings::error::LedgerError::PlatformNotFound(name.clone()))?;
            if json_output {
                println!("{}", formatters::format_history_json(platform));
            } else {
                print!(
                    "{}",
                    formatters::format_history_table(platform, &session.currency_symbol)
                );
            }
        }
        Command::List => {
            if json_output {
                let names: Vec<&str> = session.ledger.names().collect();
                println!("{}", json!(names));
            } else if session.ledger.is_empty() {
                print!("{}", formatters::format_empty_ledger());
            } else {
                for platform in session.ledger.platforms() {
                    println!(
                        "  {} {}",
                        platform.name().bold(),
                        session.money(platform.balance()).bright_black()
                    );
                }
            }
        }
        Command::Help => print_help(),
        Command::Exit => {}
    }

    if mutating {
        info!("Ledger changed, saving");
        session.save()?;
    }

    Ok(())
}

fn print_balance_change(
    session: &Session,
    name: &str,
    amount: Decimal,
    verb: &str,
    json_output: bool,
) {
    let Some(platform) = session.ledger.get(name) else {
        return;
    };

    if json_output {
        println!(
            "{}",
            json!({
                "platform": platform.name(),
                "amount": amount.to_string(),
                "balance": platform.balance().to_string(),
            })
        );
    } else {
        println!(
            "{}",
            formatters::format_confirmation(verb, amount, platform, &session.currency_symbol)
        );
    }
}

fn print_interest(session: &Session, applied: &[(String, Decimal)], json_output: bool) {
    if json_output {
        let entries: Vec<_> = applied
            .iter()
            .map(|(name, interest)| {
                let balance = session
                    .ledger
                    .get(name)
                    .map(|p| p.balance().to_string())
                    .unwrap_or_default();
                json!({ "platform": name, "interest": interest.to_string(), "balance": balance })
            })
            .collect();
        println!("{}", serde_json::Value::Array(entries));
        return;
    }

    for (name, interest) in applied {
        let balance = session
            .ledger
            .get(name)
            .map(|p| p.balance())
            .unwrap_or_default();
        if interest.is_zero() {
            println!(
                "{} No interest accrued for {} (zero rate or balance)",
                "ℹ".blue().bold(),
                name.bold()
            );
        } else {
            println!(
                "{} Applied {} interest to {}. New balance: {}",
                "✓".green().bold(),
                session.money(*interest),
                name.bold(),
                session.money(balance)
            );
        }
    }
}

fn print_help() {
    println!("Help: savings <command> [options]");
    println!("\nAvailable commands:");
    println!("  add <name> [balance] [rate]   - Add a platform (rate in percent)");
    println!("  deposit <name> <amount>       - Deposit funds");
    println!("  withdraw <name> <amount>      - Withdraw funds");
    println!("  interest <name|--all>         - Apply one period of interest");
    println!("  set-rate <name> <rate>        - Change the interest rate");
    println!("  summary                       - Show balances for all platforms");
    println!("  history <name>                - Show a platform's transactions");
    println!("  list                          - List platform names");
    println!("  help                          - Show this help");
    println!("  exit                          - Save and exit");
    println!("\nQuote names with spaces: deposit \"My Bank\" 100");
}
