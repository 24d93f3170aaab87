//! Output formatting module for CLI display
//!
//! This module handles all terminal output formatting, separating
//! the concerns of ledger state from presentation.

use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use savings::ledger::{Platform, TransactionType};
use savings::reports::LedgerSummary;
use savings::utils::{format_money, format_rate};

/// Format the ledger summary for JSON output
pub fn format_summary_json(summary: &LedgerSummary) -> String {
    serde_json::to_string_pretty(summary)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

/// Format the ledger summary for terminal table output
pub fn format_summary_table(summary: &LedgerSummary, symbol: &str) -> String {
    let mut output = format!("\n{} Platform Summary\n\n", "💰".cyan().bold());

    #[derive(Tabled)]
    struct PlatformRow {
        #[tabled(rename = "Platform")]
        name: String,
        #[tabled(rename = "Balance")]
        balance: String,
        #[tabled(rename = "Rate")]
        rate: String,
        #[tabled(rename = "Deposited")]
        deposited: String,
        #[tabled(rename = "Withdrawn")]
        withdrawn: String,
        #[tabled(rename = "Interest")]
        interest: String,
        #[tabled(rename = "Txns")]
        transactions: usize,
    }

    let rows: Vec<PlatformRow> = summary
        .platforms
        .iter()
        .map(|p| PlatformRow {
            name: p.name.clone(),
            balance: format_money(p.balance, symbol),
            rate: format_rate(p.interest_rate),
            deposited: format_money(p.total_deposited, symbol),
            withdrawn: format_money(p.total_withdrawn, symbol),
            interest: format_money(p.total_interest, symbol),
            transactions: p.transaction_count,
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.modify(Columns::new(1..), Alignment::right());
    output.push_str(&table.to_string());

    output.push_str(&format!("\n\n{}", "━".repeat(60).bright_black()));
    output.push_str(&format!(
        "\n{:<32} {}",
        "Total Balance Across All Platforms:".bold(),
        format_money(summary.total_balance, symbol).green().bold()
    ));
    output.push_str(&format!(
        "\n{:<32} {}\n",
        "Total Interest Earned:".bold(),
        format_money(summary.total_interest, symbol)
    ));

    output
}

/// Format one platform's history for JSON output
pub fn format_history_json(platform: &Platform) -> String {
    #[derive(Serialize)]
    struct JsonRecord {
        #[serde(rename = "type")]
        transaction_type: &'static str,
        amount: String,
        balance: String,
        timestamp: String,
    }

    #[derive(Serialize)]
    struct JsonHistory<'a> {
        name: &'a str,
        balance: String,
        interest_rate: String,
        history: Vec<JsonRecord>,
    }

    let json = JsonHistory {
        name: platform.name(),
        balance: platform.balance().to_string(),
        interest_rate: platform.interest_rate().to_string(),
        history: platform
            .history()
            .iter()
            .map(|r| JsonRecord {
                transaction_type: r.transaction_type.as_str(),
                amount: r.amount.to_string(),
                balance: r.balance_after.to_string(),
                timestamp: r.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&json)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

/// Format one platform's history, oldest first
pub fn format_history_table(platform: &Platform, symbol: &str) -> String {
    let mut output = format!(
        "\n{} Transaction History for {}\n\n",
        "📜".cyan().bold(),
        platform.name().bold()
    );

    if platform.history().is_empty() {
        output.push_str("No transactions recorded yet.\n");
        return output;
    }

    #[derive(Tabled)]
    struct HistoryRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Type")]
        kind: String,
        #[tabled(rename = "Amount")]
        amount: String,
        #[tabled(rename = "New Balance")]
        balance: String,
    }

    let rows: Vec<HistoryRow> = platform
        .history()
        .iter()
        .map(|r| {
            let amount = format_money(r.amount, symbol);
            HistoryRow {
                date: r.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                kind: r.transaction_type.as_str().to_string(),
                amount: match r.transaction_type {
                    TransactionType::Withdrawal => amount.red().to_string(),
                    TransactionType::Deposit | TransactionType::Interest => {
                        amount.green().to_string()
                    }
                },
                balance: format_money(r.balance_after, symbol),
            }
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.modify(Columns::new(2..), Alignment::right());
    output.push_str(&table.to_string());
    output.push('\n');
    output
}

/// Confirmation line after a successful balance change
pub fn format_confirmation(
    verb: &str,
    amount: Decimal,
    platform: &Platform,
    symbol: &str,
) -> String {
    format!(
        "{} {} {} {} {}. New balance: {}",
        "✓".green().bold(),
        verb,
        format_money(amount, symbol),
        if verb == "Withdrew" { "from" } else { "to" },
        platform.name().bold(),
        format_money(platform.balance(), symbol)
    )
}

/// Format empty ledger message
pub fn format_empty_ledger() -> String {
    format!(
        "{} No platforms to display\nAdd one first using: {} add <name>\n",
        "ℹ".blue().bold(),
        "savings".bold()
    )
}
