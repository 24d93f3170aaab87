use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

pub mod formatters;
pub mod runner;

#[derive(Parser)]
#[command(name = "savings")]
#[command(version, about = "Multi-platform savings tracker")]
#[command(
    long_about = "Track balances across named investment platforms: deposits, withdrawals, interest accrual and transaction history, persisted to a JSON file."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Directory holding platforms.json (overrides config and SAVINGS_DATA_DIR)
    #[arg(long = "data-dir", global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new platform
    Add {
        /// Platform name (must be unique)
        name: String,

        /// Opening balance
        #[arg(short, long, default_value = "0")]
        balance: Decimal,

        /// Interest rate in percent (5 means 5%)
        #[arg(short, long, default_value = "0")]
        rate: Decimal,
    },

    /// Deposit funds into a platform
    Deposit {
        /// Platform name
        name: String,

        /// Amount to deposit
        amount: Decimal,
    },

    /// Withdraw funds from a platform
    Withdraw {
        /// Platform name
        name: String,

        /// Amount to withdraw (may not exceed the balance)
        amount: Decimal,
    },

    /// Apply one period of interest
    Interest {
        /// Platform name
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        name: Option<String>,

        /// Apply to every platform
        #[arg(short, long)]
        all: bool,
    },

    /// Change a platform's interest rate
    SetRate {
        /// Platform name
        name: String,

        /// New rate in percent
        rate: Decimal,
    },

    /// Show balances and rates for all platforms
    Summary,

    /// Show the transaction history of a platform
    History {
        /// Platform name
        name: String,
    },

    /// Launch the interactive console
    Interactive,
}
