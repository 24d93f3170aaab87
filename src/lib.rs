//! Savings - multi-platform savings tracker
//!
//! This library provides the ledger model (platforms, balances, interest
//! accrual and transaction history), its JSON persistence store, and the
//! configuration and reporting helpers used by the `savings` binary.

pub mod config;
pub mod error;
pub mod ledger;
pub mod reports;
pub mod storage;
pub mod utils;
