//! Error handling for the savings ledger
//!
//! Defines the error kinds surfaced by ledger operations and the
//! persistence store. The binary wraps these in anyhow for context
//! chaining.

use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

/// Core error types for ledger and store operations
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid interest rate: {0} (must not be negative)")]
    InvalidRate(Decimal),

    #[error("invalid platform name: {0:?}")]
    InvalidName(String),

    #[error("platform '{0}' already exists")]
    PlatformExists(String),

    #[error("platform '{0}' not found")]
    PlatformNotFound(String),

    #[error("corrupt store at {path:?}: {source}")]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write store at {path:?}: {source}")]
    StoreWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_formatting_is_readable() {
        let err = LedgerError::PlatformNotFound("Vault".to_string());
        assert_eq!(err.to_string(), "platform 'Vault' not found");

        let err = LedgerError::InvalidRate(dec!(-1.5));
        assert_eq!(
            err.to_string(),
            "invalid interest rate: -1.5 (must not be negative)"
        );
    }

    #[test]
    fn test_anyhow_context_chains_errors() {
        use anyhow::Context;
        let result: anyhow::Result<()> =
            Err(LedgerError::InvalidAmount("-5".to_string())).context("failed to deposit");
        match result {
            Err(e) => {
                assert!(e.to_string().contains("failed to deposit"));
                let debug_msg = format!("{:?}", e);
                assert!(debug_msg.contains("invalid amount"));
            }
            Ok(_) => panic!("expected error"),
        }
    }

    #[test]
    fn test_store_errors_keep_their_source() {
        use std::error::Error as _;
        let err = LedgerError::StoreWriteFailed {
            path: PathBuf::from("data/platforms.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().starts_with("failed to write store"));
        assert!(err.source().is_some());
    }
}
