// Reports module - read-only views over the ledger

use rust_decimal::Decimal;
use serde::Serialize;

use crate::ledger::{Ledger, Platform, TransactionType};

/// Totals for a single platform
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformSummary {
    pub name: String,
    pub balance: Decimal,
    pub interest_rate: Decimal,
    pub transaction_count: usize,
    pub total_deposited: Decimal,
    pub total_withdrawn: Decimal,
    pub total_interest: Decimal,
}

/// Summary across every platform
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub platforms: Vec<PlatformSummary>,
    pub total_balance: Decimal,
    pub total_interest: Decimal,
}

impl PlatformSummary {
    pub fn from_platform(platform: &Platform) -> Self {
        let mut total_deposited = Decimal::ZERO;
        let mut total_withdrawn = Decimal::ZERO;
        let mut total_interest = Decimal::ZERO;

        for record in platform.history() {
            match record.transaction_type {
                TransactionType::Deposit => total_deposited += record.amount,
                TransactionType::Withdrawal => total_withdrawn += record.amount.abs(),
                TransactionType::Interest => total_interest += record.amount,
            }
        }

        Self {
            name: platform.name().to_string(),
            balance: platform.balance(),
            interest_rate: platform.interest_rate(),
            transaction_count: platform.history().len(),
            total_deposited,
            total_withdrawn,
            total_interest,
        }
    }
}

/// Build the summary shown by `summary` and the interactive console.
pub fn summarize(ledger: &Ledger) -> LedgerSummary {
    let platforms: Vec<PlatformSummary> = ledger
        .platforms()
        .map(PlatformSummary::from_platform)
        .collect();
    let total_interest = platforms.iter().map(|p| p.total_interest).sum();

    LedgerSummary {
        total_balance: ledger.total_balance(),
        total_interest,
        platforms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_summary_of_empty_ledger() {
        let summary = summarize(&Ledger::new());
        assert!(summary.platforms.is_empty());
        assert_eq!(summary.total_balance, Decimal::ZERO);
    }

    #[test]
    fn test_summary_totals() {
        let mut ledger = Ledger::new();
        ledger.add_platform("Vault", dec!(100), dec!(5)).unwrap();
        ledger.add_platform("Broker", dec!(20), dec!(0)).unwrap();
        ledger.deposit("Vault", dec!(50)).unwrap();
        ledger.withdraw("Vault", dec!(10)).unwrap();
        ledger.apply_interest("Vault").unwrap();

        let summary = summarize(&ledger);
        assert_eq!(summary.platforms.len(), 2);

        let vault = summary
            .platforms
            .iter()
            .find(|p| p.name == "Vault")
            .unwrap();
        assert_eq!(vault.transaction_count, 3);
        assert_eq!(vault.total_deposited, dec!(50));
        assert_eq!(vault.total_withdrawn, dec!(10));
        assert_eq!(vault.total_interest, dec!(7));
        assert_eq!(vault.balance, dec!(147));

        assert_eq!(summary.total_balance, dec!(167));
        assert_eq!(summary.total_interest, dec!(7));
    }
}
