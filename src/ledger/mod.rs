// Ledger module - platform table and its command operations

pub mod models;

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::error::{LedgerError, Result};
pub use models::{round_money, Platform, TransactionRecord, TransactionType};

/// Owned table of platforms keyed by name.
///
/// Callers read platforms through shared references and mutate them only
/// through the named operations below, so name uniqueness and balance
/// rules stay in one place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    platforms: BTreeMap<String, Platform>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from already-validated platforms (e.g. a loaded
    /// document). A later platform with a repeated name replaces the earlier.
    pub fn from_platforms(platforms: impl IntoIterator<Item = Platform>) -> Self {
        let mut ledger = Self::new();
        for platform in platforms {
            let name = platform.name().to_string();
            if ledger.platforms.insert(name.clone(), platform).is_some() {
                warn!("Duplicate platform '{}' in input, keeping the last entry", name);
            }
        }
        ledger
    }

    /// Register a new platform.
    pub fn add_platform(
        &mut self,
        name: &str,
        balance: Decimal,
        interest_rate: Decimal,
    ) -> Result<&Platform> {
        let platform = Platform::new(name, balance, interest_rate)?;
        let key = platform.name().to_string();
        if self.platforms.contains_key(&key) {
            return Err(LedgerError::PlatformExists(key));
        }

        info!("Adding platform '{}' with balance {}", key, platform.balance());
        Ok(self.platforms.entry(key).or_insert(platform))
    }

    /// Deposit into a platform, returning its new balance.
    pub fn deposit(&mut self, name: &str, amount: Decimal) -> Result<Decimal> {
        self.platform_mut(name)?.deposit(amount)
    }

    /// Withdraw from a platform, returning its new balance.
    pub fn withdraw(&mut self, name: &str, amount: Decimal) -> Result<Decimal> {
        self.platform_mut(name)?.withdraw(amount)
    }

    /// Accrue interest on one platform, returning the amount credited.
    pub fn apply_interest(&mut self, name: &str) -> Result<Decimal> {
        Ok(self.platform_mut(name)?.apply_interest())
    }

    /// Accrue interest on every platform, in name order.
    pub fn apply_interest_all(&mut self) -> Vec<(String, Decimal)> {
        self.platforms
            .values_mut()
            .map(|p| {
                let interest = p.apply_interest();
                (p.name().to_string(), interest)
            })
            .collect()
    }

    pub fn set_interest_rate(&mut self, name: &str, rate: Decimal) -> Result<()> {
        self.platform_mut(name)?.set_interest_rate(rate)
    }

    pub fn get(&self, name: &str) -> Option<&Platform> {
        self.platforms.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.platforms.contains_key(name)
    }

    /// Platforms in name order.
    pub fn platforms(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.platforms.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    pub fn total_balance(&self) -> Decimal {
        self.platforms.values().map(Platform::balance).sum()
    }

    fn platform_mut(&mut self, name: &str) -> Result<&mut Platform> {
        self.platforms
            .get_mut(name)
            .ok_or_else(|| LedgerError::PlatformNotFound(name.to_string()))
    }
}
