use chrono::{Local, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::{LedgerError, Result};

/// Decimal places kept for every monetary amount
pub const MONEY_SCALE: u32 = 2;

/// Round a monetary amount to cents, half-to-even. The result always
/// carries exactly two decimal places.
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Kind of balance-changing event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Interest,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "Deposit",
            TransactionType::Withdrawal => "Withdrawal",
            TransactionType::Interest => "Interest",
        }
    }
}

impl FromStr for TransactionType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deposit" => Ok(TransactionType::Deposit),
            "withdrawal" | "withdraw" => Ok(TransactionType::Withdrawal),
            "interest" => Ok(TransactionType::Interest),
            _ => Err(()),
        }
    }
}

/// One entry of a platform's history
///
/// `amount` is signed: withdrawals are stored negative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionRecord {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    #[serde(rename = "balance", with = "rust_decimal::serde::arbitrary_precision")]
    pub balance_after: Decimal,
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
}

impl TransactionRecord {
    fn normalized(self) -> Result<Self> {
        let balance_after = round_money(self.balance_after);
        if balance_after < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(format!(
                "recorded balance {} is negative",
                balance_after
            )));
        }
        Ok(Self {
            amount: round_money(self.amount),
            balance_after,
            ..self
        })
    }
}

/// ISO-8601 timestamps. Written as local naive time; read back from either
/// the naive form or an RFC 3339 string with an offset, which is converted
/// to local time.
mod timestamp_format {
    use chrono::{DateTime, Local, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp '{}'", raw)))
    }

    pub(super) fn parse(raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        NaiveDateTime::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|dt| dt.with_timezone(&Local).naive_local())
            })
    }
}

/// A named account holding a balance, an interest rate (percent) and an
/// append-only transaction history.
///
/// Deserialization goes through the same checks as [`Platform::new`], so a
/// loaded document cannot hold an empty name, a negative balance or rate,
/// or amounts finer than a cent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "StoredPlatform")]
pub struct Platform {
    name: String,
    #[serde(serialize_with = "rust_decimal::serde::arbitrary_precision::serialize")]
    balance: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::arbitrary_precision::serialize")]
    interest_rate: Decimal,
    history: Vec<TransactionRecord>,
}

/// Platform as written in the store, before validation
#[derive(Deserialize)]
struct StoredPlatform {
    name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    balance: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    interest_rate: Decimal,
    #[serde(default)]
    history: Vec<TransactionRecord>,
}

impl TryFrom<StoredPlatform> for Platform {
    type Error = LedgerError;

    fn try_from(stored: StoredPlatform) -> Result<Self> {
        let mut platform = Platform::new(&stored.name, stored.balance, stored.interest_rate)?;
        platform.history = stored
            .history
            .into_iter()
            .map(TransactionRecord::normalized)
            .collect::<Result<_>>()?;
        Ok(platform)
    }
}

impl Platform {
    /// Create a platform with an opening balance and rate.
    ///
    /// The opening balance is rounded to cents and is not recorded in the
    /// history.
    pub fn new(name: &str, balance: Decimal, interest_rate: Decimal) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::InvalidName(name.to_string()));
        }
        let balance = round_money(balance);
        if balance < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(format!(
                "opening balance {} is negative",
                balance
            )));
        }
        if interest_rate < Decimal::ZERO {
            return Err(LedgerError::InvalidRate(interest_rate));
        }

        Ok(Self {
            name: name.to_string(),
            balance,
            interest_rate,
            history: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }

    pub fn history(&self) -> &[TransactionRecord] {
        &self.history
    }

    /// Add funds. Returns the new balance.
    pub fn deposit(&mut self, amount: Decimal) -> Result<Decimal> {
        let amount = round_money(amount);
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(format!(
                "deposit amount must be positive, got {}",
                amount
            )));
        }

        self.balance = self.balance.checked_add(amount).ok_or_else(|| {
            LedgerError::InvalidAmount(format!(
                "deposit of {} overflows balance of {}",
                amount, self.balance
            ))
        })?;
        self.record(TransactionType::Deposit, amount);
        Ok(self.balance)
    }

    /// Remove funds. Over-balance withdrawals are rejected, never clamped.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Decimal> {
        let amount = round_money(amount);
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(format!(
                "withdrawal amount must be positive, got {}",
                amount
            )));
        }
        if amount > self.balance {
            return Err(LedgerError::InvalidAmount(format!(
                "withdrawal of {} exceeds balance of {}",
                amount, self.balance
            )));
        }

        self.balance -= amount;
        self.record(TransactionType::Withdrawal, -amount);
        Ok(self.balance)
    }

    /// Accrue one period of interest on the current balance.
    ///
    /// Returns the amount credited; zero means nothing was recorded. That
    /// includes interest that would overflow the balance.
    pub fn apply_interest(&mut self) -> Decimal {
        let credit = self
            .balance
            .checked_mul(self.interest_rate)
            .and_then(|product| product.checked_div(Decimal::ONE_HUNDRED))
            .map(round_money)
            .and_then(|interest| Some((interest, self.balance.checked_add(interest)?)));
        let Some((interest, balance)) = credit else {
            warn!(
                platform = %self.name,
                balance = %self.balance,
                rate = %self.interest_rate,
                "interest overflows the balance, skipping"
            );
            return Decimal::ZERO;
        };
        if interest <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        self.balance = balance;
        self.record(TransactionType::Interest, interest);
        interest
    }

    /// Change the rate used by future interest accruals.
    pub fn set_interest_rate(&mut self, rate: Decimal) -> Result<()> {
        if rate < Decimal::ZERO {
            return Err(LedgerError::InvalidRate(rate));
        }
        self.interest_rate = rate;
        Ok(())
    }

    fn record(&mut self, transaction_type: TransactionType, amount: Decimal) {
        let timestamp = self.next_timestamp();
        debug!(
            platform = %self.name,
            kind = transaction_type.as_str(),
            %amount,
            balance = %self.balance,
            "transaction recorded"
        );
        self.history.push(TransactionRecord {
            transaction_type,
            amount,
            balance_after: self.balance,
            timestamp,
        });
    }

    // Keeps history non-decreasing even if the wall clock steps back.
    fn next_timestamp(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        match self.history.last() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        }
    }
}
