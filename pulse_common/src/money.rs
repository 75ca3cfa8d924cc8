use std::{fmt::Display, iter::Sum, ops::Add, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sqlx::Type;
use thiserror::Error;

/// A currency amount in cents.
///
/// Shopify reports money as decimal strings ("12.34"). Storing the amount as an integer number of
/// cents keeps sums exact; the conversion is fallible and a bad amount is always an error, never a
/// silent zero.
#[derive(Debug, Clone, Copy, Default, Type, PartialEq, Eq, PartialOrd, Ord)]
#[sqlx(transparent)]
pub struct Money(i64);

#[derive(Debug, Clone, Error)]
pub enum MoneyError {
    #[error("Invalid currency amount: {0}")]
    InvalidAmount(String),
    #[error("Negative currency amount: {0}")]
    NegativeAmount(String),
}

impl Money {
    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.starts_with('-') {
            return Err(MoneyError::NegativeAmount(value.to_string()));
        }
        let mut parts = value.splitn(2, '.');
        let whole = parts
            .next()
            .filter(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|p| p.parse::<i64>().ok())
            .ok_or_else(|| MoneyError::InvalidAmount(value.to_string()))?;
        // Fractional digits beyond cents are truncated. "12.3" means 12.30, not 12.03.
        let cents = match parts.next() {
            None => 0,
            Some(frac) if !frac.is_empty() && frac.bytes().all(|b| b.is_ascii_digit()) => {
                let mut digits = frac.bytes().take(2).map(|b| i64::from(b - b'0'));
                let tens = digits.next().unwrap_or(0);
                let units = digits.next().unwrap_or(0);
                tens * 10 + units
            },
            Some(_) => return Err(MoneyError::InvalidAmount(value.to_string())),
        };
        whole
            .checked_mul(100)
            .and_then(|w| w.checked_add(cents))
            .map(Money)
            .ok_or_else(|| MoneyError::InvalidAmount(value.to_string()))
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
