#![forbid(unsafe_code)]

//! A single ledger entry.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::Month;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::category::{Category, TransactionKind};
use crate::currency::Cents;
use crate::error::LedgerError;

/// Month and day, written the way the dashboard shows it: `"Dec 10"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxDate {
    month: Month,
    day: u8,
}

impl TxDate {
    pub fn new(month: Month, day: u8) -> Result<Self, LedgerError> {
        let max = max_day(month);
        if day == 0 || day > max {
            return Err(LedgerError::InvalidDate {
                input: format!("{} {day}", abbrev(month)),
                reason: format!("day must be within 1..={max}"),
            });
        }
        Ok(Self { month, day })
    }

    /// Built-in seed rows only; days there are known to be valid.
    pub(crate) const fn seed(month: Month, day: u8) -> Self {
        Self { month, day }
    }

    #[must_use]
    pub const fn month(self) -> Month {
        self.month
    }

    #[must_use]
    pub const fn day(self) -> u8 {
        self.day
    }
}

fn max_day(month: Month) -> u8 {
    match month {
        Month::February => 29,
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

/// Three-letter month name, e.g. `"Dec"`.
#[must_use]
pub fn abbrev(month: Month) -> &'static str {
    let name = month.name();
    name.get(..3).unwrap_or(name)
}

impl Ord for TxDate {
    fn cmp(&self, other: &Self) -> Ordering {
        let key = |date: &Self| (date.month.number_from_month(), date.day);
        key(self).cmp(&key(other))
    }
}

impl PartialOrd for TxDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TxDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", abbrev(self.month), self.day)
    }
}

impl FromStr for TxDate {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| LedgerError::InvalidDate {
            input: s.to_string(),
            reason: reason.to_string(),
        };
        let mut parts = s.split_whitespace();
        let (Some(month), Some(day), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid("expected \"<month> <day>\""));
        };
        let month = month
            .parse::<Month>()
            .map_err(|_| invalid("unknown month name"))?;
        let day = day.parse::<u8>().map_err(|_| invalid("day is not a number"))?;
        Self::new(month, day)
    }
}

impl Serialize for TxDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TxDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: TxDate,
    pub merchant: String,
    pub category: Category,
    pub amount: Cents,
    /// Icon for this entry; defaults to the category icon.
    pub icon: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl Transaction {
    /// Entry whose kind and icon follow from its category.
    #[must_use]
    pub fn new(date: TxDate, merchant: impl Into<String>, category: Category, amount: Cents) -> Self {
        Self {
            date,
            merchant: merchant.into(),
            category,
            amount,
            icon: category.icon().to_string(),
            kind: category.kind(),
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Fails when the category belongs to the other kind.
    pub fn check_kind(&self) -> Result<(), LedgerError> {
        if self.category.kind() == self.kind {
            Ok(())
        } else {
            Err(LedgerError::KindMismatch {
                category: self.category,
                kind: self.kind,
            })
        }
    }

    /// `"+$5000.00"` for income, `"-$8.50"` for expenses.
    #[must_use]
    pub fn signed_display(&self) -> String {
        let sign = match self.kind {
            TransactionKind::Income => '+',
            TransactionKind::Expense => '-',
        };
        format!("{sign}{}", self.amount)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<6} {:<18} {:<14} {:>11}",
            self.date.to_string(),
            self.merchant,
            self.category.name(),
            self.signed_display()
        )
    }
}
