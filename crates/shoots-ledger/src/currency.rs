#![forbid(unsafe_code)]

//! Integer-cent money and the keypad-style amount field.
//!
//! Amounts are typed without a decimal point: `"1299"` means `$12.99`.
//! Every non-digit is stripped before parsing, so `"$12.99"` reads the same.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::error::CurrencyError;

/// Longest raw digit string the amount field accepts (`$999,999.99`).
pub const MAX_INPUT_DIGITS: usize = 8;

/// A non-negative amount of money in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(u64);

impl Cents {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn new(cents: u64) -> Self {
        Self(cents)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Parse keypad input: strip non-digits, read the rest as cents.
    /// Empty input is zero.
    pub fn from_input(raw: &str) -> Result<Self, CurrencyError> {
        let digits = digits_only(raw);
        if digits.is_empty() {
            return Ok(Self::ZERO);
        }
        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| CurrencyError::Overflow { input: digits })
    }

    /// Convert a dollar value, rounding to the nearest cent.
    pub fn from_dollars(dollars: f64) -> Result<Self, CurrencyError> {
        if !dollars.is_finite() || dollars < 0.0 {
            return Err(CurrencyError::InvalidDollars);
        }
        let cents = (dollars * 100.0).round();
        if cents >= u64::MAX as f64 {
            return Err(CurrencyError::Overflow {
                input: dollars.to_string(),
            });
        }
        Ok(Self(cents as u64))
    }

    /// Two-decimal dollar string without a symbol, e.g. `"12.99"`.
    #[must_use]
    pub fn to_dollar_string(self) -> String {
        format!("{}.{:02}", self.0 / 100, self.0 % 100)
    }

    /// Dollar string with a leading `$`, e.g. `"$12.99"`.
    #[must_use]
    pub fn display(self) -> String {
        format!("${}", self.to_dollar_string())
    }

    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Signed difference `self - other` in cents, saturating at the `i64` range.
    #[must_use]
    pub fn signed_diff(self, other: Self) -> i64 {
        let diff = i128::from(self.0) - i128::from(other.0);
        i64::try_from(diff).unwrap_or(if diff < 0 { i64::MIN } else { i64::MAX })
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Add for Cents {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Cents> for Cents {
    fn sum<I: Iterator<Item = &'a Cents>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Keypad amount field: holds the raw digits the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrencyInput {
    raw: String,
}

impl CurrencyInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the field from an existing amount; zero leaves it empty.
    #[must_use]
    pub fn from_cents(value: Cents) -> Self {
        let raw = if value.get() > 0 {
            value.get().to_string()
        } else {
            String::new()
        };
        Self { raw }
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Replace the field contents with `typed` after stripping non-digits.
    ///
    /// More than [`MAX_INPUT_DIGITS`] digits is rejected and the field keeps
    /// its previous value.
    pub fn set(&mut self, typed: &str) -> Result<Cents, CurrencyError> {
        let digits = digits_only(typed);
        if digits.len() > MAX_INPUT_DIGITS {
            return Err(CurrencyError::TooManyDigits {
                digits: digits.len(),
                max: MAX_INPUT_DIGITS,
            });
        }
        self.raw = digits;
        Ok(self.cents())
    }

    /// Append one keypad key. Non-digits are ignored.
    pub fn push(&mut self, key: char) -> Result<Cents, CurrencyError> {
        if !key.is_ascii_digit() {
            return Ok(self.cents());
        }
        let mut next = self.raw.clone();
        next.push(key);
        self.set(&next)
    }

    pub fn backspace(&mut self) -> Cents {
        self.raw.pop();
        self.cents()
    }

    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Current value. At most eight digits are ever stored, so this cannot overflow.
    #[must_use]
    pub fn cents(&self) -> Cents {
        Cents::new(self.raw.parse().unwrap_or(0))
    }

    /// Text shown in the field: empty for no amount, else `"12.99"`.
    #[must_use]
    pub fn display(&self) -> String {
        if self.raw.is_empty() || self.raw == "0" {
            return String::new();
        }
        self.cents().to_dollar_string()
    }
}
