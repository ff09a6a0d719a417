#![forbid(unsafe_code)]

use thiserror::Error;

use crate::category::{Category, TransactionKind};

pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    #[error("amount has {digits} digits; at most {max} are allowed")]
    TooManyDigits { digits: usize, max: usize },

    #[error("amount does not fit in cents: {input}")]
    Overflow { input: String },

    #[error("amount must be a finite, non-negative number of dollars")]
    InvalidDollars,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("transaction index {index} out of range (ledger has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unknown transaction kind: {0} (expected expense or income)")]
    UnknownKind(String),

    #[error("invalid date {input:?}: {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("category {category} is not an {kind} category")]
    KindMismatch {
        category: Category,
        kind: TransactionKind,
    },

    #[error(transparent)]
    Currency(#[from] CurrencyError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_error_names_both_numbers() {
        let error = LedgerError::IndexOutOfRange { index: 9, len: 3 };
        assert_eq!(
            error.to_string(),
            "transaction index 9 out of range (ledger has 3)"
        );
    }

    #[test]
    fn currency_errors_pass_through() {
        let error = LedgerError::from(CurrencyError::InvalidDollars);
        assert_eq!(error.to_string(), CurrencyError::InvalidDollars.to_string());
    }
}
