#![forbid(unsafe_code)]

//! Personal-finance data behind the dashboard widgets.
//!
//! Money is carried as integer [`Cents`] end to end; floating point appears
//! only when converting a dollar value supplied from outside.

pub mod category;
pub mod currency;
pub mod error;
pub mod ledger;
pub mod summary;
pub mod transaction;

pub use category::{Category, TransactionKind};
pub use chrono::Month;
pub use currency::{Cents, CurrencyInput, MAX_INPUT_DIGITS};
pub use error::{CurrencyError, LedgerError, Result};
pub use ledger::Ledger;
pub use summary::{BudgetLine, CategoryShare, MonthSummary, SavingsProgress, SpendingComparison, percent};
pub use transaction::{Transaction, TxDate, abbrev};
