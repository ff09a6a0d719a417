#![forbid(unsafe_code)]

use std::path::PathBuf;

use shoots_core::logging::LoggingError;
use shoots_layout::GridError;
use shoots_ledger::{CurrencyError, LedgerError};
use thiserror::Error;

use crate::config::SettingsError;

pub type Result<T> = std::result::Result<T, ShootsError>;

#[derive(Debug, Error)]
pub enum ShootsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigInvalid {
        path: PathBuf,
        #[source]
        source: SettingsError,
    },

    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("invalid replay script {path}: {source}")]
    Script {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Currency(#[from] CurrencyError),

    #[error("logging setup failed: {0}")]
    Logging(#[from] LoggingError),
}

impl ShootsError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Currency(_) => 2,
            Self::ConfigParse { .. }
            | Self::ConfigInvalid { .. }
            | Self::Settings(_)
            | Self::Script { .. } => 3,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::ShootsError;
    use crate::config::SettingsError;
    use shoots_ledger::{Category, CurrencyError};

    #[test]
    fn bad_input_exits_with_usage_code() {
        let currency = ShootsError::from(CurrencyError::TooManyDigits { digits: 9, max: 8 });
        assert_eq!(currency.exit_code(), 2);
        assert_eq!(currency.to_string(), "amount has 9 digits; at most 8 are allowed");
    }

    #[test]
    fn unusable_settings_exit_with_config_code() {
        let error = ShootsError::ConfigInvalid {
            path: PathBuf::from("shoots.toml"),
            source: SettingsError::IncomeBudget {
                category: Category::Salary,
            },
        };
        assert_eq!(error.exit_code(), 3);
        assert_eq!(
            error.to_string(),
            "invalid config shoots.toml: [ledger] budget for Salary: only expense categories have budgets"
        );
    }
}
