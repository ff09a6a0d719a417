#![forbid(unsafe_code)]

//! `shoots.toml`: grid shape, logging, and ledger widget targets.
//!
//! ```toml
//! [grid]
//! rows = 14
//! columns = { sm = 7, md = 14, lg = 28 }
//!
//! [log]
//! filter = "shoots=debug"
//! format = "json"
//!
//! [ledger]
//! savings_goal = 1000000
//! budgets = { Dining = 40000, Shopping = 30000 }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shoots_core::logging::{LogFormat, LoggingError};
use shoots_layout::{GridConfig, GridConfigError};
use shoots_ledger::{BudgetLine, Category, Cents, Ledger, LedgerError, Month, TransactionKind};
use thiserror::Error;
use tracing::debug;

use crate::error::{Result, ShootsError};

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "shoots.toml";

/// A settings value that parsed but is not usable.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("[grid] {0}")]
    Grid(#[from] GridConfigError),

    #[error("[log] {0}")]
    Log(#[from] LoggingError),

    #[error("[ledger] budget {name:?}: {source}")]
    BudgetCategory {
        name: String,
        #[source]
        source: LedgerError,
    },

    #[error("[ledger] budget for {category}: only expense categories have budgets")]
    IncomeBudget { category: Category },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub grid: GridConfig,
    pub log: LogSettings,
    pub ledger: LedgerSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    /// `EnvFilter` directives; `SHOOTS_LOG` still wins.
    pub filter: Option<String>,
    /// `pretty` or `json`.
    pub format: Option<String>,
}

impl LogSettings {
    pub fn format(&self) -> std::result::Result<LogFormat, SettingsError> {
        match &self.format {
            Some(raw) => Ok(raw.parse()?),
            None => Ok(LogFormat::default()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerSettings {
    /// Savings target in cents.
    pub savings_goal: Option<Cents>,
    /// Monthly spending limit per expense category name, in cents.
    pub budgets: BTreeMap<String, Cents>,
}

impl LedgerSettings {
    /// Budget rows for `month`, in category order.
    pub fn budget_lines(
        &self,
        ledger: &Ledger,
        month: Month,
    ) -> std::result::Result<Vec<BudgetLine>, SettingsError> {
        let spent = ledger.category_totals(month, TransactionKind::Expense);
        let mut lines = Vec::with_capacity(self.budgets.len());
        for (name, &limit) in &self.budgets {
            let category = budget_category(name)?;
            lines.push(BudgetLine {
                category,
                spent: spent.get(&category).copied().unwrap_or(Cents::ZERO),
                limit,
            });
        }
        lines.sort_by_key(|line| line.category);
        Ok(lines)
    }
}

fn budget_category(name: &str) -> std::result::Result<Category, SettingsError> {
    let category = name.parse::<Category>().map_err(|source| SettingsError::BudgetCategory {
        name: name.to_string(),
        source,
    })?;
    if category.kind() != TransactionKind::Expense {
        return Err(SettingsError::IncomeBudget { category });
    }
    Ok(category)
}

impl Settings {
    /// Load `path`, else `./shoots.toml` if it exists, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| ShootsError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&raw).map_err(|source| ShootsError::ConfigParse {
            path: PathBuf::from(path),
            source,
        })?;
        settings
            .validate()
            .map_err(|source| ShootsError::ConfigInvalid {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), "config loaded");
        Ok(settings)
    }

    pub fn from_toml_str(raw: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn validate(&self) -> std::result::Result<(), SettingsError> {
        self.grid.validate()?;
        self.log.format()?;
        for name in self.ledger.budgets.keys() {
            budget_category(name)?;
        }
        Ok(())
    }
}
