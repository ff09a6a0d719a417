#![forbid(unsafe_code)]

//! Transaction kinds and categories, with the icon and chart colour the
//! dashboard uses for each.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Money out or money in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }

    /// Categories belonging to this kind, in display order.
    #[must_use]
    pub const fn categories(self) -> &'static [Category] {
        match self {
            Self::Expense => &Category::EXPENSE,
            Self::Income => &Category::INCOME,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" | "expenses" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            _ => Err(LedgerError::UnknownKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Dining,
    Shopping,
    Groceries,
    Transportation,
    Entertainment,
    Other,
    Salary,
    Freelance,
    Investment,
    Gift,
}

impl Category {
    pub const EXPENSE: [Category; 6] = [
        Category::Dining,
        Category::Shopping,
        Category::Groceries,
        Category::Transportation,
        Category::Entertainment,
        Category::Other,
    ];

    pub const INCOME: [Category; 4] = [
        Category::Salary,
        Category::Freelance,
        Category::Investment,
        Category::Gift,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dining => "Dining",
            Self::Shopping => "Shopping",
            Self::Groceries => "Groceries",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Other => "Other",
            Self::Salary => "Salary",
            Self::Freelance => "Freelance",
            Self::Investment => "Investment",
            Self::Gift => "Gift",
        }
    }

    #[must_use]
    pub const fn kind(self) -> TransactionKind {
        match self {
            Self::Salary | Self::Freelance | Self::Investment | Self::Gift => {
                TransactionKind::Income
            }
            _ => TransactionKind::Expense,
        }
    }

    /// Font Awesome icon name.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Dining => "fa-utensils",
            Self::Shopping => "fa-cart-shopping",
            Self::Groceries => "fa-basket-shopping",
            Self::Transportation => "fa-car",
            Self::Entertainment => "fa-tv",
            Self::Other => "fa-ellipsis",
            Self::Salary => "fa-money-bill-wave",
            Self::Freelance => "fa-laptop-code",
            Self::Investment => "fa-chart-line",
            Self::Gift => "fa-gift",
        }
    }

    /// Chart colour. Income categories are not charted.
    #[must_use]
    pub const fn color(self) -> Option<&'static str> {
        match self {
            Self::Dining => Some("#ff6b6b"),
            Self::Shopping => Some("#4ecdc4"),
            Self::Groceries => Some("#95e1d3"),
            Self::Transportation => Some("#f38181"),
            Self::Entertainment => Some("#aa96da"),
            Self::Other => Some("#83827d"),
            Self::Salary | Self::Freelance | Self::Investment | Self::Gift => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::EXPENSE
            .iter()
            .chain(Self::INCOME.iter())
            .copied()
            .find(|category| category.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| LedgerError::UnknownCategory(s.to_string()))
    }
}
