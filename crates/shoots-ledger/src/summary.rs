#![forbid(unsafe_code)]

//! Numbers behind the dashboard widgets.

use chrono::Month;
use serde::Serialize;

use crate::category::{Category, TransactionKind};
use crate::currency::Cents;
use crate::ledger::Ledger;
use crate::transaction::abbrev;

/// `part / whole` as a whole percentage, rounding half up. Zero `whole` is 0%.
#[must_use]
pub fn percent(part: Cents, whole: Cents) -> u32 {
    if whole.get() == 0 {
        return 0;
    }
    let scaled = (u128::from(part.get()) * 200 + u128::from(whole.get())) / (u128::from(whole.get()) * 2);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// Savings goal progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SavingsProgress {
    pub current: Cents,
    pub goal: Cents,
}

impl SavingsProgress {
    /// May exceed 100 once the goal is passed.
    #[must_use]
    pub fn percent(&self) -> u32 {
        percent(self.current, self.goal)
    }

    /// Progress bar fill, capped at 100.
    #[must_use]
    pub fn bar_percent(&self) -> u32 {
        self.percent().min(100)
    }
}

/// This month's spending against last month's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpendingComparison {
    pub this_month: Cents,
    pub last_month: Cents,
}

impl SpendingComparison {
    /// Expense totals for two months of the ledger.
    #[must_use]
    pub fn between(ledger: &Ledger, this_month: Month, last_month: Month) -> Self {
        Self {
            this_month: ledger.month_total(this_month, Some(TransactionKind::Expense)),
            last_month: ledger.month_total(last_month, Some(TransactionKind::Expense)),
        }
    }

    /// `last_month - this_month` in cents; positive means less was spent.
    #[must_use]
    pub fn difference(&self) -> i64 {
        self.last_month.signed_diff(self.this_month)
    }

    #[must_use]
    pub fn decreased(&self) -> bool {
        self.difference() > 0
    }

    /// Absolute change, e.g. `"$828.46 vs last month"`.
    #[must_use]
    pub fn describe(&self) -> String {
        let change = Cents::new(self.difference().unsigned_abs());
        format!("{change} vs last month")
    }
}

/// One row of the budget widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetLine {
    pub category: Category,
    pub spent: Cents,
    pub limit: Cents,
}

impl BudgetLine {
    #[must_use]
    pub fn percent(&self) -> u32 {
        percent(self.spent, self.limit)
    }

    #[must_use]
    pub fn bar_percent(&self) -> u32 {
        self.percent().min(100)
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.spent > self.limit
    }
}

/// A category's slice of a month's expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub amount: Cents,
    pub percent: u32,
    pub color: Option<&'static str>,
}

/// Income, expenses, and the expense breakdown for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSummary {
    pub month: &'static str,
    pub income: Cents,
    pub expenses: Cents,
    /// Income minus expenses, in cents.
    pub net: i64,
    /// Largest category first.
    pub categories: Vec<CategoryShare>,
}

impl MonthSummary {
    #[must_use]
    pub fn for_month(ledger: &Ledger, month: Month) -> Self {
        let income = ledger.month_total(month, Some(TransactionKind::Income));
        let expenses = ledger.month_total(month, Some(TransactionKind::Expense));
        let mut categories: Vec<CategoryShare> = ledger
            .category_totals(month, TransactionKind::Expense)
            .into_iter()
            .map(|(category, amount)| CategoryShare {
                category,
                amount,
                percent: percent(amount, expenses),
                color: category.color(),
            })
            .collect();
        categories.sort_by(|a, b| b.amount.cmp(&a.amount).then(a.category.cmp(&b.category)));
        Self {
            month: abbrev(month),
            income,
            expenses,
            net: income.signed_diff(expenses),
            categories,
        }
    }
}
