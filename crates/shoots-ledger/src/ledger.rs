#![forbid(unsafe_code)]

//! The in-memory transaction store and its month/kind queries.

use std::collections::BTreeMap;

use chrono::Month;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::category::{Category, TransactionKind};
use crate::currency::Cents;
use crate::error::{LedgerError, Result};
use crate::transaction::{Transaction, TxDate};

/// Transactions, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from existing entries, rejecting any whose kind contradicts its category.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Result<Self> {
        for tx in &transactions {
            tx.check_kind()?;
        }
        Ok(Self { transactions })
    }

    /// The dashboard's demo data: October through December.
    #[must_use]
    pub fn seeded() -> Self {
        let transactions = SEED
            .iter()
            .map(|&(month, day, merchant, category, cents, icon)| {
                Transaction::new(TxDate::seed(month, day), merchant, category, Cents::new(cents))
                    .with_icon(icon)
            })
            .collect();
        Self { transactions }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    /// Insert at the front (newest first).
    pub fn add(&mut self, tx: Transaction) -> Result<()> {
        tx.check_kind()?;
        debug!(merchant = %tx.merchant, amount = %tx.amount, "transaction added");
        self.transactions.insert(0, tx);
        Ok(())
    }

    /// Remove and return the entry at `index`.
    pub fn delete(&mut self, index: usize) -> Result<Transaction> {
        self.check_index(index)?;
        let removed = self.transactions.remove(index);
        debug!(index, merchant = %removed.merchant, "transaction deleted");
        Ok(removed)
    }

    /// Replace the entry at `index`, returning the old one.
    pub fn update(&mut self, index: usize, tx: Transaction) -> Result<Transaction> {
        self.check_index(index)?;
        tx.check_kind()?;
        debug!(index, merchant = %tx.merchant, "transaction updated");
        Ok(std::mem::replace(&mut self.transactions[index], tx))
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.transactions.len() {
            Ok(())
        } else {
            Err(LedgerError::IndexOutOfRange {
                index,
                len: self.transactions.len(),
            })
        }
    }

    pub fn by_month(&self, month: Month) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(move |tx| tx.date.month() == month)
    }

    pub fn by_kind(&self, kind: TransactionKind) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(move |tx| tx.kind == kind)
    }

    /// Sum for a month, optionally restricted to one kind.
    #[must_use]
    pub fn month_total(&self, month: Month, kind: Option<TransactionKind>) -> Cents {
        self.by_month(month)
            .filter(|tx| kind.is_none_or(|kind| tx.kind == kind))
            .map(|tx| tx.amount)
            .sum()
    }

    /// Per-category sums for one month and kind.
    #[must_use]
    pub fn category_totals(&self, month: Month, kind: TransactionKind) -> BTreeMap<Category, Cents> {
        let mut totals = BTreeMap::new();
        for tx in self.by_month(month).filter(|tx| tx.kind == kind) {
            let entry = totals.entry(tx.category).or_insert(Cents::ZERO);
            *entry = *entry + tx.amount;
        }
        totals
    }

    /// Months that have at least one entry, in calendar order.
    #[must_use]
    pub fn months(&self) -> Vec<Month> {
        let mut months: Vec<Month> = Vec::new();
        for tx in &self.transactions {
            if !months.contains(&tx.date.month()) {
                months.push(tx.date.month());
            }
        }
        months.sort_by_key(Month::number_from_month);
        months
    }
}

type SeedRow = (Month, u8, &'static str, Category, u64, &'static str);

const SEED: &[SeedRow] = &[
    (Month::December, 10, "Starbucks", Category::Dining, 850, "fa-coffee"),
    (Month::December, 10, "Uber", Category::Transportation, 2430, "fa-car"),
    (Month::December, 9, "Amazon", Category::Shopping, 15678, "fa-cart-shopping"),
    (Month::December, 9, "Whole Foods", Category::Groceries, 8742, "fa-basket-shopping"),
    (Month::December, 9, "McDonalds", Category::Dining, 1245, "fa-burger"),
    (Month::December, 8, "Netflix", Category::Entertainment, 1599, "fa-tv"),
    (Month::December, 8, "Shell Gas", Category::Transportation, 5200, "fa-gas-pump"),
    (Month::December, 8, "Target", Category::Shopping, 4321, "fa-bag-shopping"),
    (Month::December, 7, "Chipotle", Category::Dining, 1325, "fa-bowl-food"),
    (Month::December, 7, "Safeway", Category::Groceries, 9567, "fa-basket-shopping"),
    (Month::December, 6, "Spotify", Category::Entertainment, 1099, "fa-music"),
    (Month::December, 6, "Chevron", Category::Transportation, 4820, "fa-gas-pump"),
    (Month::December, 5, "Olive Garden", Category::Dining, 5480, "fa-utensils"),
    (Month::December, 5, "Best Buy", Category::Shopping, 8999, "fa-desktop"),
    (Month::December, 4, "Subway", Category::Dining, 975, "fa-sandwich"),
    (Month::December, 4, "CVS Pharmacy", Category::Other, 3245, "fa-pills"),
    (Month::December, 3, "Lyft", Category::Transportation, 1850, "fa-car"),
    (Month::December, 3, "Walmart", Category::Groceries, 12356, "fa-cart-shopping"),
    (Month::December, 2, "Panda Express", Category::Dining, 1125, "fa-bowl-rice"),
    (Month::December, 2, "AMC Theater", Category::Entertainment, 3250, "fa-film"),
    (Month::December, 1, "In-N-Out", Category::Dining, 1560, "fa-burger"),
    (Month::December, 1, "Costco", Category::Groceries, 18734, "fa-warehouse"),
    (Month::December, 1, "Monthly Salary", Category::Salary, 500000, "fa-money-bill-wave"),
    (Month::December, 15, "Freelance Project", Category::Freelance, 120000, "fa-laptop-code"),
    (Month::November, 28, "Starbucks", Category::Dining, 750, "fa-coffee"),
    (Month::November, 25, "Target", Category::Shopping, 12450, "fa-bag-shopping"),
    (Month::November, 22, "Whole Foods", Category::Groceries, 9830, "fa-basket-shopping"),
    (Month::November, 20, "Shell Gas", Category::Transportation, 5500, "fa-gas-pump"),
    (Month::November, 15, "Netflix", Category::Entertainment, 1599, "fa-tv"),
    (Month::November, 10, "Chipotle", Category::Dining, 1475, "fa-bowl-food"),
    (Month::November, 1, "Monthly Salary", Category::Salary, 500000, "fa-money-bill-wave"),
    (Month::October, 25, "Amazon", Category::Shopping, 8999, "fa-cart-shopping"),
    (Month::October, 20, "Safeway", Category::Groceries, 10520, "fa-basket-shopping"),
    (Month::October, 15, "Uber", Category::Transportation, 3250, "fa-car"),
    (Month::October, 10, "Spotify", Category::Entertainment, 1099, "fa-music"),
    (Month::October, 5, "McDonalds", Category::Dining, 1125, "fa-burger"),
    (Month::October, 1, "Monthly Salary", Category::Salary, 500000, "fa-money-bill-wave"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> TxDate {
        raw.parse().expect("valid date")
    }

    #[test]
    fn seeded_ledger_has_three_months() {
        let ledger = Ledger::seeded();
        assert_eq!(ledger.len(), 37);
        assert_eq!(
            ledger.months(),
            vec![Month::October, Month::November, Month::December]
        );
        assert_eq!(ledger.get(0).map(|tx| tx.merchant.as_str()), Some("Starbucks"));
        assert!(ledger.transactions().iter().all(|tx| tx.check_kind().is_ok()));
    }

    #[test]
    fn month_totals() {
        let ledger = Ledger::seeded();
        assert_eq!(
            ledger.month_total(Month::December, Some(TransactionKind::Expense)),
            Cents::new(114_450)
        );
        assert_eq!(
            ledger.month_total(Month::December, Some(TransactionKind::Income)),
            Cents::new(620_000)
        );
        assert_eq!(ledger.month_total(Month::December, None), Cents::new(734_450));
        assert_eq!(ledger.month_total(Month::January, None), Cents::ZERO);
    }

    #[test]
    fn category_totals_for_december_expenses() {
        let totals = Ledger::seeded().category_totals(Month::December, TransactionKind::Expense);
        assert_eq!(totals.get(&Category::Dining), Some(&Cents::new(12_560)));
        assert_eq!(totals.get(&Category::Groceries), Some(&Cents::new(49_399)));
        assert_eq!(totals.get(&Category::Other), Some(&Cents::new(3_245)));
        assert_eq!(totals.get(&Category::Salary), None);
        assert_eq!(totals.values().copied().sum::<Cents>(), Cents::new(114_450));
    }

    #[test]
    fn add_prepends() {
        let mut ledger = Ledger::seeded();
        let tx = Transaction::new(date("Dec 11"), "Bakery", Category::Dining, Cents::new(625));
        ledger.add(tx.clone()).expect("valid kind");
        assert_eq!(ledger.get(0), Some(&tx));
        assert_eq!(ledger.len(), 38);
    }

    #[test]
    fn delete_and_update_check_index() {
        let mut ledger = Ledger::seeded();
        let removed = ledger.delete(1).expect("in range");
        assert_eq!(removed.merchant, "Uber");
        assert_eq!(ledger.get(1).map(|tx| tx.merchant.as_str()), Some("Amazon"));

        let replacement =
            Transaction::new(date("Dec 10"), "Blue Bottle", Category::Dining, Cents::new(600));
        let old = ledger.update(0, replacement).expect("in range");
        assert_eq!(old.merchant, "Starbucks");
        assert_eq!(ledger.get(0).map(|tx| tx.amount), Some(Cents::new(600)));

        assert_eq!(
            ledger.delete(99),
            Err(LedgerError::IndexOutOfRange { index: 99, len: 36 })
        );
        let len = ledger.len();
        assert!(ledger
            .update(len, Transaction::new(date("Dec 1"), "x", Category::Other, Cents::ZERO))
            .is_err());
    }

    #[test]
    fn by_kind_filters() {
        let ledger = Ledger::seeded();
        assert_eq!(ledger.by_kind(TransactionKind::Income).count(), 4);
        assert_eq!(ledger.by_month(Month::November).count(), 7);
    }
}
