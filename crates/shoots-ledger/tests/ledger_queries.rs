//! Ledger behaviour through the public API.

use proptest::prelude::*;
use shoots_ledger::{
    Category, Cents, Ledger, LedgerError, Month, MonthSummary, Transaction, TransactionKind, TxDate,
};

fn arb_transaction() -> impl Strategy<Value = Transaction> {
    let categories: Vec<Category> = Category::EXPENSE
        .iter()
        .chain(Category::INCOME.iter())
        .copied()
        .collect();
    (
        prop::sample::select(vec![Month::October, Month::November, Month::December]),
        1u8..=28,
        prop::sample::select(categories),
        0u64..1_000_000,
    )
        .prop_map(|(month, day, category, cents)| {
            let date = TxDate::new(month, day).expect("day within every month");
            Transaction::new(date, "Merchant", category, Cents::new(cents))
        })
}

proptest! {
    #[test]
    fn kind_totals_add_up_to_month_total(txs in prop::collection::vec(arb_transaction(), 0..40)) {
        let ledger = Ledger::from_transactions(txs).expect("kinds follow categories");
        for month in [Month::October, Month::November, Month::December] {
            let all = ledger.month_total(month, None);
            let split = ledger.month_total(month, Some(TransactionKind::Expense))
                + ledger.month_total(month, Some(TransactionKind::Income));
            prop_assert_eq!(all, split);

            let by_category: Cents = ledger
                .category_totals(month, TransactionKind::Expense)
                .values()
                .sum();
            prop_assert_eq!(by_category, ledger.month_total(month, Some(TransactionKind::Expense)));
        }
    }

    #[test]
    fn add_then_delete_front_is_identity(
        txs in prop::collection::vec(arb_transaction(), 0..10),
        extra in arb_transaction(),
    ) {
        let original = Ledger::from_transactions(txs).expect("valid");
        let mut ledger = original.clone();
        ledger.add(extra.clone()).expect("valid");
        prop_assert_eq!(ledger.delete(0), Ok(extra));
        prop_assert_eq!(ledger, original);
    }
}

#[test]
fn inconsistent_kind_rejected_on_load() {
    let date = "Dec 1".parse().expect("valid");
    let mut tx = Transaction::new(date, "Paycheck", Category::Salary, Cents::new(100));
    tx.kind = TransactionKind::Expense;
    assert!(matches!(
        Ledger::from_transactions(vec![tx]),
        Err(LedgerError::KindMismatch { .. })
    ));
}

#[test]
fn ledger_json_round_trip() {
    let ledger = Ledger::seeded();
    let json = serde_json::to_string(&ledger).expect("json");
    let back: Ledger = serde_json::from_str(&json).expect("parse");
    assert_eq!(back, ledger);
}

#[test]
fn november_summary_has_no_other_category() {
    let summary = MonthSummary::for_month(&Ledger::seeded(), Month::November);
    assert_eq!(summary.income, Cents::new(500_000));
    assert_eq!(summary.expenses, Cents::new(31_604));
    assert!(summary.categories.iter().all(|share| share.category != Category::Other));
}
