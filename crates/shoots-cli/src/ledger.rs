#![forbid(unsafe_code)]

//! `shoots ledger`: transaction listings and month summaries.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use serde::Serialize;
use shoots_ledger::{
    BudgetLine, Cents, Ledger, Month, MonthSummary, SavingsProgress, SpendingComparison,
    Transaction, TransactionKind, abbrev,
};

use crate::config::LedgerSettings;
use crate::error::{Result, ShootsError};

#[derive(Debug, Clone, Subcommand)]
pub enum LedgerCommand {
    /// List transactions, newest first.
    List(ListArgs),
    /// Totals, category breakdown, and widget figures for one month.
    Summary(SummaryArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// JSON ledger file; the built-in demo data when absent.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Only this month (e.g. `Dec`).
    #[arg(long, value_parser = parse_month)]
    pub month: Option<Month>,

    /// Only `expense` or `income`.
    #[arg(long, value_parser = parse_kind)]
    pub kind: Option<TransactionKind>,
}

#[derive(Debug, Clone, Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long, value_parser = parse_month)]
    pub month: Month,
}

pub fn parse_month(raw: &str) -> std::result::Result<Month, String> {
    raw.parse::<Month>()
        .map_err(|_| format!("unknown month {raw:?} (try Dec or December)"))
}

pub fn parse_kind(raw: &str) -> std::result::Result<TransactionKind, String> {
    raw.parse::<TransactionKind>().map_err(|err| err.to_string())
}

pub fn load_ledger(file: Option<&Path>) -> Result<Ledger> {
    let Some(path) = file else {
        return Ok(Ledger::seeded());
    };
    let raw = std::fs::read_to_string(path).map_err(|source| ShootsError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let transactions: Vec<Transaction> = serde_json::from_str(&raw)?;
    Ok(Ledger::from_transactions(transactions)?)
}

pub fn run_ledger(
    command: &LedgerCommand,
    settings: &LedgerSettings,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        LedgerCommand::List(args) => run_list(args, out),
        LedgerCommand::Summary(args) => run_summary(args, settings, out),
    }
}

fn run_list(args: &ListArgs, out: &mut dyn Write) -> Result<()> {
    let ledger = load_ledger(args.source.file.as_deref())?;
    let selected: Vec<&Transaction> = ledger
        .transactions()
        .iter()
        .filter(|tx| args.month.is_none_or(|month| tx.date.month() == month))
        .filter(|tx| args.kind.is_none_or(|kind| tx.kind == kind))
        .collect();

    if args.source.json {
        serde_json::to_writer_pretty(&mut *out, &selected)?;
        writeln!(out)?;
        return Ok(());
    }
    for tx in &selected {
        writeln!(out, "{tx}")?;
    }
    let total: Cents = selected.iter().map(|tx| tx.amount).sum();
    writeln!(out, "count: {}, total: {total}", selected.len())?;
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct SummaryReport {
    #[serde(flatten)]
    pub month: MonthSummary,
    pub comparison: Option<SpendingComparison>,
    pub savings: Option<SavingsProgress>,
    pub budgets: Vec<BudgetLine>,
}

/// Month summary plus the widget figures the settings ask for.
pub fn summarize(ledger: &Ledger, month: Month, settings: &LedgerSettings) -> Result<SummaryReport> {
    let previous = month.pred();
    let comparison = ledger
        .months()
        .contains(&previous)
        .then(|| SpendingComparison::between(ledger, month, previous));
    let savings = settings.savings_goal.map(|goal| SavingsProgress {
        current: net_savings(ledger),
        goal,
    });
    Ok(SummaryReport {
        month: MonthSummary::for_month(ledger, month),
        comparison,
        savings,
        budgets: settings.budget_lines(ledger, month)?,
    })
}

/// Income minus expenses over the whole ledger, floored at zero.
fn net_savings(ledger: &Ledger) -> Cents {
    let income: Cents = ledger.by_kind(TransactionKind::Income).map(|tx| tx.amount).sum();
    let expenses: Cents = ledger.by_kind(TransactionKind::Expense).map(|tx| tx.amount).sum();
    Cents::new(income.get().saturating_sub(expenses.get()))
}

fn run_summary(args: &SummaryArgs, settings: &LedgerSettings, out: &mut dyn Write) -> Result<()> {
    let ledger = load_ledger(args.source.file.as_deref())?;
    let report = summarize(&ledger, args.month, settings)?;

    if args.source.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    let summary = &report.month;
    writeln!(out, "{}", summary.month)?;
    writeln!(out, "  income    {:>12}", summary.income.to_string())?;
    writeln!(out, "  expenses  {:>12}", summary.expenses.to_string())?;
    let net_sign = if summary.net < 0 { "-" } else { "" };
    let net = Cents::new(summary.net.unsigned_abs());
    writeln!(out, "  net       {:>12}", format!("{net_sign}{net}"))?;
    for share in &summary.categories {
        writeln!(
            out,
            "    {:<15} {:>10} {:>4}%",
            share.category.name(),
            share.amount.to_string(),
            share.percent
        )?;
    }
    if let Some(comparison) = &report.comparison {
        let direction = if comparison.decreased() { "down" } else { "up" };
        writeln!(out, "  spending {direction}: {}", comparison.describe())?;
    }
    if let Some(savings) = &report.savings {
        writeln!(
            out,
            "  savings   {} of {} goal ({}%)",
            savings.current,
            savings.goal,
            savings.percent()
        )?;
    }
    for line in &report.budgets {
        let flag = if line.is_over() { " over budget" } else { "" };
        writeln!(
            out,
            "  budget    {:<15} {} / {} ({}%){flag}",
            line.category.name(),
            line.spent,
            line.limit,
            line.percent()
        )?;
    }
    if summary.income == Cents::ZERO && summary.expenses == Cents::ZERO {
        writeln!(out, "  no transactions in {}", abbrev(args.month))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(command: LedgerCommand, settings: &LedgerSettings) -> String {
        let mut out = Vec::new();
        run_ledger(&command, settings, &mut out).expect("command runs");
        String::from_utf8(out).expect("utf8")
    }

    fn source() -> SourceArgs {
        SourceArgs {
            file: None,
            json: false,
        }
    }

    #[test]
    fn list_filters_by_month_and_kind() {
        let output = text(
            LedgerCommand::List(ListArgs {
                source: source(),
                month: Some(Month::November),
                kind: Some(TransactionKind::Income),
            }),
            &LedgerSettings::default(),
        );
        assert!(output.contains("Monthly Salary"), "{output}");
        assert!(output.ends_with("count: 1, total: $5000.00\n"), "{output}");
    }

    #[test]
    fn summary_compares_with_previous_month() {
        let report = summarize(&Ledger::seeded(), Month::December, &LedgerSettings::default())
            .expect("summary");
        let comparison = report.comparison.expect("november present");
        assert_eq!(comparison.last_month, Cents::new(31_604));
        assert!(report.savings.is_none());

        let october = summarize(&Ledger::seeded(), Month::October, &LedgerSettings::default())
            .expect("summary");
        assert!(october.comparison.is_none());
    }

    #[test]
    fn summary_text_includes_widgets() {
        let mut settings = LedgerSettings {
            savings_goal: Some(Cents::new(2_000_000)),
            ..LedgerSettings::default()
        };
        settings.budgets.insert("Dining".to_string(), Cents::new(10_000));
        let output = text(
            LedgerCommand::Summary(SummaryArgs {
                source: source(),
                month: Month::December,
            }),
            &settings,
        );
        assert!(output.starts_with("Dec\n"), "{output}");
        assert!(output.contains("spending up: $828.46 vs last month"), "{output}");
        assert!(output.contains("over budget"), "{output}");
        assert!(output.contains("of $20000.00 goal"), "{output}");
    }

    #[test]
    fn month_and_kind_parsers() {
        assert_eq!(parse_month("dec"), Ok(Month::December));
        assert!(parse_month("Smarch").is_err());
        assert_eq!(parse_kind("income"), Ok(TransactionKind::Income));
        assert!(parse_kind("refund").is_err());
    }
}
