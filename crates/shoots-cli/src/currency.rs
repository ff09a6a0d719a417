#![forbid(unsafe_code)]

//! `shoots currency`: what the keypad amount field makes of some input.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use shoots_ledger::{Cents, CurrencyInput};

use crate::error::Result;

#[derive(Debug, Clone, Args)]
pub struct CurrencyArgs {
    /// Raw keypad text, e.g. `1299` or `$12.99`.
    pub raw: String,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CurrencyReport {
    pub digits: String,
    pub cents: Cents,
    /// Text the field shows; empty for no amount.
    pub field: String,
    pub display: String,
}

pub fn evaluate(raw: &str) -> Result<CurrencyReport> {
    let mut field = CurrencyInput::new();
    let cents = field.set(raw)?;
    Ok(CurrencyReport {
        digits: field.raw().to_string(),
        cents,
        field: field.display(),
        display: cents.display(),
    })
}

pub fn run_currency(args: &CurrencyArgs, out: &mut dyn Write) -> Result<()> {
    let report = evaluate(&args.raw)?;
    if args.json {
        serde_json::to_writer(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{} ({} cents)", report.display, report.cents.get())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShootsError;

    #[test]
    fn strips_and_formats() {
        let report = evaluate("$12.99").expect("valid");
        assert_eq!(report.digits, "1299");
        assert_eq!(report.cents, Cents::new(1299));
        assert_eq!(report.field, "12.99");
        assert_eq!(report.display, "$12.99");
    }

    #[test]
    fn empty_input_is_zero_with_blank_field() {
        let report = evaluate("").expect("valid");
        assert_eq!(report.cents, Cents::ZERO);
        assert_eq!(report.field, "");
        assert_eq!(report.display, "$0.00");
    }

    #[test]
    fn nine_digits_rejected() {
        let err = evaluate("123456789").unwrap_err();
        assert!(matches!(err, ShootsError::Currency(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn text_output() {
        let mut out = Vec::new();
        run_currency(
            &CurrencyArgs {
                raw: "500000".to_string(),
                json: false,
            },
            &mut out,
        )
        .expect("runs");
        assert_eq!(String::from_utf8(out).expect("utf8"), "$5000.00 (500000 cents)\n");
    }
}
