#![forbid(unsafe_code)]

use std::io;
use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shoots_core::logging::{LogFormat, LoggingError, init_subscriber};
use tracing::debug;

use crate::config::{LogSettings, Settings};
use crate::currency::{CurrencyArgs, run_currency};
use crate::error::Result;
use crate::layout::{LayoutArgs, run_layout};
use crate::ledger::{LedgerCommand, run_ledger};
use crate::replay::{ReplayArgs, run_replay};

#[derive(Debug, Parser)]
#[command(
    name = "shoots",
    about = "Personal-finance dashboard engine: grid layout previews, gesture replay, and ledger reports",
    version
)]
pub struct Cli {
    /// TOML settings file (defaults to ./shoots.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log as JSON lines on stderr.
    #[arg(long = "log-json", global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the dashboard layout at a viewport width.
    Layout(LayoutArgs),

    /// Replay a JSON script of pointer and resize events.
    Replay(ReplayArgs),

    /// Transaction listings and month summaries.
    #[command(subcommand)]
    Ledger(LedgerCommand),

    /// Interpret keypad amount input.
    Currency(CurrencyArgs),
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    init_logging(&settings.log, cli.log_json)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    dispatch(&cli.command, &settings, &mut out)?;
    out.flush()?;
    Ok(())
}

pub fn dispatch(command: &Commands, settings: &Settings, out: &mut dyn Write) -> Result<()> {
    debug!(?command, "dispatching");
    match command {
        Commands::Layout(args) => run_layout(args, &settings.grid, out),
        Commands::Replay(args) => run_replay(args, &settings.grid, out),
        Commands::Ledger(command) => run_ledger(command, &settings.ledger, out),
        Commands::Currency(args) => run_currency(args, out),
    }
}

/// Install the subscriber once per process; later calls keep the first one.
fn init_logging(log: &LogSettings, force_json: bool) -> Result<()> {
    let format = if force_json {
        LogFormat::Json
    } else {
        log.format()?
    };
    match init_subscriber(log.filter.as_deref(), format) {
        Ok(()) | Err(LoggingError::AlreadyInstalled) => Ok(()),
        Err(err) => Err(err.into()),
    }
}
