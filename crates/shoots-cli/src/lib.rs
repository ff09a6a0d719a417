#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod currency;
pub mod error;
pub mod layout;
pub mod ledger;
pub mod replay;

pub use cli::run_from_env;
pub use error::{Result, ShootsError};
