//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod config;
pub mod input;
pub mod ledger;
pub mod split;

use chrono::NaiveDate;
use clap::{Args, ValueEnum};

pub use config::handle_config_command;
pub use input::{AmountArgs, SharedInput};
pub use ledger::{
    connect, handle_categories_command, handle_plan_command, handle_status_command,
    handle_submit_command, PlanArgs,
};
pub use split::handle_split_command;

/// Options for commands that talk to the ledger
#[derive(Args, Debug, Clone, Default)]
pub struct LedgerArgs {
    /// Personal access token
    #[arg(long, env = "YNAB_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Date written on the transactions (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

impl LedgerArgs {
    /// The explicit date, or today's local date
    pub fn today(&self) -> NaiveDate {
        resolve_date(self.date)
    }
}

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// JSON document with the plan and both catalogs
    Json,
    /// CSV, one row per transaction and sub-transaction
    Csv,
}

/// An explicit date or today's local date
pub fn resolve_date(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| chrono::Local::now().date_naive())
}
