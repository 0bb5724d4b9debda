//! monthly-expenses - split shared household expenses and post them to YNAB
//!
//! Each shared monthly expense is split in half between two parties. Odd
//! cents alternate between rounding up and down so neither side keeps
//! absorbing them. The result is posted to a shared budget (one outflow per
//! expense plus an aggregate transfer per party) and to an individual budget
//! (one split transaction with this party's share).
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Money, expense catalogs and the ledger's data shapes
//! - `ledger`: The ledger service trait and its YNAB HTTP client
//! - `services`: Splitting, transaction building, submission and bootstrap
//! - `display`: Plain-text rendering of splits and plans
//! - `export`: CSV and JSON export of a transaction plan
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use monthly_expenses::config::{ExpensesPaths, Settings};
//! use monthly_expenses::ledger::YnabClient;
//! use monthly_expenses::services::ExpensesManager;
//!
//! let paths = ExpensesPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let client = YnabClient::new(&settings.base_url, token)?;
//! let mut manager = ExpensesManager::bootstrap(client, settings, today)?;
//! manager.accept_amounts(&amounts, &mut rand::thread_rng())?;
//! manager.submit();
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ledger;
pub mod models;
pub mod services;

pub use error::{ExpensesError, ExpensesResult};
pub use models::{CatalogPair, Expense, ExpenseCatalog, Money};
pub use services::{ExpensesManager, FairSplitter};
