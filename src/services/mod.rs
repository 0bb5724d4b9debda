//! Service layer for monthly-expenses
//!
//! Splitting, transaction construction and submission on top of the models
//! and the ledger seam.

pub mod bootstrap;
pub mod builder;
pub mod input;
pub mod manager;
pub mod memo;
pub mod splitter;
pub mod submission;

pub use builder::{TransactionBuilder, TransactionPlan};
pub use manager::ExpensesManager;
pub use splitter::FairSplitter;
pub use submission::SubmissionReport;
