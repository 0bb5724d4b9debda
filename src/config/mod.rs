//! Configuration module for monthly-expenses
//!
//! Path resolution and the persisted user settings.

pub mod paths;
pub mod settings;

pub use paths::ExpensesPaths;
pub use settings::Settings;
