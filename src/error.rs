//! Custom error types for monthly-expenses
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for monthly-expenses operations
#[derive(Error, Debug)]
pub enum ExpensesError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A catalog or an input payload failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// The shared and individual catalogs disagree on their category keys
    #[error("Category '{category}' is missing from the {catalog} catalog")]
    Precondition {
        category: String,
        catalog: &'static str,
    },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The ledger could not be reached, or its response could not be read
    #[error("Transport error: {0}")]
    Transport(String),

    /// The ledger answered with a non-success status
    #[error("Ledger service error (HTTP {status}): {body}")]
    Service { status: u16, body: String },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl ExpensesError {
    /// Create a lookup-miss error for a category absent from one side of a pair
    pub fn category_missing(category: impl Into<String>, catalog: &'static str) -> Self {
        Self::Precondition {
            category: category.into(),
            catalog,
        }
    }

    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from a call to the ledger service
    pub fn is_ledger_failure(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Service { .. })
    }
}

impl From<std::io::Error> for ExpensesError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpensesError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for ExpensesError {
    fn from(err: csv::Error) -> Self {
        Self::Validation(format!("CSV input: {}", err))
    }
}

impl From<rust_decimal::Error> for ExpensesError {
    fn from(err: rust_decimal::Error) -> Self {
        Self::Validation(format!("Invalid decimal amount: {}", err))
    }
}

impl From<reqwest::Error> for ExpensesError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Result type alias for monthly-expenses operations
pub type ExpensesResult<T> = Result<T, ExpensesError>;
