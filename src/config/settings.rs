//! User settings for monthly-expenses
//!
//! Where the ledger lives, how budgets, accounts and categories are found by
//! name, and the labels written on the generated transactions. Every field
//! has a default, so a partial settings file is fine.

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::paths::ExpensesPaths;
use crate::error::ExpensesError;
use crate::services::splitter::DEFAULT_ROUND_UP_PROBABILITY;

/// Default ledger API root
pub const DEFAULT_BASE_URL: &str = "https://api.ynab.com/v1";

/// User settings for monthly-expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Schema version for migration support
    pub schema_version: u32,

    /// Ledger API root
    pub base_url: String,

    /// Personal access token; prefer the environment for this
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Fragment identifying the shared budget by name
    pub shared_budget: String,

    /// Fragment identifying the individual budget by name
    pub individual_budget: String,

    /// Exact name of the shared account
    pub shared_account: String,

    /// Exact name of the individual account
    pub individual_account: String,

    /// Fragment identifying the monthly expense category group
    pub category_group: String,

    /// Categories whose name contains any of these are skipped
    pub excluded_categories: Vec<String>,

    /// Transfer label for this party's aggregate share
    pub my_label: String,

    /// Transfer label for the other party's aggregate share
    pub other_label: String,

    /// Transfer label on the individual budget's outflow
    pub individual_transfer_label: String,

    /// Suffix of the "<Month> <Year> - ..." memo
    pub household_memo_suffix: String,

    /// Probability that the first odd-cent category rounds up
    pub round_up_probability: f64,

    /// Currency symbol used in terminal output
    pub currency_symbol: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: 1,
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: None,
            shared_budget: "Casa Reis-Pereira".to_string(),
            individual_budget: "Magui".to_string(),
            shared_account: "Millennium bcp".to_string(),
            individual_account: "CGD".to_string(),
            category_group: "Obligatory Monthly Expenses".to_string(),
            excluded_categories: vec!["Bank Fees".to_string()],
            my_label: "Magui".to_string(),
            other_label: "Jão".to_string(),
            individual_transfer_label: "Household".to_string(),
            household_memo_suffix: "Household Expenses".to_string(),
            round_up_probability: DEFAULT_ROUND_UP_PROBABILITY,
            currency_symbol: "€".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &ExpensesPaths) -> Result<Self, ExpensesError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| ExpensesError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| ExpensesError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensesPaths) -> Result<(), ExpensesError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ExpensesError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ExpensesError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Pick the access token: an explicit value first, then the settings file
    ///
    /// Blank values count as missing.
    pub fn resolve_token(&self, explicit: Option<&str>) -> Option<Zeroizing<String>> {
        let non_blank = |token: &str| {
            let token = token.trim();
            (!token.is_empty()).then(|| token.to_string())
        };
        explicit
            .and_then(non_blank)
            .or_else(|| self.access_token.as_deref().and_then(non_blank))
            .map(Zeroizing::new)
    }

    /// Settings with the token removed, for display
    pub fn redacted(&self) -> Self {
        Self {
            access_token: self.access_token.as_ref().map(|_| "********".to_string()),
            ..self.clone()
        }
    }
}
