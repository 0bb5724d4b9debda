//! Shared-amount arguments
//!
//! Amounts come from repeated `--amount NAME=AMOUNT` flags or from a JSON
//! or CSV file given with `--input`.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;

use crate::error::{ExpensesError, ExpensesResult};
use crate::services::input::{amounts_from_csv, amounts_from_pairs, catalog_from_value, AmountTable};

/// Where the shared amounts come from
#[derive(Args, Debug, Clone, Default)]
pub struct AmountArgs {
    /// Shared amount for one category (repeatable)
    #[arg(short, long = "amount", value_name = "NAME=AMOUNT")]
    pub amounts: Vec<String>,

    /// JSON catalog or CSV `category,amount` file with the shared amounts
    #[arg(short, long, value_name = "FILE", conflicts_with = "amounts")]
    pub input: Option<PathBuf>,

    /// Seed for the initial rounding coin toss
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Shared amounts as given on the command line
#[derive(Debug, Clone)]
pub enum SharedInput {
    /// A loosely-typed catalog payload
    Payload(Value),
    /// Amounts by category name
    Amounts(AmountTable),
}

impl SharedInput {
    /// Just the amounts, by category name
    pub fn amounts(&self) -> ExpensesResult<AmountTable> {
        match self {
            SharedInput::Amounts(amounts) => Ok(amounts.clone()),
            SharedInput::Payload(payload) => Ok(catalog_from_value(payload)?
                .expenses
                .into_iter()
                .map(|(name, expense)| (name, expense.amount))
                .collect()),
        }
    }
}

impl AmountArgs {
    /// Read the shared amounts
    pub fn load(&self) -> ExpensesResult<SharedInput> {
        let Some(path) = &self.input else {
            if self.amounts.is_empty() {
                return Err(ExpensesError::Validation(
                    "Give shared amounts with --amount NAME=AMOUNT or --input FILE".into(),
                ));
            }
            return Ok(SharedInput::Amounts(amounts_from_pairs(&self.amounts)?));
        };

        let text = fs::read_to_string(path)
            .map_err(|e| ExpensesError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or_else(|| text.trim_start().starts_with('{'));
        if is_json {
            Ok(SharedInput::Payload(serde_json::from_str(&text)?))
        } else {
            Ok(SharedInput::Amounts(amounts_from_csv(text.as_bytes())?))
        }
    }

    /// The coin-toss source: seeded if asked, otherwise from entropy
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
