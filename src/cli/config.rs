//! Config command

use crate::config::{ExpensesPaths, Settings};
use crate::error::ExpensesResult;

/// Show paths and settings, with the access token hidden
pub fn handle_config_command(paths: &ExpensesPaths, settings: &Settings) -> ExpensesResult<()> {
    println!("Configuration directory: {}", paths.base_dir().display());
    println!("Settings file:           {}", paths.settings_file().display());
    println!("Exports directory:       {}", paths.export_dir().display());
    println!(
        "Settings file present:   {}",
        if paths.is_initialized() { "yes" } else { "no (using defaults)" }
    );
    println!();
    println!("{}", serde_json::to_string_pretty(&settings.redacted())?);
    Ok(())
}
