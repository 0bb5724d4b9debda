//! Offline split command

use chrono::NaiveDate;

use super::input::AmountArgs;
use crate::config::Settings;
use crate::display::format_split;
use crate::error::ExpensesResult;
use crate::services::bootstrap::offline_catalogs;
use crate::services::input::apply_amounts;
use crate::services::FairSplitter;

/// Split shared amounts without contacting the ledger
pub fn handle_split_command(
    settings: &Settings,
    args: &AmountArgs,
    today: NaiveDate,
) -> ExpensesResult<()> {
    let amounts = args.load()?.amounts()?;
    let pair = offline_catalogs(amounts.keys().map(String::as_str), settings, today);
    let shared = apply_amounts(&pair.shared, &amounts)?;

    let splitter = FairSplitter::new(settings.round_up_probability);
    let individual = splitter.split(&shared, &pair.individual, &mut args.rng())?;

    print!(
        "{}",
        format_split(
            &shared,
            &individual,
            &settings.my_label,
            &settings.other_label,
            &settings.currency_symbol
        )
    );
    Ok(())
}
