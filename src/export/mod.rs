//! Export module for monthly-expenses
//!
//! Writes a transaction plan for review before it is submitted:
//! - CSV: one row per transaction and sub-transaction
//! - JSON: the plan together with the catalogs it came from

pub mod csv;
pub mod json;

pub use csv::export_plan_csv;
pub use json::{export_plan_json, PlanExport, EXPORT_SCHEMA_VERSION};

#[cfg(test)]
pub(crate) mod tests {
    use chrono::NaiveDate;

    use crate::config::Settings;
    use crate::models::{AccountId, BudgetId, CatalogPair, CategoryId, Money};
    use crate::services::bootstrap::offline_catalogs;
    use crate::services::splitter::split_with_bias;
    use crate::services::{TransactionBuilder, TransactionPlan};

    /// A two-category plan dated 2025-01-15
    pub(crate) fn sample() -> (TransactionPlan, CatalogPair) {
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let mut pair = offline_catalogs(["Condominium", "Water"], &Settings::default(), today);
        for catalog in [&mut pair.shared, &mut pair.individual] {
            catalog.budget_id = Some(BudgetId::new());
            catalog.account_id = Some(AccountId::new());
            for expense in catalog.expenses.values_mut() {
                expense.category_id = Some(CategoryId::new());
            }
        }
        if let Some(condo) = pair.shared.expenses.get_mut("Condominium") {
            condo.amount = Money::from_cents(24575);
        }
        if let Some(water) = pair.shared.expenses.get_mut("Water") {
            water.amount = Money::from_cents(6025);
        }
        pair.individual = split_with_bias(&pair.shared, &pair.individual, true).unwrap();

        let builder = TransactionBuilder::new(today, "Magui", "Jão", "Household Expenses");
        let plan = builder.build_plan(&pair).unwrap();
        (plan, pair)
    }
}
