//! JSON export of a transaction plan

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{ExpensesError, ExpensesResult};
use crate::models::{CatalogPair, Money};
use crate::services::TransactionPlan;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// A plan with the catalogs it was built from
#[derive(Debug, Serialize)]
pub struct PlanExport<'a> {
    pub schema_version: &'static str,
    pub exported_at: DateTime<Utc>,
    pub app_version: &'static str,
    pub shared_total: Money,
    pub individual_total: Money,
    pub catalogs: &'a CatalogPair,
    pub plan: &'a TransactionPlan,
}

impl<'a> PlanExport<'a> {
    pub fn new(plan: &'a TransactionPlan, pair: &'a CatalogPair) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            shared_total: pair.shared.total(),
            individual_total: pair.individual.total(),
            catalogs: pair,
            plan,
        }
    }
}

/// Write a plan as JSON
pub fn export_plan_json<W: Write>(
    plan: &TransactionPlan,
    pair: &CatalogPair,
    writer: W,
    pretty: bool,
) -> ExpensesResult<()> {
    let export = PlanExport::new(plan, pair);
    let result = if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    };
    result.map_err(|e| ExpensesError::Export(e.to_string()))
}
