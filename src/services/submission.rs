//! Combined ledger submission
//!
//! Posts the shared-account batch and the individual-account transaction.
//! Both calls are always attempted; a failure of the first does not stop
//! the second, and nothing already created is rolled back.

use tracing::{info, warn};

use super::builder::{TransactionBuilder, TransactionPlan};
use crate::error::{ExpensesError, ExpensesResult};
use crate::ledger::LedgerService;
use crate::models::CatalogPair;

/// Outcome of the two ledger calls
#[derive(Debug, Default)]
pub struct SubmissionReport {
    pub shared_created: usize,
    pub individual_created: bool,
    pub failures: Vec<ExpensesError>,
}

impl SubmissionReport {
    /// True only if both calls succeeded
    pub fn succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Check both catalogs before anything is sent
pub fn ensure_submittable(pair: &CatalogPair) -> ExpensesResult<()> {
    pair.shared
        .validate()
        .map_err(|e| ExpensesError::Validation(format!("Shared catalog: {}", e)))?;
    pair.individual
        .validate()
        .map_err(|e| ExpensesError::Validation(format!("Individual catalog: {}", e)))?;
    for (side, catalog) in [("Shared", &pair.shared), ("Individual", &pair.individual)] {
        if catalog.checked_total().is_none() {
            return Err(ExpensesError::Validation(format!(
                "{} catalog: total is out of range",
                side
            )));
        }
    }
    Ok(())
}

/// Send an already built plan
pub fn submit_plan<L: LedgerService>(plan: &TransactionPlan, ledger: &L) -> SubmissionReport {
    let mut report = SubmissionReport::default();

    match ledger.create_transactions(plan.shared_budget_id, &plan.shared) {
        Ok(created) => {
            info!(count = created.len(), "created shared transactions");
            report.shared_created = created.len();
        }
        Err(e) => {
            warn!(error = %e, "shared transactions were not created");
            report.failures.push(e);
        }
    }

    match ledger.create_transaction(plan.individual_budget_id, &plan.individual) {
        Ok(created) => {
            info!(id = %created.id, "created individual transaction");
            report.individual_created = true;
        }
        Err(e) => {
            warn!(error = %e, "individual transaction was not created");
            report.failures.push(e);
        }
    }

    report
}

/// Validate, build and send everything for one month
///
/// Validation problems are returned as errors before any call is made.
/// Ledger failures are reported in the returned `SubmissionReport`.
pub fn submit<L: LedgerService>(
    pair: &CatalogPair,
    ledger: &L,
    builder: &TransactionBuilder,
) -> ExpensesResult<SubmissionReport> {
    ensure_submittable(pair)?;
    let plan = builder.build_plan(pair)?;
    Ok(submit_plan(&plan, ledger))
}
