//! Monthly expenses workflow
//!
//! `ExpensesManager` owns the catalog pair for one run: it is bootstrapped
//! from the ledger, receives the shared amounts, splits them and submits the
//! resulting transactions.

use chrono::NaiveDate;
use rand::Rng;
use serde_json::Value;
use tracing::{info, warn};

use super::bootstrap::bootstrap_catalogs;
use super::builder::{TransactionBuilder, TransactionPlan};
use super::input::{apply_amounts, catalog_from_value, AmountTable};
use super::splitter::FairSplitter;
use super::submission::{ensure_submittable, submit_plan, SubmissionReport};
use crate::config::Settings;
use crate::error::ExpensesResult;
use crate::ledger::LedgerService;
use crate::models::{CatalogPair, ExpenseCatalog};

/// Drives one month's split and submission against a ledger
pub struct ExpensesManager<L: LedgerService> {
    ledger: L,
    settings: Settings,
    today: NaiveDate,
    pair: CatalogPair,
    splitter: FairSplitter,
}

impl<L: LedgerService> ExpensesManager<L> {
    /// Locate budgets, accounts and categories and build both catalogs
    pub fn bootstrap(ledger: L, settings: Settings, today: NaiveDate) -> ExpensesResult<Self> {
        let pair = bootstrap_catalogs(&ledger, &settings, today)?;
        Ok(Self::with_pair(ledger, settings, today, pair))
    }

    /// Start from catalogs that are already known
    pub fn with_pair(ledger: L, settings: Settings, today: NaiveDate, pair: CatalogPair) -> Self {
        let splitter = FairSplitter::new(settings.round_up_probability);
        Self {
            ledger,
            settings,
            today,
            pair,
            splitter,
        }
    }

    /// True when both catalogs can be submitted
    pub fn is_ready(&self) -> bool {
        self.pair.is_valid()
    }

    pub fn shared_catalog(&self) -> &ExpenseCatalog {
        &self.pair.shared
    }

    pub fn individual_catalog(&self) -> &ExpenseCatalog {
        &self.pair.individual
    }

    pub fn pair(&self) -> &CatalogPair {
        &self.pair
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Accept a loosely-typed shared catalog and split it
    ///
    /// Ids, payees and memos missing from the payload are taken from the
    /// bootstrapped shared catalog. Returns the new individual catalog.
    pub fn accept_shared_input<R: Rng>(
        &mut self,
        payload: &Value,
        rng: &mut R,
    ) -> ExpensesResult<&ExpenseCatalog> {
        let incoming = catalog_from_value(payload)?;
        let shared = fill_from(&self.pair.shared, incoming);
        self.split(shared, rng)
    }

    /// Set the shared amounts by category name and split them
    pub fn accept_amounts<R: Rng>(
        &mut self,
        amounts: &AmountTable,
        rng: &mut R,
    ) -> ExpensesResult<&ExpenseCatalog> {
        let shared = apply_amounts(&self.pair.shared, amounts)?;
        self.split(shared, rng)
    }

    fn split<R: Rng>(&mut self, shared: ExpenseCatalog, rng: &mut R) -> ExpensesResult<&ExpenseCatalog> {
        let individual = self.splitter.split(&shared, &self.pair.individual, rng)?;
        info!(
            shared_total = %shared.total(),
            individual_total = %individual.total(),
            "split shared expenses"
        );
        self.pair = CatalogPair::new(shared, individual);
        Ok(&self.pair.individual)
    }

    pub fn builder(&self) -> TransactionBuilder {
        TransactionBuilder::from_settings(&self.settings, self.today)
    }

    /// Every transaction a submission would post
    pub fn plan(&self) -> ExpensesResult<TransactionPlan> {
        ensure_submittable(&self.pair)?;
        self.builder().build_plan(&self.pair)
    }

    /// Submit and report what each ledger call did
    pub fn submit_with_report(&self) -> ExpensesResult<SubmissionReport> {
        let plan = self.plan()?;
        Ok(submit_plan(&plan, &self.ledger))
    }

    /// Submit, reporting only overall success
    pub fn submit(&self) -> bool {
        match self.submit_with_report() {
            Ok(report) => report.succeeded(),
            Err(e) => {
                warn!(error = %e, "nothing was submitted");
                false
            }
        }
    }
}

/// Fill metadata missing from `incoming` with what `known` has for the same names
fn fill_from(known: &ExpenseCatalog, mut incoming: ExpenseCatalog) -> ExpenseCatalog {
    incoming.budget_id = incoming.budget_id.or(known.budget_id);
    incoming.account_id = incoming.account_id.or(known.account_id);

    for (name, expense) in incoming.expenses.iter_mut() {
        if let Some(template) = known.get(name) {
            expense.category_id = expense.category_id.or(template.category_id);
            if expense.payee_name.is_none() {
                expense.payee_name = template.payee_name.clone();
            }
            if expense.memo.is_none() {
                expense.memo = template.memo.clone();
            }
        }
    }
    incoming
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::fake::{FakeLedger, LedgerCall};
    use crate::models::Money;
    use crate::services::input::amounts_from_pairs;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn always_up() -> Settings {
        Settings {
            round_up_probability: 1.0,
            ..Settings::default()
        }
    }

    fn manager(ledger: &FakeLedger) -> ExpensesManager<&FakeLedger> {
        ExpensesManager::bootstrap(ledger, always_up(), today()).unwrap()
    }

    fn reference_payload() -> Value {
        json!({
            "expenses": {
                "Condominium": {"amount": "245.75"},
                "Electricity": {"amount": "130.52"},
                "TV / Internet / Phone": {"amount": 85.90},
                "Water": {"amount": "60.25"}
            }
        })
    }

    #[test]
    fn test_ready_after_bootstrap() {
        let ledger = FakeLedger::household();
        let manager = manager(&ledger);
        assert!(manager.is_ready());
        assert_eq!(manager.shared_catalog().len(), 4);
    }

    #[test]
    fn test_accept_shared_input_splits() {
        let ledger = FakeLedger::household();
        let mut manager = manager(&ledger);
        let mut rng = StdRng::seed_from_u64(1);

        let individual = manager
            .accept_shared_input(&reference_payload(), &mut rng)
            .unwrap();
        assert_eq!(
            individual.get("Condominium").unwrap().amount,
            Money::new(dec!(122.88))
        );
        assert_eq!(individual.get("Water").unwrap().amount, Money::new(dec!(30.12)));

        // metadata the payload left out comes from the bootstrapped catalog
        let shared = manager.shared_catalog();
        assert!(shared.budget_id.is_some());
        assert_eq!(shared.get("Water").unwrap().payee_name.as_deref(), Some("EPAL"));
        assert!(manager.is_ready());
    }

    #[test]
    fn test_accept_amounts() {
        let ledger = FakeLedger::household();
        let mut manager = manager(&ledger);
        let amounts = amounts_from_pairs(&[
            "Condominium=245.75",
            "Electricity=130.52",
            "TV / Internet / Phone=85.90",
            "Water=60.25",
        ])
        .unwrap();

        manager
            .accept_amounts(&amounts, &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(
            manager.individual_catalog().total(),
            Money::new(dec!(261.21))
        );
    }

    #[test]
    fn test_submit_posts_both_calls() {
        let ledger = FakeLedger::household();
        let mut manager = manager(&ledger);
        manager
            .accept_shared_input(&reference_payload(), &mut StdRng::seed_from_u64(1))
            .unwrap();

        assert!(manager.submit());
        let creates: Vec<LedgerCall> = ledger
            .calls()
            .into_iter()
            .filter(|call| {
                matches!(
                    call,
                    LedgerCall::CreateTransaction(..) | LedgerCall::CreateTransactions(..)
                )
            })
            .collect();
        assert_eq!(creates.len(), 2);
    }

    #[test]
    fn test_submit_fails_when_a_call_fails() {
        let ledger = FakeLedger::household().failing_single();
        let mut manager = manager(&ledger);
        manager
            .accept_shared_input(&reference_payload(), &mut StdRng::seed_from_u64(1))
            .unwrap();

        assert!(!manager.submit());
    }

    #[test]
    fn test_not_ready_blocks_submission() {
        let ledger = FakeLedger::household();
        let settings = Settings {
            individual_account: "Missing".into(),
            ..always_up()
        };
        let manager = ExpensesManager::bootstrap(&ledger, settings, today()).unwrap();
        let listed = ledger.calls().len();

        assert!(!manager.is_ready());
        assert!(manager.plan().unwrap_err().is_validation());
        assert!(!manager.submit());
        assert_eq!(ledger.calls().len(), listed);
    }

    #[test]
    fn test_plan_uses_settings_labels() {
        let ledger = FakeLedger::household();
        let mut manager = manager(&ledger);
        manager
            .accept_shared_input(&reference_payload(), &mut StdRng::seed_from_u64(1))
            .unwrap();

        let plan = manager.plan().unwrap();
        let payees: Vec<&str> = plan.shared[4..]
            .iter()
            .filter_map(|txn| txn.payee_name.as_deref())
            .collect();
        assert_eq!(payees, ["Transfer: Magui", "Transfer: Jão"]);
        assert_eq!(
            plan.individual.payee_name.as_deref(),
            Some("Transfer: Household")
        );
    }
}
