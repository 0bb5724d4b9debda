//! In-memory ledger for tests

use std::cell::RefCell;

use super::LedgerService;
use crate::error::{ExpensesError, ExpensesResult};
use crate::models::{
    Account, AccountId, BudgetId, BudgetSummary, Category, CategoryGroup, CategoryGroupId,
    CategoryId, ClearedStatus, TransactionDetail, TransactionRequest,
};

/// A call the fake ledger received
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerCall {
    ListBudgets,
    ListCategories(BudgetId),
    CreateTransaction(BudgetId, TransactionRequest),
    CreateTransactions(BudgetId, Vec<TransactionRequest>),
}

/// Serves fixed budgets and categories and records every call
#[derive(Debug, Default)]
pub struct FakeLedger {
    pub budgets: Vec<BudgetSummary>,
    pub category_groups: Vec<(BudgetId, CategoryGroup)>,
    pub fail_single: bool,
    pub fail_batch: bool,
    pub fail_listing: bool,
    calls: RefCell<Vec<LedgerCall>>,
}

impl FakeLedger {
    /// A ledger laid out like the default settings expect
    pub fn household() -> Self {
        let shared = budget("Casa Reis-Pereira", &["Millennium bcp", "Savings"]);
        let individual = budget("Magui", &["CGD"]);

        let group = |names: &[&str]| CategoryGroup {
            id: CategoryGroupId::new(),
            name: "🏠 Obligatory Monthly Expenses".into(),
            hidden: false,
            deleted: false,
            categories: names.iter().map(|name| category(name, false)).collect(),
        };
        let mut shared_group = group(&[
            "🏢 Condominium",
            "⚡ Electricity",
            "📺 TV / Internet / Phone",
            "💧 Water",
            "🏦 Bank Fees",
        ]);
        shared_group.categories.push(category("Old Gas", true));
        let individual_group = group(&["Condominium", "Electricity", "TV / Internet / Phone", "Water"]);

        Self {
            category_groups: vec![(shared.id, shared_group), (individual.id, individual_group)],
            budgets: vec![shared, individual],
            ..Self::default()
        }
    }

    pub fn failing_single(mut self) -> Self {
        self.fail_single = true;
        self
    }

    pub fn failing_batch(mut self) -> Self {
        self.fail_batch = true;
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn calls(&self) -> Vec<LedgerCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: LedgerCall) {
        self.calls.borrow_mut().push(call);
    }
}

fn budget(name: &str, accounts: &[&str]) -> BudgetSummary {
    BudgetSummary {
        id: BudgetId::new(),
        name: name.into(),
        accounts: accounts
            .iter()
            .map(|account| Account {
                id: AccountId::new(),
                name: account.to_string(),
                account_type: "checking".into(),
                on_budget: true,
                closed: false,
                deleted: false,
            })
            .collect(),
    }
}

fn category(name: &str, hidden: bool) -> Category {
    Category {
        id: CategoryId::new(),
        name: name.into(),
        category_group_id: None,
        hidden,
        deleted: false,
    }
}

fn detail(request: &TransactionRequest) -> TransactionDetail {
    TransactionDetail {
        id: uuid::Uuid::new_v4().to_string(),
        date: request.date,
        amount: request.amount,
        memo: request.memo.clone(),
        cleared: ClearedStatus::Uncleared,
        approved: false,
        account_id: request.account_id,
        account_name: None,
        payee_name: request.payee_name.clone(),
        category_id: request.category_id,
        category_name: None,
        subtransactions: Vec::new(),
        deleted: false,
    }
}

fn rejected() -> ExpensesError {
    ExpensesError::Service {
        status: 400,
        body: r#"{"error":{"id":"400","name":"bad_request"}}"#.into(),
    }
}

impl LedgerService for FakeLedger {
    fn list_budgets(&self, _include_accounts: bool) -> ExpensesResult<Vec<BudgetSummary>> {
        self.record(LedgerCall::ListBudgets);
        if self.fail_listing {
            return Err(ExpensesError::Transport("connection refused".into()));
        }
        Ok(self.budgets.clone())
    }

    fn list_categories(&self, budget_id: BudgetId) -> ExpensesResult<Vec<CategoryGroup>> {
        self.record(LedgerCall::ListCategories(budget_id));
        if self.fail_listing {
            return Err(ExpensesError::Transport("connection refused".into()));
        }
        Ok(self
            .category_groups
            .iter()
            .filter(|(owner, _)| *owner == budget_id)
            .map(|(_, group)| group.clone())
            .collect())
    }

    fn create_transaction(
        &self,
        budget_id: BudgetId,
        transaction: &TransactionRequest,
    ) -> ExpensesResult<TransactionDetail> {
        self.record(LedgerCall::CreateTransaction(budget_id, transaction.clone()));
        if self.fail_single {
            return Err(rejected());
        }
        Ok(detail(transaction))
    }

    fn create_transactions(
        &self,
        budget_id: BudgetId,
        transactions: &[TransactionRequest],
    ) -> ExpensesResult<Vec<TransactionDetail>> {
        self.record(LedgerCall::CreateTransactions(budget_id, transactions.to_vec()));
        if self.fail_batch {
            return Err(rejected());
        }
        Ok(transactions.iter().map(detail).collect())
    }
}
