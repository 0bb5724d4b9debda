//! Ledger service access
//!
//! `LedgerService` is the seam between the workflow and the remote budgeting
//! service. `YnabClient` talks to the real API; tests use an in-memory fake.

pub mod client;
pub mod wire;

#[cfg(test)]
pub mod fake;

pub use client::YnabClient;

use crate::error::ExpensesResult;
use crate::models::{BudgetId, BudgetSummary, CategoryGroup, TransactionDetail, TransactionRequest};

/// Operations the workflow needs from the budgeting service
///
/// Every call either succeeds or fails with a transport or service error;
/// none are retried.
pub trait LedgerService {
    /// List budgets, optionally with their accounts
    fn list_budgets(&self, include_accounts: bool) -> ExpensesResult<Vec<BudgetSummary>>;

    /// List a budget's category groups with their categories
    fn list_categories(&self, budget_id: BudgetId) -> ExpensesResult<Vec<CategoryGroup>>;

    /// Create one transaction
    fn create_transaction(
        &self,
        budget_id: BudgetId,
        transaction: &TransactionRequest,
    ) -> ExpensesResult<TransactionDetail>;

    /// Create several transactions in one call
    fn create_transactions(
        &self,
        budget_id: BudgetId,
        transactions: &[TransactionRequest],
    ) -> ExpensesResult<Vec<TransactionDetail>>;
}

impl<L: LedgerService + ?Sized> LedgerService for &L {
    fn list_budgets(&self, include_accounts: bool) -> ExpensesResult<Vec<BudgetSummary>> {
        (**self).list_budgets(include_accounts)
    }

    fn list_categories(&self, budget_id: BudgetId) -> ExpensesResult<Vec<CategoryGroup>> {
        (**self).list_categories(budget_id)
    }

    fn create_transaction(
        &self,
        budget_id: BudgetId,
        transaction: &TransactionRequest,
    ) -> ExpensesResult<TransactionDetail> {
        (**self).create_transaction(budget_id, transaction)
    }

    fn create_transactions(
        &self,
        budget_id: BudgetId,
        transactions: &[TransactionRequest],
    ) -> ExpensesResult<Vec<TransactionDetail>> {
        (**self).create_transactions(budget_id, transactions)
    }
}
