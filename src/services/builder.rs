//! Transaction construction
//!
//! Turns a split catalog pair into ledger transaction requests. All sums are
//! taken in decimal; amounts only become milliunits when a request or
//! sub-transaction is created. An aggregate transaction's amount is the sum
//! of its sub-transactions, so the two can never disagree.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::Settings;
use crate::error::{ExpensesError, ExpensesResult};
use crate::models::{
    AccountId, BudgetId, CatalogPair, CategoryId, ExpenseCatalog, Money, SubTransactionRequest,
    TransactionRequest,
};
use crate::services::memo::{household_memo, transfer_payee};
use crate::services::splitter::counterpart_share;

/// Convert an amount to milliunits, failing if it does not fit
fn milliunits(amount: Money) -> ExpensesResult<i64> {
    amount
        .to_milliunits()
        .ok_or_else(|| ExpensesError::Validation(format!("Amount {} is out of range", amount)))
}

fn checked(txn: TransactionRequest) -> ExpensesResult<TransactionRequest> {
    txn.validate()
        .map_err(|e| ExpensesError::Validation(e.to_string()))?;
    Ok(txn)
}

fn require_account(catalog: &ExpenseCatalog, side: &str) -> ExpensesResult<AccountId> {
    catalog
        .account_id
        .ok_or_else(|| ExpensesError::Validation(format!("The {} catalog has no account", side)))
}

fn require_budget(catalog: &ExpenseCatalog, side: &str) -> ExpensesResult<BudgetId> {
    catalog
        .budget_id
        .ok_or_else(|| ExpensesError::Validation(format!("The {} catalog has no budget", side)))
}

/// Collects per-category portions for an aggregate transaction
#[derive(Default)]
struct Aggregate {
    parts: Vec<SubTransactionRequest>,
}

impl Aggregate {
    fn push(&mut self, amount: Money, category_id: Option<CategoryId>) -> ExpensesResult<()> {
        self.parts
            .push(SubTransactionRequest::new(milliunits(amount)?, category_id));
        Ok(())
    }

    fn into_transaction(
        self,
        account_id: AccountId,
        date: NaiveDate,
        payee_name: Option<String>,
        memo: Option<String>,
    ) -> ExpensesResult<TransactionRequest> {
        let total = self
            .parts
            .iter()
            .try_fold(0i64, |total, part| total.checked_add(part.amount))
            .ok_or_else(|| ExpensesError::Validation("Aggregate total is out of range".into()))?;
        let mut txn = TransactionRequest::new(account_id, date, total);
        txn.payee_name = payee_name;
        txn.memo = memo;
        txn.sub_transactions = self.parts;
        checked(txn)
    }
}

/// Builds the ledger transactions for one month's expenses
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    date: NaiveDate,
    my_payee: String,
    other_payee: String,
    memo: String,
}

impl TransactionBuilder {
    /// Create a builder
    ///
    /// `my_label` and `other_label` name the transfer counterparties of the
    /// two aggregate transactions; `memo_suffix` completes their
    /// "<Month> <Year> - ..." memo.
    pub fn new(date: NaiveDate, my_label: &str, other_label: &str, memo_suffix: &str) -> Self {
        Self {
            date,
            my_payee: transfer_payee(my_label),
            other_payee: transfer_payee(other_label),
            memo: household_memo(date, memo_suffix),
        }
    }

    /// Create a builder from user settings
    pub fn from_settings(settings: &Settings, date: NaiveDate) -> Self {
        Self::new(
            date,
            &settings.my_label,
            &settings.other_label,
            &settings.household_memo_suffix,
        )
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Transactions for the shared account
    ///
    /// One outflow per shared expense, then two aggregate transfers: this
    /// party's accumulated share followed by the other party's, each broken
    /// down by category.
    pub fn build_shared_transactions(
        &self,
        pair: &CatalogPair,
    ) -> ExpensesResult<Vec<TransactionRequest>> {
        let shared = &pair.shared;
        let account_id = require_account(shared, "shared")?;

        let mut transactions = Vec::with_capacity(shared.len() + 2);
        let mut mine = Aggregate::default();
        let mut theirs = Aggregate::default();

        for (category_name, expense) in &shared.expenses {
            let mut outflow =
                TransactionRequest::new(account_id, self.date, milliunits(-expense.amount)?);
            outflow.payee_name = expense.payee_name.clone();
            outflow.category_id = expense.category_id;
            outflow.memo = expense.memo.clone();
            transactions.push(checked(outflow)?);

            let my_share = pair
                .individual
                .get(category_name)
                .ok_or_else(|| ExpensesError::category_missing(category_name, "individual"))?
                .amount;
            let other_share = counterpart_share(expense.amount, my_share);

            mine.push(my_share, expense.category_id)?;
            theirs.push(other_share, expense.category_id)?;
        }

        transactions.push(mine.into_transaction(
            account_id,
            self.date,
            Some(self.my_payee.clone()),
            Some(self.memo.clone()),
        )?);
        transactions.push(theirs.into_transaction(
            account_id,
            self.date,
            Some(self.other_payee.clone()),
            Some(self.memo.clone()),
        )?);

        Ok(transactions)
    }

    /// The single outflow on the individual account, split by category
    ///
    /// Payee and memo are taken from the first expense; every individual
    /// expense carries the same ones.
    pub fn build_individual_transaction(
        &self,
        individual: &ExpenseCatalog,
    ) -> ExpensesResult<TransactionRequest> {
        let account_id = require_account(individual, "individual")?;
        let sample = individual.expenses.values().next().ok_or_else(|| {
            ExpensesError::Validation("The individual catalog has no expenses".into())
        })?;

        let mut outflow = Aggregate::default();
        for expense in individual.expenses.values() {
            outflow.push(-expense.amount, expense.category_id)?;
        }

        outflow.into_transaction(
            account_id,
            self.date,
            sample.payee_name.clone(),
            sample.memo.clone(),
        )
    }

    /// Everything one submission posts, grouped by budget
    pub fn build_plan(&self, pair: &CatalogPair) -> ExpensesResult<TransactionPlan> {
        Ok(TransactionPlan {
            shared_budget_id: require_budget(&pair.shared, "shared")?,
            shared: self.build_shared_transactions(pair)?,
            individual_budget_id: require_budget(&pair.individual, "individual")?,
            individual: self.build_individual_transaction(&pair.individual)?,
        })
    }
}

/// The transactions of one submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionPlan {
    pub shared_budget_id: BudgetId,
    pub shared: Vec<TransactionRequest>,
    pub individual_budget_id: BudgetId,
    pub individual: TransactionRequest,
}

impl TransactionPlan {
    /// Every transaction in the order it is posted
    pub fn transactions(&self) -> impl Iterator<Item = &TransactionRequest> {
        self.shared.iter().chain(std::iter::once(&self.individual))
    }
}
