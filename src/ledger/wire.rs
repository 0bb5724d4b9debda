//! Request and response envelopes of the YNAB API
//!
//! Every response wraps its payload in `{"data": ...}`; transaction creation
//! wraps the request in `{"transaction": ...}` or `{"transactions": [...]}`.

use serde::{Deserialize, Serialize};

use crate::models::{BudgetSummary, CategoryGroup, TransactionDetail, TransactionRequest};

/// The `{"data": ...}` wrapper around every successful response
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct BudgetsData {
    pub budgets: Vec<BudgetSummary>,
}

#[derive(Debug, Deserialize)]
pub struct CategoriesData {
    pub category_groups: Vec<CategoryGroup>,
}

#[derive(Debug, Deserialize)]
pub struct TransactionData {
    pub transaction: TransactionDetail,
}

#[derive(Debug, Deserialize)]
pub struct TransactionsData {
    #[serde(default)]
    pub transactions: Vec<TransactionDetail>,
}

/// Body of a single-transaction create call
#[derive(Debug, Serialize)]
pub struct NewTransaction<'a> {
    pub transaction: &'a TransactionRequest,
}

/// Body of a batch create call
#[derive(Debug, Serialize)]
pub struct NewTransactions<'a> {
    pub transactions: &'a [TransactionRequest],
}
