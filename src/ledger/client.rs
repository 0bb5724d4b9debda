//! HTTP client for the YNAB API

use std::fmt;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use tracing::debug;
use zeroize::Zeroizing;

use super::wire::{
    BudgetsData, CategoriesData, DataEnvelope, NewTransaction, NewTransactions, TransactionData,
    TransactionsData,
};
use super::LedgerService;
use crate::error::{ExpensesError, ExpensesResult};
use crate::models::{BudgetId, BudgetSummary, CategoryGroup, TransactionDetail, TransactionRequest};

/// Blocking YNAB client authenticated with a personal access token
pub struct YnabClient {
    http: Client,
    base_url: String,
    token: Zeroizing<String>,
}

impl fmt::Debug for YnabClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YnabClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl YnabClient {
    pub fn new(base_url: impl Into<String>, token: Zeroizing<String>) -> ExpensesResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("monthly-expenses/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> ExpensesResult<T> {
        let response = request
            .bearer_auth(self.token.as_str())
            .header(ACCEPT, "application/json")
            .send()?;

        let status = response.status();
        let body = response.text()?;
        debug!(status = status.as_u16(), bytes = body.len(), "ledger responded");

        decode_response(status.as_u16(), &body)
    }
}

/// Unwrap a response body, turning a non-success status into a service error
fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> ExpensesResult<T> {
    if !(200..300).contains(&status) {
        return Err(ExpensesError::Service {
            status,
            body: body.to_string(),
        });
    }

    let envelope: DataEnvelope<T> = serde_json::from_str(body)
        .map_err(|e| ExpensesError::Transport(format!("Unreadable ledger response: {}", e)))?;
    Ok(envelope.data)
}

impl LedgerService for YnabClient {
    fn list_budgets(&self, include_accounts: bool) -> ExpensesResult<Vec<BudgetSummary>> {
        let request = self
            .http
            .get(self.url("budgets"))
            .query(&[("include_accounts", include_accounts)]);
        let data: BudgetsData = self.execute(request)?;
        Ok(data.budgets)
    }

    fn list_categories(&self, budget_id: BudgetId) -> ExpensesResult<Vec<CategoryGroup>> {
        let request = self
            .http
            .get(self.url(&format!("budgets/{}/categories", budget_id)));
        let data: CategoriesData = self.execute(request)?;
        Ok(data.category_groups)
    }

    fn create_transaction(
        &self,
        budget_id: BudgetId,
        transaction: &TransactionRequest,
    ) -> ExpensesResult<TransactionDetail> {
        let request = self
            .http
            .post(self.url(&format!("budgets/{}/transactions", budget_id)))
            .json(&NewTransaction { transaction });
        let data: TransactionData = self.execute(request)?;
        Ok(data.transaction)
    }

    fn create_transactions(
        &self,
        budget_id: BudgetId,
        transactions: &[TransactionRequest],
    ) -> ExpensesResult<Vec<TransactionDetail>> {
        let request = self
            .http
            .post(self.url(&format!("budgets/{}/transactions", budget_id)))
            .json(&NewTransactions { transactions });
        let data: TransactionsData = self.execute(request)?;
        Ok(data.transactions)
    }
}
