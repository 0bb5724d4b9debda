//! Transaction models
//!
//! `TransactionRequest` is what gets posted to the ledger, amounts already
//! expressed in milliunits. `TransactionDetail` is what the ledger answers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, CategoryId};
use super::money::Money;

/// Clearing status of a ledger transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClearedStatus {
    /// Not yet seen on the bank statement
    #[default]
    Uncleared,
    /// Seen on the bank statement
    Cleared,
    /// Reconciled and locked
    Reconciled,
}

impl fmt::Display for ClearedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uncleared => write!(f, "uncleared"),
            Self::Cleared => write!(f, "cleared"),
            Self::Reconciled => write!(f, "reconciled"),
        }
    }
}

/// A portion of a split transaction assigned to one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTransactionRequest {
    /// Amount in milliunits (same sign as the parent)
    pub amount: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl SubTransactionRequest {
    /// Create a sub-transaction for a category
    pub fn new(amount: i64, category_id: Option<CategoryId>) -> Self {
        Self {
            amount,
            category_id,
            payee_name: None,
            memo: None,
        }
    }
}

/// A transaction to be created on the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub account_id: AccountId,

    /// Calendar day, serialized as YYYY-MM-DD
    pub date: NaiveDate,

    /// Amount in milliunits (positive for inflow, negative for outflow)
    pub amount: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee_name: Option<String>,

    /// Category (None when the transaction is split)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,

    #[serde(default)]
    pub cleared: ClearedStatus,

    #[serde(default)]
    pub approved: bool,

    /// Split portions - if non-empty, category_id should be None
    #[serde(default, rename = "subtransactions", skip_serializing_if = "Vec::is_empty")]
    pub sub_transactions: Vec<SubTransactionRequest>,
}

impl TransactionRequest {
    /// Create an uncleared, unapproved transaction
    pub fn new(account_id: AccountId, date: NaiveDate, amount: i64) -> Self {
        Self {
            account_id,
            date,
            amount,
            payee_name: None,
            category_id: None,
            memo: None,
            cleared: ClearedStatus::Uncleared,
            approved: false,
            sub_transactions: Vec::new(),
        }
    }

    /// Check if this is a split transaction
    pub fn is_split(&self) -> bool {
        !self.sub_transactions.is_empty()
    }

    /// Check if this is an outflow (negative amount)
    pub fn is_outflow(&self) -> bool {
        self.amount < 0
    }

    /// Amount as money, for display
    pub fn amount_money(&self) -> Money {
        Money::from_milliunits(self.amount)
    }

    /// Get the total of all sub-transactions (should equal the amount)
    ///
    /// Returns `None` if the total overflows.
    pub fn sub_transactions_total(&self) -> Option<i64> {
        self.sub_transactions
            .iter()
            .try_fold(0i64, |total, sub| total.checked_add(sub.amount))
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.is_split() {
            let splits_total = self
                .sub_transactions_total()
                .ok_or(TransactionValidationError::SplitsOverflow)?;
            if splits_total != self.amount {
                return Err(TransactionValidationError::SplitsMismatch {
                    transaction_amount: self.amount,
                    splits_total,
                });
            }

            if self.category_id.is_some() {
                return Err(TransactionValidationError::CategoryAndSplits);
            }
        }

        Ok(())
    }
}

impl fmt::Display for TransactionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.payee_name.as_deref().unwrap_or(""),
            self.amount_money()
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    SplitsMismatch {
        transaction_amount: i64,
        splits_total: i64,
    },
    CategoryAndSplits,
    SplitsOverflow,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SplitsMismatch {
                transaction_amount,
                splits_total,
            } => write!(
                f,
                "Sub-transaction total ({}) does not match transaction amount ({})",
                Money::from_milliunits(*splits_total),
                Money::from_milliunits(*transaction_amount)
            ),
            Self::CategoryAndSplits => {
                write!(f, "Transaction cannot have both a category and sub-transactions")
            }
            Self::SplitsOverflow => write!(f, "Sub-transaction total is out of range"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

/// A sub-transaction as returned by the ledger
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubTransactionDetail {
    pub id: String,
    pub transaction_id: String,
    pub amount: i64,
    pub memo: Option<String>,
    pub payee_name: Option<String>,
    pub category_id: Option<CategoryId>,
    pub category_name: Option<String>,
    pub deleted: bool,
}

/// A transaction as returned by the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDetail {
    pub id: String,
    pub date: NaiveDate,
    pub amount: i64,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub cleared: ClearedStatus,
    #[serde(default)]
    pub approved: bool,
    pub account_id: AccountId,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub payee_name: Option<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub subtransactions: Vec<SubTransactionDetail>,
    #[serde(default)]
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_new_request_defaults() {
        let txn = TransactionRequest::new(AccountId::new(), date(), -5000);
        assert_eq!(txn.cleared, ClearedStatus::Uncleared);
        assert!(!txn.approved);
        assert!(txn.is_outflow());
        assert!(!txn.is_split());
    }

    #[test]
    fn test_split_validation() {
        let mut txn = TransactionRequest::new(AccountId::new(), date(), -10000);
        txn.sub_transactions
            .push(SubTransactionRequest::new(-6000, Some(CategoryId::new())));
        txn.sub_transactions
            .push(SubTransactionRequest::new(-4000, Some(CategoryId::new())));

        assert!(txn.is_split());
        assert_eq!(txn.sub_transactions_total(), Some(-10000));
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_split_total_overflow() {
        let mut txn = TransactionRequest::new(AccountId::new(), date(), i64::MAX);
        txn.sub_transactions
            .push(SubTransactionRequest::new(i64::MAX, Some(CategoryId::new())));
        txn.sub_transactions
            .push(SubTransactionRequest::new(1, Some(CategoryId::new())));

        assert_eq!(txn.sub_transactions_total(), None);
        assert_eq!(txn.validate(), Err(TransactionValidationError::SplitsOverflow));
    }

    #[test]
    fn test_split_validation_mismatch() {
        let mut txn = TransactionRequest::new(AccountId::new(), date(), -10000);
        txn.sub_transactions
            .push(SubTransactionRequest::new(-5000, Some(CategoryId::new())));

        assert!(matches!(
            txn.validate(),
            Err(TransactionValidationError::SplitsMismatch { .. })
        ));
    }

    #[test]
    fn test_category_and_splits_validation() {
        let mut txn = TransactionRequest::new(AccountId::new(), date(), -10000);
        txn.category_id = Some(CategoryId::new());
        txn.sub_transactions
            .push(SubTransactionRequest::new(-10000, Some(CategoryId::new())));

        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::CategoryAndSplits)
        );
    }

    #[test]
    fn test_wire_format() {
        let account_id = AccountId::new();
        let category_id = CategoryId::new();
        let mut txn = TransactionRequest::new(account_id, date(), 122875);
        txn.payee_name = Some("Transfer: Household".into());
        txn.sub_transactions
            .push(SubTransactionRequest::new(122875, Some(category_id)));

        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["date"], "2025-01-15");
        assert_eq!(json["amount"], 122875);
        assert_eq!(json["cleared"], "uncleared");
        assert_eq!(json["approved"], false);
        assert_eq!(json["account_id"], account_id.to_string());
        assert!(json.get("category_id").is_none());
        assert_eq!(
            json["subtransactions"][0]["category_id"],
            category_id.to_string()
        );
    }

    #[test]
    fn test_detail_parses_ledger_payload() {
        let payload = r#"{
            "id": "a1b2",
            "date": "2025-01-15",
            "amount": -245750,
            "memo": null,
            "cleared": "uncleared",
            "approved": false,
            "account_id": "550e8400-e29b-41d4-a716-446655440000",
            "payee_name": "EDP",
            "flag_color": null,
            "subtransactions": []
        }"#;

        let detail: TransactionDetail = serde_json::from_str(payload).unwrap();
        assert_eq!(detail.amount, -245750);
        assert_eq!(detail.payee_name.as_deref(), Some("EDP"));
        assert!(detail.subtransactions.is_empty());
    }

    #[test]
    fn test_display() {
        let mut txn = TransactionRequest::new(AccountId::new(), date(), -5000);
        txn.payee_name = Some("EPAL".into());
        assert_eq!(txn.to_string(), "2025-01-15 EPAL -5.00");
    }
}
