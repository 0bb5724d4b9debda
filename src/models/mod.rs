//! Core data models for monthly-expenses
//!
//! This module contains the data structures of the expense-splitting
//! domain (money, expenses, catalogs) and the ledger's own shapes
//! (budgets, accounts, categories, transactions).

pub mod budget;
pub mod expense;
pub mod expense_kind;
pub mod ids;
pub mod money;
pub mod transaction;

pub use budget::{Account, BudgetSummary, Category, CategoryGroup};
pub use expense::{CatalogPair, CatalogValidationError, Expense, ExpenseCatalog};
pub use expense_kind::{ExpenseKind, MemoRule};
pub use ids::{AccountId, BudgetId, CategoryGroupId, CategoryId};
pub use money::{Money, MoneyParseError};
pub use transaction::{
    ClearedStatus, SubTransactionDetail, SubTransactionRequest, TransactionDetail,
    TransactionRequest, TransactionValidationError,
};
