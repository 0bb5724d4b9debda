//! Expense models
//!
//! An `ExpenseCatalog` holds one party's monthly expenses keyed by category
//! name. A `CatalogPair` ties the shared catalog to the individual one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ids::{AccountId, BudgetId, CategoryId};
use super::money::Money;
use super::expense_kind::ExpenseKind;

/// A monthly expense attributed to one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// The category this expense is booked against (None for aggregate entries)
    pub category_id: Option<CategoryId>,

    /// Payee name sent with the transaction
    pub payee_name: Option<String>,

    /// Amount owed for this category
    #[serde(default)]
    pub amount: Money,

    /// Memo sent with the transaction
    pub memo: Option<String>,
}

impl Expense {
    /// Create an expense with a zero amount
    pub fn new(
        category_id: Option<CategoryId>,
        payee_name: impl Into<String>,
        memo: impl Into<String>,
    ) -> Self {
        Self {
            category_id,
            payee_name: Some(payee_name.into()),
            amount: Money::zero(),
            memo: Some(memo.into()),
        }
    }

    /// Copy of this expense with a different amount
    pub fn with_amount(&self, amount: Money) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }
}

/// One party's expenses for a specific budget and account
///
/// Keys are category names (case-sensitive). The map is ordered, so every
/// walk over the catalog visits categories in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseCatalog {
    pub budget_id: Option<BudgetId>,
    pub account_id: Option<AccountId>,
    #[serde(default)]
    pub expenses: BTreeMap<String, Expense>,
}

impl ExpenseCatalog {
    /// Create an empty catalog for a budget and account
    pub fn new(budget_id: Option<BudgetId>, account_id: Option<AccountId>) -> Self {
        Self {
            budget_id,
            account_id,
            expenses: BTreeMap::new(),
        }
    }

    /// Insert or replace the expense for a category
    pub fn insert(&mut self, category_name: impl Into<String>, expense: Expense) {
        self.expenses.insert(category_name.into(), expense);
    }

    /// Get the expense for a category
    pub fn get(&self, category_name: &str) -> Option<&Expense> {
        self.expenses.get(category_name)
    }

    /// Category names in iteration order
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.expenses.keys().map(String::as_str)
    }

    /// Number of categories in the catalog
    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    /// Check if the catalog has no categories
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Sum of every expense amount
    pub fn total(&self) -> Money {
        self.expenses.values().map(|e| e.amount).sum()
    }

    /// Sum of every expense amount, or `None` if it overflows
    pub fn checked_total(&self) -> Option<Money> {
        self.expenses
            .values()
            .try_fold(Money::zero(), |total, e| total.checked_add(e.amount))
    }

    /// Check that the catalog can be submitted
    ///
    /// A catalog is valid when it has a budget and an account and holds
    /// exactly the recognized monthly expense categories.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Same as [`is_valid`](Self::is_valid), reporting the first problem found
    pub fn validate(&self) -> Result<(), CatalogValidationError> {
        if self.budget_id.is_none() {
            return Err(CatalogValidationError::MissingBudget);
        }
        if self.account_id.is_none() {
            return Err(CatalogValidationError::MissingAccount);
        }

        let recognized = ExpenseKind::ALL.iter().map(|kind| kind.category_name());
        let matches = self.expenses.len() == ExpenseKind::ALL.len()
            && recognized.clone().all(|name| self.expenses.contains_key(name));
        if !matches {
            return Err(CatalogValidationError::UnexpectedCategories {
                expected: recognized.map(str::to_string).collect(),
                found: self.expenses.keys().cloned().collect(),
            });
        }

        Ok(())
    }
}

/// Shared and individual catalogs for one workflow run
///
/// Both sides hold the same category names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPair {
    pub shared: ExpenseCatalog,
    pub individual: ExpenseCatalog,
}

impl CatalogPair {
    pub fn new(shared: ExpenseCatalog, individual: ExpenseCatalog) -> Self {
        Self { shared, individual }
    }

    /// Check that both catalogs can be submitted
    pub fn is_valid(&self) -> bool {
        self.shared.is_valid() && self.individual.is_valid()
    }
}

/// Reasons a catalog cannot be submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogValidationError {
    MissingBudget,
    MissingAccount,
    UnexpectedCategories {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

impl std::fmt::Display for CatalogValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingBudget => write!(f, "Catalog has no budget"),
            Self::MissingAccount => write!(f, "Catalog has no account"),
            Self::UnexpectedCategories { expected, found } => write!(
                f,
                "Catalog categories [{}] do not match the expected [{}]",
                found.join(", "),
                expected.join(", ")
            ),
        }
    }
}

impl std::error::Error for CatalogValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: [&str; 4] = ["Condominium", "Electricity", "TV / Internet / Phone", "Water"];

    fn full_catalog() -> ExpenseCatalog {
        let mut catalog = ExpenseCatalog::new(Some(BudgetId::new()), Some(AccountId::new()));
        for name in NAMES {
            catalog.insert(name, Expense::new(Some(CategoryId::new()), "Payee", "Memo"));
        }
        catalog
    }

    #[test]
    fn test_valid_catalog() {
        assert!(full_catalog().is_valid());
    }

    #[test]
    fn test_missing_budget_is_invalid() {
        let mut catalog = full_catalog();
        catalog.budget_id = None;
        assert_eq!(catalog.validate(), Err(CatalogValidationError::MissingBudget));
    }

    #[test]
    fn test_missing_account_is_invalid() {
        let mut catalog = full_catalog();
        catalog.account_id = None;
        assert_eq!(catalog.validate(), Err(CatalogValidationError::MissingAccount));
    }

    #[test]
    fn test_empty_catalog_is_invalid() {
        let catalog = ExpenseCatalog::new(Some(BudgetId::new()), Some(AccountId::new()));
        assert!(!catalog.is_valid());
    }

    #[test]
    fn test_partial_catalog_is_invalid() {
        let mut catalog = full_catalog();
        catalog.expenses.remove("Water");
        assert!(!catalog.is_valid());
    }

    #[test]
    fn test_extra_category_is_invalid() {
        let mut catalog = full_catalog();
        catalog.insert("Groceries", Expense::new(None, "", ""));
        assert!(!catalog.is_valid());
    }

    #[test]
    fn test_renamed_category_is_invalid() {
        let mut catalog = full_catalog();
        let water = catalog.expenses.remove("Water").unwrap();
        catalog.insert("water", water);
        assert!(matches!(
            catalog.validate(),
            Err(CatalogValidationError::UnexpectedCategories { .. })
        ));
    }

    #[test]
    fn test_iteration_is_sorted() {
        let catalog = full_catalog();
        let names: Vec<&str> = catalog.category_names().collect();
        assert_eq!(names, NAMES);
    }

    #[test]
    fn test_total() {
        let mut catalog = full_catalog();
        for (i, expense) in catalog.expenses.values_mut().enumerate() {
            expense.amount = Money::from_cents(100 * (i as i64 + 1));
        }
        assert_eq!(catalog.total(), Money::from_cents(1000));
        assert_eq!(catalog.checked_total(), Some(Money::from_cents(1000)));
    }

    #[test]
    fn test_checked_total_overflow() {
        let mut catalog = full_catalog();
        for expense in catalog.expenses.values_mut() {
            expense.amount = Money::new(rust_decimal::Decimal::MAX);
        }
        assert_eq!(catalog.checked_total(), None);
    }

    #[test]
    fn test_pair_validity() {
        let pair = CatalogPair::new(full_catalog(), full_catalog());
        assert!(pair.is_valid());

        let pair = CatalogPair::new(full_catalog(), ExpenseCatalog::default());
        assert!(!pair.is_valid());
    }
}
