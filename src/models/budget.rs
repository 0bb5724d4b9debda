//! Ledger metadata models
//!
//! Budgets, accounts, category groups and categories as the ledger lists
//! them. Only the fields the workflow reads are modelled; everything else in
//! the payload is ignored.

use serde::{Deserialize, Serialize};

use super::ids::{AccountId, BudgetId, CategoryGroupId, CategoryId};

/// An account inside a budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    #[serde(default, rename = "type")]
    pub account_type: String,
    #[serde(default)]
    pub on_budget: bool,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub deleted: bool,
}

impl Account {
    /// Check if the account can receive new transactions
    pub fn is_open(&self) -> bool {
        !self.closed && !self.deleted
    }
}

/// Summary of a budget, optionally with its accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub id: BudgetId,
    pub name: String,
    #[serde(default)]
    pub accounts: Vec<Account>,
}

impl BudgetSummary {
    /// Find the first open account with exactly this name
    pub fn open_account(&self, name: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|account| account.is_open() && account.name == name)
    }
}

/// A budgeting category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub category_group_id: Option<CategoryGroupId>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub deleted: bool,
}

/// A category group with its categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub id: CategoryGroupId,
    pub name: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(name: &str, closed: bool, deleted: bool) -> Account {
        Account {
            id: AccountId::new(),
            name: name.into(),
            account_type: "checking".into(),
            on_budget: true,
            closed,
            deleted,
        }
    }

    #[test]
    fn test_open_account_skips_closed_and_deleted() {
        let open = account("Millennium bcp", false, false);
        let budget = BudgetSummary {
            id: BudgetId::new(),
            name: "Casa".into(),
            accounts: vec![
                account("Millennium bcp", true, false),
                account("Millennium bcp", false, true),
                open.clone(),
            ],
        };

        assert_eq!(budget.open_account("Millennium bcp"), Some(&open));
        assert_eq!(budget.open_account("millennium bcp"), None);
    }

    #[test]
    fn test_parse_budget_payload() {
        let payload = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "name": "Casa Reis-Pereira",
            "last_modified_on": "2025-01-15T10:00:00Z",
            "accounts": [{
                "id": "6ba7b810-9dad-11d1-80b4-00c04fd430c8",
                "name": "CGD",
                "type": "checking",
                "on_budget": true,
                "closed": false,
                "balance": 125000,
                "deleted": false
            }]
        }"#;

        let budget: BudgetSummary = serde_json::from_str(payload).unwrap();
        assert_eq!(budget.name, "Casa Reis-Pereira");
        assert_eq!(budget.accounts.len(), 1);
        assert!(budget.open_account("CGD").is_some());
    }

    #[test]
    fn test_parse_category_group_payload() {
        let payload = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "name": "Obligatory Monthly Expenses",
            "hidden": false,
            "deleted": false,
            "categories": [{
                "id": "6ba7b810-9dad-11d1-80b4-00c04fd430c8",
                "category_group_id": "550e8400-e29b-41d4-a716-446655440000",
                "name": "Water",
                "hidden": false,
                "budgeted": 0,
                "deleted": false
            }]
        }"#;

        let group: CategoryGroup = serde_json::from_str(payload).unwrap();
        assert_eq!(group.categories[0].name, "Water");
        assert_eq!(group.categories[0].category_group_id, Some(group.id));
    }
}
