//! Locating budgets, accounts and categories by name
//!
//! Builds the shared and individual catalogs from what the ledger lists.
//! A budget or account that cannot be found leaves the catalog without an
//! id instead of failing, so readiness can be reported to the caller.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::memo::{household_memo, shared_expense_memo, shared_expense_payee, transfer_payee};
use crate::config::Settings;
use crate::error::{ExpensesError, ExpensesResult};
use crate::ledger::LedgerService;
use crate::models::{Account, BudgetSummary, CatalogPair, Category, CategoryGroup, Expense, ExpenseCatalog};

/// Check if a character belongs to an emoji sequence
///
/// ASCII digits, `#` and `*` carry the emoji property only as keycap bases
/// and are kept. Joiners, variation selectors, keycaps and tag characters
/// only appear inside emoji sequences.
fn is_emoji(c: char) -> bool {
    if c.is_ascii() {
        return false;
    }
    unic_emoji_char::is_emoji(c)
        || unic_emoji_char::is_emoji_component(c)
        || matches!(u32::from(c), 0xFE0E..=0xFE0F | 0x200D | 0x20E3 | 0xE0020..=0xE007F)
        || is_late_emoji(c)
}

/// Pictographs assigned after the emoji data shipped with `unic-emoji-char`
fn is_late_emoji(c: char) -> bool {
    matches!(u32::from(c), 0x1F900..=0x1F9FF | 0x1FA70..=0x1FAFF)
}

/// Remove emoji from a category name and trim the rest
pub fn strip_emoji(name: &str) -> String {
    let stripped: String = name.chars().filter(|c| !is_emoji(*c)).collect();
    stripped.trim().to_string()
}

/// The first budget whose name contains `fragment`
pub fn find_budget<'a>(
    budgets: &'a [BudgetSummary],
    fragment: &str,
) -> ExpensesResult<&'a BudgetSummary> {
    budgets
        .iter()
        .find(|budget| budget.name.contains(fragment))
        .ok_or_else(|| ExpensesError::budget_not_found(fragment))
}

/// The open account of `budget` with exactly this name
pub fn find_account<'a>(budget: &'a BudgetSummary, name: &str) -> ExpensesResult<&'a Account> {
    budget
        .open_account(name)
        .ok_or_else(|| ExpensesError::account_not_found(name))
}

/// Visible categories of the monthly expense groups, minus excluded ones
pub fn monthly_categories<'a>(
    groups: &'a [CategoryGroup],
    group_fragment: &str,
    excluded: &[String],
) -> Vec<&'a Category> {
    groups
        .iter()
        .filter(|group| !group.deleted && group.name.contains(group_fragment))
        .flat_map(|group| group.categories.iter())
        .filter(|category| !category.hidden && !category.deleted)
        .filter(|category| {
            !excluded
                .iter()
                .any(|fragment| category.name.contains(fragment.as_str()))
        })
        .collect()
}

/// Which side of the pair a catalog is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Shared,
    Individual,
}

impl Side {
    fn label(self) -> &'static str {
        match self {
            Side::Shared => "shared",
            Side::Individual => "individual",
        }
    }
}

/// Fixed payee and memo for a category on one side
fn template_expense(
    side: Side,
    name: &str,
    category: Option<&Category>,
    settings: &Settings,
    today: NaiveDate,
) -> Expense {
    let category_id = category.map(|c| c.id);
    match side {
        Side::Shared => Expense::new(
            category_id,
            shared_expense_payee(name),
            shared_expense_memo(name, today),
        ),
        Side::Individual => Expense::new(
            category_id,
            transfer_payee(&settings.individual_transfer_label),
            household_memo(today, &settings.household_memo_suffix),
        ),
    }
}

fn build_catalog<L: LedgerService>(
    ledger: &L,
    budgets: &[BudgetSummary],
    settings: &Settings,
    side: Side,
    today: NaiveDate,
) -> ExpensesResult<ExpenseCatalog> {
    let (budget_fragment, account_name) = match side {
        Side::Shared => (&settings.shared_budget, &settings.shared_account),
        Side::Individual => (&settings.individual_budget, &settings.individual_account),
    };

    let budget = match find_budget(budgets, budget_fragment) {
        Ok(budget) => budget,
        Err(e) => {
            warn!(side = side.label(), error = %e, "catalog left without a budget");
            return Ok(ExpenseCatalog::default());
        }
    };

    let account_id = match find_account(budget, account_name) {
        Ok(account) => Some(account.id),
        Err(e) => {
            warn!(side = side.label(), error = %e, "catalog left without an account");
            None
        }
    };

    let mut catalog = ExpenseCatalog::new(Some(budget.id), account_id);
    let groups = ledger.list_categories(budget.id)?;
    for category in monthly_categories(&groups, &settings.category_group, &settings.excluded_categories) {
        let name = strip_emoji(&category.name);
        debug!(side = side.label(), category = %name, "found monthly expense category");
        let expense = template_expense(side, &name, Some(category), settings, today);
        catalog.insert(name, expense);
    }

    info!(
        side = side.label(),
        budget = %budget.name,
        categories = catalog.len(),
        "catalog ready"
    );
    Ok(catalog)
}

/// Build both catalogs from the ledger
pub fn bootstrap_catalogs<L: LedgerService>(
    ledger: &L,
    settings: &Settings,
    today: NaiveDate,
) -> ExpensesResult<CatalogPair> {
    let budgets = ledger.list_budgets(true)?;
    let shared = build_catalog(ledger, &budgets, settings, Side::Shared, today)?;
    let individual = build_catalog(ledger, &budgets, settings, Side::Individual, today)?;
    Ok(CatalogPair::new(shared, individual))
}

/// Catalogs for the given category names without any ledger ids
///
/// Used to split amounts offline.
pub fn offline_catalogs<'a>(
    names: impl IntoIterator<Item = &'a str>,
    settings: &Settings,
    today: NaiveDate,
) -> CatalogPair {
    let mut pair = CatalogPair::default();
    for name in names {
        pair.shared
            .insert(name, template_expense(Side::Shared, name, None, settings, today));
        pair.individual
            .insert(name, template_expense(Side::Individual, name, None, settings, today));
    }
    pair
}
