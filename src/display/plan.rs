//! Transaction plan formatting

use std::collections::HashMap;

use super::truncate;
use crate::models::{CatalogPair, CategoryId, Money, TransactionRequest};
use crate::services::TransactionPlan;

/// Category names by id, from both catalogs
fn category_names(pair: &CatalogPair) -> HashMap<CategoryId, &str> {
    pair.shared
        .expenses
        .iter()
        .chain(pair.individual.expenses.iter())
        .filter_map(|(name, expense)| expense.category_id.map(|id| (id, name.as_str())))
        .collect()
}

fn format_transaction(
    output: &mut String,
    txn: &TransactionRequest,
    names: &HashMap<CategoryId, &str>,
    symbol: &str,
) {
    let category = match txn.category_id {
        Some(id) => names.get(&id).copied().unwrap_or("(unknown)"),
        None if txn.is_split() => "Split",
        None => "",
    };

    output.push_str(&format!(
        "{} {:24} {:24} {:>12}\n",
        txn.date.format("%Y-%m-%d"),
        truncate(txn.payee_name.as_deref().unwrap_or("(no payee)"), 24),
        truncate(category, 24),
        txn.amount_money().format_with_symbol(symbol)
    ));

    for sub in &txn.sub_transactions {
        let name = sub
            .category_id
            .and_then(|id| names.get(&id).copied())
            .unwrap_or("(unknown)");
        output.push_str(&format!(
            "{:10} {:24} {:24} {:>12}\n",
            "",
            "",
            truncate(&format!("  {}", name), 24),
            Money::from_milliunits(sub.amount).format_with_symbol(symbol)
        ));
    }

    if let Some(memo) = txn.memo.as_deref().filter(|m| !m.is_empty()) {
        output.push_str(&format!("{:10} Memo: {}\n", "", memo));
    }
}

/// Format every transaction of a plan, grouped by budget
pub fn format_plan(plan: &TransactionPlan, pair: &CatalogPair, symbol: &str) -> String {
    let names = category_names(pair);
    let mut output = String::new();

    output.push_str(&format!(
        "Shared budget ({} transactions):\n",
        plan.shared.len()
    ));
    output.push_str(&format!(
        "{:10} {:24} {:24} {:>12}\n",
        "Date", "Payee", "Category", "Amount"
    ));
    output.push_str(&"-".repeat(73));
    output.push('\n');
    for txn in &plan.shared {
        format_transaction(&mut output, txn, &names, symbol);
    }

    output.push_str("\nIndividual budget (1 transaction):\n");
    output.push_str(&"-".repeat(73));
    output.push('\n');
    format_transaction(&mut output, &plan.individual, &names, symbol);

    output
}
