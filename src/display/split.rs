//! Split table formatting

use super::truncate;
use crate::models::{ExpenseCatalog, Money};
use crate::services::splitter::counterpart_share;

/// Format both parties' shares per category, with totals
///
/// Categories missing from `individual` show a zero share.
pub fn format_split(
    shared: &ExpenseCatalog,
    individual: &ExpenseCatalog,
    my_label: &str,
    other_label: &str,
    symbol: &str,
) -> String {
    if shared.is_empty() {
        return "No expenses to split.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:24} {:>12} {:>12} {:>12}\n",
        "Category",
        "Total",
        truncate(my_label, 12),
        truncate(other_label, 12)
    ));
    output.push_str(&"-".repeat(63));
    output.push('\n');

    let mut mine_total = Money::zero();
    let mut other_total = Money::zero();
    for (name, expense) in &shared.expenses {
        let mine = individual
            .get(name)
            .map(|e| e.amount)
            .unwrap_or_else(Money::zero);
        let other = counterpart_share(expense.amount, mine);
        mine_total += mine;
        other_total += other;

        output.push_str(&format!(
            "{:24} {:>12} {:>12} {:>12}\n",
            truncate(name, 24),
            expense.amount.format_with_symbol(symbol),
            mine.format_with_symbol(symbol),
            other.format_with_symbol(symbol)
        ));
    }

    output.push_str(&"-".repeat(63));
    output.push('\n');
    output.push_str(&format!(
        "{:24} {:>12} {:>12} {:>12}\n",
        "Total",
        shared.total().format_with_symbol(symbol),
        mine_total.format_with_symbol(symbol),
        other_total.format_with_symbol(symbol)
    ));

    output
}
