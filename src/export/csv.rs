//! CSV export of a transaction plan
//!
//! One row per transaction, followed by one row per sub-transaction with the
//! parent's row number in `parent`.

use std::collections::HashMap;
use std::io::Write;

use serde::Serialize;

use crate::error::{ExpensesError, ExpensesResult};
use crate::models::{CatalogPair, CategoryId, Money, TransactionRequest};
use crate::services::TransactionPlan;

#[derive(Debug, Serialize)]
struct PlanRow<'a> {
    row: usize,
    parent: Option<usize>,
    budget: &'a str,
    date: String,
    account_id: String,
    payee: &'a str,
    category: &'a str,
    memo: &'a str,
    amount: Money,
    milliunits: i64,
}

fn category_name<'a>(names: &HashMap<CategoryId, &'a str>, id: Option<CategoryId>) -> &'a str {
    id.and_then(|id| names.get(&id).copied()).unwrap_or("")
}

/// Write a plan as CSV
pub fn export_plan_csv<W: Write>(
    plan: &TransactionPlan,
    pair: &CatalogPair,
    writer: W,
) -> ExpensesResult<()> {
    let names: HashMap<CategoryId, &str> = pair
        .shared
        .expenses
        .iter()
        .chain(pair.individual.expenses.iter())
        .filter_map(|(name, expense)| expense.category_id.map(|id| (id, name.as_str())))
        .collect();

    let mut csv = ::csv::Writer::from_writer(writer);
    let mut row = 0;

    let batches: [(&str, &[TransactionRequest]); 2] = [
        ("shared", plan.shared.as_slice()),
        ("individual", std::slice::from_ref(&plan.individual)),
    ];
    for (budget, transactions) in batches {
        for txn in transactions {
            row += 1;
            let parent = row;
            csv.serialize(PlanRow {
                row,
                parent: None,
                budget,
                date: txn.date.format("%Y-%m-%d").to_string(),
                account_id: txn.account_id.to_string(),
                payee: txn.payee_name.as_deref().unwrap_or(""),
                category: category_name(&names, txn.category_id),
                memo: txn.memo.as_deref().unwrap_or(""),
                amount: txn.amount_money(),
                milliunits: txn.amount,
            })
            .map_err(|e| ExpensesError::Export(e.to_string()))?;

            for sub in &txn.sub_transactions {
                row += 1;
                csv.serialize(PlanRow {
                    row,
                    parent: Some(parent),
                    budget,
                    date: txn.date.format("%Y-%m-%d").to_string(),
                    account_id: txn.account_id.to_string(),
                    payee: sub.payee_name.as_deref().unwrap_or(""),
                    category: category_name(&names, sub.category_id),
                    memo: sub.memo.as_deref().unwrap_or(""),
                    amount: Money::from_milliunits(sub.amount),
                    milliunits: sub.amount,
                })
                .map_err(|e| ExpensesError::Export(e.to_string()))?;
            }
        }
    }

    csv.flush()
        .map_err(|e| ExpensesError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::sample;

    #[test]
    fn test_export_plan_csv() {
        let (plan, pair) = sample();
        let mut buffer = Vec::new();
        export_plan_csv(&plan, &pair, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "row,parent,budget,date,account_id,payee,category,memo,amount,milliunits"
        );
        // 2 outflows, then 2 aggregates and 1 individual with 2 parts each
        assert_eq!(lines.len(), 1 + 2 + 3 * 3);
        assert!(lines[1].starts_with("1,,shared,2025-01-15,"));
        assert!(lines[1].ends_with("-245.75,-245750"));
        assert!(lines[4].starts_with("4,3,shared,"));
        assert!(lines[4].contains(",Condominium,"));
        assert!(lines[4].ends_with("122.88,122880"));
        assert!(lines.last().unwrap().contains(",individual,"));
    }
}
