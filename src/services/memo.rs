//! Payee and memo text for monthly expense transactions
//!
//! Shared expenses take their payee from the recognized-category table and a
//! memo derived from the current date. Unrecognized category names get empty
//! text rather than an error.

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{ExpenseKind, MemoRule};

/// First day of the month containing `date`
fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

/// First day of the month before the one containing `date`
fn previous_month(date: NaiveDate) -> NaiveDate {
    first_of_month(first_of_month(date) - Duration::days(1))
}

/// First day of the month after the one containing `date`
fn next_month(date: NaiveDate) -> NaiveDate {
    first_of_month(first_of_month(date) + Duration::days(32))
}

/// Memo for a billing cycle that started last month and ends this month
///
/// e.g. `"December 2024 - 11 December to 10 January"` for a 2025-01-20
/// date with a cycle running from the 11th to the 10th.
pub fn billing_cycle_memo(today: NaiveDate, cycle_start: u32, cycle_end: u32) -> String {
    let past = previous_month(today);

    format!(
        "{} - {} {} to {} {}",
        past.format("%B %Y"),
        cycle_start,
        past.format("%B"),
        cycle_end,
        today.format("%B"),
    )
}

/// Build the memo a rule describes
pub fn memo_for_rule(rule: MemoRule, today: NaiveDate) -> String {
    match rule {
        MemoRule::NextMonth => next_month(today).format("%B %Y").to_string(),
        MemoRule::BillingCycle { start, end } => billing_cycle_memo(today, start, end),
        MemoRule::TwoBillingCycles { first, second } => {
            let first = billing_cycle_memo(today, first.0, first.1);
            let second = billing_cycle_memo(today, second.0, second.1);
            let tail = second
                .split_once("- ")
                .map(|(_, rest)| rest)
                .unwrap_or(second.as_str());
            format!("{} & {}", first, tail)
        }
    }
}

/// Payee for a shared expense category, or "" when the category is unknown
pub fn shared_expense_payee(category_name: &str) -> &'static str {
    ExpenseKind::from_category_name(category_name)
        .map(ExpenseKind::payee_name)
        .unwrap_or("")
}

/// Memo for a shared expense category, or "" when the category is unknown
pub fn shared_expense_memo(category_name: &str, today: NaiveDate) -> String {
    ExpenseKind::from_category_name(category_name)
        .map(|kind| memo_for_rule(kind.memo_rule(), today))
        .unwrap_or_default()
}

/// Payee name that makes the ledger record a transfer
pub fn transfer_payee(label: &str) -> String {
    format!("Transfer: {}", label)
}

/// Memo for the monthly individual share, e.g. `"January 2025 - Household Expenses"`
pub fn household_memo(today: NaiveDate, suffix: &str) -> String {
    format!("{} - {}", today.format("%B %Y"), suffix)
}
