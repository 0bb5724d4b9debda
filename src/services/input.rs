//! Shared-expense input coercion
//!
//! Amounts arrive in three shapes: a loosely-typed JSON catalog (as a UI
//! would send it, amounts as strings or numbers), CSV `category,amount`
//! rows, and `NAME=AMOUNT` pairs from the command line.

use std::collections::BTreeMap;
use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde_json::{Map, Value};

use crate::error::{ExpensesError, ExpensesResult};
use crate::models::{AccountId, BudgetId, CategoryId, Expense, ExpenseCatalog, Money};

/// Amounts keyed by category name
pub type AmountTable = BTreeMap<String, Money>;

fn invalid(message: impl Into<String>) -> ExpensesError {
    ExpensesError::Validation(message.into())
}

/// Reject amounts the ledger cannot represent in milliunits
fn in_ledger_range(amount: Money, context: &str) -> ExpensesResult<Money> {
    match amount.to_milliunits() {
        Some(_) => Ok(amount),
        None => Err(invalid(format!("Amount for '{}' is out of range: {}", context, amount))),
    }
}

/// Coerce a JSON amount; strings are parsed as decimals, null means zero
fn coerce_amount(category: &str, value: Option<&Value>) -> ExpensesResult<Money> {
    let text = match value {
        None | Some(Value::Null) => return Ok(Money::zero()),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => {
            return Err(invalid(format!(
                "Amount for '{}' must be a string or a number, got {}",
                category, other
            )))
        }
    };

    let amount = Money::parse(&text)
        .map_err(|e| invalid(format!("Amount for '{}' is not a decimal: {}", category, e)))?;
    in_ledger_range(amount, category)
}

fn optional_string(object: &Map<String, Value>, key: &str) -> ExpensesResult<Option<String>> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(invalid(format!("Field '{}' must be a string, got {}", key, other))),
    }
}

fn optional_id<T: std::str::FromStr>(
    object: &Map<String, Value>,
    key: &str,
) -> ExpensesResult<Option<T>> {
    optional_string(object, key)?
        .map(|s| {
            s.parse()
                .map_err(|_| invalid(format!("Field '{}' is not a valid id: {}", key, s)))
        })
        .transpose()
}

/// Build a catalog from a loosely-typed JSON payload
///
/// ```json
/// {"budget_id": "...", "account_id": "...",
///  "expenses": {"Water": {"category_id": "...", "payee_name": "EPAL", "amount": "60.25"}}}
/// ```
///
/// Empty ids are treated as absent.
pub fn catalog_from_value(payload: &Value) -> ExpensesResult<ExpenseCatalog> {
    let object = payload
        .as_object()
        .ok_or_else(|| invalid("Expense payload must be a JSON object"))?;

    let mut catalog = ExpenseCatalog::new(
        optional_id::<BudgetId>(object, "budget_id")?,
        optional_id::<AccountId>(object, "account_id")?,
    );

    let expenses = match object.get("expenses") {
        None | Some(Value::Null) => return Ok(catalog),
        Some(Value::Object(expenses)) => expenses,
        Some(_) => return Err(invalid("Field 'expenses' must be an object")),
    };

    for (name, entry) in expenses {
        let entry = entry
            .as_object()
            .ok_or_else(|| invalid(format!("Expense '{}' must be an object", name)))?;

        catalog.insert(
            name.clone(),
            Expense {
                category_id: optional_id::<CategoryId>(entry, "category_id")?,
                payee_name: optional_string(entry, "payee_name")?,
                amount: coerce_amount(name, entry.get("amount"))?,
                memo: optional_string(entry, "memo")?,
            },
        );
    }

    Ok(catalog)
}

/// Parse a JSON document into a catalog
pub fn catalog_from_json(text: &str) -> ExpensesResult<ExpenseCatalog> {
    let payload: Value = serde_json::from_str(text)?;
    catalog_from_value(&payload)
}

fn is_header(record: &StringRecord) -> bool {
    record
        .get(1)
        .map(|amount| Money::parse(amount).is_err())
        .unwrap_or(false)
}

/// Read `category,amount` rows; a leading header row is skipped
pub fn amounts_from_csv<R: Read>(reader: R) -> ExpensesResult<AmountTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut amounts = AmountTable::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        if record.iter().all(str::is_empty) || (idx == 0 && is_header(&record)) {
            continue;
        }

        let (name, amount) = match (record.get(0), record.get(1)) {
            (Some(name), Some(amount)) if !name.is_empty() => (name, amount),
            _ => return Err(invalid(format!("Row {} needs a category and an amount", idx + 1))),
        };
        let amount = Money::parse(amount)
            .map_err(|e| invalid(format!("Row {}: {}", idx + 1, e)))?;
        let amount = in_ledger_range(amount, name)?;
        insert_unique(&mut amounts, name, amount)?;
    }

    Ok(amounts)
}

/// Parse `NAME=AMOUNT` pairs
pub fn amounts_from_pairs<S: AsRef<str>>(pairs: &[S]) -> ExpensesResult<AmountTable> {
    let mut amounts = AmountTable::new();
    for pair in pairs {
        let pair = pair.as_ref();
        let (name, amount) = pair
            .rsplit_once('=')
            .ok_or_else(|| invalid(format!("Expected NAME=AMOUNT, got '{}'", pair)))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid(format!("Missing category name in '{}'", pair)));
        }
        let amount =
            Money::parse(amount).map_err(|e| invalid(format!("'{}': {}", pair, e)))?;
        let amount = in_ledger_range(amount, name)?;
        insert_unique(&mut amounts, name, amount)?;
    }
    Ok(amounts)
}

fn insert_unique(amounts: &mut AmountTable, name: &str, amount: Money) -> ExpensesResult<()> {
    if amounts.insert(name.to_string(), amount).is_some() {
        return Err(invalid(format!("Category '{}' is given more than once", name)));
    }
    Ok(())
}

/// Fill a catalog's amounts from a table
///
/// Every category of `template` needs an amount, and every amount must name
/// a category of `template`.
pub fn apply_amounts(template: &ExpenseCatalog, amounts: &AmountTable) -> ExpensesResult<ExpenseCatalog> {
    if let Some(unknown) = amounts.keys().find(|name| template.get(name).is_none()) {
        return Err(ExpensesError::category_missing(unknown.as_str(), "shared"));
    }

    let missing: Vec<&str> = template
        .category_names()
        .filter(|name| !amounts.contains_key(*name))
        .collect();
    if !missing.is_empty() {
        return Err(invalid(format!("No amount given for: {}", missing.join(", "))));
    }

    let mut catalog = template.clone();
    for (name, expense) in catalog.expenses.iter_mut() {
        if let Some(amount) = amounts.get(name) {
            expense.amount = *amount;
        }
    }
    Ok(catalog)
}
