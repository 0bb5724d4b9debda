//! CLI commands that talk to the ledger
//!
//! Every command here bootstraps both catalogs from the ledger first.

use std::fs::File;
use std::io::{BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;
use zeroize::Zeroizing;

use super::input::{AmountArgs, SharedInput};
use super::{ExportFormat, LedgerArgs};
use crate::config::{ExpensesPaths, Settings};
use crate::display::format_plan;
use crate::error::{ExpensesError, ExpensesResult};
use crate::export::{export_plan_csv, export_plan_json};
use crate::ledger::{LedgerService, YnabClient};
use crate::models::{CatalogPair, CatalogValidationError, ExpenseCatalog};
use crate::services::{ExpensesManager, SubmissionReport, TransactionPlan};

/// Options for the `plan` command
#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[command(flatten)]
    pub amounts: AmountArgs,

    /// Write the plan in this format instead of printing it
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Output file (default: the exports directory)
    #[arg(short, long, requires = "format")]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Open a ledger client, asking for the token if none is configured
pub fn connect(settings: &Settings, token: Option<&str>) -> ExpensesResult<YnabClient> {
    let token = match settings.resolve_token(token) {
        Some(token) => token,
        None => prompt_token()?,
    };
    YnabClient::new(&settings.base_url, token)
}

fn prompt_token() -> ExpensesResult<Zeroizing<String>> {
    if !std::io::stdin().is_terminal() {
        return Err(ExpensesError::Config(
            "No access token. Use --token, YNAB_ACCESS_TOKEN or the settings file".into(),
        ));
    }

    let token = Zeroizing::new(rpassword::prompt_password("YNAB access token: ")?);
    if token.trim().is_empty() {
        return Err(ExpensesError::Config("Access token cannot be empty".into()));
    }
    Ok(Zeroizing::new(token.trim().to_string()))
}

fn bootstrap(settings: &Settings, args: &LedgerArgs) -> ExpensesResult<ExpensesManager<YnabClient>> {
    let client = connect(settings, args.token.as_deref())?;
    ExpensesManager::bootstrap(client, settings.clone(), args.today())
}

/// Feed the shared amounts to the manager and split them
fn split_input<L: LedgerService>(
    manager: &mut ExpensesManager<L>,
    args: &AmountArgs,
) -> ExpensesResult<()> {
    let mut rng = args.rng();
    match args.load()? {
        SharedInput::Payload(payload) => {
            manager.accept_shared_input(&payload, &mut rng)?;
        }
        SharedInput::Amounts(amounts) => {
            manager.accept_amounts(&amounts, &mut rng)?;
        }
    }
    Ok(())
}

fn describe_catalog(side: &str, catalog: &ExpenseCatalog) {
    let budget = catalog
        .budget_id
        .map(|id| id.short())
        .unwrap_or_else(|| "not found".into());
    let account = catalog
        .account_id
        .map(|id| id.short())
        .unwrap_or_else(|| "not found".into());
    println!(
        "{:12} budget {:10} account {:10} {} categories",
        side,
        budget,
        account,
        catalog.len()
    );
}

/// Bootstrap and report whether both catalogs are ready
pub fn handle_status_command(settings: &Settings, args: &LedgerArgs) -> ExpensesResult<()> {
    let manager = bootstrap(settings, args)?;
    describe_catalog("Shared", manager.shared_catalog());
    describe_catalog("Individual", manager.individual_catalog());

    if manager.is_ready() {
        println!("\nReady to submit.");
        return Ok(());
    }

    println!("\nNot ready:");
    let sides = [
        (
            "Shared",
            manager.shared_catalog(),
            &settings.shared_budget,
            &settings.shared_account,
        ),
        (
            "Individual",
            manager.individual_catalog(),
            &settings.individual_budget,
            &settings.individual_account,
        ),
    ];
    for (side, catalog, budget, account) in sides {
        if let Some(problem) = catalog_problem(catalog, budget, account) {
            println!("  {}: {}", side, problem);
        }
    }
    Ok(())
}

/// Why a catalog cannot be submitted, naming what was looked for
fn catalog_problem(catalog: &ExpenseCatalog, budget: &str, account: &str) -> Option<String> {
    let problem = match catalog.validate().err()? {
        CatalogValidationError::MissingBudget => format!("no budget name contains '{}'", budget),
        CatalogValidationError::MissingAccount => format!("no open account named '{}'", account),
        other => other.to_string(),
    };
    Some(problem)
}

/// List the categories found in both budgets
pub fn handle_categories_command(settings: &Settings, args: &LedgerArgs) -> ExpensesResult<()> {
    let manager = bootstrap(settings, args)?;
    for (side, catalog) in [
        ("Shared", manager.shared_catalog()),
        ("Individual", manager.individual_catalog()),
    ] {
        println!("{} budget:", side);
        if catalog.is_empty() {
            println!("  (no categories)");
        }
        for (name, expense) in &catalog.expenses {
            let id = expense
                .category_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".into());
            println!("  {:28} {}", name, id);
        }
        println!();
    }
    Ok(())
}

fn write_plan(
    plan: &TransactionPlan,
    pair: &CatalogPair,
    format: ExportFormat,
    path: &Path,
    pretty: bool,
) -> ExpensesResult<()> {
    let file = File::create(path)
        .map_err(|e| ExpensesError::Export(format!("Failed to create {}: {}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);
    match format {
        ExportFormat::Json => export_plan_json(plan, pair, &mut writer, pretty)?,
        ExportFormat::Csv => export_plan_csv(plan, pair, &mut writer)?,
    }
    writer
        .flush()
        .map_err(|e| ExpensesError::Export(e.to_string()))
}

/// Split the amounts and show or export the transactions without posting them
pub fn handle_plan_command(
    paths: &ExpensesPaths,
    settings: &Settings,
    ledger: &LedgerArgs,
    args: &PlanArgs,
) -> ExpensesResult<()> {
    let mut manager = bootstrap(settings, ledger)?;
    split_input(&mut manager, &args.amounts)?;
    let plan = manager.plan()?;

    let Some(format) = args.format else {
        print!("{}", format_plan(&plan, manager.pair(), &settings.currency_symbol));
        return Ok(());
    };

    let path = match &args.output {
        Some(path) => path.clone(),
        None => {
            paths.ensure_directories()?;
            let extension = match format {
                ExportFormat::Json => "json",
                ExportFormat::Csv => "csv",
            };
            paths
                .export_dir()
                .join(format!("plan-{}.{}", ledger.today().format("%Y-%m"), extension))
        }
    };

    write_plan(&plan, manager.pair(), format, &path, args.pretty)?;
    info!(path = %path.display(), "plan exported");
    println!("Plan written to {}", path.display());
    Ok(())
}

/// Split the amounts and post every transaction
pub fn handle_submit_command(
    settings: &Settings,
    ledger: &LedgerArgs,
    amounts: &AmountArgs,
) -> ExpensesResult<SubmissionReport> {
    let mut manager = bootstrap(settings, ledger)?;
    split_input(&mut manager, amounts)?;
    let report = manager.submit_with_report()?;

    println!("Shared transactions created: {}", report.shared_created);
    println!(
        "Individual transaction created: {}",
        if report.individual_created { "yes" } else { "no" }
    );
    for failure in &report.failures {
        println!("Failed: {}", failure);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::fake::FakeLedger;
    use crate::services::bootstrap::bootstrap_catalogs;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn manager(ledger: &FakeLedger) -> ExpensesManager<&FakeLedger> {
        let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        let settings = Settings::default();
        let pair = bootstrap_catalogs(ledger, &settings, today).unwrap();
        ExpensesManager::with_pair(ledger, settings, today, pair)
    }

    fn amount_args() -> AmountArgs {
        AmountArgs {
            amounts: vec![
                "Condominium=245.75".into(),
                "Electricity=130.52".into(),
                "TV / Internet / Phone=85.90".into(),
                "Water=60.25".into(),
            ],
            input: None,
            seed: Some(7),
        }
    }

    #[test]
    fn test_split_input_fills_individual_catalog() {
        let ledger = FakeLedger::household();
        let mut manager = manager(&ledger);
        split_input(&mut manager, &amount_args()).unwrap();

        assert_eq!(manager.shared_catalog().total().to_string(), "522.42");
        assert!(manager.is_ready());
    }

    #[test]
    fn test_split_input_rejects_unknown_category() {
        let ledger = FakeLedger::household();
        let mut manager = manager(&ledger);
        let args = AmountArgs {
            amounts: vec!["Gas=10".into()],
            ..AmountArgs::default()
        };
        assert!(split_input(&mut manager, &args).is_err());
    }

    #[test]
    fn test_write_plan_csv() {
        let ledger = FakeLedger::household();
        let mut manager = manager(&ledger);
        split_input(&mut manager, &amount_args()).unwrap();
        let plan = manager.plan().unwrap();

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.csv");
        write_plan(&plan, manager.pair(), ExportFormat::Csv, &path, false).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("row,parent,budget"));
        assert!(contents.contains("Loja do Condomínio"));
    }

    #[test]
    fn test_catalog_problem_names_missing_budget() {
        let problem = catalog_problem(&ExpenseCatalog::default(), "Casa", "CGD").unwrap();
        assert_eq!(problem, "no budget name contains 'Casa'");

        let ledger = FakeLedger::household();
        let manager = manager(&ledger);
        assert!(catalog_problem(manager.shared_catalog(), "Casa", "Millennium bcp").is_none());
    }

    #[test]
    fn test_connect_with_explicit_token() {
        let client = connect(&Settings::default(), Some("secret")).unwrap();
        assert!(!format!("{:?}", client).contains("secret"));
    }
}
