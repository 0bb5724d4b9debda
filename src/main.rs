use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use monthly_expenses::cli::{
    handle_categories_command, handle_config_command, handle_plan_command, handle_split_command,
    handle_status_command, handle_submit_command, resolve_date, AmountArgs, LedgerArgs, PlanArgs,
};
use monthly_expenses::config::{ExpensesPaths, Settings};

#[derive(Parser)]
#[command(
    name = "monthly-expenses",
    version,
    about = "Split shared monthly expenses and post them to YNAB",
    long_about = "monthly-expenses splits each shared household expense in half, \
                  alternating who absorbs the odd cent, and posts the resulting \
                  transactions to the shared and individual YNAB budgets."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that budgets, accounts and categories can be found
    Status(LedgerArgs),

    /// List the monthly expense categories of both budgets
    Categories(LedgerArgs),

    /// Split shared amounts without contacting the ledger
    Split {
        #[command(flatten)]
        amounts: AmountArgs,

        /// Date used for memos (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<chrono::NaiveDate>,
    },

    /// Show or export the transactions a submission would post
    Plan {
        #[command(flatten)]
        ledger: LedgerArgs,

        #[command(flatten)]
        plan: PlanArgs,
    },

    /// Split shared amounts and post the transactions
    Submit {
        #[command(flatten)]
        ledger: LedgerArgs,

        #[command(flatten)]
        amounts: AmountArgs,
    },

    /// Write a settings file with the defaults
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("monthly_expenses=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = ExpensesPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Status(args)) => handle_status_command(&settings, &args)?,
        Some(Commands::Categories(args)) => handle_categories_command(&settings, &args)?,
        Some(Commands::Split { amounts, date }) => {
            handle_split_command(&settings, &amounts, resolve_date(date))?
        }
        Some(Commands::Plan { ledger, plan }) => {
            handle_plan_command(&paths, &settings, &ledger, &plan)?
        }
        Some(Commands::Submit { ledger, amounts }) => {
            let report = handle_submit_command(&settings, &ledger, &amounts)?;
            if !report.succeeded() {
                bail!("{} of 2 ledger calls failed", report.failures.len());
            }
        }
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!("Settings already exist at: {}", paths.settings_file().display());
            } else {
                settings.save(&paths)?;
                println!("Settings written to: {}", paths.settings_file().display());
            }
        }
        Some(Commands::Config) => handle_config_command(&paths, &settings)?,
        None => {
            println!("monthly-expenses - split shared expenses and post them to YNAB");
            println!();
            println!("Run 'monthly-expenses --help' for usage information.");
        }
    }

    Ok(())
}
