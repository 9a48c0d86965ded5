// loomledger CLI - factory financials from fixture data

mod apply;
mod config;
mod exit_codes;
mod render;
mod report;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use exit_codes::{
    EXIT_ERROR, EXIT_INVALID_CONFIG, EXIT_INVALID_FIXTURES, EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "loom")]
#[command(about = "Textile factory financials: revenue, expenses, drift checks, alerts")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Inputs shared by every reporting command.
#[derive(Args, Clone)]
pub struct InputArgs {
    /// Fixture document (JSON). Omit to use the built-in dataset.
    #[arg(long, env = "LOOM_FIXTURES")]
    pub fixtures: Option<PathBuf>,

    /// Finance config (TOML). Falls back to the user config dir, then defaults.
    #[arg(long, env = "LOOM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Reference date for overdue and monthly windows (YYYY-MM-DD, default today)
    #[arg(long, value_name = "DATE")]
    pub as_of: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the financial summary
    #[command(after_help = "\
Examples:
  loom summary
  loom summary --fixtures factory.json --as-of 2026-10-19
  loom summary --json | jq .net_profit")]
    Summary {
        #[command(flatten)]
        input: InputArgs,

        /// Output JSON to stdout instead of a human summary
        #[arg(long)]
        json: bool,
    },

    /// Compare computed totals against curated reference totals
    #[command(after_help = "\
Exit code 0 when consistent, 3 when any metric drifts.

Examples:
  loom check
  loom check --fixtures factory.json --reference dashboard.json
  loom check --json")]
    Check {
        #[command(flatten)]
        input: InputArgs,

        /// Reference totals (JSON or TOML with revenue/expenses/profit).
        /// Defaults to the `reference` block of the fixture document.
        #[arg(long)]
        reference: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Export the financial summary as CSV
    #[command(after_help = "\
Examples:
  loom export
  loom export -o summary.csv --as-of 2026-10-19")]
    Export {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List overdue invoices, low stock and unpaid salaries
    Alerts {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long)]
        json: bool,
    },

    /// Operational report (inventory, orders, payroll)
    Report {
        #[arg(value_enum)]
        kind: ReportKind,

        #[command(flatten)]
        input: InputArgs,

        #[arg(long)]
        json: bool,
    },

    /// Apply a batch of typed commands (payments, restocks, orders)
    #[command(after_help = "\
The batch is a JSON array of tagged commands:
  [{\"command\": \"record_payment\", \"invoice_id\": \"INV-2026-002\", \"amount\": 5000}]

Examples:
  loom apply batch.json
  loom apply batch.json --fixtures factory.json --write factory.json")]
    Apply {
        /// JSON file with the command batch
        commands: PathBuf,

        #[command(flatten)]
        input: InputArgs,

        /// Write the resulting fixture document here
        #[arg(long)]
        write: Option<PathBuf>,

        /// Stop at the first rejected command
        #[arg(long)]
        fail_fast: bool,

        #[arg(long)]
        json: bool,
    },

    /// Print the built-in dataset as a fixture document
    Fixtures,

    /// Finance config helpers
    #[command(subcommand)]
    Config(config::ConfigCommands),
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    Inventory,
    Orders,
    Payroll,
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("LOOM_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    // Logs go to stderr so --json stdout stays a single value.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        None => {
            // No subcommand = show help
            eprintln!("Usage: loom <command> [options]");
            eprintln!("       loom --help for more information");
            Ok(())
        }
        Some(Commands::Summary { input, json }) => report::cmd_summary(input, json),
        Some(Commands::Check { input, reference, json }) => report::cmd_check(input, reference, json),
        Some(Commands::Export { input, output }) => report::cmd_export(input, output),
        Some(Commands::Alerts { input, json }) => report::cmd_alerts(input, json),
        Some(Commands::Report { kind, input, json }) => report::cmd_report(kind, input, json),
        Some(Commands::Apply { commands, input, write, fail_fast, json }) => {
            apply::cmd_apply(commands, input, write, fail_fast, json)
        }
        Some(Commands::Fixtures) => report::cmd_fixtures(),
        Some(Commands::Config(cmd)) => config::cmd_config(cmd),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::new(EXIT_ERROR, msg)
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn fixtures(err: loomledger_core::FixtureError) -> Self {
        Self::new(EXIT_INVALID_FIXTURES, err.to_string())
    }

    pub fn config(err: loomledger_finance::FinanceError) -> Self {
        Self::new(EXIT_INVALID_CONFIG, err.to_string())
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
