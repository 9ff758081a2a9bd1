// tallybook CLI - ledger bookkeeping operations from the shell

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use tallybook_cli::classifier::HttpClassifier;
use tallybook_cli::exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};
use tallybook_cli::report::ReportKind;
use tallybook_cli::{import, ledger, reconcile, report, validate};
use tallybook_recon::{Classifier, ReconConfig};

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Small-business ledger bookkeeping (statements in, reports out)")]
#[command(version)]
struct Cli {
    /// Ledger file (local JSON book)
    #[arg(long, global = true, default_value = "ledger.json")]
    ledger: PathBuf,

    /// Reconciliation config (TOML); defaults apply when absent
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// External classifier endpoint for category suggestions
    #[arg(long, global = true, env = "TALLY_CLASSIFIER_URL")]
    classifier_url: Option<String>,

    /// Machine-readable JSON output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a statement file into the ledger, skipping duplicates
    Import {
        /// Statement file (xlsx/xls/csv)
        file: PathBuf,

        /// Sheet index for workbook files (heuristic pick when omitted)
        #[arg(long)]
        sheet: Option<usize>,

        /// Write the new rows; default is a dry run
        #[arg(long)]
        apply: bool,
    },

    /// Match a statement file against the ledger
    Reconcile {
        /// Statement file (xlsx/xls/csv)
        file: PathBuf,

        #[arg(long)]
        sheet: Option<usize>,

        /// Append unmatched lines as new transactions
        #[arg(long)]
        apply: bool,
    },

    /// Print a financial statement or analysis as JSON
    Report {
        kind: ReportKind,

        /// Period start (income/cashflow); ledger span when omitted
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Period end (income/cashflow); ledger span when omitted
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Reference date (balance/aging); today when omitted
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Check stored order costs against recomputation
    ValidateCosts,
}

fn load_config(path: Option<&PathBuf>) -> Result<ReconConfig, String> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            ReconConfig::from_toml(&content).map_err(|e| e.to_string())
        }
        None => Ok(ReconConfig::default()),
    }
}

fn run(cli: Cli) -> Result<u8, String> {
    let config = load_config(cli.config.as_ref())?;
    let mut store = ledger::open_store(&cli.ledger)?;

    let http_classifier = match cli.classifier_url {
        Some(url) => Some(HttpClassifier::new(url)?),
        None => None,
    };
    let classifier: Option<&dyn Classifier> =
        http_classifier.as_ref().map(|c| c as &dyn Classifier);

    match cli.command {
        Commands::Import { file, sheet, apply } => {
            import::run(
                &file,
                sheet,
                &config,
                &mut store,
                &cli.ledger,
                classifier,
                apply,
                cli.json,
            )?;
            Ok(EXIT_SUCCESS)
        }
        Commands::Reconcile { file, sheet, apply } => {
            reconcile::run(
                &file,
                sheet,
                &config,
                &mut store,
                &cli.ledger,
                classifier,
                apply,
                cli.json,
            )?;
            Ok(EXIT_SUCCESS)
        }
        Commands::Report { kind, from, to, as_of } => {
            report::run(kind, &store, &config, from, to, as_of)?;
            Ok(EXIT_SUCCESS)
        }
        Commands::ValidateCosts => validate::run(&store, cli.json),
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap prints its own message; keep its usage/help distinction
            let _ = err.print();
            return ExitCode::from(if err.use_stderr() { EXIT_USAGE } else { EXIT_SUCCESS });
        }
    };

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
