use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::prelude::*;

use fiscal_score::{format_score, load_transactions, ScoreCalculator};

const USAGE: &str = "\
Usage: fiscal-score <FILE> [--initial-balance <AMOUNT>] [--format text|json] [--lenient]

  FILE                 Transactions as .csv (date,amount[,transaction_id]) or .json
  --initial-balance    Starting balance, default 0
  --format             Output format, default text
  --lenient            Skip date/amount validation

Log level is read from RUST_LOG (default: info).";

#[derive(Debug, Clone, Copy, PartialEq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug)]
struct Args {
    input: PathBuf,
    initial_balance: f64,
    format: OutputFormat,
    lenient: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<Args>> {
    let mut input = None;
    let mut initial_balance = 0.0;
    let mut format = OutputFormat::Text;
    let mut lenient = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--initial-balance" => {
                let value = args.next().context("--initial-balance requires a value")?;
                initial_balance = value
                    .parse()
                    .with_context(|| format!("Invalid initial balance '{}'", value))?;
            }
            "--format" => {
                format = match args.next().as_deref() {
                    Some("text") => OutputFormat::Text,
                    Some("json") => OutputFormat::Json,
                    other => bail!("Unknown output format {:?}", other),
                };
            }
            "--lenient" => lenient = true,
            flag if flag.starts_with("--") => bail!("Unknown option {}", flag),
            path => {
                if input.replace(PathBuf::from(path)).is_some() {
                    bail!("Only one input file may be given");
                }
            }
        }
    }

    let input = input.context("Missing input file")?;
    Ok(Some(Args {
        input,
        initial_balance,
        format,
        lenient,
    }))
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();

    let Some(args) = parse_args(env::args().skip(1))? else {
        println!("{USAGE}");
        return Ok(());
    };

    run(args)
}

fn run(args: Args) -> Result<()> {
    let transactions = load_transactions(&args.input)?;
    info!(count = transactions.len(), "loaded transactions from {}", args.input.display());

    let calculator = ScoreCalculator::new().with_strict(!args.lenient);
    let report = calculator
        .report(args.initial_balance, &transactions)
        .with_context(|| format!("Failed to score {}", args.input.display()))?;

    match args.format {
        OutputFormat::Text => {
            info!("{}", report.summary());
            println!("{}", format_score(report.score));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
