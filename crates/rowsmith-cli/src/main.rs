use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use rowsmith_generate::{GenerateOptions, GenerationEngine, GenerationError};

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Generation(#[from] GenerationError),
}

#[derive(Parser, Debug)]
#[command(name = "rowsmith", version, about = "Generate random test data from value definitions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a dataset for one table.
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Table to generate data for; `<table>.vdef.json` must exist in
    /// the working directory or in the schema directory.
    #[arg(short, long)]
    table: String,
    /// Number of rows to generate.
    #[arg(short = 'n', long, default_value_t = 10)]
    rows: u64,
    /// Output path stem (default: `./<table>`).
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Write DynamoDB wire-format JSON instead of plain JSON.
    #[arg(short = 'd', long)]
    wire: bool,
    /// Also write the dataset to CSV.
    #[arg(short = 'c', long)]
    csv: bool,
    /// Do not link tables.
    #[arg(short = 'x', long)]
    no_link: bool,
    /// Seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
    /// Directory searched for value definition files.
    #[arg(long, env = "ROWSMITH_SCHEMA_DIR")]
    schema_dir: Option<PathBuf>,
    /// Directory searched for linked CSV datasets.
    #[arg(long, env = "ROWSMITH_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<(), CliError> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(args),
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let options = GenerateOptions {
        schema_dir: args.schema_dir,
        data_dir: args.data_dir,
        out: args.out,
        rows: args.rows,
        wire: args.wire,
        csv: args.csv,
        link: !args.no_link,
        seed: args.seed,
        ..GenerateOptions::default()
    };

    let engine = GenerationEngine::new(options);
    let report = engine.run(&args.table)?;

    let label = if args.wire { "DynamoDB JSON" } else { "JSON data" };
    println!("{label} written to: {}", report.json_path.display());
    if let Some(path) = &report.csv_path {
        println!("CSV data written to: {}", path.display());
    }
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
