//! CLI entry point for the Olist feature pipeline.
//!
//! Provides subcommands for inspecting the source tables, building the
//! per-order training table, and summarizing it.

use anyhow::Result;
use clap::{Parser, Subcommand};
use olist_features::config::{resolve_data_dir, resolve_with_distance};
use olist_features::data::{CsvDataSource, DataSource, TableName, Tables};
use olist_features::output::{print_json, write_csv};
use olist_features::stats::FrameSummary;
use olist_features::{PipelineOptions, TrainingSetAssembler};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "olist_features")]
#[command(about = "Builds a per-order feature table from the Olist marketplace tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the source tables and report their row counts
    Tables {
        /// Directory containing the source CSVs
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
    /// Build the training table
    Build {
        /// Directory containing the source CSVs
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Compute and join the seller-customer distance feature
        #[arg(long, default_value_t = false)]
        with_distance: bool,

        /// CSV file to write the training table to (logged as JSON if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Gzip compress the CSV output
        #[arg(long, default_value_t = false)]
        gzip: bool,
    },
    /// Print descriptive statistics of the training table as JSON
    Summary {
        /// Directory containing the source CSVs
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Compute and join the seller-customer distance feature
        #[arg(long, default_value_t = false)]
        with_distance: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/olist_features.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("olist_features.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Tables { data_dir } => {
            let tables = load_tables(data_dir)?;
            for table in TableName::ALL {
                info!(table = table.key(), rows = tables.row_count(table), "Table");
            }
        }
        Commands::Build {
            data_dir,
            with_distance,
            output,
            gzip,
        } => {
            let tables = load_tables(data_dir)?;
            let options = PipelineOptions::default().with_distance(resolve_with_distance(with_distance));
            let training = TrainingSetAssembler::new(&tables, options).training_data()?;

            match output {
                Some(path) => {
                    write_csv(&path, &training, gzip)?;
                    info!(path = %path.display(), rows = training.len(), "Training table written");
                }
                None => {
                    info!("No output file given, logging summary only");
                    print_json(&FrameSummary::from_frame(&training))?;
                }
            }
        }
        Commands::Summary {
            data_dir,
            with_distance,
        } => {
            let tables = load_tables(data_dir)?;
            let options = PipelineOptions::default().with_distance(resolve_with_distance(with_distance));
            let training = TrainingSetAssembler::new(&tables, options).training_data()?;

            println!(
                "{}",
                serde_json::to_string_pretty(&FrameSummary::from_frame(&training))?
            );
        }
    }

    Ok(())
}

/// Loads every source table from the resolved data directory.
#[tracing::instrument(skip(data_dir))]
fn load_tables(data_dir: Option<PathBuf>) -> Result<Tables> {
    let dir = resolve_data_dir(data_dir);
    info!(dir = %dir.display(), "Loading source tables");
    Ok(CsvDataSource::new(dir).load()?)
}
