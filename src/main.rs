use anyhow::{Context, Result};
use axum::Router;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use pulse_metrics::config::Config;
use pulse_metrics::logging;
use pulse_metrics::routes;
use pulse_metrics::services::pulse::{self, Pipeline};
use pulse_metrics::services::report;
use pulse_metrics::AppState;

#[derive(Debug, Parser)]
#[command(name = "pulse-metrics", about = "Weekly pulse spreadsheet metrics extractor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract the latest week and print the text report
    Report {
        /// Workbook path (falls back to PULSE_WORKBOOK)
        file: Option<PathBuf>,
    },
    /// Extract the latest week and append the snapshot sheet to the workbook
    Export {
        /// Workbook path (falls back to PULSE_WORKBOOK)
        file: Option<PathBuf>,
    },
    /// Serve the snapshot as JSON for the dashboard frontend
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    logging::init_logging()?;

    // Load configuration
    let config = Config::new()?;

    match cli.command {
        Commands::Report { file } => {
            let path = resolve_path(file, &config)?;
            let pipeline = Pipeline::new(config.header_row);
            let snapshot = pipeline.run(&path)?;
            print!("{}", report::render(&snapshot));
        }
        Commands::Export { file } => {
            let path = resolve_path(file, &config)?;
            let pipeline = Pipeline::new(config.header_row);
            let snapshot = pipeline.run(&path)?;
            pulse::write_snapshot(&snapshot, &path)?;
            println!(
                "Snapshot for week {} written to sheet {:?} in {}",
                snapshot.week_ending,
                pulse::SNAPSHOT_SHEET,
                path.display()
            );
        }
        Commands::Serve => serve(config).await?,
    }

    Ok(())
}

fn resolve_path(file: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    file.or_else(|| config.workbook.clone())
        .context("No workbook given: pass a file argument or set PULSE_WORKBOOK")
}

async fn serve(config: Config) -> Result<()> {
    let addr = config.bind_addr;

    // Build our application state
    let state = Arc::new(AppState::new(config));

    // Build our application with a route
    let app = Router::new()
        .merge(routes::routes())
        .with_state(state);

    // Run it
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
