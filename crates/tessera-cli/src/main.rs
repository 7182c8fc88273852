use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use tessera_cli::preview::{build_records, render};
use tessera_cli::{Command, Config, PreviewFormat};
use tessera_client::CkanClient;
use tessera_core::{
    load_file_config, process_table, AppError, BatchSummary, RowOutcome, RunConfig, TableStore,
    UuidTokens,
};
use tessera_sheet::CsvSheet;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Setup logging (stderr to keep stdout clean for previews)
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    // Parse command line arguments
    let config = Config::parse();

    let file_config = load_file_config(config.config.as_deref()).map_err(friendly)?;
    let run_config = RunConfig::resolve(config.overrides(), file_config).map_err(friendly)?;

    match config.command {
        Command::Sync => sync(&run_config).await?,
        Command::Preview { format } => preview(&run_config, format)?,
    }

    Ok(())
}

/// Seed the catalog from the sheet
async fn sync(config: &RunConfig) -> anyhow::Result<()> {
    let api_key = config.require_api_key().map_err(friendly)?;

    let mut sheet = CsvSheet::open(&config.sheet).map_err(friendly)?;
    info!("Opened sheet: {}", sheet.path().display());

    info!("Target catalog: {}", config.catalog_url);
    let ckan = CkanClient::new(&config.catalog_url, api_key, &config.http)
        .context("Invalid CKAN portal URL")?;

    let summary = process_table(&mut sheet, &ckan, &mut UuidTokens)
        .await
        .map_err(friendly)?;

    print_summary(&summary);
    Ok(())
}

/// Print the payloads a sync would send
fn preview(config: &RunConfig, format: PreviewFormat) -> anyhow::Result<()> {
    let sheet = CsvSheet::open(&config.sheet).map_err(friendly)?;
    info!("Previewing sheet: {}", sheet.path().display());
    let rows = sheet.read_all().map_err(friendly)?;

    let (records, errors) = build_records(&rows, &mut UuidTokens);
    for err in &errors {
        warn!("{}", err);
    }

    print!("{}", render(&records, format)?);
    info!(
        "Preview complete: {} payloads, {} invalid rows",
        records.len(),
        errors.len()
    );
    Ok(())
}

fn print_summary(summary: &BatchSummary) {
    let stats = &summary.stats;
    println!("\nSync Summary\n");
    println!("  Rows processed:        {}", stats.total());
    println!("  Datasets created:      {}", stats.created);
    println!("  Rejected by catalog:   {}", stats.rejected);
    println!("  Failed locally:        {}", stats.failed);
    println!(
        "  Duration:              {:.1}s",
        summary.elapsed().num_milliseconds() as f64 / 1000.0
    );

    let created = summary.created_identifiers();
    if !created.is_empty() {
        println!("\n  Created:");
        for identifier in created {
            println!("    {}", identifier);
        }
    }

    let mut problems = summary.problems().peekable();
    if problems.peek().is_some() {
        println!("\n  Problems:");
        for report in problems {
            match &report.outcome {
                RowOutcome::Rejected {
                    identifier,
                    message,
                    ..
                } => println!("    row {}: {} rejected: {}", report.row, identifier, message),
                RowOutcome::Failed { error } => println!("    row {}: {}", report.row, error),
                RowOutcome::Created { .. } => {}
            }
        }
    }
    println!();
}

fn friendly(err: AppError) -> anyhow::Error {
    anyhow::anyhow!(err.user_message())
}
