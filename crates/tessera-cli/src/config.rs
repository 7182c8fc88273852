use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tessera_core::config::Overrides;

/// CLI configuration parsed from command line arguments and environment variables
#[derive(Parser, Debug)]
#[command(name = "tessera")]
#[command(
    author,
    version,
    about = "Create CKAN datasets from the rows of a spreadsheet"
)]
#[command(after_help = "Examples:
  tessera --sheet datasets.csv preview
  tessera --sheet datasets.csv --api-key $KEY sync
  CKAN_URL=https://demo.ckan.org tessera sync")]
pub struct Config {
    /// CSV sheet with a header row and one dataset per data row
    #[arg(long, env = "TESSERA_SHEET", global = true)]
    pub sheet: Option<PathBuf>,

    /// Base URL of the CKAN portal
    #[arg(long, env = "CKAN_URL", global = true)]
    pub catalog_url: Option<String>,

    /// CKAN API token, sent in the Authorization header
    #[arg(long, env = "CKAN_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Request timeout in seconds (default: no timeout)
    #[arg(long, env = "CKAN_TIMEOUT", global = true)]
    pub timeout_secs: Option<u64>,

    /// Path to a config.toml (default: <config dir>/tessera/config.toml)
    #[arg(short, long, env = "TESSERA_CONFIG", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Config {
    /// Settings given on the command line or in the environment.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            sheet: self.sheet.clone(),
            catalog_url: self.catalog_url.clone(),
            api_key: self.api_key.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create one CKAN dataset per sheet row, renaming each row in place
    #[command(after_help = "Each processed row's name cell is overwritten with the generated
identifier. Runs are not idempotent: running again creates new datasets
with new identifiers, even for rows a previous run already handled.")]
    Sync,
    /// Print the payloads a sync would send, without touching sheet or portal
    #[command(after_help = "Example: tessera --sheet datasets.csv preview --format json > payloads.json")]
    Preview {
        /// Output format for the payloads
        #[arg(short, long, default_value = "jsonl")]
        format: PreviewFormat,
    },
}

/// Supported preview formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PreviewFormat {
    /// JSON Lines format (one JSON object per line)
    Jsonl,
    /// Standard JSON array format
    Json,
}
