//! Configuration types for Tessera components.
//!
//! Settings are resolved CLI flag → environment variable → config file →
//! default. The first two are handled by clap in `tessera-cli`; this module
//! owns the TOML config file and the final merge.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::AppError;

/// Catalog used when nothing else is configured.
pub const DEFAULT_CATALOG_URL: &str = "https://www.odata.org.il";

/// Returns the default config file location, `<config_dir>/tessera/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tessera").join("config.toml"))
}

/// Contents of the TOML config file. Every key is optional.
///
/// ```toml
/// sheet = "datasets.csv"
/// catalog_url = "https://demo.ckan.org"
/// api_key = "xxxxxxxx-xxxx"
/// timeout_secs = 60
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub sheet: Option<PathBuf>,
    pub catalog_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Loads the config file.
///
/// With `path = None` the default location is tried and a missing file is
/// not an error. An explicitly given path must exist.
pub fn load_file_config(path: Option<&Path>) -> Result<FileConfig, AppError> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => match default_config_path() {
            Some(p) => (p, false),
            None => return Ok(FileConfig::default()),
        },
    };

    if !explicit && !path.exists() {
        return Ok(FileConfig::default());
    }

    let content = std::fs::read_to_string(&path).map_err(|e| {
        AppError::ConfigError(format!("cannot read {}: {}", path.display(), e))
    })?;

    toml::from_str(&content)
        .map_err(|e| AppError::ConfigError(format!("invalid {}: {}", path.display(), e)))
}

/// HTTP client configuration for the catalog API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Request timeout. `None` waits for the remote end indefinitely.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: concat!("Tessera/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Fully resolved settings for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub sheet: PathBuf,
    pub catalog_url: String,
    pub api_key: Option<String>,
    pub http: HttpConfig,
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub sheet: Option<PathBuf>,
    pub catalog_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl RunConfig {
    /// Merges `overrides` over `file`, falling back to defaults.
    pub fn resolve(overrides: Overrides, file: FileConfig) -> Result<Self, AppError> {
        let sheet = overrides.sheet.or(file.sheet).ok_or_else(|| {
            AppError::ConfigError("no sheet configured (--sheet or TESSERA_SHEET)".to_string())
        })?;

        let timeout = overrides
            .timeout_secs
            .or(file.timeout_secs)
            .map(Duration::from_secs);

        Ok(Self {
            sheet,
            catalog_url: overrides
                .catalog_url
                .or(file.catalog_url)
                .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string()),
            api_key: overrides.api_key.or(file.api_key),
            http: HttpConfig {
                timeout,
                ..HttpConfig::default()
            },
        })
    }

    /// Returns the API key, or an error when none was configured.
    pub fn require_api_key(&self) -> Result<&str, AppError> {
        self.api_key.as_deref().filter(|k| !k.is_empty()).ok_or_else(|| {
            AppError::ConfigError("no API key configured (--api-key or CKAN_API_KEY)".to_string())
        })
    }
}
