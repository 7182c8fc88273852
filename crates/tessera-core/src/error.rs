use thiserror::Error;

use crate::models::RowError;

/// Application-wide error types.
///
/// This enum represents all possible errors that can occur while seeding a
/// catalog from a spreadsheet. It uses the `thiserror` crate for ergonomic
/// error handling and automatic conversion from underlying library errors.
///
/// # Error Conversion
///
/// - `serde_json::Error` → `AppError::SerializationError`
///
/// Storage and HTTP errors are converted by the crates that own those
/// dependencies (`tessera-sheet`, `tessera-client`), which keeps this crate
/// free of I/O libraries.
///
/// # Examples
///
/// ```no_run
/// use tessera_core::error::AppError;
///
/// fn example() -> Result<(), AppError> {
///     Err(AppError::ConfigError("no sheet configured".to_string()))
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Reading or writing the source table failed.
    ///
    /// Wraps I/O and CSV errors from the table store, including a missing
    /// file, a write to a row that does not exist, or a failed atomic rename.
    #[error("Sheet error: {0}")]
    SheetError(String),

    /// A data row could not be converted into a typed dataset row.
    ///
    /// `row` is the 1-based sheet row number (the header is row 1).
    #[error("Invalid row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: RowError,
    },

    /// HTTP client request failed.
    ///
    /// This error occurs when HTTP requests fail, or when the catalog answers
    /// with a body that is not a CKAN action envelope.
    #[error("API Client error: {0}")]
    ClientError(String),

    /// JSON serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Invalid CKAN portal URL provided.
    ///
    /// This error occurs when the configured catalog URL is malformed
    /// or cannot be used to construct valid API endpoints.
    #[error("Invalid CKAN portal URL: {0}")]
    InvalidPortalUrl(String),

    /// Configuration could not be loaded or is incomplete.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// API response contained no data.
    #[error("Empty response from API")]
    EmptyResponse,

    /// Network or connection error.
    ///
    /// This error occurs when a network request fails due to connectivity issues,
    /// DNS resolution failures, or the remote server being unreachable.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Request timeout.
    ///
    /// Only raised when a timeout has been configured; by default requests wait
    /// for the remote end indefinitely.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),
}

impl AppError {
    /// Returns a user-friendly error message suitable for CLI output.
    pub fn user_message(&self) -> String {
        match self {
            AppError::SheetError(msg) => {
                if msg.contains("No such file") || msg.contains("not found") {
                    format!(
                        "Cannot open the sheet: {}\n   Check the --sheet path or TESSERA_SHEET.",
                        msg
                    )
                } else {
                    format!("Sheet error: {}", msg)
                }
            }
            AppError::InvalidRow { row, source } => {
                format!(
                    "Row {} is malformed: {}\n   Each data row needs 16 columns, name first.",
                    row, source
                )
            }
            AppError::ClientError(msg) => {
                if msg.contains("timeout") || msg.contains("timed out") {
                    "Request timed out. The portal may be slow or unreachable.\n   Try again later or check the portal URL.".to_string()
                } else if msg.contains("connect") {
                    format!("Cannot connect to portal: {}\n   Check your internet connection and the portal URL.", msg)
                } else {
                    format!("API error: {}", msg)
                }
            }
            AppError::InvalidPortalUrl(url) => {
                format!(
                    "Invalid portal URL: {}\n   Example: https://www.odata.org.il",
                    url
                )
            }
            AppError::ConfigError(msg) => {
                format!(
                    "Configuration error: {}\n   Set it with a flag, an environment variable or the config file.",
                    msg
                )
            }
            AppError::NetworkError(msg) => {
                format!("Network error: {}\n   Check your internet connection.", msg)
            }
            AppError::Timeout(secs) => {
                format!("Request timed out after {} seconds.\n   Raise --timeout-secs or try again later.", secs)
            }
            AppError::EmptyResponse => {
                "The API returned no data. The portal may be temporarily unavailable.".to_string()
            }
            AppError::SerializationError(_) => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = AppError::ConfigError("no sheet configured".to_string());
        assert_eq!(err.to_string(), "Configuration error: no sheet configured");
    }

    #[test]
    fn test_empty_response_error() {
        let err = AppError::EmptyResponse;
        assert_eq!(err.to_string(), "Empty response from API");
    }

    #[test]
    fn test_invalid_row_display() {
        let err = AppError::InvalidRow {
            row: 4,
            source: RowError::MissingField("name"),
        };
        assert_eq!(err.to_string(), "Invalid row 4: missing required field 'name'");
    }

    #[test]
    fn test_invalid_row_exposes_source() {
        use std::error::Error as _;

        let err = AppError::InvalidRow {
            row: 2,
            source: RowError::TooFewColumns {
                expected: 16,
                found: 3,
            },
        };
        let source = err.source().expect("source should be set");
        assert!(source.to_string().contains("found 3"));
    }

    #[test]
    fn test_user_message_missing_sheet() {
        let err = AppError::SheetError("data.csv: No such file or directory".to_string());
        assert!(err.user_message().contains("--sheet"));
    }

    #[test]
    fn test_user_message_config() {
        let err = AppError::ConfigError("missing API key".to_string());
        let msg = err.user_message();
        assert!(msg.contains("missing API key"));
        assert!(msg.contains("environment variable"));
    }

    #[test]
    fn test_invalid_portal_url() {
        let err = AppError::InvalidPortalUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid CKAN portal URL"));
    }

    #[test]
    fn test_error_from_serde() {
        let json = "{ invalid json }";
        let result: Result<serde_json::Value, _> = serde_json::from_str(json);
        let serde_err = result.unwrap_err();
        let app_err: AppError = serde_err.into();
        assert!(matches!(app_err, AppError::SerializationError(_)));
    }

    #[test]
    fn test_timeout_error() {
        let err = AppError::Timeout(30);
        assert_eq!(err.to_string(), "Request timed out after 30 seconds");
    }
}
