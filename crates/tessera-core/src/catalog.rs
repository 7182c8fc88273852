//! The remote catalog as seen by the row processor.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;
use crate::models::DatasetRecord;

/// Envelope of every CKAN action API response.
///
/// CKAN API reference: <https://docs.ckan.org/en/2.9/api/>
///
/// ```json
/// { "success": false, "error": { "message": "Validation Error", "__type": "Validation Error" } }
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl ActionResponse {
    /// The `error.message` string, if the catalog sent one.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref()?.get("message")?.as_str()
    }
}

/// Creates datasets in a remote catalog.
///
/// A returned `Ok` means the catalog answered with a well-formed envelope,
/// whatever its `success` flag or HTTP status. `Err` is reserved for
/// transport and decoding failures.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn package_create(&self, record: &DatasetRecord) -> Result<ActionResponse, AppError>;
}
