use async_trait::async_trait;
use reqwest::{header, Client};
use tessera_core::catalog::{ActionResponse, CatalogApi};
use tessera_core::config::HttpConfig;
use tessera_core::error::AppError;
use tessera_core::models::DatasetRecord;
use tracing::debug;
use url::Url;

/// Longest slice of an unparsable body quoted in an error.
const BODY_SNIPPET_LEN: usize = 200;

/// HTTP client for the write side of a CKAN portal's action API.
///
/// CKAN (Comprehensive Knowledge Archive Network) is an open-source data management
/// system used by many government open data portals worldwide.
///
/// Every call is a single attempt: there is no retry, and a timeout only
/// applies when one is set in [`HttpConfig`].
///
/// # Examples
///
/// ```no_run
/// use tessera_client::CkanClient;
/// use tessera_core::{CatalogApi, HttpConfig};
///
/// # async fn example(record: tessera_core::DatasetRecord) -> Result<(), Box<dyn std::error::Error>> {
/// let client = CkanClient::new("https://demo.ckan.org", "my-api-key", &HttpConfig::default())?;
/// let response = client.package_create(&record).await?;
/// println!("created: {}", response.success);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CkanClient {
    client: Client,
    base_url: Url,
    api_key: String,
    timeout_secs: Option<u64>,
}

impl CkanClient {
    /// Creates a new CKAN client for the specified portal.
    ///
    /// # Arguments
    ///
    /// * `base_url_str` - The base URL of the CKAN portal, possibly with a path prefix
    /// * `api_key` - Token sent verbatim in the `Authorization` header
    /// * `http` - Timeout and user agent settings
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidPortalUrl` if the URL is invalid or malformed.
    /// Returns `AppError::ClientError` if the HTTP client cannot be built.
    pub fn new(base_url_str: &str, api_key: &str, http: &HttpConfig) -> Result<Self, AppError> {
        let mut base_url = Url::parse(base_url_str)
            .map_err(|_| AppError::InvalidPortalUrl(base_url_str.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::InvalidPortalUrl(base_url_str.to_string()));
        }
        // A trailing slash keeps `join` from dropping the last path segment.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder().user_agent(http.user_agent.as_str());
        if let Some(timeout) = http.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::ClientError(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_string(),
            timeout_secs: http.timeout.map(|t| t.as_secs()),
        })
    }

    fn action_url(&self, action: &str) -> Result<Url, AppError> {
        self.base_url
            .join(&format!("api/3/action/{}", action))
            .map_err(|e| AppError::InvalidPortalUrl(e.to_string()))
    }

    fn map_send_error(&self, e: reqwest::Error) -> AppError {
        if e.is_timeout() {
            AppError::Timeout(self.timeout_secs.unwrap_or_default())
        } else if e.is_connect() {
            AppError::NetworkError(format!("Connection failed: {}", e))
        } else {
            AppError::ClientError(e.to_string())
        }
    }
}

#[async_trait]
impl CatalogApi for CkanClient {
    /// Calls `package_create` with `record` as the JSON body.
    ///
    /// Any HTTP status is accepted as long as the body is a CKAN envelope;
    /// CKAN reports validation failures as 409 with `success: false`.
    async fn package_create(&self, record: &DatasetRecord) -> Result<ActionResponse, AppError> {
        let url = self.action_url("package_create")?;

        let resp = self
            .client
            .post(url.clone())
            .header(header::AUTHORIZATION, &self.api_key)
            .json(record)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.map_send_error(e))?;
        debug!("HTTP {} from {} ({} bytes)", status.as_u16(), url, body.len());

        if body.trim().is_empty() {
            return Err(AppError::EmptyResponse);
        }

        serde_json::from_str::<ActionResponse>(&body).map_err(|e| {
            let snippet: String = body.chars().take(BODY_SNIPPET_LEN).collect();
            AppError::ClientError(format!(
                "HTTP {} from {} is not a CKAN response ({}): {}",
                status.as_u16(),
                url,
                e,
                snippet
            ))
        })
    }
}
