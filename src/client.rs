use crate::config::ApiConfig;
use crate::error::{ContractError, ContractResult};
use crate::logging::{log_debug, log_error};
use crate::models::{Credentials, UserPayload};
use crate::request::RequestDescriptor;
use crate::response::ApiResponse;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};

const API_KEY_HEADER: &str = "x-api-key";

/// Thin HTTP client for the reqres users and register endpoints
///
/// Each call sends exactly one request. There are no retries; transport
/// failures surface as [`ContractError::RequestFailed`] or
/// [`ContractError::Timeout`].
#[derive(Debug, Clone)]
pub struct ReqresClient {
    client: reqwest::Client,
    config: ApiConfig,
}

impl ReqresClient {
    /// Create a client from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::ConfigurationError`] if the configuration is
    /// invalid, the API key is not a valid header value, or the underlying
    /// HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> ContractResult<Self> {
        config.validate()?;

        let headers = Self::build_default_headers(config.api_key.as_deref())?;
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                ContractError::configuration_error(format!("Failed to build HTTP client: {e}"))
            })?;

        log_debug!(
            base_url = %config.base_url,
            has_api_key = config.api_key.is_some(),
            timeout_seconds = config.request_timeout.as_secs(),
            "ReqresClient created"
        );

        Ok(Self { client, config })
    }

    pub fn from_env() -> ContractResult<Self> {
        Self::new(ApiConfig::from_env()?)
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Headers sent with every request
    pub fn build_default_headers(api_key: Option<&str>) -> ContractResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(key) = api_key {
            headers.insert(
                HeaderName::from_static(API_KEY_HEADER),
                HeaderValue::from_str(key).map_err(|e| {
                    ContractError::configuration_error(format!("Invalid API key format: {e}"))
                })?,
            );
        }

        Ok(headers)
    }

    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.normalized_base_url(),
            path.trim_start_matches('/')
        )
    }

    /// Send one request and collect its status and body
    ///
    /// The body is not required to be JSON here; see [`ApiResponse::body`].
    pub async fn send(&self, request: &RequestDescriptor) -> ContractResult<ApiResponse> {
        let url = self.url_for(&request.path);
        let label = request.label();

        log_debug!(request = %label, url = %url, "Sending request");

        let mut builder = self.client.request(request.method.to_reqwest(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| self.transport_error(&label, e))?;
        let status = response.status().as_u16();

        let raw_body = response.text().await.map_err(|e| {
            log_error!(request = %label, error = %e, "Failed to read response body");
            ContractError::request_failed(
                format!("{label}: failed to read body: {e}"),
                Some(Box::new(e)),
            )
        })?;

        log_debug!(
            request = %label,
            status = status,
            body_bytes = raw_body.len(),
            "Response received"
        );

        Ok(ApiResponse::new(label, status, raw_body))
    }

    fn transport_error(&self, label: &str, e: reqwest::Error) -> ContractError {
        log_error!(request = %label, error = %e, "HTTP request failed");
        if e.is_timeout() {
            ContractError::timeout(self.config.request_timeout.as_secs())
        } else {
            ContractError::request_failed(format!("{label}: {e}"), Some(Box::new(e)))
        }
    }

    // =========================================================================
    // Endpoint helpers
    // =========================================================================

    /// `GET /api/users` with optional `page` / `per_page`
    pub async fn list_users(
        &self,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> ContractResult<ApiResponse> {
        let mut request = RequestDescriptor::get("/api/users");
        if let Some(page) = page {
            request = request.query("page", page);
        }
        if let Some(per_page) = per_page {
            request = request.query("per_page", per_page);
        }
        self.send(&request).await
    }

    /// `GET /api/users?id={id}`
    pub async fn find_user(&self, id: u64) -> ContractResult<ApiResponse> {
        self.send(&RequestDescriptor::get("/api/users").query("id", id))
            .await
    }

    pub async fn create_user(&self, payload: &UserPayload) -> ContractResult<ApiResponse> {
        self.send(&RequestDescriptor::post("/api/users").json(payload)?)
            .await
    }

    pub async fn replace_user(&self, id: u64, payload: &UserPayload) -> ContractResult<ApiResponse> {
        self.send(&RequestDescriptor::put(format!("/api/users/{id}")).json(payload)?)
            .await
    }

    pub async fn patch_user(&self, id: u64, payload: &UserPayload) -> ContractResult<ApiResponse> {
        self.send(&RequestDescriptor::patch(format!("/api/users/{id}")).json(payload)?)
            .await
    }

    pub async fn delete_user(&self, id: u64) -> ContractResult<ApiResponse> {
        self.send(&RequestDescriptor::delete(format!("/api/users/{id}")))
            .await
    }

    pub async fn register(&self, credentials: &Credentials) -> ContractResult<ApiResponse> {
        self.send(&RequestDescriptor::post("/api/register").json(credentials)?)
            .await
    }
}
