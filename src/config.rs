use crate::error::{ContractError, ContractResult};
use crate::logging::log_debug;
use std::path::PathBuf;
use std::time::Duration;

/// Public reqres.in endpoint
pub const DEFAULT_BASE_URL: &str = "https://reqres.in";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Harness configuration shared by the client and the schema loader
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Scheme and host of the service, without a trailing path
    pub base_url: String,
    /// Sent as `x-api-key` when present
    pub api_key: Option<String>,
    /// Directory holding the JSON Schema fixtures
    pub fixtures_dir: PathBuf,
    /// Per-request timeout enforced by the HTTP client
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            fixtures_dir: default_fixtures_dir(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// `fixtures/schemas` under the crate root
pub fn default_fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("schemas")
}

impl ApiConfig {
    /// Configuration pointing at an arbitrary base URL, e.g. a local mock server
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Validate the configuration is usable
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::ConfigurationError`] if:
    /// - The base URL is empty or not an http(s) URL
    /// - The request timeout is zero
    pub fn validate(&self) -> ContractResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(ContractError::configuration_error("Base URL is required"));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ContractError::configuration_error(format!(
                "Base URL must start with http:// or https://, got {}",
                self.base_url
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(ContractError::configuration_error(
                "Request timeout must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Base URL with any trailing slash removed
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Load configuration from environment variables
    ///
    /// Reads `REQRES_BASE_URL`, `REQRES_API_KEY`, `REQRES_FIXTURES_DIR` and
    /// `REQRES_TIMEOUT_SECS`; anything unset keeps its default.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::ConfigurationError`] if `REQRES_TIMEOUT_SECS`
    /// is not an integer or the resulting configuration fails validation.
    pub fn from_env() -> ContractResult<Self> {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("REQRES_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(api_key) = std::env::var("REQRES_API_KEY") {
            if !api_key.is_empty() {
                config.api_key = Some(api_key);
            }
        }
        if let Ok(dir) = std::env::var("REQRES_FIXTURES_DIR") {
            config.fixtures_dir = PathBuf::from(dir);
        }
        if let Ok(raw) = std::env::var("REQRES_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                ContractError::configuration_error(format!(
                    "REQRES_TIMEOUT_SECS must be a whole number of seconds, got {raw:?}: {e}"
                ))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        config.validate()?;

        log_debug!(
            base_url = %config.base_url,
            has_api_key = config.api_key.is_some(),
            fixtures_dir = %config.fixtures_dir.display(),
            timeout_seconds = config.request_timeout.as_secs(),
            "Contract configuration loaded and validated"
        );

        Ok(config)
    }
}
