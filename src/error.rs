//! Error types for contract checks.
//!
//! Every way a contract check can fail is a variant of [`ContractError`]:
//! - Fixture errors (missing or malformed schema files)
//! - Transport failures (network, DNS, timeouts)
//! - Request building errors (a body that does not serialize)
//! - Assertion failures (status code, undecodable body, field mismatch)
//! - Schema violations (response shape mismatch)
//!
//! No failure is recovered from. A scenario stops at the first error and
//! reports it together with the phase it had reached.
//!
//! # Error Handling Example
//!
//! ```rust,no_run
//! use reqres_contracts::{ContractError, error::ErrorCategory};
//!
//! fn describe(err: &ContractError) -> &'static str {
//!     match err.category() {
//!         ErrorCategory::Transport => "the service could not be reached",
//!         ErrorCategory::Fixture => "the bundled schema is broken",
//!         _ => "the service broke its contract",
//!     }
//! }
//! ```

use crate::logging::{log_error, log_warn};
use thiserror::Error;

// ============================================================================
// Error categorization types
// ============================================================================

/// High-level categorization of failures.
///
/// Use [`ContractError::category()`] to get the category for any error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The harness itself is misconfigured (bad base URL, bad timeout).
    Configuration,

    /// A schema fixture is missing or is not valid JSON / JSON Schema.
    Fixture,

    /// The request never produced a usable response.
    Transport,

    /// The service responded, but its status or body did not match.
    Assertion,

    /// The response body does not conform to its schema.
    Schema,
}

/// Severity level for logging decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// The harness cannot run at all until this is fixed.
    Error,

    /// A single check failed; other scenarios are unaffected.
    Warning,
}

// ============================================================================
// Contract error types
// ============================================================================

/// Convenient result type for contract checks.
pub type ContractResult<T> = std::result::Result<T, ContractError>;

/// Errors that can occur while running a contract check.
///
/// Use the constructor methods, which log the error on creation:
///
/// ```rust
/// use reqres_contracts::ContractError;
///
/// let err = ContractError::status_mismatch("GET /api/users", 200, 404);
/// assert_eq!(err.to_string(), "GET /api/users: expected status 200, got 404");
/// ```
///
/// | Variant | Category |
/// |---------|----------|
/// | `ConfigurationError` | Configuration |
/// | `InvalidRequest` | Configuration |
/// | `FixtureNotFound` | Fixture |
/// | `FixtureParse` | Fixture |
/// | `RequestFailed` | Transport |
/// | `Timeout` | Transport |
/// | `StatusMismatch` | Assertion |
/// | `ResponseParsing` | Assertion |
/// | `FieldMismatch` | Assertion |
/// | `SchemaViolation` | Schema |
#[derive(Error, Debug)]
pub enum ContractError {
    /// Harness configuration is invalid.
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },

    /// A request descriptor could not be built, e.g. its body does not
    /// serialize to JSON.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// What was wrong with the request.
        message: String,
    },

    /// No schema fixture with this name exists in the fixtures directory.
    #[error("Schema fixture not found: {name} (looked in {path})")]
    FixtureNotFound {
        /// The requested fixture name.
        name: String,
        /// The path that was searched.
        path: String,
    },

    /// The fixture exists but is not valid JSON or not a valid JSON Schema.
    #[error("Schema fixture {name} is malformed: {message}")]
    FixtureParse {
        /// The fixture name.
        name: String,
        /// Parser or compiler message.
        message: String,
    },

    /// The HTTP request could not be completed.
    #[error("Request failed: {message}")]
    RequestFailed {
        /// Description of the failure.
        message: String,
        /// The underlying error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The request did not complete within the configured timeout.
    #[error("Request timed out after {timeout_seconds}s")]
    Timeout {
        /// The timeout that was exceeded.
        timeout_seconds: u64,
    },

    /// The response body is not JSON, or not the expected JSON shape.
    #[error("Response parsing failed: {message}")]
    ResponseParsing {
        /// Details about the parsing failure.
        message: String,
    },

    /// The response status code differs from the expected one.
    #[error("{request}: expected status {expected}, got {actual}")]
    StatusMismatch {
        /// Short description of the request, e.g. `GET /api/users`.
        request: String,
        /// Expected status code.
        expected: u16,
        /// Actual status code.
        actual: u16,
    },

    /// A response field differs from the expected value.
    #[error("Field {field}: expected {expected}, got {actual}")]
    FieldMismatch {
        /// JSON pointer of the field.
        field: String,
        /// Expected value, rendered as JSON.
        expected: String,
        /// Actual value, rendered as JSON (`<missing>` when absent).
        actual: String,
    },

    /// The response body violates its schema.
    #[error("Response violates schema {schema}: {}", violations.join("; "))]
    SchemaViolation {
        /// The schema fixture name.
        schema: String,
        /// One entry per violation, `"<message> (at <pointer>)"`.
        violations: Vec<String>,
    },
}

impl ContractError {
    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationError { .. } | Self::InvalidRequest { .. } => {
                ErrorCategory::Configuration
            }
            Self::FixtureNotFound { .. } | Self::FixtureParse { .. } => ErrorCategory::Fixture,
            Self::RequestFailed { .. } | Self::Timeout { .. } => ErrorCategory::Transport,
            Self::StatusMismatch { .. }
            | Self::FieldMismatch { .. }
            | Self::ResponseParsing { .. } => ErrorCategory::Assertion,
            Self::SchemaViolation { .. } => ErrorCategory::Schema,
        }
    }

    /// Get the error severity.
    ///
    /// Configuration and fixture errors break every scenario that touches
    /// them, so they rank above a single failed check.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Fixture => ErrorSeverity::Error,
            ErrorCategory::Transport | ErrorCategory::Assertion | ErrorCategory::Schema => {
                ErrorSeverity::Warning
            }
        }
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================

    pub fn configuration_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "configuration_error",
            message = %message,
            "Contract harness configuration invalid"
        );
        Self::ConfigurationError { message }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "invalid_request",
            message = %message,
            "Request could not be built"
        );
        Self::InvalidRequest { message }
    }

    pub fn fixture_not_found(name: impl Into<String>, path: impl Into<String>) -> Self {
        let name = name.into();
        let path = path.into();
        log_error!(
            error_type = "fixture_not_found",
            fixture = %name,
            path = %path,
            "Schema fixture not found"
        );
        Self::FixtureNotFound { name, path }
    }

    pub fn fixture_parse(name: impl Into<String>, message: impl Into<String>) -> Self {
        let name = name.into();
        let message = message.into();
        log_error!(
            error_type = "fixture_parse",
            fixture = %name,
            message = %message,
            "Schema fixture malformed"
        );
        Self::FixtureParse { name, message }
    }

    pub fn request_failed(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let message = message.into();
        log_error!(
            error_type = "request_failed",
            message = %message,
            has_source = source.is_some(),
            "HTTP request failed"
        );
        Self::RequestFailed { message, source }
    }

    pub fn timeout(timeout_seconds: u64) -> Self {
        log_warn!(
            error_type = "timeout",
            timeout_seconds = timeout_seconds,
            "HTTP request timed out"
        );
        Self::Timeout { timeout_seconds }
    }

    pub fn response_parsing(message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "response_parsing",
            message = %message,
            "Response body could not be decoded"
        );
        Self::ResponseParsing { message }
    }

    pub fn status_mismatch(request: impl Into<String>, expected: u16, actual: u16) -> Self {
        let request = request.into();
        log_warn!(
            error_type = "status_mismatch",
            request = %request,
            expected = expected,
            actual = actual,
            "Unexpected response status"
        );
        Self::StatusMismatch {
            request,
            expected,
            actual,
        }
    }

    pub fn field_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        let field = field.into();
        let expected = expected.into();
        let actual = actual.into();
        log_warn!(
            error_type = "field_mismatch",
            field = %field,
            expected = %expected,
            actual = %actual,
            "Response field does not match"
        );
        Self::FieldMismatch {
            field,
            expected,
            actual,
        }
    }

    pub fn schema_violation(schema: impl Into<String>, violations: Vec<String>) -> Self {
        let schema = schema.into();
        log_warn!(
            error_type = "schema_violation",
            schema = %schema,
            violation_count = violations.len(),
            "Response violates schema"
        );
        Self::SchemaViolation { schema, violations }
    }
}
