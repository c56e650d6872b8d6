//! Received responses and the assertions made on them

use crate::error::{ContractError, ContractResult};
use crate::schema::{Fixture, SchemaLoader};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Status code and body of one response
///
/// The raw body is kept as received. It is decoded as JSON up front, but a
/// decode failure only surfaces when a body assertion runs, so status checks
/// never depend on the body being JSON. An empty body decodes to JSON `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// Label of the request that produced this response
    pub request: String,
    pub status: u16,
    /// Body text exactly as received
    pub raw: String,
    decoded: Result<Value, String>,
}

/// Field names without a leading `/` address top-level keys
fn to_pointer(field: &str) -> String {
    if field.starts_with('/') {
        field.to_string()
    } else {
        format!("/{field}")
    }
}

fn decode(raw: &str) -> Result<Value, String> {
    if raw.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(raw).map_err(|e| e.to_string())
}

impl ApiResponse {
    pub fn new(request: impl Into<String>, status: u16, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let decoded = decode(&raw);
        Self {
            request: request.into(),
            status,
            raw,
            decoded,
        }
    }

    /// Build a response from an already-decoded body; `null` means no body
    pub fn from_json(request: impl Into<String>, status: u16, body: Value) -> Self {
        let raw = if body.is_null() {
            String::new()
        } else {
            body.to_string()
        };
        Self {
            request: request.into(),
            status,
            raw,
            decoded: Ok(body),
        }
    }

    pub fn is_empty_body(&self) -> bool {
        self.raw.trim().is_empty()
    }

    /// The decoded JSON body
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::ResponseParsing`] if the body is not JSON.
    pub fn body(&self) -> ContractResult<&Value> {
        self.decoded.as_ref().map_err(|message| {
            ContractError::response_parsing(format!(
                "{}: body is not JSON: {message}",
                self.request
            ))
        })
    }

    /// Look up a field by top-level name or JSON pointer (`/data/id`)
    ///
    /// Returns `None` when the field is absent or the body is not JSON.
    pub fn field(&self, field: &str) -> Option<&Value> {
        self.decoded.as_ref().ok()?.pointer(&to_pointer(field))
    }

    pub fn expect_status(&self, expected: u16) -> ContractResult<&Self> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(ContractError::status_mismatch(
                self.request.clone(),
                expected,
                self.status,
            ))
        }
    }

    pub fn expect_field(&self, field: &str, expected: &Value) -> ContractResult<&Self> {
        let pointer = to_pointer(field);
        match self.body()?.pointer(&pointer) {
            Some(actual) if actual == expected => Ok(self),
            Some(actual) => Err(ContractError::field_mismatch(
                pointer,
                expected.to_string(),
                actual.to_string(),
            )),
            None => Err(ContractError::field_mismatch(
                pointer,
                expected.to_string(),
                "<missing>",
            )),
        }
    }

    /// Assert the value at `field` is an array with exactly `expected` items
    pub fn expect_array_len(&self, field: &str, expected: usize) -> ContractResult<&Self> {
        let pointer = to_pointer(field);
        match self.body()?.pointer(&pointer) {
            Some(Value::Array(items)) if items.len() == expected => Ok(self),
            Some(Value::Array(items)) => Err(ContractError::field_mismatch(
                format!("{pointer} (length)"),
                expected.to_string(),
                items.len().to_string(),
            )),
            Some(other) => Err(ContractError::field_mismatch(
                format!("{pointer} (length)"),
                format!("array of {expected}"),
                other.to_string(),
            )),
            None => Err(ContractError::field_mismatch(
                format!("{pointer} (length)"),
                format!("array of {expected}"),
                "<missing>",
            )),
        }
    }

    pub fn expect_empty_body(&self) -> ContractResult<&Self> {
        if self.is_empty_body() {
            Ok(self)
        } else {
            Err(ContractError::field_mismatch(
                "<body>",
                "<empty>",
                self.raw.clone(),
            ))
        }
    }

    pub fn expect_schema(&self, loader: &SchemaLoader, fixture: Fixture) -> ContractResult<&Self> {
        loader.validate_fixture(fixture, self.body()?)?;
        Ok(self)
    }

    /// Deserialize the body into a typed view
    pub fn json<T: DeserializeOwned>(&self) -> ContractResult<T> {
        T::deserialize(self.body()?).map_err(|e| {
            ContractError::response_parsing(format!(
                "{}: body does not match {}: {e}",
                self.request,
                std::any::type_name::<T>()
            ))
        })
    }
}
