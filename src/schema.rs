//! Schema fixtures and response validation
//!
//! Fixtures are plain JSON Schema documents stored one per file in the
//! fixtures directory. They are read from disk on every load.

use crate::error::{ContractError, ContractResult};
use crate::logging::log_debug;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// The schema fixtures bundled with the crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixture {
    /// `GET /api/users`
    UsersList,
    /// `POST /api/users`
    CreateUser,
    /// `PUT`/`PATCH /api/users/{id}`
    UpdateUser,
    /// `POST /api/register`
    RegisterUser,
}

impl Fixture {
    pub const ALL: [Fixture; 4] = [
        Fixture::UsersList,
        Fixture::CreateUser,
        Fixture::UpdateUser,
        Fixture::RegisterUser,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Fixture::UsersList => "get_users_list_response_schema.json",
            Fixture::CreateUser => "create_user_response_schema.json",
            Fixture::UpdateUser => "update_user_response_schema.json",
            Fixture::RegisterUser => "register_user_response_schema.json",
        }
    }
}

/// Resolves fixture names to parsed JSON Schema documents
#[derive(Debug, Clone)]
pub struct SchemaLoader {
    fixtures_dir: PathBuf,
}

impl SchemaLoader {
    pub fn new(fixtures_dir: impl Into<PathBuf>) -> Self {
        Self {
            fixtures_dir: fixtures_dir.into(),
        }
    }

    pub fn fixtures_dir(&self) -> &Path {
        &self.fixtures_dir
    }

    /// Load one of the bundled fixtures
    pub fn load_fixture(&self, fixture: Fixture) -> ContractResult<Value> {
        self.load(fixture.file_name())
    }

    /// Read and parse the schema file `name` from the fixtures directory
    ///
    /// # Errors
    ///
    /// - [`ContractError::FixtureNotFound`] if no such file exists, or the
    ///   name would resolve outside the fixtures directory
    /// - [`ContractError::FixtureParse`] if the file is not valid JSON
    pub fn load(&self, name: &str) -> ContractResult<Value> {
        let path = self.fixtures_dir.join(name);

        if !is_plain_file_name(name) {
            return Err(ContractError::fixture_not_found(
                name,
                path.display().to_string(),
            ));
        }

        let raw = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ContractError::fixture_not_found(name, path.display().to_string())
            } else {
                ContractError::fixture_parse(name, format!("unreadable: {e}"))
            }
        })?;

        let schema: Value = serde_json::from_str(&raw)
            .map_err(|e| ContractError::fixture_parse(name, e.to_string()))?;

        log_debug!(
            fixture = name,
            path = %path.display(),
            "Schema fixture loaded"
        );

        Ok(schema)
    }

    /// Load `fixture` and validate `instance` against it
    pub fn validate_fixture(&self, fixture: Fixture, instance: &Value) -> ContractResult<()> {
        let schema = self.load_fixture(fixture)?;
        validate(fixture.file_name(), &schema, instance)
    }
}

/// A single path component: not empty, not `.` or `..`, no separators
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
}

/// Validate `instance` against `schema`, collecting every violation
///
/// # Errors
///
/// - [`ContractError::FixtureParse`] if `schema` is not a valid JSON Schema
/// - [`ContractError::SchemaViolation`] if `instance` does not conform
pub fn validate(schema_name: &str, schema: &Value, instance: &Value) -> ContractResult<()> {
    let validator = jsonschema::validator_for(schema).map_err(|e| {
        ContractError::fixture_parse(schema_name, format!("invalid JSON Schema: {e}"))
    })?;

    let violations: Vec<String> = validator
        .iter_errors(instance)
        .map(|e| format!("{} (at {})", e, e.instance_path))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ContractError::schema_violation(schema_name, violations))
    }
}
