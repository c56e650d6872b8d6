//! # reqres-contracts
//!
//! Contract checks for the reqres.in users and register REST endpoints.
//!
//! ## Key Features
//!
//! - **Schema fixtures**: JSON Schema documents loaded by name from a fixtures directory
//! - **Scenarios**: one request, one status check, optional schema and field assertions
//! - **Catalog**: the reqres scenarios as data, runnable against the live service or a mock
//! - **No magic**: no retries, no shared state, every failure surfaces immediately
//!
//! ## Example
//!
//! ```rust,no_run
//! use reqres_contracts::{scenario, ApiConfig, ReqresClient, SchemaLoader};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ApiConfig::from_env()?;
//! let loader = SchemaLoader::new(config.fixtures_dir.clone());
//! let client = ReqresClient::new(config)?;
//!
//! let report = scenario::run_suite(&client, &loader, &scenario::reqres_suite()?).await;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

#![allow(clippy::missing_errors_doc)]

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod request;
pub mod response;
pub mod scenario;
pub mod schema;

#[cfg(test)]
pub mod tests;

pub use client::ReqresClient;
pub use config::ApiConfig;
pub use error::{ContractError, ContractResult};
pub use models::{
    CreatedUser, Credentials, RegisteredUser, SingleUser, UpdatedUser, User, UserPayload,
    UsersPage,
};
pub use request::{HttpMethod, RequestDescriptor};
pub use response::ApiResponse;
pub use scenario::{Scenario, ScenarioOutcome, ScenarioPhase, SuiteReport, Verdict};
pub use schema::{Fixture, SchemaLoader};
