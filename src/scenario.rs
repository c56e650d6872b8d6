//! Contract scenarios
//!
//! A [`Scenario`] is one independent request/assert sequence. Running it walks
//! `Start -> RequestSent -> ResponseReceived -> Asserted` and ends in either a
//! pass or a failure tagged with the phase it stopped in. Scenarios share no
//! state, so a suite is just a sequential loop over them.

use crate::client::ReqresClient;
use crate::error::{ContractError, ContractResult};
use crate::logging::{log_debug, log_info, log_warn};
use crate::models::{Credentials, UserPayload};
use crate::request::RequestDescriptor;
use crate::response::ApiResponse;
use crate::schema::{self, Fixture, SchemaLoader};
use serde_json::Value;
use std::fmt;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioPhase {
    Start,
    RequestSent,
    ResponseReceived,
    Asserted,
}

impl fmt::Display for ScenarioPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScenarioPhase::Start => "start",
            ScenarioPhase::RequestSent => "request_sent",
            ScenarioPhase::ResponseReceived => "response_received",
            ScenarioPhase::Asserted => "asserted",
        };
        f.write_str(name)
    }
}

/// An assertion on the response body, checked after status and schema
#[derive(Debug, Clone, PartialEq)]
pub enum Expectation {
    /// Field (top-level name or JSON pointer) equals a value
    Field { field: String, value: Value },
    /// Field is an array of exactly `len` items
    ArrayLen { field: String, len: usize },
    /// Response has no body
    EmptyBody,
}

impl Expectation {
    pub fn check(&self, response: &ApiResponse) -> ContractResult<()> {
        match self {
            Expectation::Field { field, value } => response.expect_field(field, value),
            Expectation::ArrayLen { field, len } => response.expect_array_len(field, *len),
            Expectation::EmptyBody => response.expect_empty_body(),
        }
        .map(|_| ())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub request: RequestDescriptor,
    pub expected_status: u16,
    pub schema: Option<Fixture>,
    pub expectations: Vec<Expectation>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, request: RequestDescriptor, expected_status: u16) -> Self {
        Self {
            name: name.into(),
            request,
            expected_status,
            schema: None,
            expectations: Vec::new(),
        }
    }

    pub fn with_schema(mut self, fixture: Fixture) -> Self {
        self.schema = Some(fixture);
        self
    }

    pub fn expect_field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.expectations.push(Expectation::Field {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn expect_array_len(mut self, field: impl Into<String>, len: usize) -> Self {
        self.expectations.push(Expectation::ArrayLen {
            field: field.into(),
            len,
        });
        self
    }

    pub fn expect_empty_body(mut self) -> Self {
        self.expectations.push(Expectation::EmptyBody);
        self
    }

    /// Run the scenario and report how far it got
    pub async fn run(&self, client: &ReqresClient, loader: &SchemaLoader) -> ScenarioOutcome {
        let started = Instant::now();
        let mut phase = ScenarioPhase::Start;

        let result = self.drive(client, loader, &mut phase).await;
        let elapsed = started.elapsed();

        let verdict = match result {
            Ok(()) => {
                log_debug!(
                    scenario = %self.name,
                    elapsed_ms = elapsed_ms(elapsed),
                    "Scenario passed"
                );
                Verdict::Passed
            }
            Err(error) => {
                log_warn!(
                    scenario = %self.name,
                    phase = %phase,
                    error = %error,
                    "Scenario failed"
                );
                Verdict::Failed { phase, error }
            }
        };

        ScenarioOutcome {
            name: self.name.clone(),
            verdict,
            elapsed,
        }
    }

    async fn drive(
        &self,
        client: &ReqresClient,
        loader: &SchemaLoader,
        phase: &mut ScenarioPhase,
    ) -> ContractResult<()> {
        let schema = match self.schema {
            Some(fixture) => Some((fixture, loader.load_fixture(fixture)?)),
            None => None,
        };

        self.advance(phase, ScenarioPhase::RequestSent);
        let response = client.send(&self.request).await?;

        self.advance(phase, ScenarioPhase::ResponseReceived);
        response.expect_status(self.expected_status)?;
        if let Some((fixture, schema)) = &schema {
            schema::validate(fixture.file_name(), schema, response.body()?)?;
        }
        for expectation in &self.expectations {
            expectation.check(&response)?;
        }

        self.advance(phase, ScenarioPhase::Asserted);
        Ok(())
    }

    fn advance(&self, phase: &mut ScenarioPhase, next: ScenarioPhase) {
        log_debug!(scenario = %self.name, from = %phase, to = %next, "Scenario phase");
        *phase = next;
    }
}

/// Whole milliseconds in `elapsed`, saturating at `u64::MAX`
pub fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

#[derive(Debug)]
pub enum Verdict {
    Passed,
    Failed {
        /// Phase the scenario was in when it failed
        phase: ScenarioPhase,
        error: ContractError,
    },
}

#[derive(Debug)]
pub struct ScenarioOutcome {
    pub name: String,
    pub verdict: Verdict,
    pub elapsed: Duration,
}

impl ScenarioOutcome {
    pub fn passed(&self) -> bool {
        matches!(self.verdict, Verdict::Passed)
    }

    pub fn error(&self) -> Option<&ContractError> {
        match &self.verdict {
            Verdict::Passed => None,
            Verdict::Failed { error, .. } => Some(error),
        }
    }

    /// Convert into a `Result`, for use inside `#[test]` functions
    pub fn into_result(self) -> ContractResult<()> {
        match self.verdict {
            Verdict::Passed => Ok(()),
            Verdict::Failed { error, .. } => Err(error),
        }
    }
}

#[derive(Debug, Default)]
pub struct SuiteReport {
    pub outcomes: Vec<ScenarioOutcome>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            match &outcome.verdict {
                Verdict::Passed => writeln!(
                    f,
                    "PASS {} ({} ms)",
                    outcome.name,
                    outcome.elapsed.as_millis()
                )?,
                Verdict::Failed { phase, error } => {
                    writeln!(f, "FAIL {} [{phase}]: {error}", outcome.name)?
                }
            }
        }
        write!(f, "{} passed, {} failed", self.passed(), self.failed())
    }
}

/// Run scenarios one after another; a failure never stops the suite
pub async fn run_suite(
    client: &ReqresClient,
    loader: &SchemaLoader,
    scenarios: &[Scenario],
) -> SuiteReport {
    let mut report = SuiteReport::default();
    for scenario in scenarios {
        report.outcomes.push(scenario.run(client, loader).await);
    }

    log_info!(
        scenarios = report.outcomes.len(),
        passed = report.passed(),
        failed = report.failed(),
        "Contract suite finished"
    );

    report
}

// ============================================================================
// reqres.in catalog
// ============================================================================

pub const EXISTING_USER_ID: u64 = 1;
pub const MISSING_USER_ID: u64 = 23;
pub const MUTATED_USER_ID: u64 = 2;

pub fn sample_user() -> UserPayload {
    UserPayload::new("Alexander", "QAGuru")
}

pub fn sample_credentials() -> Credentials {
    Credentials::new("eve.holt@reqres.in", "pistol")
}

pub fn users_list_by_page(page: u32) -> Scenario {
    Scenario::new(
        "get_users_list_by_page",
        RequestDescriptor::get("/api/users").query("page", page),
        200,
    )
    .expect_field("page", page)
}

pub fn users_list_by_per_page(per_page: u32) -> Scenario {
    Scenario::new(
        "get_users_list_data_by_per_page",
        RequestDescriptor::get("/api/users").query("per_page", per_page),
        200,
    )
    .expect_field("per_page", per_page)
    .expect_array_len("data", per_page as usize)
}

pub fn existing_user_by_id(id: u64) -> Scenario {
    Scenario::new(
        "positive_get_single_user_data_by_id",
        RequestDescriptor::get("/api/users").query("id", id),
        200,
    )
    .expect_field("/data/id", id)
}

pub fn missing_user_by_id(id: u64) -> Scenario {
    Scenario::new(
        "negative_get_single_user_data_by_id",
        RequestDescriptor::get("/api/users").query("id", id),
        404,
    )
}

pub fn users_list_format() -> Scenario {
    Scenario::new(
        "get_users_list_response_format",
        RequestDescriptor::get("/api/users"),
        200,
    )
    .with_schema(Fixture::UsersList)
}

fn echoes_payload(scenario: Scenario, payload: &UserPayload) -> Scenario {
    scenario
        .expect_field("name", payload.name.as_str())
        .expect_field("job", payload.job.as_str())
}

pub fn patch_user(id: u64, payload: &UserPayload) -> ContractResult<Scenario> {
    Ok(echoes_payload(
        Scenario::new(
            "patch_user_format_json",
            RequestDescriptor::patch(format!("/api/users/{id}")).json(payload)?,
            200,
        )
        .with_schema(Fixture::UpdateUser),
        payload,
    ))
}

pub fn put_user(id: u64, payload: &UserPayload) -> ContractResult<Scenario> {
    Ok(echoes_payload(
        Scenario::new(
            "put_user_format_json",
            RequestDescriptor::put(format!("/api/users/{id}")).json(payload)?,
            200,
        )
        .with_schema(Fixture::UpdateUser),
        payload,
    ))
}

pub fn delete_user(id: u64) -> Scenario {
    Scenario::new(
        "delete_user_by_id",
        RequestDescriptor::delete(format!("/api/users/{id}")).query("id", id),
        204,
    )
    .expect_empty_body()
}

pub fn create_user(payload: &UserPayload) -> ContractResult<Scenario> {
    Ok(echoes_payload(
        Scenario::new(
            "create_user_format_json",
            RequestDescriptor::post("/api/users").json(payload)?,
            201,
        )
        .with_schema(Fixture::CreateUser),
        payload,
    ))
}

pub fn register_user(credentials: &Credentials) -> ContractResult<Scenario> {
    Ok(Scenario::new(
        "register_user_format_json",
        RequestDescriptor::post("/api/register").json(credentials)?,
        200,
    )
    .with_schema(Fixture::RegisterUser))
}

/// Every reqres scenario, in the order they are usually reported
pub fn reqres_suite() -> ContractResult<Vec<Scenario>> {
    let user = sample_user();
    Ok(vec![
        users_list_by_page(2),
        users_list_by_per_page(6),
        existing_user_by_id(EXISTING_USER_ID),
        missing_user_by_id(MISSING_USER_ID),
        users_list_format(),
        patch_user(MUTATED_USER_ID, &user)?,
        put_user(MUTATED_USER_ID, &user)?,
        delete_user(MUTATED_USER_ID),
        create_user(&user)?,
        register_user(&sample_credentials())?,
    ])
}
