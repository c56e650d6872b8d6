//! Test helper utilities for reqres-contracts integration tests
//!
//! Provides a wiremock-backed stand-in for reqres.in that serves a pinned
//! dataset of twelve users, so the contract scenarios run without network
//! access and without depending on upstream data.
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use reqres_contracts::config::default_fixtures_dir;
use reqres_contracts::{ApiConfig, ReqresClient, SchemaLoader};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::time::Duration;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const TOTAL_USERS: u64 = 12;
pub const DEFAULT_PER_PAGE: u64 = 6;
pub const FIXED_TIMESTAMP: &str = "2024-05-01T10:20:30.123Z";
pub const REGISTER_TOKEN: &str = "QpwL5tke4Pnpja7X4";

const FIRST_NAMES: [&str; 12] = [
    "George", "Janet", "Emma", "Eve", "Charles", "Tracey", "Michael", "Lindsay", "Tobias",
    "Byron", "George", "Rachel",
];
const LAST_NAMES: [&str; 12] = [
    "Bluth", "Weaver", "Wong", "Holt", "Morris", "Ramos", "Lawson", "Ferguson", "Funke",
    "Fields", "Edwards", "Howell",
];

/// The pinned user record for ids 1..=12
pub fn user(id: u64) -> Value {
    let idx = (id - 1) as usize;
    json!({
        "id": id,
        "email": format!(
            "{}.{}@reqres.in",
            FIRST_NAMES[idx].to_lowercase(),
            LAST_NAMES[idx].to_lowercase()
        ),
        "first_name": FIRST_NAMES[idx],
        "last_name": LAST_NAMES[idx],
        "avatar": format!("https://reqres.in/img/faces/{id}-image.jpg")
    })
}

fn support() -> Value {
    json!({
        "url": "https://reqres.in/#support-heading",
        "text": "To keep ReqRes free, contributions towards server costs are appreciated!"
    })
}

fn query_params(request: &Request) -> HashMap<String, String> {
    request.url.query_pairs().into_owned().collect()
}

fn numeric_param(params: &HashMap<String, String>, key: &str) -> Option<u64> {
    params.get(key).and_then(|v| v.parse::<u64>().ok())
}

/// `GET /api/users`: pagination, page size and `id` lookup
pub struct UsersListResponder;

impl Respond for UsersListResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let params = query_params(request);

        if let Some(raw_id) = params.get("id") {
            return match raw_id.parse::<u64>() {
                Ok(id) if (1..=TOTAL_USERS).contains(&id) => ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": user(id), "support": support() })),
                _ => ResponseTemplate::new(404).set_body_json(json!({})),
            };
        }

        let page = numeric_param(&params, "page").unwrap_or(1).max(1);
        let per_page = numeric_param(&params, "per_page")
            .unwrap_or(DEFAULT_PER_PAGE)
            .max(1);
        let total_pages = TOTAL_USERS.div_ceil(per_page);
        let first = (page - 1) * per_page + 1;
        let data: Vec<Value> = (first..first + per_page)
            .filter(|id| *id <= TOTAL_USERS)
            .map(user)
            .collect();

        ResponseTemplate::new(200).set_body_json(json!({
            "page": page,
            "per_page": per_page,
            "total": TOTAL_USERS,
            "total_pages": total_pages,
            "data": data,
            "support": support()
        }))
    }
}

/// Echoes the JSON request body back with a timestamp (and optionally an id)
pub struct EchoResponder {
    pub status: u16,
    pub timestamp_field: &'static str,
    pub assign_id: bool,
}

impl Respond for EchoResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut body: Map<String, Value> =
            serde_json::from_slice(&request.body).unwrap_or_default();
        if self.assign_id {
            body.insert("id".to_string(), json!("311"));
        }
        body.insert(self.timestamp_field.to_string(), json!(FIXED_TIMESTAMP));
        ResponseTemplate::new(self.status).set_body_json(Value::Object(body))
    }
}

/// `POST /api/register`: only the well-known reqres account can register
pub struct RegisterResponder;

impl Respond for RegisterResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        let email = body.get("email").and_then(Value::as_str);
        let password = body.get("password").and_then(Value::as_str);

        match (email, password) {
            (Some("eve.holt@reqres.in"), Some(p)) if !p.is_empty() => ResponseTemplate::new(200)
                .set_body_json(json!({ "id": 4, "token": REGISTER_TOKEN })),
            (_, None) => {
                ResponseTemplate::new(400).set_body_json(json!({ "error": "Missing password" }))
            }
            _ => ResponseTemplate::new(400).set_body_json(
                json!({ "error": "Note: Only defined users succeed registration" }),
            ),
        }
    }
}

/// Start a mock server behaving like reqres.in for every endpoint the suite uses
pub async fn start_fake_reqres() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(UsersListResponder)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(EchoResponder {
            status: 201,
            timestamp_field: "createdAt",
            assign_id: true,
        })
        .mount(&server)
        .await;

    for verb in ["PUT", "PATCH"] {
        Mock::given(method(verb))
            .and(path_regex(r"^/api/users/\d+$"))
            .respond_with(EchoResponder {
                status: 200,
                timestamp_field: "updatedAt",
                assign_id: false,
            })
            .mount(&server)
            .await;
    }

    Mock::given(method("DELETE"))
        .and(path_regex(r"^/api/users/\d+$"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/register"))
        .respond_with(RegisterResponder)
        .mount(&server)
        .await;

    server
}

/// Configuration pointing at `server` with a short timeout
pub fn create_test_config(server: &MockServer) -> ApiConfig {
    ApiConfig {
        request_timeout: Duration::from_secs(5),
        ..ApiConfig::with_base_url(server.uri())
    }
}

pub fn create_test_client(server: &MockServer) -> ReqresClient {
    ReqresClient::new(create_test_config(server)).expect("test client should build")
}

pub fn bundled_loader() -> SchemaLoader {
    SchemaLoader::new(default_fixtures_dir())
}
