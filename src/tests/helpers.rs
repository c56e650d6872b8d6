//! Test helper utilities shared across unit test modules
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

#![allow(dead_code)]

use crate::response::ApiResponse;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// Scratch directory unique to one test, removed and recreated on each call
pub fn scratch_dir(test_name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "reqres-contracts-{}-{}",
        std::process::id(),
        test_name
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("scratch dir should be creatable");
    dir
}

pub fn write_fixture(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).expect("fixture should be writable");
}

pub fn user(id: u64) -> Value {
    json!({
        "id": id,
        "email": format!("user{id}@reqres.in"),
        "first_name": "First",
        "last_name": "Last",
        "avatar": format!("https://reqres.in/img/faces/{id}-image.jpg")
    })
}

/// A well-formed `GET /api/users?page=2` body
pub fn users_page_body() -> Value {
    json!({
        "page": 2,
        "per_page": 6,
        "total": 12,
        "total_pages": 2,
        "data": (7..=12).map(user).collect::<Vec<_>>(),
        "support": {
            "url": "https://reqres.in/#support-heading",
            "text": "To keep ReqRes free, contributions towards server costs are appreciated!"
        }
    })
}

pub fn response(status: u16, body: Value) -> ApiResponse {
    ApiResponse::from_json("GET /api/users", status, body)
}

/// A response whose body is sent as text, exactly as given
pub fn raw_response(status: u16, raw: &str) -> ApiResponse {
    ApiResponse::new("GET /api/users", status, raw)
}
