// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{NaiveDate, NaiveDateTime};
use plantar_tracker::config::Config;
use plantar_tracker::db::LocalDb;
use plantar_tracker::routes::create_router;
use plantar_tracker::services::CatalogService;
use plantar_tracker::AppState;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Wednesday 2024-06-05, 08:30 local.
#[allow(dead_code)]
pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 5)
        .unwrap()
        .and_hms_opt(8, 30, 0)
        .unwrap()
}

/// Create a test app backed by the given store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app_with_db(db: LocalDb) -> (Router, Arc<AppState>) {
    let catalog = CatalogService::builtin().expect("builtin catalog should load");
    let state = Arc::new(AppState::from_parts(
        Config::test_default(),
        db,
        catalog,
        fixed_now,
    ));
    (create_router(state.clone()), state)
}

/// Create a test app with in-memory storage and a fixed clock.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    create_test_app_with_db(LocalDb::new_memory())
}

/// Send one request and decode the JSON response (`Null` when empty).
#[allow(dead_code)]
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
