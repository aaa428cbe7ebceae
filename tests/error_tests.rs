// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use plantar_tracker::error::AppError;
use plantar_tracker::services::{RunPhase, RunnerError};

async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_runner_errors_map_to_conflict() {
    let err: AppError = RunnerError::InvalidTransition {
        action: "pause",
        phase: RunPhase::Picking,
    }
    .into();
    let (status, body) = body_json(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "invalid_transition");
    assert_eq!(body["details"], "Cannot pause while picking");
}

#[tokio::test]
async fn test_skip_on_last_message() {
    let (status, body) = body_json(RunnerError::SkipOnLastExercise.into()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["details"], "The last exercise cannot be skipped");
}

#[tokio::test]
async fn test_not_found_and_bad_request() {
    let (status, body) = body_json(AppError::NotFound("Cycle x".into())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["details"], "Cycle x");

    let (status, body) = body_json(AppError::BadRequest("nope".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[test]
fn test_missing_catalog_override_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    let config = plantar_tracker::config::Config {
        catalog_path: Some(dir.path().join("missing.json")),
        ..plantar_tracker::config::Config::test_default()
    };

    let err = plantar_tracker::AppState::new(config).err().unwrap();
    assert!(matches!(
        err,
        plantar_tracker::services::CatalogError::IoError(_)
    ));
}
