// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cycle runner routes. Every action answers with the runner snapshot.

use crate::error::{AppError, Result};
use crate::models::CycleRef;
use crate::services::cycles::resolve_cycle_ref;
use crate::services::RunSnapshot;
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/run", get(get_run))
        .route("/api/run/start", post(start))
        .route("/api/run/confirm-equipment", post(confirm_equipment))
        .route("/api/run/ready", post(mark_ready))
        .route("/api/run/pause", post(pause))
        .route("/api/run/resume", post(resume))
        .route("/api/run/next", post(next))
        .route("/api/run/skip", post(skip))
        .route("/api/run/restart", post(restart))
        .route("/api/run/pick", post(pick_different_cycle))
}

async fn get_run(State(state): State<Arc<AppState>>) -> Json<RunSnapshot> {
    Json(state.runner.lock().await.snapshot())
}

/// Start the referenced cycle.
async fn start(
    State(state): State<Arc<AppState>>,
    Json(cycle_ref): Json<CycleRef>,
) -> Result<Json<RunSnapshot>> {
    let cycle = resolve_cycle_ref(&state.catalog, &state.db, &cycle_ref)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Cycle {:?} not found", cycle_ref)))?;
    Ok(Json(state.runner.lock().await.start(cycle)?))
}

async fn confirm_equipment(State(state): State<Arc<AppState>>) -> Result<Json<RunSnapshot>> {
    Ok(Json(state.runner.lock().await.confirm_equipment()?))
}

async fn mark_ready(State(state): State<Arc<AppState>>) -> Result<Json<RunSnapshot>> {
    Ok(Json(state.runner.lock().await.mark_ready()?))
}

async fn pause(State(state): State<Arc<AppState>>) -> Result<Json<RunSnapshot>> {
    Ok(Json(state.runner.lock().await.pause()?))
}

async fn resume(State(state): State<Arc<AppState>>) -> Result<Json<RunSnapshot>> {
    Ok(Json(state.runner.lock().await.resume()?))
}

/// Advance, or finish and record the session on the last exercise.
async fn next(State(state): State<Arc<AppState>>) -> Result<Json<RunSnapshot>> {
    Ok(Json(state.runner.lock().await.next().await?))
}

async fn skip(State(state): State<Arc<AppState>>) -> Result<Json<RunSnapshot>> {
    Ok(Json(state.runner.lock().await.skip()?))
}

async fn restart(State(state): State<Arc<AppState>>) -> Result<Json<RunSnapshot>> {
    Ok(Json(state.runner.lock().await.restart()?))
}

async fn pick_different_cycle(State(state): State<Arc<AppState>>) -> Json<RunSnapshot> {
    Json(state.runner.lock().await.pick_different_cycle())
}
