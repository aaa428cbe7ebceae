// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for the catalog, cycles, recommendation and local stores.

use crate::error::{AppError, Result};
use crate::models::stats::{
    build_calendar_weeks, compute_streaks, compute_this_week, fmt_duration,
};
use crate::models::{
    Category, CustomCycle, CycleRef, Exercise, PainEntry, PainLevel, PresetId, Session, Streaks,
    WeekProgress,
};
use crate::services::cycles::{list_cycles, resolve_cycle_ref, sort_by_pt_protocol, CycleCard};
use crate::services::recommendation::quick_start_preset;
use crate::services::reminders::{greeting, next_reminder, normalize_times};
use crate::services::{recommend, Recommendation, RecommendationInput};
use crate::time_utils::format_local_date;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::{Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const DEFAULT_CUSTOM_EMOJI: &str = "✨";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/exercises", get(get_exercises))
        .route("/api/cycles", get(get_cycles))
        .route("/api/cycles/custom", axum::routing::post(create_custom_cycle))
        .route(
            "/api/cycles/custom/{id}",
            put(rename_custom_cycle).delete(delete_custom_cycle),
        )
        .route("/api/recommendation", get(get_recommendation))
        .route("/api/quick-start", get(get_quick_start))
        .route("/api/pain", get(get_pain))
        .route("/api/pain/today", put(put_pain_today))
        .route("/api/history", get(get_history))
        .route("/api/stats", get(get_stats))
        .route("/api/reminders", get(get_reminders).put(put_reminders))
}

// ─── Catalog ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ExerciseQuery {
    pub category: Option<Category>,
}

/// List catalog exercises, optionally for one category.
async fn get_exercises(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExerciseQuery>,
) -> Json<Vec<Exercise>> {
    let exercises = state
        .catalog
        .exercises()
        .iter()
        .filter(|e| query.category.is_none_or(|c| e.category == c))
        .cloned()
        .collect();
    Json(exercises)
}

// ─── Cycles ──────────────────────────────────────────────────

async fn get_cycles(State(state): State<Arc<AppState>>) -> Json<Vec<CycleCard>> {
    Json(list_cycles(&state.catalog, &state.db).await)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCycleRequest {
    pub label: String,
    pub emoji: Option<String>,
    pub exercise_ids: Vec<String>,
    /// Reorder stretching → mobility → strengthening before saving
    #[serde(default)]
    pub sort_by_protocol: bool,
}

/// Create a custom cycle.
async fn create_custom_cycle(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCycleRequest>,
) -> Result<(StatusCode, Json<CycleCard>)> {
    if req.label.trim().is_empty() {
        return Err(AppError::BadRequest("Label must not be empty".to_string()));
    }
    if req.exercise_ids.is_empty() {
        return Err(AppError::BadRequest(
            "A cycle needs at least one exercise".to_string(),
        ));
    }
    if let Some(unknown) = req
        .exercise_ids
        .iter()
        .find(|id| state.catalog.find_exercise(id).is_none())
    {
        return Err(AppError::BadRequest(format!("Unknown exercise: {}", unknown)));
    }
    let mut seen = HashSet::new();
    if let Some(dup) = req.exercise_ids.iter().find(|id| !seen.insert(id.as_str())) {
        return Err(AppError::BadRequest(format!("Duplicate exercise: {}", dup)));
    }

    let exercise_ids = if req.sort_by_protocol {
        sort_by_pt_protocol(&state.catalog, &req.exercise_ids)
    } else {
        req.exercise_ids
    };
    let emoji = req
        .emoji
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CUSTOM_EMOJI.to_string());
    let cycle = CustomCycle::new(&req.label, &emoji, exercise_ids, Utc::now());

    state.db.save_custom_cycle(&cycle).await;
    tracing::info!(
        cycle = %cycle.id,
        exercises = cycle.exercise_ids.len(),
        "Custom cycle created"
    );

    let card = CycleCard::new(&state.catalog, crate::models::Cycle::Custom(cycle));
    Ok((StatusCode::CREATED, Json(card)))
}

#[derive(Deserialize)]
pub struct RenameCycleRequest {
    pub label: String,
}

async fn rename_custom_cycle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<RenameCycleRequest>,
) -> Result<Json<CustomCycle>> {
    let cycle = state
        .db
        .rename_custom_cycle(&id, &req.label)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Custom cycle {} not found", id)))?;
    Ok(Json(cycle))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteCycleResponse {
    pub deleted: bool,
}

async fn delete_custom_cycle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteCycleResponse>> {
    if !state.db.delete_custom_cycle(&id).await {
        return Err(AppError::NotFound(format!("Custom cycle {} not found", id)));
    }
    tracing::info!(cycle = %id, "Custom cycle deleted");
    Ok(Json(DeleteCycleResponse { deleted: true }))
}

// ─── Recommendation ──────────────────────────────────────────

/// Home screen header: greeting plus the recommended preset.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub greeting: &'static str,
    pub recommendation: Recommendation,
    pub cycle: Option<CycleCard>,
    pub today_pain: Option<PainLevel>,
    pub streak: u32,
    pub weekly_count: u32,
}

async fn get_recommendation(
    State(state): State<Arc<AppState>>,
) -> Json<RecommendationResponse> {
    let now = (state.clock)();
    let today = now.date();
    let history = state.db.load_history().await;
    let today_pain = state.db.pain_for(&format_local_date(today)).await;

    let input = RecommendationInput {
        pain: today_pain,
        streak: compute_streaks(&history, today).current,
        weekly_count: compute_this_week(&history, today).done,
        hour: now.hour(),
    };
    let recommendation = recommend(&input);
    tracing::debug!(
        preset = %recommendation.preset_id,
        pain = ?input.pain.map(PainLevel::get),
        streak = input.streak,
        weekly_count = input.weekly_count,
        hour = input.hour,
        "Computed recommendation"
    );

    let cycle = preset_card(&state, recommendation.preset_id).await;
    Json(RecommendationResponse {
        greeting: greeting(now.hour()),
        recommendation,
        cycle,
        today_pain,
        streak: input.streak,
        weekly_count: input.weekly_count,
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickStartResponse {
    pub preset_id: PresetId,
    pub cycle: Option<CycleCard>,
}

/// Time-of-day preset for the one-tap start.
async fn get_quick_start(State(state): State<Arc<AppState>>) -> Json<QuickStartResponse> {
    let preset_id = quick_start_preset((state.clock)().hour());
    Json(QuickStartResponse {
        preset_id,
        cycle: preset_card(&state, preset_id).await,
    })
}

async fn preset_card(state: &AppState, id: PresetId) -> Option<CycleCard> {
    resolve_cycle_ref(&state.catalog, &state.db, &CycleRef::Preset(id))
        .await
        .map(|cycle| CycleCard::new(&state.catalog, cycle))
}

// ─── Pain Log ────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PainResponse {
    pub today: Option<PainLevel>,
    pub log: Vec<PainEntry>,
}

async fn get_pain(State(state): State<Arc<AppState>>) -> Json<PainResponse> {
    let today = format_local_date((state.clock)().date());
    let log = state.db.load_pain_log().await;
    let today = log.iter().find(|e| e.date == today).map(|e| e.level);
    Json(PainResponse { today, log })
}

#[derive(Deserialize)]
pub struct PainRequest {
    pub level: u8,
}

/// Log (or overwrite) today's pain level.
async fn put_pain_today(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PainRequest>,
) -> Result<Json<PainEntry>> {
    let level = PainLevel::try_from(req.level).map_err(AppError::BadRequest)?;
    let date = format_local_date((state.clock)().date());
    state.db.save_pain_entry(&date, level).await;
    tracing::info!(%date, %level, "Pain logged");
    Ok(Json(PainEntry { date, level }))
}

// ─── History & Stats ─────────────────────────────────────────

async fn get_history(State(state): State<Arc<AppState>>) -> Json<Vec<Session>> {
    Json(state.db.load_history().await)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: String,
    pub done: bool,
    pub is_today: bool,
    pub is_future: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub streaks: Streaks,
    pub week: WeekProgress,
    pub total_sessions: usize,
    pub total_secs: u64,
    pub total_display: String,
    /// Monday–Sunday rows, oldest first
    pub calendar: Vec<Vec<CalendarDay>>,
}

async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    let today = (state.clock)().date();
    let history = state.db.load_history().await;
    let done: HashSet<&str> = history.iter().map(|s| s.date.as_str()).collect();
    let total_secs: u64 = history.iter().map(|s| u64::from(s.secs)).sum();

    let calendar = build_calendar_weeks(today)
        .into_iter()
        .map(|week| {
            week.into_iter()
                .map(|day| {
                    let date = format_local_date(day);
                    CalendarDay {
                        done: done.contains(date.as_str()),
                        is_today: day == today,
                        is_future: day > today,
                        date,
                    }
                })
                .collect()
        })
        .collect();

    Json(StatsResponse {
        streaks: compute_streaks(&history, today),
        week: compute_this_week(&history, today),
        total_sessions: history.len(),
        total_secs,
        total_display: fmt_duration(u32::try_from(total_secs).unwrap_or(u32::MAX)),
        calendar,
    })
}

// ─── Reminders ───────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemindersResponse {
    pub times: Vec<String>,
    pub next: Option<String>,
}

async fn get_reminders(State(state): State<Arc<AppState>>) -> Json<RemindersResponse> {
    let times = state.db.load_times().await;
    reminders_response(&state, times)
}

#[derive(Deserialize)]
pub struct RemindersRequest {
    pub times: Vec<String>,
}

/// Replace the reminder schedule.
async fn put_reminders(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RemindersRequest>,
) -> Result<Json<RemindersResponse>> {
    let times = normalize_times(&req.times)
        .map_err(|bad| AppError::BadRequest(format!("Invalid reminder time: {}", bad)))?;
    state.db.save_times(&times).await;
    tracing::info!(count = times.len(), "Reminder times saved");
    Ok(reminders_response(&state, times))
}

fn reminders_response(state: &AppState, times: Vec<String>) -> Json<RemindersResponse> {
    let next = next_reminder(&times, (state.clock)().time());
    Json(RemindersResponse { times, next })
}
