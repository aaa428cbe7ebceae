// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File-backed store behavior across restarts and with damaged data.

use plantar_tracker::config::{Config, StorageConfig};
use plantar_tracker::db::{keys, LocalDb};
use plantar_tracker::models::{CustomCycle, PainLevel, Session};
use plantar_tracker::AppState;

mod common;

fn session(date: &str) -> Session {
    Session {
        date: date.to_string(),
        secs: 240,
        exercise_count: 6,
        time: "21:10".to_string(),
    }
}

#[tokio::test]
async fn test_data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let db = LocalDb::open(dir.path());
        db.append_session(&session("2024-06-01")).await;
        db.save_pain_entry("2024-06-01", PainLevel::new(2).unwrap())
            .await;
        db.save_times(&["07:00".to_string()]).await;
    }

    let db = LocalDb::open(dir.path());
    assert_eq!(db.load_history().await, vec![session("2024-06-01")]);
    assert_eq!(db.pain_for("2024-06-01").await, PainLevel::new(2));
    assert_eq!(db.load_times().await, vec!["07:00".to_string()]);
    assert!(dir.path().join("plantar_history.json").exists());
}

#[tokio::test]
async fn test_corrupt_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(format!("{}.json", keys::HISTORY)), "{not json").unwrap();

    let db = LocalDb::open(dir.path());
    assert!(db.load_history().await.is_empty());

    db.append_session(&session("2024-06-02")).await;
    assert_eq!(db.load_history().await.len(), 1);
}

#[tokio::test]
async fn test_concurrent_appends_are_not_lost() {
    let dir = tempfile::tempdir().unwrap();
    let db = LocalDb::open(dir.path());

    let tasks: Vec<_> = (1..=10)
        .map(|day| {
            let db = db.clone();
            tokio::spawn(async move {
                db.append_session(&session(&format!("2024-06-{:02}", day)))
                    .await;
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(db.load_history().await.len(), 10);
}

#[tokio::test]
async fn test_offline_store_degrades_silently() {
    let db = LocalDb::new_offline();
    let cycle = CustomCycle::new("Mine", "✨", vec!["calf-bent".to_string()], chrono::Utc::now());

    db.save_custom_cycle(&cycle).await;
    db.append_session(&session("2024-06-01")).await;

    assert!(db.load_custom_cycles().await.is_empty());
    assert!(db.load_history().await.is_empty());
    assert!(db.pain_for("2024-06-01").await.is_none());
}

#[tokio::test]
async fn test_app_state_opens_configured_dir() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        storage: StorageConfig::Dir(dir.path().to_path_buf()),
        ..Config::test_default()
    };

    let state = AppState::new(config).unwrap();
    state.db.append_session(&session("2024-06-03")).await;

    let reopened = LocalDb::open(dir.path());
    assert_eq!(reopened.load_history().await.len(), 1);
}

#[tokio::test]
async fn test_offline_app_still_serves_runs() {
    let (app, _) = common::create_test_app_with_db(LocalDb::new_offline());
    let (status, run) = common::send(
        &app,
        "POST",
        "/api/run/start",
        Some(serde_json::json!({ "kind": "preset", "id": "morning" })),
    )
    .await;

    assert_eq!(status, axum::http::StatusCode::OK);
    assert_eq!(run["phase"], "equipment-check");

    let (_, history) = common::send(&app, "GET", "/api/history", None).await;
    assert_eq!(history, serde_json::json!([]));
}
