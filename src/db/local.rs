// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fail-soft typed store.
//!
//! Provides high-level operations for:
//! - Session history (append-only)
//! - Pain log (one entry per date)
//! - Custom cycles
//! - Reminder times
//!
//! No operation here returns an error: reads fall back to an empty
//! default and writes become no-ops when storage is unavailable, full, or
//! holds corrupt data. Failures are logged at `warn`.

use crate::db::keys;
use crate::db::store::{FileStore, MemoryStore, StorageError};
use crate::models::{CustomCycle, PainEntry, PainLevel, Session};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
enum Backend {
    Memory(Arc<MemoryStore>),
    File(FileStore),
    Offline,
}

/// Local key-value database.
#[derive(Clone)]
pub struct LocalDb {
    backend: Backend,
    /// Serializes read-modify-write sequences.
    write_lock: Arc<Mutex<()>>,
}

impl LocalDb {
    fn with_backend(backend: Backend) -> Self {
        Self {
            backend,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// File-backed database rooted at `dir` (created on first write).
    pub fn open<P: AsRef<Path>>(dir: P) -> Self {
        tracing::info!(dir = %dir.as_ref().display(), "Using file-backed store");
        Self::with_backend(Backend::File(FileStore::new(dir)))
    }

    /// In-memory database (tests, ephemeral runs).
    pub fn new_memory() -> Self {
        Self::with_backend(Backend::Memory(Arc::new(MemoryStore::default())))
    }

    /// A database whose every operation fails underneath.
    ///
    /// Reads return defaults and writes are dropped.
    pub fn new_offline() -> Self {
        Self::with_backend(Backend::Offline)
    }

    // ─── Raw Access ──────────────────────────────────────────────

    /// Read the raw JSON stored under `key`.
    pub async fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        match &self.backend {
            Backend::Memory(store) => Ok(store.get(key)),
            Backend::File(store) => store.get(key).await,
            Backend::Offline => Err(StorageError::Unavailable),
        }
    }

    /// Overwrite the raw JSON stored under `key`.
    pub async fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match &self.backend {
            Backend::Memory(store) => {
                store.set(key, value.to_string());
                Ok(())
            }
            Backend::File(store) => store.set(key, value).await,
            Backend::Offline => Err(StorageError::Unavailable),
        }
    }

    async fn read_json<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let raw = match self.get_raw(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                tracing::warn!(key, error = %e, "Storage read failed, using default");
                return T::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "Corrupt stored value, using default");
            T::default()
        })
    }

    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to serialize value, dropping write");
                return;
            }
        };

        if let Err(e) = self.set_raw(key, &raw).await {
            tracing::warn!(key, error = %e, "Storage write failed, dropping write");
        }
    }

    // ─── Session History ─────────────────────────────────────────

    /// All completed sessions in insertion order.
    pub async fn load_history(&self) -> Vec<Session> {
        self.read_json(keys::HISTORY).await
    }

    /// Append one session record.
    pub async fn append_session(&self, session: &Session) {
        let _guard = self.write_lock.lock().await;
        let mut history = self.load_history().await;
        history.push(session.clone());
        self.write_json(keys::HISTORY, &history).await;
        tracing::debug!(
            date = %session.date,
            secs = session.secs,
            exercise_count = session.exercise_count,
            total = history.len(),
            "Session appended"
        );
    }

    // ─── Pain Log ────────────────────────────────────────────────

    pub async fn load_pain_log(&self) -> Vec<PainEntry> {
        self.read_json(keys::PAIN_LOG).await
    }

    /// Pain level logged for `date`, if any.
    pub async fn pain_for(&self, date: &str) -> Option<PainLevel> {
        self.load_pain_log()
            .await
            .into_iter()
            .find(|e| e.date == date)
            .map(|e| e.level)
    }

    /// Insert or replace the entry for `date`.
    pub async fn save_pain_entry(&self, date: &str, level: PainLevel) {
        let _guard = self.write_lock.lock().await;
        let mut log = self.load_pain_log().await;
        let entry = PainEntry {
            date: date.to_string(),
            level,
        };
        match log.iter_mut().find(|e| e.date == date) {
            Some(existing) => *existing = entry,
            None => log.push(entry),
        }
        self.write_json(keys::PAIN_LOG, &log).await;
    }

    // ─── Custom Cycles ───────────────────────────────────────────

    pub async fn load_custom_cycles(&self) -> Vec<CustomCycle> {
        self.read_json(keys::CUSTOM_CYCLES).await
    }

    pub async fn get_custom_cycle(&self, id: &str) -> Option<CustomCycle> {
        self.load_custom_cycles()
            .await
            .into_iter()
            .find(|c| c.id == id)
    }

    /// Insert a cycle, or replace the one with the same id.
    pub async fn save_custom_cycle(&self, cycle: &CustomCycle) {
        let _guard = self.write_lock.lock().await;
        let mut cycles = self.load_custom_cycles().await;
        match cycles.iter_mut().find(|c| c.id == cycle.id) {
            Some(existing) => *existing = cycle.clone(),
            None => cycles.push(cycle.clone()),
        }
        self.write_json(keys::CUSTOM_CYCLES, &cycles).await;
    }

    /// Rename a custom cycle.
    ///
    /// The label is trimmed; an empty or unchanged label leaves the cycle
    /// as is. Returns the stored cycle, or `None` for an unknown id.
    pub async fn rename_custom_cycle(&self, id: &str, label: &str) -> Option<CustomCycle> {
        let _guard = self.write_lock.lock().await;
        let mut cycles = self.load_custom_cycles().await;
        let cycle = cycles.iter_mut().find(|c| c.id == id)?;

        let trimmed = label.trim();
        if trimmed.is_empty() || trimmed == cycle.label {
            return Some(cycle.clone());
        }
        cycle.label = trimmed.to_string();
        let renamed = cycle.clone();
        self.write_json(keys::CUSTOM_CYCLES, &cycles).await;
        Some(renamed)
    }

    /// Delete a custom cycle. Returns whether it existed.
    pub async fn delete_custom_cycle(&self, id: &str) -> bool {
        let _guard = self.write_lock.lock().await;
        let mut cycles = self.load_custom_cycles().await;
        let before = cycles.len();
        cycles.retain(|c| c.id != id);
        if cycles.len() == before {
            return false;
        }
        self.write_json(keys::CUSTOM_CYCLES, &cycles).await;
        true
    }

    // ─── Reminder Times ──────────────────────────────────────────

    pub async fn load_times(&self) -> Vec<String> {
        self.read_json(keys::REMINDER_TIMES).await
    }

    pub async fn save_times(&self, times: &[String]) {
        self.write_json(keys::REMINDER_TIMES, times).await;
    }
}
