// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plantar-Tracker: a companion for plantar fasciitis home exercise routines
//!
//! This crate provides the guided cycle runner, the rule-based cycle
//! recommendation, and the local stores for history, pain, custom cycles
//! and reminders, served as a small local JSON API.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use chrono::NaiveDateTime;
use config::{Config, StorageConfig};
use db::LocalDb;
use services::{CatalogError, CatalogService, CycleRunner};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: LocalDb,
    pub catalog: Arc<CatalogService>,
    /// The single active session on this device
    pub runner: Mutex<CycleRunner>,
    /// Local wall clock
    pub clock: fn() -> NaiveDateTime,
}

impl AppState {
    /// Load the catalog and open the store described by `config`.
    pub fn new(config: Config) -> Result<Self, CatalogError> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading exercise catalog");
                CatalogService::load_from_file(path)?
            }
            None => CatalogService::builtin()?,
        };
        let db = match &config.storage {
            StorageConfig::Dir(dir) => LocalDb::open(dir),
            StorageConfig::Memory => LocalDb::new_memory(),
        };
        Ok(Self::from_parts(config, db, catalog, time_utils::local_now))
    }

    pub fn from_parts(
        config: Config,
        db: LocalDb,
        catalog: CatalogService,
        clock: fn() -> NaiveDateTime,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let runner = CycleRunner::new(Arc::clone(&catalog), db.clone()).with_clock(clock);
        Self {
            config,
            db,
            catalog,
            runner: Mutex::new(runner),
            clock,
        }
    }
}
