// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod catalog;
pub mod cycles;
pub mod recommendation;
pub mod reminders;
pub mod runner;

pub use catalog::{CatalogError, CatalogService};
pub use recommendation::{recommend, Recommendation, RecommendationInput};
pub use runner::{CycleRunner, RunPhase, RunSnapshot, RunnerError, TickMode};
