// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod cycle;
pub mod exercise;
pub mod pain;
pub mod session;
pub mod stats;

pub use cycle::{CustomCycle, Cycle, CyclePreset, CycleRef, PresetId};
pub use exercise::{Category, Exercise};
pub use pain::{PainEntry, PainLevel};
pub use session::Session;
pub use stats::{Streaks, WeekProgress};
