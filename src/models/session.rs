// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Completed-session record, appended to history once per finished cycle.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::time_utils::{format_local_date, format_local_time};

/// One completed run of a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Calendar day ("YYYY-MM-DD", local)
    pub date: String,
    /// Engaged seconds (total timer at finish)
    pub secs: u32,
    /// Number of exercises in the resolved cycle
    pub exercise_count: u32,
    /// Completion time ("HH:MM", 24h local)
    pub time: String,
}

impl Session {
    /// Build the record for a cycle completed at `now`.
    pub fn completed_at(now: NaiveDateTime, secs: u32, exercise_count: u32) -> Self {
        Self {
            date: format_local_date(now.date()),
            secs,
            exercise_count,
            time: format_local_time(now.time()),
        }
    }
}
