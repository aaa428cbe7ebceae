// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cycle definitions: built-in presets and user-created custom cycles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Identifier of a built-in preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum PresetId {
    Morning,
    /// The strengthening ("Rehab") preset.
    Anytime,
    Evening,
}

impl PresetId {
    pub const ALL: [PresetId; 3] = [PresetId::Morning, PresetId::Anytime, PresetId::Evening];

    pub fn as_str(self) -> &'static str {
        match self {
            PresetId::Morning => "morning",
            PresetId::Anytime => "anytime",
            PresetId::Evening => "evening",
        }
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(PresetId::Morning),
            "anytime" | "rehab" => Ok(PresetId::Anytime),
            "evening" => Ok(PresetId::Evening),
            other => Err(format!("unknown preset: {}", other)),
        }
    }
}

/// A built-in, time-of-day themed cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CyclePreset {
    pub id: PresetId,
    pub label: String,
    pub emoji: String,
    pub tagline: String,
    pub exercise_ids: Vec<String>,
}

/// A user-defined cycle. Stored under the `custom_cycles` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomCycle {
    pub id: String,
    pub label: String,
    pub emoji: String,
    /// Exercise ids in user-defined order
    pub exercise_ids: Vec<String>,
    /// Creation time (ISO 8601)
    pub created_at: String,
}

impl CustomCycle {
    /// Build a new custom cycle with a freshly generated id.
    pub fn new(label: &str, emoji: &str, exercise_ids: Vec<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            label: label.trim().to_string(),
            emoji: emoji.to_string(),
            exercise_ids,
            created_at: crate::time_utils::format_utc_rfc3339(now),
        }
    }
}

/// Either kind of cycle, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Cycle {
    Preset(CyclePreset),
    Custom(CustomCycle),
}

impl Cycle {
    /// Cycle id as a string (preset name or custom id).
    pub fn id(&self) -> String {
        match self {
            Cycle::Preset(p) => p.id.to_string(),
            Cycle::Custom(c) => c.id.clone(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Cycle::Preset(p) => &p.label,
            Cycle::Custom(c) => &c.label,
        }
    }

    pub fn emoji(&self) -> &str {
        match self {
            Cycle::Preset(p) => &p.emoji,
            Cycle::Custom(c) => &c.emoji,
        }
    }

    /// Declared exercise ids, possibly including stale ones.
    pub fn exercise_ids(&self) -> &[String] {
        match self {
            Cycle::Preset(p) => &p.exercise_ids,
            Cycle::Custom(c) => &c.exercise_ids,
        }
    }
}

/// Reference to a cycle as sent by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum CycleRef {
    Preset(PresetId),
    Custom(String),
}
