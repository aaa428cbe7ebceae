// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise model as it appears in the catalog.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Exercise category. Variant order is the physical-therapy protocol order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Stretching,
    Mobility,
    Strengthening,
}

/// A single recovery exercise. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Stable identifier (e.g. "towel-stretch")
    pub id: String,
    pub name: String,
    pub category: Category,
    /// Illustration URL
    #[serde(default)]
    pub image: String,
    /// Hold/duration guidance ("30 seconds per rep")
    pub duration: String,
    /// Repetition guidance ("3 reps each foot")
    pub reps: String,
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acute_warning: Option<String>,
    /// Physical items needed, in declared order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<Vec<String>>,
}

impl Exercise {
    /// Equipment items, empty when the exercise needs none.
    pub fn equipment_items(&self) -> &[String] {
        self.equipment.as_deref().unwrap_or(&[])
    }
}
