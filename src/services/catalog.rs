// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise catalog loading and cycle resolution.

use crate::models::{Cycle, CyclePreset, Exercise, PresetId};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Catalog shipped with the binary.
const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// Rough minutes per exercise, used for cycle-length estimates.
const MINUTES_PER_EXERCISE: f64 = 1.5;

#[derive(Deserialize)]
struct CatalogFile {
    exercises: Vec<Exercise>,
    presets: Vec<CyclePreset>,
}

/// Read-only exercise catalog plus the built-in presets.
#[derive(Debug, Clone)]
pub struct CatalogService {
    exercises: Vec<Exercise>,
    presets: Vec<CyclePreset>,
}

impl CatalogService {
    /// Load the catalog embedded at build time.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::load_from_json(BUILTIN_CATALOG)
    }

    /// Load a catalog from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| CatalogError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load a catalog from a JSON string and validate it.
    pub fn load_from_json(json_data: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json_data)
            .map_err(|e| CatalogError::ParseError(e.to_string()))?;

        let mut seen = HashSet::new();
        for exercise in &file.exercises {
            if !seen.insert(exercise.id.as_str()) {
                return Err(CatalogError::DuplicateExercise(exercise.id.clone()));
            }
            if exercise.equipment.as_ref().is_some_and(|e| e.is_empty()) {
                return Err(CatalogError::EmptyEquipment(exercise.id.clone()));
            }
        }

        for id in PresetId::ALL {
            let preset = file
                .presets
                .iter()
                .find(|p| p.id == id)
                .ok_or(CatalogError::MissingPreset(id))?;
            if let Some(unknown) = preset
                .exercise_ids
                .iter()
                .find(|e| !seen.contains(e.as_str()))
            {
                return Err(CatalogError::UnknownPresetExercise {
                    preset: id,
                    exercise: unknown.clone(),
                });
            }
        }

        tracing::info!(
            exercises = file.exercises.len(),
            presets = file.presets.len(),
            "Loaded exercise catalog"
        );
        Ok(Self {
            exercises: file.exercises,
            presets: file.presets,
        })
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn presets(&self) -> &[CyclePreset] {
        &self.presets
    }

    /// Look up an exercise by id.
    pub fn find_exercise(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    pub fn find_preset(&self, id: PresetId) -> Option<&CyclePreset> {
        self.presets.iter().find(|p| p.id == id)
    }

    /// Resolve a cycle to its exercises in declared order.
    ///
    /// Ids missing from the catalog are dropped silently.
    pub fn resolve_exercise_list(&self, cycle: &Cycle) -> Vec<Exercise> {
        self.resolve_ids(cycle.exercise_ids())
    }

    /// Resolve a list of exercise ids, dropping unknown ones.
    pub fn resolve_ids(&self, ids: &[String]) -> Vec<Exercise> {
        ids.iter()
            .filter_map(|id| self.find_exercise(id))
            .cloned()
            .collect()
    }
}

/// Deduplicated equipment across `exercises`, in order of first appearance.
pub fn unique_equipment(exercises: &[Exercise]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut items = Vec::new();
    for item in exercises.iter().flat_map(Exercise::equipment_items) {
        if seen.insert(item.as_str()) {
            items.push(item.clone());
        }
    }
    items
}

/// Estimated cycle length in whole minutes.
pub fn estimated_minutes(exercise_count: usize) -> u32 {
    (exercise_count as f64 * MINUTES_PER_EXERCISE).round() as u32
}

/// Errors from catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse catalog: {0}")]
    ParseError(String),

    #[error("Duplicate exercise id: {0}")]
    DuplicateExercise(String),

    #[error("Exercise {0} declares an empty equipment list")]
    EmptyEquipment(String),

    #[error("Catalog is missing the {0} preset")]
    MissingPreset(PresetId),

    #[error("Preset {preset} references unknown exercise {exercise}")]
    UnknownPresetExercise { preset: PresetId, exercise: String },
}
