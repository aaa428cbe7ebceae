// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cycle lookup, listing and custom-cycle ordering.

use crate::db::LocalDb;
use crate::models::{Cycle, CycleRef};
use crate::services::catalog::{estimated_minutes, unique_equipment, CatalogService};
use serde::Serialize;

/// Card shown in the cycle picker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleCard {
    #[serde(flatten)]
    pub cycle: Cycle,
    /// Exercises that still resolve against the catalog
    pub exercise_count: usize,
    pub estimated_minutes: u32,
    pub equipment: Vec<String>,
}

impl CycleCard {
    pub fn new(catalog: &CatalogService, cycle: Cycle) -> Self {
        let exercises = catalog.resolve_exercise_list(&cycle);
        Self {
            exercise_count: exercises.len(),
            estimated_minutes: estimated_minutes(exercises.len()),
            equipment: unique_equipment(&exercises),
            cycle,
        }
    }
}

/// Presets first, then custom cycles in creation order.
pub async fn list_cycles(catalog: &CatalogService, db: &LocalDb) -> Vec<CycleCard> {
    let presets = catalog.presets().iter().cloned().map(Cycle::Preset);
    let customs = db.load_custom_cycles().await.into_iter().map(Cycle::Custom);
    presets
        .chain(customs)
        .map(|cycle| CycleCard::new(catalog, cycle))
        .collect()
}

/// Look up the cycle a client refers to.
pub async fn resolve_cycle_ref(
    catalog: &CatalogService,
    db: &LocalDb,
    cycle_ref: &CycleRef,
) -> Option<Cycle> {
    match cycle_ref {
        CycleRef::Preset(id) => catalog.find_preset(*id).cloned().map(Cycle::Preset),
        CycleRef::Custom(id) => db.get_custom_cycle(id).await.map(Cycle::Custom),
    }
}

/// Reorder exercise ids stretching → mobility → strengthening.
///
/// The sort is stable; ids missing from the catalog go last.
pub fn sort_by_pt_protocol(catalog: &CatalogService, ids: &[String]) -> Vec<String> {
    let mut sorted = ids.to_vec();
    sorted.sort_by_key(|id| {
        let category = catalog.find_exercise(id).map(|e| e.category);
        (category.is_none(), category)
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CustomCycle, PresetId};
    use chrono::Utc;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sort_by_protocol_is_stable() {
        let catalog = CatalogService::builtin().unwrap();
        let input = ids(&[
            "heel-raise",
            "ankle-circles",
            "calf-bent",
            "toe-scrunch",
            "toe-extension",
            "bottle-roll",
        ]);
        let sorted = sort_by_pt_protocol(&catalog, &input);
        assert_eq!(
            sorted,
            ids(&[
                "calf-bent",
                "toe-extension",
                "ankle-circles",
                "bottle-roll",
                "heel-raise",
                "toe-scrunch",
            ])
        );
        assert_eq!(input[0], "heel-raise");
    }

    #[test]
    fn test_sort_puts_unknown_last() {
        let catalog = CatalogService::builtin().unwrap();
        let sorted = sort_by_pt_protocol(&catalog, &ids(&["ghost", "short-foot", "towel-stretch"]));
        assert_eq!(sorted, ids(&["towel-stretch", "short-foot", "ghost"]));
    }

    #[tokio::test]
    async fn test_list_cycles_presets_then_customs() {
        let catalog = CatalogService::builtin().unwrap();
        let db = LocalDb::new_memory();
        let custom = CustomCycle::new("Desk", "🪑", ids(&["heel-raise", "ghost"]), Utc::now());
        db.save_custom_cycle(&custom).await;

        let cards = list_cycles(&catalog, &db).await;
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].cycle.id(), "morning");
        assert_eq!(cards[0].exercise_count, 6);
        assert_eq!(cards[0].estimated_minutes, 9);
        assert_eq!(cards[3].cycle.id(), custom.id);
        assert_eq!(cards[3].exercise_count, 1);
        assert_eq!(cards[3].equipment, vec!["Chair".to_string()]);
    }

    #[tokio::test]
    async fn test_resolve_cycle_ref() {
        let catalog = CatalogService::builtin().unwrap();
        let db = LocalDb::new_memory();
        let custom = CustomCycle::new("Desk", "🪑", ids(&["heel-raise"]), Utc::now());
        db.save_custom_cycle(&custom).await;

        let preset = resolve_cycle_ref(&catalog, &db, &CycleRef::Preset(PresetId::Evening))
            .await
            .unwrap();
        assert_eq!(preset.label(), "Evening");

        let found = resolve_cycle_ref(&catalog, &db, &CycleRef::Custom(custom.id.clone())).await;
        assert_eq!(found, Some(Cycle::Custom(custom)));

        let missing = resolve_cycle_ref(&catalog, &db, &CycleRef::Custom("nope".into())).await;
        assert!(missing.is_none());
    }
}
