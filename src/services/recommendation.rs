// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rule-based cycle recommendation.
//!
//! Rules are evaluated top to bottom and the first match wins:
//! 1. pain 4–5 → Morning (gentle stretching only)
//! 2. pain 3   → Evening (stretching and massage)
//! 3. pain 1–2 → Anytime/Rehab (strengthening)
//! 4. no pain logged, no streak, nothing this week → Morning
//! 5. time of day
//!
//! Everything here is pure: callers supply the signals, including the hour.

use crate::models::{PainLevel, PresetId};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Signals used to pick a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationInput {
    /// Today's logged pain, if any
    pub pain: Option<PainLevel>,
    /// Current consecutive-day streak
    pub streak: u32,
    /// Days with a session this week
    pub weekly_count: u32,
    /// Local hour, 0–23
    pub hour: u32,
}

/// Suggested preset with a short justification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub preset_id: PresetId,
    pub reason: &'static str,
    pub reason_emoji: &'static str,
}

struct Rule {
    matches: fn(&RecommendationInput) -> bool,
    preset_id: PresetId,
    reason: &'static str,
    reason_emoji: &'static str,
}

impl Rule {
    fn recommendation(&self) -> Recommendation {
        Recommendation {
            preset_id: self.preset_id,
            reason: self.reason,
            reason_emoji: self.reason_emoji,
        }
    }
}

fn pain_at_least(input: &RecommendationInput, min: u8) -> bool {
    input.pain.is_some_and(|p| p.get() >= min)
}

const RULES: &[Rule] = &[
    Rule {
        matches: |i| pain_at_least(i, 4),
        preset_id: PresetId::Morning,
        reason: "High pain today. Gentle stretching only",
        reason_emoji: "🤕",
    },
    Rule {
        matches: |i| i.pain.is_some_and(|p| p.get() == 3),
        preset_id: PresetId::Evening,
        reason: "Moderate pain. Stretching and massage will help",
        reason_emoji: "😬",
    },
    Rule {
        matches: |i| i.pain.is_some(),
        preset_id: PresetId::Anytime,
        reason: "Low pain. Great day to strengthen your foot",
        reason_emoji: "💪",
    },
    Rule {
        matches: |i| i.streak == 0 && i.weekly_count == 0,
        preset_id: PresetId::Morning,
        reason: "Getting back on track. Start with the gentlest routine",
        reason_emoji: "🌱",
    },
];

const MORNING_WINDOW: Rule = Rule {
    matches: |i| (5..10).contains(&i.hour),
    preset_id: PresetId::Morning,
    reason: "Morning routine. Reduces that sharp first-step pain",
    reason_emoji: "🌅",
};

const MIDDAY_WINDOW: Rule = Rule {
    matches: |i| (10..18).contains(&i.hour),
    preset_id: PresetId::Anytime,
    reason: "Midday rehab. Build strength while the day is ahead of you",
    reason_emoji: "☀️",
};

const EVENING_WINDOW: Rule = Rule {
    matches: |_| true,
    preset_id: PresetId::Evening,
    reason: "Evening wind-down. Recover after a day on your feet",
    reason_emoji: "🌙",
};

fn time_of_day(input: &RecommendationInput) -> Recommendation {
    [MORNING_WINDOW, MIDDAY_WINDOW, EVENING_WINDOW]
        .iter()
        .find(|rule| (rule.matches)(input))
        .unwrap_or(&EVENING_WINDOW)
        .recommendation()
}

/// Recommend a preset from pain, engagement, and time of day.
pub fn recommend(input: &RecommendationInput) -> Recommendation {
    RULES
        .iter()
        .find(|rule| (rule.matches)(input))
        .map(Rule::recommendation)
        .unwrap_or_else(|| time_of_day(input))
}

/// Time-of-day preset, for when no pain or streak signal is available.
pub fn quick_start_preset(hour: u32) -> PresetId {
    time_of_day(&RecommendationInput {
        pain: None,
        streak: 0,
        weekly_count: 0,
        hour,
    })
    .preset_id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(pain: Option<u8>, streak: u32, weekly_count: u32, hour: u32) -> RecommendationInput {
        RecommendationInput {
            pain: pain.map(|p| PainLevel::new(p).unwrap()),
            streak,
            weekly_count,
            hour,
        }
    }

    #[test]
    fn test_high_pain_is_morning() {
        assert_eq!(recommend(&input(Some(4), 3, 2, 14)).preset_id, PresetId::Morning);
        assert_eq!(recommend(&input(Some(5), 3, 2, 14)).preset_id, PresetId::Morning);
    }

    #[test]
    fn test_moderate_pain_is_evening() {
        assert_eq!(recommend(&input(Some(3), 3, 2, 14)).preset_id, PresetId::Evening);
    }

    #[test]
    fn test_low_pain_is_rehab() {
        assert_eq!(recommend(&input(Some(1), 3, 2, 14)).preset_id, PresetId::Anytime);
        assert_eq!(recommend(&input(Some(2), 3, 2, 14)).preset_id, PresetId::Anytime);
    }

    #[test]
    fn test_pain_overrides_time_of_day() {
        assert_eq!(recommend(&input(Some(5), 3, 2, 13)).preset_id, PresetId::Morning);
        assert_eq!(recommend(&input(Some(1), 3, 2, 7)).preset_id, PresetId::Anytime);
    }

    #[test]
    fn test_pain_overrides_engagement() {
        assert_eq!(recommend(&input(Some(2), 0, 0, 20)).preset_id, PresetId::Anytime);
    }

    #[test]
    fn test_reengagement_any_hour() {
        for hour in 0..24 {
            let r = recommend(&input(None, 0, 0, hour));
            assert_eq!(r.preset_id, PresetId::Morning, "hour {}", hour);
            assert_eq!(r.reason_emoji, "🌱");
        }
    }

    #[test]
    fn test_reengagement_needs_both_zero() {
        assert_eq!(recommend(&input(None, 0, 1, 14)).preset_id, PresetId::Anytime);
        assert_eq!(recommend(&input(None, 1, 0, 20)).preset_id, PresetId::Evening);
    }

    #[test]
    fn test_time_bands() {
        let cases = [
            (0, PresetId::Evening),
            (4, PresetId::Evening),
            (5, PresetId::Morning),
            (9, PresetId::Morning),
            (10, PresetId::Anytime),
            (12, PresetId::Anytime),
            (17, PresetId::Anytime),
            (18, PresetId::Evening),
            (23, PresetId::Evening),
        ];
        for (hour, expected) in cases {
            assert_eq!(recommend(&input(None, 3, 2, hour)).preset_id, expected, "hour {}", hour);
            assert_eq!(quick_start_preset(hour), expected, "hour {}", hour);
        }
    }

    #[test]
    fn test_total_with_non_empty_reasons() {
        let pains = [None, Some(1), Some(2), Some(3), Some(4), Some(5)];
        for pain in pains {
            for streak in [0, 1, 7] {
                for weekly_count in [0, 1, 7] {
                    for hour in 0..24 {
                        let r = recommend(&input(pain, streak, weekly_count, hour));
                        assert!(!r.reason.is_empty());
                        assert!(!r.reason_emoji.is_empty());
                        assert!(PresetId::ALL.contains(&r.preset_id));
                    }
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_hour_falls_back_to_evening() {
        assert_eq!(quick_start_preset(99), PresetId::Evening);
    }
}
