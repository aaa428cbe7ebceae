//! Streak and weekly-progress aggregates computed from session history.
//!
//! These are pure date-bucketing helpers: callers pass "today" so results
//! are deterministic.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::Session;
use crate::time_utils::parse_local_date;

/// Number of weeks shown in the activity calendar.
pub const CALENDAR_WEEKS: usize = 5;

/// Current and best consecutive-day streaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streaks {
    /// Consecutive days with a session, ending today
    pub current: u32,
    /// Longest run of consecutive days up to today
    pub best: u32,
}

/// Progress through the current Monday-based week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekProgress {
    /// Days this week with at least one session
    pub done: u32,
    /// Days of the week elapsed so far, today included
    pub elapsed: u32,
}

fn session_dates(history: &[Session]) -> HashSet<NaiveDate> {
    history
        .iter()
        .filter_map(|s| parse_local_date(&s.date))
        .collect()
}

/// Compute current and best streaks.
pub fn compute_streaks(history: &[Session], today: NaiveDate) -> Streaks {
    let dates = session_dates(history);

    let mut current = 0;
    let mut cursor = today;
    while dates.contains(&cursor) {
        current += 1;
        cursor -= Duration::days(1);
    }

    let mut best = 0;
    let mut running = 0;
    if let Some(first) = dates.iter().min().copied() {
        let mut iter = first;
        while iter <= today {
            if dates.contains(&iter) {
                running += 1;
                best = best.max(running);
            } else {
                running = 0;
            }
            iter += Duration::days(1);
        }
    }

    Streaks { current, best }
}

fn week_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(i64::from(today.weekday().num_days_from_monday()))
}

/// Count session days in the week containing `today`.
pub fn compute_this_week(history: &[Session], today: NaiveDate) -> WeekProgress {
    let dates = session_dates(history);
    let mut progress = WeekProgress::default();

    let mut iter = week_start(today);
    while iter <= today {
        progress.elapsed += 1;
        if dates.contains(&iter) {
            progress.done += 1;
        }
        iter += Duration::days(1);
    }
    progress
}

/// Monday–Sunday weeks ending with the week that contains `today`.
pub fn build_calendar_weeks(today: NaiveDate) -> Vec<[NaiveDate; 7]> {
    let end_sunday = week_start(today) + Duration::days(6);
    let start_monday = end_sunday - Duration::days((CALENDAR_WEEKS * 7 - 1) as i64);

    (0..CALENDAR_WEEKS)
        .map(|week| {
            let monday = start_monday + Duration::days((week * 7) as i64);
            std::array::from_fn(|day| monday + Duration::days(day as i64))
        })
        .collect()
}

/// Human-readable duration: "45s", "1m 30s".
pub fn fmt_duration(secs: u32) -> String {
    let m = secs / 60;
    let s = secs % 60;
    if m == 0 {
        format!("{}s", s)
    } else {
        format!("{}m {}s", m, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        parse_local_date(s).unwrap()
    }

    fn session(date: &str) -> Session {
        Session {
            date: date.to_string(),
            secs: 60,
            exercise_count: 4,
            time: "08:00".to_string(),
        }
    }

    #[test]
    fn test_fmt_duration() {
        assert_eq!(fmt_duration(0), "0s");
        assert_eq!(fmt_duration(45), "45s");
        assert_eq!(fmt_duration(90), "1m 30s");
        assert_eq!(fmt_duration(3600), "60m 0s");
    }

    #[test]
    fn test_streaks_empty_history() {
        assert_eq!(compute_streaks(&[], day("2024-01-10")), Streaks::default());
    }

    #[test]
    fn test_single_session_today() {
        let streaks = compute_streaks(&[session("2024-01-10")], day("2024-01-10"));
        assert_eq!(streaks, Streaks { current: 1, best: 1 });
    }

    #[test]
    fn test_three_day_streak_counts_duplicates_once() {
        let history = vec![
            session("2024-01-08"),
            session("2024-01-09"),
            session("2024-01-09"),
            session("2024-01-10"),
        ];
        let streaks = compute_streaks(&history, day("2024-01-10"));
        assert_eq!(streaks, Streaks { current: 3, best: 3 });
    }

    #[test]
    fn test_gap_breaks_current_but_keeps_best() {
        let history = vec![
            session("2024-01-01"),
            session("2024-01-02"),
            session("2024-01-03"),
            session("2024-01-05"),
        ];
        let streaks = compute_streaks(&history, day("2024-01-06"));
        assert_eq!(streaks, Streaks { current: 0, best: 3 });
    }

    #[test]
    fn test_unparseable_dates_are_ignored() {
        let history = vec![session("not-a-date"), session("2024-01-10")];
        let streaks = compute_streaks(&history, day("2024-01-10"));
        assert_eq!(streaks.current, 1);
    }

    #[test]
    fn test_week_monday_without_sessions() {
        // 2024-01-08 is a Monday
        let week = compute_this_week(&[], day("2024-01-08"));
        assert_eq!(week, WeekProgress { done: 0, elapsed: 1 });
    }

    #[test]
    fn test_week_excludes_previous_week() {
        let history = vec![
            session("2024-01-07"), // Sunday of the previous week
            session("2024-01-08"),
            session("2024-01-10"),
        ];
        let week = compute_this_week(&history, day("2024-01-11"));
        assert_eq!(week, WeekProgress { done: 2, elapsed: 4 });
    }

    #[test]
    fn test_week_on_sunday_spans_seven_days() {
        let week = compute_this_week(&[], day("2024-01-14"));
        assert_eq!(week.elapsed, 7);
    }

    #[test]
    fn test_calendar_shape() {
        let today = day("2024-01-10");
        let weeks = build_calendar_weeks(today);

        assert_eq!(weeks.len(), CALENDAR_WEEKS);
        for week in &weeks {
            assert_eq!(week[0].weekday(), chrono::Weekday::Mon);
            assert_eq!(week[6].weekday(), chrono::Weekday::Sun);
        }
        let last = weeks[CALENDAR_WEEKS - 1][6];
        assert!(last >= today);
        assert_eq!(last, day("2024-01-14"));
    }
}
