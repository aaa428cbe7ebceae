// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily reminder schedule and greeting helpers.

use crate::time_utils::{format_local_time, parse_clock_time};
use chrono::NaiveTime;

/// Greeting for the given local hour.
pub fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning"
    } else if hour < 17 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}

/// Validate reminder times and normalize them to sorted, unique "HH:MM".
///
/// Returns the first offending entry on failure.
pub fn normalize_times(times: &[String]) -> Result<Vec<String>, String> {
    let mut parsed = times
        .iter()
        .map(|t| parse_clock_time(t.trim()).ok_or_else(|| t.clone()))
        .collect::<Result<Vec<NaiveTime>, String>>()?;
    parsed.sort();
    parsed.dedup();
    Ok(parsed.into_iter().map(format_local_time).collect())
}

/// The next reminder strictly after `now`, wrapping to tomorrow's first.
///
/// Unparseable entries are ignored.
pub fn next_reminder(times: &[String], now: NaiveTime) -> Option<String> {
    let parsed: Vec<NaiveTime> = times.iter().filter_map(|t| parse_clock_time(t)).collect();
    parsed
        .iter()
        .filter(|t| **t > now)
        .min()
        .or_else(|| parsed.iter().min())
        .map(|t| format_local_time(*t))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn times(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_greeting_bands() {
        assert_eq!(greeting(0), "Good morning");
        assert_eq!(greeting(11), "Good morning");
        assert_eq!(greeting(12), "Good afternoon");
        assert_eq!(greeting(16), "Good afternoon");
        assert_eq!(greeting(17), "Good evening");
        assert_eq!(greeting(23), "Good evening");
    }

    #[test]
    fn test_next_reminder_later_today() {
        let list = times(&["07:00", "20:30", "12:15"]);
        assert_eq!(next_reminder(&list, at(8, 0)), Some("12:15".to_string()));
        assert_eq!(next_reminder(&list, at(12, 15)), Some("20:30".to_string()));
    }

    #[test]
    fn test_next_reminder_wraps_to_earliest() {
        let list = times(&["20:30", "07:00"]);
        assert_eq!(next_reminder(&list, at(21, 0)), Some("07:00".to_string()));
    }

    #[test]
    fn test_next_reminder_empty() {
        assert_eq!(next_reminder(&[], at(9, 0)), None);
        assert_eq!(next_reminder(&times(&["nope"]), at(9, 0)), None);
    }

    #[test]
    fn test_normalize_pads_sorts_and_dedups() {
        let list = times(&["21:00", "7:05", "07:05"]);
        assert_eq!(normalize_times(&list).unwrap(), vec!["07:05", "21:00"]);
    }

    #[test]
    fn test_normalize_rejects_out_of_range() {
        assert_eq!(normalize_times(&times(&["08:00", "24:00"])), Err("24:00".to_string()));
        assert_eq!(normalize_times(&times(&["12:60"])), Err("12:60".to_string()));
        assert_eq!(normalize_times(&times(&["noon"])), Err("noon".to_string()));
    }
}
