// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily pain log entries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Self-reported pain on a 1–5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PainLevel(u8);

impl PainLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&level).then_some(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for PainLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        PainLevel::new(level).ok_or_else(|| {
            format!(
                "pain level must be between {} and {}, got {}",
                PainLevel::MIN,
                PainLevel::MAX,
                level
            )
        })
    }
}

impl From<PainLevel> for u8 {
    fn from(level: PainLevel) -> Self {
        level.0
    }
}

impl fmt::Display for PainLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pain level logged for one calendar day. At most one per date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PainEntry {
    /// "YYYY-MM-DD"
    pub date: String,
    pub level: PainLevel,
}
