//! District status classification
//!
//! Pure rules for deciding whether a territory row counts as finished and
//! which label a district gets once its counts are known.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Full-string, case-insensitive match for "closed" and "off plan" variants
static CLOSED_STATUS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:closed|off[- ]?plan)$").expect("closed status pattern is valid")
});

/// Completion percentage at which a district is reported as almost complete
pub const ALMOST_COMPLETE_PCT: f64 = 95.0;

/// Returns true when a (trimmed) status cell counts towards the closed total
pub fn is_closed_status(status: &str) -> bool {
    CLOSED_STATUS.is_match(status)
}

/// Derived per-district status label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistrictStatus {
    #[serde(rename = "Complete")]
    Complete,
    #[serde(rename = "Almost Complete")]
    AlmostComplete,
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
}

impl DistrictStatus {
    /// Classify a district. The first matching rule wins. Neither `Complete`
    /// nor `NotStarted` applies to an empty district (total 0), so it falls
    /// through to `InProgress`.
    pub fn classify(total: u64, closed: u64, remaining: u64, completion_pct: f64) -> Self {
        if remaining == 0 && total > 0 {
            Self::Complete
        } else if completion_pct >= ALMOST_COMPLETE_PCT {
            Self::AlmostComplete
        } else if closed == 0 && total > 0 {
            Self::NotStarted
        } else {
            Self::InProgress
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Complete => "Complete",
            Self::AlmostComplete => "Almost Complete",
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
        }
    }

    /// Presentation glyph shown in front of the label when enabled
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Complete => "✅",
            Self::AlmostComplete => "🟢",
            Self::NotStarted => "⚪",
            Self::InProgress => "🟡",
        }
    }

    pub fn display_label(&self, glyphs: bool) -> String {
        if glyphs {
            format!("{} {}", self.glyph(), self.label())
        } else {
            self.label().to_string()
        }
    }
}

impl fmt::Display for DistrictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
