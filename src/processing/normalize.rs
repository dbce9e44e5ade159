//! Cell-level cleanup of raw OEWS values.
//!
//! BLS encodes suppressed wages with sentinel strings and publishes some numbers with thousands
//! separators or percent signs. Normalization removes those artifacts so the coercer only has to
//! parse plain numbers. It never fails: unparseable text passes through and becomes missing at
//! coercion.

use std::fmt;

use serde::Serialize;

use crate::types::Value;

/// Why a wage cell was suppressed in the published extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SuppressionMarker {
    /// `**`: the estimate is not releasable.
    NotReleasable,
    /// `#`: the wage is at or above $100/hour or $208,000/year.
    WageCapped,
}

impl SuppressionMarker {
    /// Classifies a raw cell string. Only exact matches count.
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw {
            "**" => Some(Self::NotReleasable),
            "#" => Some(Self::WageCapped),
            _ => None,
        }
    }

    /// The sentinel string BLS publishes for this marker.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotReleasable => "**",
            Self::WageCapped => "#",
        }
    }
}

impl fmt::Display for SuppressionMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a single raw cell.
///
/// - `"**"` and `"#"` become [`Value::Null`]
/// - other text has commas and trailing `%` removed and stays [`Value::Utf8`]
/// - numbers and nulls are returned unchanged
pub fn normalize_cell(value: &Value) -> Value {
    normalize_cell_with_reason(value).0
}

/// Like [`normalize_cell`], but also reports which suppression marker (if any) was seen.
pub fn normalize_cell_with_reason(value: &Value) -> (Value, Option<SuppressionMarker>) {
    match value {
        Value::Utf8(raw) => match SuppressionMarker::from_raw(raw) {
            Some(marker) => (Value::Null, Some(marker)),
            None => (Value::Utf8(strip_numeric_artifacts(raw)), None),
        },
        other => (other.clone(), None),
    }
}

fn strip_numeric_artifacts(raw: &str) -> String {
    let without_commas: String = raw.chars().filter(|c| *c != ',').collect();
    without_commas.trim_end().trim_end_matches('%').to_string()
}
