//! Normalization pipeline: raw table → cleaned cells → typed table.
//!
//! The pipeline runs in two stages over a raw [`crate::types::DataSet`]:
//!
//! - [`normalize`]: suppression markers (`**`, `#`) become missing; commas and trailing `%` are
//!   stripped from text
//! - [`coerce`]: every non-identifier column becomes `Float64`, with anything unparseable missing
//!
//! [`normalize_table`] runs both and returns a [`NormalizationReport`]. The pipeline is
//! idempotent: feeding its output back in yields an identical table.
//!
//! ## Example
//!
//! ```rust
//! use oews_explorer::processing::normalize_table;
//! use oews_explorer::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("OCC_CODE", DataType::Utf8),
//!     Field::new("A_MEAN", DataType::Raw),
//! ]);
//! let raw = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Utf8("29-1141".into()), Value::Utf8("94,480".into())],
//!         vec![Value::Utf8("29-1228".into()), Value::Utf8("#".into())],
//!     ],
//! );
//!
//! let (typed, report) = normalize_table(&raw);
//! assert_eq!(typed.rows[0][1], Value::Float64(94480.0));
//! assert_eq!(typed.rows[1][1], Value::Null);
//! assert_eq!(report.suppressed_total(), 1);
//! ```

pub mod coerce;
pub mod normalize;
pub mod reduce;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::schema::{is_identifier, IDENTIFIER_COLUMNS};
use crate::types::{DataSet, Value};

pub use coerce::{coerce_cell, coerce_dataset};
pub use normalize::{normalize_cell, normalize_cell_with_reason, SuppressionMarker};
pub use reduce::{reduce, ReduceOp};

/// Per-column counts collected while normalizing a measure column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnReport {
    /// Cells that held `**`.
    pub not_releasable: usize,
    /// Cells that held `#`.
    pub wage_capped: usize,
    /// Non-empty cells that failed numeric coercion (other than suppression markers).
    pub unparseable: usize,
}

/// Summary of one [`normalize_table`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizationReport {
    /// Rows processed.
    pub rows: usize,
    /// Counts for measure columns that had at least one suppressed or unparseable cell.
    pub columns: BTreeMap<String, ColumnReport>,
}

impl NormalizationReport {
    /// Total suppressed cells across all columns and both markers.
    pub fn suppressed_total(&self) -> usize {
        self.columns
            .values()
            .map(|c| c.not_releasable + c.wage_capped)
            .sum()
    }

    /// Total unparseable cells across all columns.
    pub fn unparseable_total(&self) -> usize {
        self.columns.values().map(|c| c.unparseable).sum()
    }
}

/// Normalize then coerce a raw OEWS table.
///
/// Identifier columns ([`IDENTIFIER_COLUMNS`]) are never touched. Every other column is
/// normalized cell-by-cell and coerced to `Float64`.
pub fn normalize_table(raw: &DataSet) -> (DataSet, NormalizationReport) {
    let mut report = NormalizationReport {
        rows: raw.row_count(),
        ..Default::default()
    };

    let measure_idxs: Vec<(usize, &str)> = raw
        .schema
        .fields
        .iter()
        .enumerate()
        .filter(|(_, f)| !is_identifier(&f.name))
        .map(|(idx, f)| (idx, f.name.as_str()))
        .collect();

    let mut normalized = raw.clone();
    for row in &mut normalized.rows {
        for &(idx, name) in &measure_idxs {
            let Some(cell) = row.get_mut(idx) else {
                continue;
            };
            let (clean, marker) = normalize_cell_with_reason(cell);
            let failed = marker.is_none() && is_unparseable(&clean);
            if marker.is_some() || failed {
                let entry = report.columns.entry(name.to_string()).or_default();
                match marker {
                    Some(SuppressionMarker::NotReleasable) => entry.not_releasable += 1,
                    Some(SuppressionMarker::WageCapped) => entry.wage_capped += 1,
                    None => entry.unparseable += 1,
                }
            }
            *cell = clean;
        }
    }

    let typed = coerce_dataset(&normalized, &IDENTIFIER_COLUMNS);

    log::debug!(
        "normalized {} rows: {} suppressed cells, {} unparseable cells",
        report.rows,
        report.suppressed_total(),
        report.unparseable_total()
    );

    (typed, report)
}

fn is_unparseable(clean: &Value) -> bool {
    match clean {
        Value::Null => false,
        Value::Utf8(s) if s.trim().is_empty() => false,
        other => coerce_cell(other).is_null(),
    }
}
