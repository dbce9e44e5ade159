//! Ingestion entrypoints and implementations.
//!
//! Ingestion only reads cells; it never parses numbers. Each reader projects the source onto a
//! [`crate::types::Schema`] (normally [`crate::schema::raw_schema`]) and returns a raw
//! [`crate::types::DataSet`] for the [`crate::processing`] pipeline.
//!
//! Most callers should use [`load_dataset`] (ingest, normalize and build an
//! [`crate::store::OewsDataset`] in one go) or [`ingest_from_path`] (raw table only). Both:
//!
//! - auto-detect format by file extension (or you can override via [`IngestionOptions`])
//! - optionally report success/failure/alerts to an [`IngestionObserver`]
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - [`json`]
//! - [`parquet`]
//! - `excel` (Cargo feature `excel`)

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod json;
pub mod observability;
pub mod parquet;
pub mod unified;

pub use observability::{
    CompositeObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats,
    LogObserver,
};
pub use unified::{
    ingest_from_path, load_dataset, ExcelSheetSelection, IngestionFormat, IngestionOptions,
    IngestionRequest,
};

use crate::error::{IngestionError, IngestionResult};
use crate::types::Schema;

/// Map each schema field to a source column index.
///
/// Required fields must be present among `headers`; optional fields map to `None` when absent.
/// Header names are compared after trimming whitespace.
pub(crate) fn project_headers<S: AsRef<str>>(
    headers: &[S],
    schema: &Schema,
) -> IngestionResult<Vec<Option<usize>>> {
    let mut missing = Vec::new();
    let projection = schema
        .fields
        .iter()
        .map(|field| {
            let idx = headers.iter().position(|h| h.as_ref().trim() == field.name);
            if idx.is_none() && field.required {
                missing.push(field.name.as_str());
            }
            idx
        })
        .collect();

    if missing.is_empty() {
        Ok(projection)
    } else {
        Err(IngestionError::SchemaMismatch {
            message: format!(
                "missing required columns {missing:?}. headers={:?}",
                headers.iter().map(|h| h.as_ref()).collect::<Vec<_>>()
            ),
        })
    }
}
