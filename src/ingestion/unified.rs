//! Unified ingestion entrypoints.
//!
//! - [`load_dataset`] reads an OEWS extract and returns a ready-to-query
//!   [`crate::store::OewsDataset`].
//! - [`ingest_from_path`] stops after reading cells and returns the raw
//!   [`crate::types::DataSet`] for a given [`crate::types::Schema`].
//!
//! If [`IngestionOptions::format`] is `None`, the format is inferred from the file extension. If
//! an [`super::observability::IngestionObserver`] is configured, success/failure/alerts are
//! reported to it.

use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{IngestionError, IngestionResult};
use crate::schema::raw_schema;
use crate::store::OewsDataset;
use crate::types::{DataSet, Schema};

use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};
use super::{csv, json, parquet};

/// Supported ingestion formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionFormat {
    /// Comma-separated values (the BLS "all data" download saved as CSV).
    Csv,
    /// JSON array-of-objects or NDJSON.
    Json,
    /// Apache Parquet.
    Parquet,
    /// Spreadsheet/workbook formats (feature-gated behind `excel`).
    Excel,
}

impl IngestionFormat {
    /// Parse an ingestion format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" | "ndjson" => Some(Self::Json),
            "parquet" | "pq" => Some(Self::Parquet),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Excel),
            _ => None,
        }
    }
}

/// How to choose sheet(s) when ingesting an Excel workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExcelSheetSelection {
    /// Ingest the first sheet.
    #[default]
    First,
    /// Ingest a single named sheet.
    Sheet(String),
    /// Ingest all sheets and concatenate rows.
    AllSheets,
    /// Ingest only the listed sheets (in order) and concatenate rows.
    Sheets(Vec<String>),
}

/// Options controlling unified ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// If `None`, auto-detect format from file extension.
    pub format: Option<IngestionFormat>,
    /// Excel-specific options.
    pub excel_sheet_selection: ExcelSheetSelection,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("excel_sheet_selection", &self.excel_sheet_selection)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            excel_sheet_selection: ExcelSheetSelection::default(),
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Load an OEWS extract into a queryable [`OewsDataset`].
///
/// Reads the file against [`raw_schema`], then normalizes, coerces and builds typed records.
/// On success the observer receives the row count together with the number of suppressed and
/// unparseable cells found during normalization.
///
/// ```no_run
/// use std::sync::Arc;
///
/// use oews_explorer::ingestion::{load_dataset, IngestionOptions, LogObserver};
/// use oews_explorer::schema::Categorical;
///
/// # fn main() -> Result<(), oews_explorer::IngestionError> {
/// let opts = IngestionOptions {
///     observer: Some(Arc::new(LogObserver)),
///     ..Default::default()
/// };
/// let ds = load_dataset("all_data_M_2024.csv", &opts)?;
/// println!("{} occupations", ds.distinct_values(Categorical::OccTitle).len());
/// # Ok(())
/// # }
/// ```
pub fn load_dataset(path: impl AsRef<Path>, options: &IngestionOptions) -> IngestionResult<OewsDataset> {
    let path = path.as_ref();
    let fmt = resolve_format(path, options)?;
    let result = read_with_format(path, fmt, &raw_schema(), options).and_then(|raw| OewsDataset::from_raw(&raw));

    notify(options, path, fmt, &result, |ds| {
        let report = ds.normalization_report();
        IngestionStats {
            rows: ds.len(),
            suppressed: report.suppressed_total(),
            unparseable: report.unparseable_total(),
        }
    });
    result
}

/// Ingest a file into a raw [`DataSet`] projected onto `schema`.
///
/// - If `options.format` is `None`, format is inferred from the file extension.
/// - Use `options.excel_sheet_selection` for Excel multi-tab behavior.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row count stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ## CSV (auto-detect by extension)
///
/// ```no_run
/// use oews_explorer::ingestion::{ingest_from_path, IngestionOptions};
/// use oews_explorer::schema::raw_schema;
///
/// # fn main() -> Result<(), oews_explorer::IngestionError> {
/// let raw = ingest_from_path("all_data_M_2024.csv", &raw_schema(), &IngestionOptions::default())?;
/// println!("rows={}", raw.row_count());
/// # Ok(())
/// # }
/// ```
///
/// ## Force a format explicitly (override extension inference)
///
/// ```no_run
/// use oews_explorer::ingestion::{ingest_from_path, IngestionFormat, IngestionOptions};
/// use oews_explorer::schema::raw_schema;
///
/// # fn main() -> Result<(), oews_explorer::IngestionError> {
/// let opts = IngestionOptions {
///     format: Some(IngestionFormat::Json),
///     ..Default::default()
/// };
/// let raw = ingest_from_path("oews_export", &raw_schema(), &opts)?;
/// println!("rows={}", raw.row_count());
/// # Ok(())
/// # }
/// ```
///
/// ## Excel (feature-gated)
///
/// The BLS publishes the national/state/metro file as `.xlsx`. Enable the `excel` feature:
///
/// ```toml
/// oews-explorer = { path = ".", features = ["excel"] }
/// ```
///
/// ```no_run
/// use oews_explorer::ingestion::{ingest_from_path, ExcelSheetSelection, IngestionOptions};
/// use oews_explorer::schema::raw_schema;
///
/// # fn main() -> Result<(), oews_explorer::IngestionError> {
/// let opts = IngestionOptions {
///     excel_sheet_selection: ExcelSheetSelection::Sheet("All May 2024 data".to_string()),
///     ..Default::default()
/// };
/// let raw = ingest_from_path("all_data_M_2024.xlsx", &raw_schema(), &opts)?;
/// println!("rows={}", raw.row_count());
/// # Ok(())
/// # }
/// ```
pub fn ingest_from_path(
    path: impl AsRef<Path>,
    schema: &Schema,
    options: &IngestionOptions,
) -> IngestionResult<DataSet> {
    let path = path.as_ref();
    let fmt = resolve_format(path, options)?;
    let result = read_with_format(path, fmt, schema, options);

    notify(options, path, fmt, &result, |ds| IngestionStats {
        rows: ds.row_count(),
        ..Default::default()
    });
    result
}

fn resolve_format(path: &Path, options: &IngestionOptions) -> IngestionResult<IngestionFormat> {
    match options.format {
        Some(f) => Ok(f),
        None => infer_format_from_path(path),
    }
}

fn read_with_format(
    path: &Path,
    fmt: IngestionFormat,
    schema: &Schema,
    options: &IngestionOptions,
) -> IngestionResult<DataSet> {
    match fmt {
        IngestionFormat::Csv => csv::ingest_csv_from_path(path, schema),
        IngestionFormat::Json => json::ingest_json_from_path(path, schema),
        IngestionFormat::Parquet => parquet::ingest_parquet_from_path(path, schema),
        IngestionFormat::Excel => ingest_excel_dispatch(path, schema, &options.excel_sheet_selection),
    }
}

fn notify<T>(
    options: &IngestionOptions,
    path: &Path,
    format: IngestionFormat,
    result: &IngestionResult<T>,
    stats: impl FnOnce(&T) -> IngestionStats,
) {
    let Some(obs) = options.observer.as_ref() else {
        return;
    };
    let ctx = IngestionContext {
        path: path.to_path_buf(),
        format,
    };
    match result {
        Ok(value) => obs.on_success(&ctx, stats(value)),
        Err(e) => {
            let sev = severity_for_error(e);
            obs.on_failure(&ctx, sev, e);
            if sev >= options.alert_at_or_above {
                obs.on_alert(&ctx, sev, e);
            }
        }
    }
}

fn severity_for_error(e: &IngestionError) -> IngestionSeverity {
    match e {
        IngestionError::Io(_) => IngestionSeverity::Critical,
        IngestionError::Parquet(err) => {
            // Parquet errors may wrap an io::Error somewhere down the source chain.
            if error_chain_contains_io(err) {
                IngestionSeverity::Critical
            } else {
                IngestionSeverity::Error
            }
        }
        IngestionError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
            _ => IngestionSeverity::Error,
        },
        IngestionError::Json(err) if err.is_io() => IngestionSeverity::Critical,
        IngestionError::Json(_) => IngestionSeverity::Error,
        #[cfg(feature = "excel")]
        IngestionError::Excel(_) => IngestionSeverity::Error,
        IngestionError::SchemaMismatch { .. } => IngestionSeverity::Error,
    }
}

fn error_chain_contains_io(e: &(dyn StdError + 'static)) -> bool {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(e);
    while let Some(err) = cur {
        if err.is::<std::io::Error>() {
            return true;
        }
        cur = err.source();
    }
    false
}

fn infer_format_from_path(path: &Path) -> IngestionResult<IngestionFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| IngestionError::SchemaMismatch {
            message: format!("cannot infer format: path has no extension ({})", path.display()),
        })?;

    IngestionFormat::from_extension(ext).ok_or_else(|| IngestionError::SchemaMismatch {
        message: format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ),
    })
}

fn ingest_excel_dispatch(
    path: &Path,
    schema: &Schema,
    sel: &ExcelSheetSelection,
) -> IngestionResult<DataSet> {
    #[cfg(feature = "excel")]
    {
        use super::excel;

        match sel {
            ExcelSheetSelection::First => excel::ingest_excel_from_path(path, None, schema),
            ExcelSheetSelection::Sheet(name) => excel::ingest_excel_from_path(path, Some(name.as_str()), schema),
            ExcelSheetSelection::AllSheets => excel::ingest_excel_workbook_from_path(path, None, schema),
            ExcelSheetSelection::Sheets(names) => {
                let refs: Vec<&str> = names.iter().map(String::as_str).collect();
                excel::ingest_excel_workbook_from_path(path, Some(refs.as_slice()), schema)
            }
        }
    }

    #[cfg(not(feature = "excel"))]
    {
        let _ = (path, schema, sel);
        Err(IngestionError::SchemaMismatch {
            message: "excel ingestion not enabled (enable cargo feature 'excel')".to_string(),
        })
    }
}

/// An owned load request, e.g. for handing a reload off to a background thread.
#[derive(Debug, Clone)]
pub struct IngestionRequest {
    /// Path to the OEWS extract.
    pub path: PathBuf,
    /// Options controlling ingestion.
    pub options: IngestionOptions,
}

impl IngestionRequest {
    /// Execute the request by calling [`load_dataset`].
    pub fn run(&self) -> IngestionResult<OewsDataset> {
        load_dataset(&self.path, &self.options)
    }
}
