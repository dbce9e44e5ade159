//! `oews-explorer` is the data core behind an interactive explorer for the U.S. Bureau of Labor
//! Statistics *Occupational Employment and Wage Statistics* (OEWS) extracts.
//!
//! It reads a published extract, cleans its cell encodings, and answers read-only questions about
//! wages and employment by occupation, geography and industry. There is no UI here: results are
//! plain structs with `Option<f64>` for anything missing.
//!
//! The primary entrypoint is [`ingestion::load_dataset`], which auto-detects the file format from
//! the extension and returns a ready-to-query [`store::OewsDataset`].
//!
//! ## What you can load
//!
//! **File formats (auto-detected by extension):**
//!
//! - **CSV**: `.csv`
//! - **JSON**: `.json` (array-of-objects) and `.ndjson` (newline-delimited objects)
//! - **Parquet**: `.parquet`, `.pq`
//! - **Excel/workbooks** (requires the Cargo feature `excel`): `.xlsx`, `.xls`, `.xlsm`, `.xlsb`, `.ods`
//!
//! **Cell encodings handled:**
//!
//! - `**` (estimate not releasable) and `#` (wage at or above the top-coding cap) become missing
//! - thousands separators (`"3,175,390"`) and trailing percent signs (`"17.65%"`) are stripped
//! - anything else that is not a finite number becomes missing
//!
//! Identifier columns (`AREA_TITLE`, `PRIM_STATE`, `NAICS`, `OCC_CODE`, ...) are kept as text
//! exactly as published, so codes such as `000000` keep their leading zeros.
//!
//! ## Quick example
//!
//! ```no_run
//! use oews_explorer::ingestion::{load_dataset, IngestionOptions};
//! use oews_explorer::query::{location_quotient, select, state_rollup, GeoFilter, SelectionQuery};
//!
//! # fn main() -> Result<(), oews_explorer::IngestionError> {
//! let ds = load_dataset("all_data_M_2024.csv", &IngestionOptions::default())?;
//!
//! let nurses = select(&ds, &SelectionQuery {
//!     geo: GeoFilter::State("OH".to_string()),
//!     occupation: "Registered Nurses".to_string(),
//!     industry: Default::default(),
//! });
//! println!("{} rows", nurses.len());
//!
//! for s in state_rollup(&ds, "Registered Nurses") {
//!     println!("{}: {:?}", s.state, s.average_salary);
//! }
//! println!("LQ in Ohio: {:?}", location_quotient(&ds, "Registered Nurses", "OH"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: format readers, the unified entrypoints and ingestion observers
//! - [`processing`]: normalization, coercion and missing-aware reductions
//! - [`store`]: the immutable [`store::OewsDataset`] with memoized distinct values
//! - [`query`]: selection with fallback, state rollups, Location Quotients, salary comparisons
//! - [`record`], [`schema`], [`types`]: typed rows, the OEWS column contract, raw tables
//! - [`format`]: text rendering of optional measures (`N/A` for missing)
//! - [`error`]: error types used across ingestion

pub mod error;
pub mod format;
pub mod ingestion;
pub mod processing;
pub mod query;
pub mod record;
pub mod schema;
pub mod store;
pub mod types;

pub use error::{IngestionError, IngestionResult, ParseGeoLevelError};
