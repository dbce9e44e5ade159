//! Queries over an [`crate::store::OewsDataset`].
//!
//! - [`selection`]: resolve a geography/occupation/industry tuple into rows, with fallback for
//!   stale remembered selections
//! - [`aggregate`]: per-state rollups, Location Quotients and multi-occupation salary comparison
//!
//! Nothing here mutates the dataset or fails: empty results and undefined metrics are returned
//! as empty selections and `None`.
//!
//! ## Example
//!
//! ```rust
//! use oews_explorer::query::{location_quotient, select, GeoFilter, IndustryFilter, SelectionQuery};
//! use oews_explorer::record::OewsRecord;
//! use oews_explorer::store::OewsDataset;
//!
//! let row = |area: &str, state: &str, occ: &str, emp: f64| OewsRecord {
//!     area_title: area.into(),
//!     prim_state: state.into(),
//!     occ_title: occ.into(),
//!     tot_emp: Some(emp),
//!     ..Default::default()
//! };
//! let ds = OewsDataset::from_records(vec![
//!     row("U.S.", "US", "Registered Nurses", 50_000.0),
//!     row("U.S.", "US", "All Other", 9_950_000.0),
//!     row("Ohio", "OH", "Registered Nurses", 1_000.0),
//!     row("Ohio", "OH", "All Other", 99_000.0),
//! ]);
//!
//! let national = select(
//!     &ds,
//!     &SelectionQuery {
//!         geo: GeoFilter::National,
//!         occupation: "Registered Nurses".into(),
//!         industry: IndustryFilter::All,
//!     },
//! );
//! assert_eq!(national.len(), 1);
//!
//! let lq = location_quotient(&ds, "Registered Nurses", "OH").unwrap();
//! assert!((lq - 2.0).abs() < 1e-12);
//! ```

pub mod aggregate;
pub mod selection;

pub use aggregate::{
    compare_salaries, compute_location_quotient, location_quotient, location_quotients,
    state_rollup, SalaryComparison, StateLocationQuotient, StateRollup,
};
pub use selection::{
    fallback, occupation_candidates, resolve, select, EmploymentSummary, GeoFilter, GeoLevel,
    IndustryFilter, RememberedSelection, ResolvedSelection, Selection, SelectionQuery,
};
