//! Geography/occupation/industry selection and stale-selection fallback.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseGeoLevelError;
use crate::record::{OewsRecord, WagePercentiles};
use crate::schema::{Categorical, NATIONAL_AREA_TITLE};
use crate::store::OewsDataset;

/// Granularity a query is scoped to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeoLevel {
    #[default]
    National,
    State,
    Metropolitan,
}

impl GeoLevel {
    /// The three levels in display order.
    pub const ALL: [GeoLevel; 3] = [GeoLevel::National, GeoLevel::State, GeoLevel::Metropolitan];

    pub fn as_str(self) -> &'static str {
        match self {
            GeoLevel::National => "National",
            GeoLevel::State => "State",
            GeoLevel::Metropolitan => "Metropolitan",
        }
    }
}

impl fmt::Display for GeoLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeoLevel {
    type Err = ParseGeoLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeoLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseGeoLevelError(s.to_string()))
    }
}

/// A resolved geography.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeoFilter {
    /// Rows whose `AREA_TITLE` is `U.S.`.
    National,
    /// Rows whose `PRIM_STATE` equals the abbreviation.
    State(String),
    /// Rows whose `AREA_TITLE` equals the area name.
    Metropolitan(String),
}

impl GeoFilter {
    /// Build a filter from a level and a value. The value is ignored for [`GeoLevel::National`].
    pub fn new(level: GeoLevel, value: impl Into<String>) -> Self {
        match level {
            GeoLevel::National => GeoFilter::National,
            GeoLevel::State => GeoFilter::State(value.into()),
            GeoLevel::Metropolitan => GeoFilter::Metropolitan(value.into()),
        }
    }

    /// Whether `record` lies in this geography.
    pub fn matches(&self, record: &OewsRecord) -> bool {
        match self {
            GeoFilter::National => record.area_title == NATIONAL_AREA_TITLE,
            GeoFilter::State(abbr) => record.prim_state == *abbr,
            GeoFilter::Metropolitan(area) => record.area_title == *area,
        }
    }
}

impl fmt::Display for GeoFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoFilter::National => f.write_str("the United States"),
            GeoFilter::State(v) | GeoFilter::Metropolitan(v) => f.write_str(v),
        }
    }
}

/// Industry restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndustryFilter {
    /// No industry filter.
    #[default]
    All,
    /// Rows whose `NAICS_TITLE` equals the title.
    Title(String),
}

impl IndustryFilter {
    pub fn matches(&self, record: &OewsRecord) -> bool {
        match self {
            IndustryFilter::All => true,
            IndustryFilter::Title(title) => record.naics_title == *title,
        }
    }
}

/// A fully specified selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionQuery {
    pub geo: GeoFilter,
    pub occupation: String,
    pub industry: IndustryFilter,
}

impl SelectionQuery {
    pub fn matches(&self, record: &OewsRecord) -> bool {
        record.occ_title == self.occupation
            && self.geo.matches(record)
            && self.industry.matches(record)
    }
}

/// Rows matched by [`select`], in dataset order.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    rows: Vec<&'a OewsRecord>,
}

impl<'a> Selection<'a> {
    pub fn rows(&self) -> &[&'a OewsRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `true` means "no data": callers must not aggregate over an empty selection.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first(&self) -> Option<&'a OewsRecord> {
        self.rows.first().copied()
    }

    /// Percentile wage table of the first matching row.
    pub fn wage_percentiles(&self) -> Option<WagePercentiles> {
        self.first().map(OewsRecord::wage_percentiles)
    }

    /// Published employment figures of the first matching row.
    pub fn employment_summary(&self) -> Option<EmploymentSummary> {
        self.first().map(|r| EmploymentSummary {
            total_employment: r.tot_emp,
            jobs_per_1000: r.jobs_1000,
            location_quotient: r.loc_quotient,
        })
    }

    /// Present `A_MEAN` values of every matching row.
    pub fn annual_mean_wages(&self) -> Vec<f64> {
        self.rows.iter().filter_map(|r| r.a_mean).collect()
    }
}

/// `TOT_EMP`, `JOBS_1000` and the published `LOC_QUOTIENT` of one row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmploymentSummary {
    pub total_employment: Option<f64>,
    pub jobs_per_1000: Option<f64>,
    pub location_quotient: Option<f64>,
}

/// Resolve a selection tuple into its matching rows.
///
/// Pure: identical inputs against the same dataset always yield the same rows.
pub fn select<'a>(dataset: &'a OewsDataset, query: &SelectionQuery) -> Selection<'a> {
    Selection {
        rows: dataset
            .records()
            .iter()
            .filter(|r| query.matches(r))
            .collect(),
    }
}

/// Selection parameters remembered by the presentation layer between interactions.
///
/// Any of them may be stale (no longer present in the dataset); [`resolve`] repairs them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RememberedSelection {
    pub geo_level: GeoLevel,
    pub geo_value: Option<String>,
    pub occupation: Option<String>,
    /// `None` means all industries.
    pub industry: Option<String>,
}

/// A selection after fallback has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSelection {
    /// `None` when the geography level has no candidates at all.
    pub geo: Option<GeoFilter>,
    pub industry: IndustryFilter,
    /// `None` when no occupation is available under the resolved industry.
    pub occupation: Option<String>,
}

impl ResolvedSelection {
    /// The query to run, or `None` ("no data") if geography or occupation is unresolved.
    pub fn query(&self) -> Option<SelectionQuery> {
        Some(SelectionQuery {
            geo: self.geo.clone()?,
            occupation: self.occupation.clone()?,
            industry: self.industry.clone(),
        })
    }
}

/// Keep `remembered` if it is a valid candidate, otherwise fall back to the first candidate.
///
/// Returns `None` only when `candidates` is empty.
pub fn fallback<'c>(remembered: Option<&str>, candidates: &'c [String]) -> Option<&'c str> {
    remembered
        .and_then(|r| candidates.iter().find(|c| c.as_str() == r))
        .or_else(|| candidates.first())
        .map(String::as_str)
}

/// Sorted distinct occupations available under an industry filter.
pub fn occupation_candidates(dataset: &OewsDataset, industry: &IndustryFilter) -> Vec<String> {
    match industry {
        IndustryFilter::All => dataset.distinct_values(Categorical::OccTitle).to_vec(),
        IndustryFilter::Title(_) => {
            let mut titles: Vec<String> = dataset
                .records()
                .iter()
                .filter(|r| industry.matches(r) && !r.occ_title.is_empty())
                .map(|r| r.occ_title.clone())
                .collect();
            titles.sort();
            titles.dedup();
            titles
        }
    }
}

/// Repair a remembered selection against the current dataset.
///
/// Geography, industry and occupation are each checked against their valid candidates and
/// replaced by the first sorted candidate when stale. The occupation candidates depend on the
/// resolved industry.
pub fn resolve(dataset: &OewsDataset, remembered: &RememberedSelection) -> ResolvedSelection {
    let geo = match remembered.geo_level {
        GeoLevel::National => Some(GeoFilter::National),
        level @ (GeoLevel::State | GeoLevel::Metropolitan) => {
            let column = if level == GeoLevel::State {
                Categorical::PrimState
            } else {
                Categorical::AreaTitle
            };
            fallback(remembered.geo_value.as_deref(), dataset.distinct_values(column))
                .map(|v| GeoFilter::new(level, v))
        }
    };

    let industry = match remembered.industry.as_deref() {
        None => IndustryFilter::All,
        Some(title) => {
            match fallback(Some(title), dataset.distinct_values(Categorical::NaicsTitle)) {
                Some(v) => IndustryFilter::Title(v.to_string()),
                None => IndustryFilter::All,
            }
        }
    };

    let candidates = occupation_candidates(dataset, &industry);
    let occupation = fallback(remembered.occupation.as_deref(), &candidates).map(str::to_string);

    if occupation.is_none() {
        log::debug!("no occupations available for industry {industry:?}");
    }

    ResolvedSelection {
        geo,
        industry,
        occupation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(area: &str, state: &str, industry: &str, occ: &str, a_mean: Option<f64>) -> OewsRecord {
        OewsRecord {
            area_title: area.to_string(),
            prim_state: state.to_string(),
            naics_title: industry.to_string(),
            occ_title: occ.to_string(),
            a_mean,
            ..Default::default()
        }
    }

    fn dataset() -> OewsDataset {
        OewsDataset::from_records(vec![
            record("U.S.", "US", "Cross-industry", "Registered Nurses", Some(94_480.0)),
            record("U.S.", "US", "Hospitals", "Registered Nurses", Some(96_000.0)),
            record("U.S.", "US", "Cross-industry", "Cashiers", Some(29_000.0)),
            record("California", "CA", "Cross-industry", "Registered Nurses", Some(137_690.0)),
            record("Fresno, CA", "CA", "Cross-industry", "Registered Nurses", None),
            record("Alabama", "AL", "Retail Trade", "Cashiers", Some(24_000.0)),
        ])
    }

    fn query(geo: GeoFilter, occ: &str, industry: IndustryFilter) -> SelectionQuery {
        SelectionQuery {
            geo,
            occupation: occ.to_string(),
            industry,
        }
    }

    #[test]
    fn national_selection_only_returns_us_rows() {
        let ds = dataset();
        let sel = select(&ds, &query(GeoFilter::National, "Registered Nurses", IndustryFilter::All));
        assert_eq!(sel.len(), 2);
        assert!(sel
            .rows()
            .iter()
            .all(|r| r.area_title == "U.S." && r.occ_title == "Registered Nurses"));
    }

    #[test]
    fn state_selection_matches_abbreviation() {
        let ds = dataset();
        let sel = select(
            &ds,
            &query(GeoFilter::State("CA".into()), "Registered Nurses", IndustryFilter::All),
        );
        assert_eq!(sel.len(), 2);
        assert_eq!(sel.annual_mean_wages(), vec![137_690.0]);
    }

    #[test]
    fn metro_selection_matches_area_title() {
        let ds = dataset();
        let sel = select(
            &ds,
            &query(
                GeoFilter::Metropolitan("Fresno, CA".into()),
                "Registered Nurses",
                IndustryFilter::All,
            ),
        );
        assert_eq!(sel.len(), 1);
        assert_eq!(sel.first().unwrap().area_title, "Fresno, CA");
    }

    #[test]
    fn industry_filter_narrows_rows() {
        let ds = dataset();
        let sel = select(
            &ds,
            &query(
                GeoFilter::National,
                "Registered Nurses",
                IndustryFilter::Title("Hospitals".into()),
            ),
        );
        assert_eq!(sel.len(), 1);
        assert_eq!(sel.first().unwrap().a_mean, Some(96_000.0));
    }

    #[test]
    fn empty_selection_is_no_data() {
        let ds = dataset();
        let sel = select(&ds, &query(GeoFilter::State("AL".into()), "Registered Nurses", IndustryFilter::All));
        assert!(sel.is_empty());
        assert_eq!(sel.wage_percentiles(), None);
        assert_eq!(sel.employment_summary(), None);
    }

    #[test]
    fn selection_is_deterministic() {
        let ds = dataset();
        let q = query(GeoFilter::National, "Registered Nurses", IndustryFilter::All);
        assert_eq!(select(&ds, &q), select(&ds, &q));
    }

    #[test]
    fn geo_level_parses_query_parameter_names() {
        assert_eq!("State".parse::<GeoLevel>(), Ok(GeoLevel::State));
        assert_eq!("metropolitan".parse::<GeoLevel>(), Ok(GeoLevel::Metropolitan));
        assert!("County".parse::<GeoLevel>().is_err());
        assert_eq!(GeoLevel::National.to_string(), "National");
    }

    #[test]
    fn fallback_keeps_valid_and_replaces_stale() {
        let candidates = vec!["Cashiers".to_string(), "Registered Nurses".to_string()];
        assert_eq!(fallback(Some("Registered Nurses"), &candidates), Some("Registered Nurses"));
        assert_eq!(fallback(Some("Welders"), &candidates), Some("Cashiers"));
        assert_eq!(fallback(None, &candidates), Some("Cashiers"));
        assert_eq!(fallback(Some("Welders"), &[]), None);
    }

    #[test]
    fn stale_occupation_falls_back_within_industry() {
        let ds = dataset();
        let resolved = resolve(
            &ds,
            &RememberedSelection {
                geo_level: GeoLevel::National,
                occupation: Some("Registered Nurses".into()),
                industry: Some("Retail Trade".into()),
                ..Default::default()
            },
        );
        assert_eq!(resolved.industry, IndustryFilter::Title("Retail Trade".into()));
        assert_eq!(resolved.occupation.as_deref(), Some("Cashiers"));
    }

    #[test]
    fn stale_industry_and_geo_fall_back_to_first_sorted() {
        let ds = dataset();
        let resolved = resolve(
            &ds,
            &RememberedSelection {
                geo_level: GeoLevel::State,
                geo_value: Some("ZZ".into()),
                occupation: Some("Registered Nurses".into()),
                industry: Some("Mining".into()),
            },
        );
        assert_eq!(resolved.geo, Some(GeoFilter::State("AL".into())));
        assert_eq!(resolved.industry, IndustryFilter::Title("Cross-industry".into()));
        assert_eq!(resolved.occupation.as_deref(), Some("Registered Nurses"));
        assert!(resolved.query().is_some());
    }

    #[test]
    fn empty_dataset_resolves_to_no_data() {
        let ds = OewsDataset::from_records(Vec::new());
        let resolved = resolve(
            &ds,
            &RememberedSelection {
                geo_level: GeoLevel::Metropolitan,
                geo_value: Some("Fresno, CA".into()),
                occupation: Some("Cashiers".into()),
                industry: None,
            },
        );
        assert_eq!(resolved.geo, None);
        assert_eq!(resolved.occupation, None);
        assert_eq!(resolved.query(), None);
    }
}
