//! Per-state rollups, Location Quotients and salary comparisons.
//!
//! Every aggregate here is missing-aware: absent cells are skipped, never treated as zero, and an
//! aggregate with nothing to aggregate is `None`.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::format::format_annual;
use crate::processing::{reduce, ReduceOp};
use crate::record::OewsRecord;
use crate::store::OewsDataset;

use super::selection::GeoFilter;

/// Per-state summary of one occupation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateRollup {
    /// State abbreviation (`PRIM_STATE`).
    pub state: String,
    /// Mean of `A_MEAN`.
    pub average_salary: Option<f64>,
    /// Sum of `TOT_EMP`.
    pub total_employment: Option<f64>,
    /// Mean of `A_PCT10`.
    pub lower_wage: Option<f64>,
    /// Mean of `A_PCT90`.
    pub upper_wage: Option<f64>,
}

/// Location Quotient of one occupation in one state, with its inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateLocationQuotient {
    pub state: String,
    /// Occupation employment in the state.
    pub job_employment: Option<f64>,
    /// Employment across all occupations in the state.
    pub total_employment: Option<f64>,
    /// `None` when any input is missing or a denominator is zero.
    pub location_quotient: Option<f64>,
}

/// Mean annual wage of one occupation within a geography.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryComparison {
    pub occupation: String,
    pub mean_annual_wage: Option<f64>,
}

impl fmt::Display for SalaryComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.occupation, format_annual(self.mean_annual_wage))
    }
}

/// Group `records` by state, skipping rows with a blank state.
fn by_state<'a, I>(records: I) -> BTreeMap<&'a str, Vec<&'a OewsRecord>>
where
    I: IntoIterator<Item = &'a OewsRecord>,
{
    let mut groups: BTreeMap<&str, Vec<&OewsRecord>> = BTreeMap::new();
    for r in records {
        if !r.prim_state.is_empty() {
            groups.entry(r.prim_state.as_str()).or_default().push(r);
        }
    }
    groups
}

fn sum_employment<'a>(records: impl IntoIterator<Item = &'a OewsRecord>) -> Option<f64> {
    reduce(records.into_iter().map(|r| r.tot_emp), ReduceOp::Sum)
}

fn occupation_rows<'a>(
    dataset: &'a OewsDataset,
    occupation: &'a str,
) -> impl Iterator<Item = &'a OewsRecord> {
    dataset
        .records()
        .iter()
        .filter(move |r| r.occ_title == occupation && !r.is_national())
}

/// Per-state rollup for one occupation, sorted by state.
///
/// National rows are excluded. A state appears if it has at least one row for the occupation,
/// even when all of its measures are missing.
pub fn state_rollup(dataset: &OewsDataset, occupation: &str) -> Vec<StateRollup> {
    by_state(occupation_rows(dataset, occupation))
        .into_iter()
        .map(|(state, rows)| {
            let mean = |f: fn(&OewsRecord) -> Option<f64>| {
                reduce(rows.iter().map(|r| f(r)), ReduceOp::Mean)
            };
            StateRollup {
                state: state.to_string(),
                average_salary: mean(|r| r.a_mean),
                total_employment: sum_employment(rows.iter().copied()),
                lower_wage: mean(|r| r.a_pct10),
                upper_wage: mean(|r| r.a_pct90),
            }
        })
        .collect()
}

/// `(state_job / state_total) / (national_job / national_total)`.
///
/// Returns `None` if any input is missing, any denominator is zero, or the result is not
/// finite.
pub fn compute_location_quotient(
    state_job: Option<f64>,
    state_total: Option<f64>,
    national_job: Option<f64>,
    national_total: Option<f64>,
) -> Option<f64> {
    let (state_job, state_total) = (state_job?, state_total?);
    let (national_job, national_total) = (national_job?, national_total?);
    if state_total == 0.0 || national_total == 0.0 {
        return None;
    }
    let national_share = national_job / national_total;
    if national_share == 0.0 {
        return None;
    }
    Some((state_job / state_total) / national_share).filter(|lq| lq.is_finite())
}

/// National occupation employment and national total employment.
fn national_baseline(dataset: &OewsDataset, occupation: &str) -> (Option<f64>, Option<f64>) {
    let national = || dataset.records().iter().filter(|r| r.is_national());
    let job = sum_employment(national().filter(|r| r.occ_title == occupation));
    let total = sum_employment(national());
    (job, total)
}

/// Location Quotients of `occupation` for every state that has rows for it, sorted by state.
pub fn location_quotients(dataset: &OewsDataset, occupation: &str) -> Vec<StateLocationQuotient> {
    let (national_job, national_total) = national_baseline(dataset, occupation);
    let state_totals = by_state(dataset.records().iter().filter(|r| !r.is_national()));

    by_state(occupation_rows(dataset, occupation))
        .into_iter()
        .map(|(state, rows)| {
            let job_employment = sum_employment(rows.iter().copied());
            let total_employment = state_totals
                .get(state)
                .and_then(|all| sum_employment(all.iter().copied()));
            StateLocationQuotient {
                state: state.to_string(),
                job_employment,
                total_employment,
                location_quotient: compute_location_quotient(
                    job_employment,
                    total_employment,
                    national_job,
                    national_total,
                ),
            }
        })
        .collect()
}

/// Location Quotient of `occupation` in one state, or `None` if undefined.
pub fn location_quotient(dataset: &OewsDataset, occupation: &str, state: &str) -> Option<f64> {
    let (national_job, national_total) = national_baseline(dataset, occupation);
    let in_state = || {
        dataset
            .records()
            .iter()
            .filter(move |r| !r.is_national() && r.prim_state == state)
    };
    compute_location_quotient(
        sum_employment(in_state().filter(|r| r.occ_title == occupation)),
        sum_employment(in_state()),
        national_job,
        national_total,
    )
}

/// Mean `A_MEAN` of each occupation within `geo`, in input order.
pub fn compare_salaries<S: AsRef<str>>(
    dataset: &OewsDataset,
    geo: &GeoFilter,
    occupations: &[S],
) -> Vec<SalaryComparison> {
    let in_geo: Vec<&OewsRecord> = dataset.records().iter().filter(|r| geo.matches(r)).collect();
    occupations
        .iter()
        .map(|occupation| {
            let occupation = occupation.as_ref();
            let wages = in_geo
                .iter()
                .filter(|r| r.occ_title == occupation)
                .map(|r| r.a_mean);
            SalaryComparison {
                occupation: occupation.to_string(),
                mean_annual_wage: reduce(wages, ReduceOp::Mean),
            }
        })
        .collect()
}
