//! The immutable dataset all queries run against.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use crate::error::IngestionResult;
use crate::processing::{normalize_table, NormalizationReport};
use crate::record::{records_from_table, OewsRecord};
use crate::schema::Categorical;
use crate::types::DataSet;

/// One normalized OEWS snapshot.
///
/// Built once per load and never mutated afterwards. Sorted-distinct lookups are computed
/// lazily per categorical column and cached; the cache is [`OnceLock`]-based so the dataset can
/// be shared across threads for concurrent reads.
#[derive(Debug)]
pub struct OewsDataset {
    records: Vec<OewsRecord>,
    report: NormalizationReport,
    distinct: [OnceLock<Vec<String>>; Categorical::COUNT],
}

impl OewsDataset {
    /// Run the full pipeline over a raw table: normalize, coerce, then build typed records.
    pub fn from_raw(raw: &DataSet) -> IngestionResult<Self> {
        let (typed, report) = normalize_table(raw);
        let records = records_from_table(&typed)?;
        log::info!(
            "built OEWS dataset: {} rows, {} suppressed cells",
            records.len(),
            report.suppressed_total()
        );
        Ok(Self::with_report(records, report))
    }

    /// Wrap already-typed records (e.g. produced by a test or another loader).
    pub fn from_records(records: Vec<OewsRecord>) -> Self {
        let report = NormalizationReport {
            rows: records.len(),
            ..Default::default()
        };
        Self::with_report(records, report)
    }

    fn with_report(records: Vec<OewsRecord>, report: NormalizationReport) -> Self {
        Self {
            records,
            report,
            distinct: Default::default(),
        }
    }

    /// All records, in source order.
    pub fn records(&self) -> &[OewsRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// What the normalization pipeline saw while building this dataset.
    pub fn normalization_report(&self) -> &NormalizationReport {
        &self.report
    }

    /// Sorted, duplicate-free values of a categorical column.
    ///
    /// Membership is the set of distinct non-blank values in the column: a blank identifier
    /// cell (empty text or a missing cell) is never offered as a choice. Computed on first
    /// use, then served from cache.
    pub fn distinct_values(&self, column: Categorical) -> &[String] {
        self.distinct[column.index()].get_or_init(|| {
            self.records
                .iter()
                .map(|r| r.categorical(column))
                .filter(|v| !v.is_empty())
                .collect::<BTreeSet<&str>>()
                .into_iter()
                .map(str::to_string)
                .collect()
        })
    }

    /// Records whose occupation title contains `term`, ignoring case.
    ///
    /// An empty term matches every record.
    pub fn search_occupations(&self, term: &str) -> Vec<&OewsRecord> {
        let needle = term.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.occ_title.to_lowercase().contains(&needle))
            .collect()
    }
}
