//! The fixed OEWS column contract.
//!
//! BLS "all data" extracts carry many more columns than the core needs. Ingestion projects a
//! source onto [`raw_schema`]: identifier columns stay text forever, measure columns are read as
//! raw cells and coerced later by [`crate::processing`].

use crate::types::{DataType, Field, Schema};

/// `AREA_TITLE` value that marks national rows.
pub const NATIONAL_AREA_TITLE: &str = "U.S.";

pub const AREA_TITLE: &str = "AREA_TITLE";
pub const PRIM_STATE: &str = "PRIM_STATE";
pub const NAICS: &str = "NAICS";
pub const NAICS_TITLE: &str = "NAICS_TITLE";
pub const I_GROUP: &str = "I_GROUP";
pub const OCC_CODE: &str = "OCC_CODE";
pub const OCC_TITLE: &str = "OCC_TITLE";
pub const O_GROUP: &str = "O_GROUP";

pub const TOT_EMP: &str = "TOT_EMP";
pub const JOBS_1000: &str = "JOBS_1000";
pub const LOC_QUOTIENT: &str = "LOC_QUOTIENT";
pub const A_MEAN: &str = "A_MEAN";
pub const H_PCT10: &str = "H_PCT10";
pub const H_PCT25: &str = "H_PCT25";
pub const H_MEDIAN: &str = "H_MEDIAN";
pub const H_PCT75: &str = "H_PCT75";
pub const H_PCT90: &str = "H_PCT90";
pub const A_PCT10: &str = "A_PCT10";
pub const A_PCT25: &str = "A_PCT25";
pub const A_MEDIAN: &str = "A_MEDIAN";
pub const A_PCT75: &str = "A_PCT75";
pub const A_PCT90: &str = "A_PCT90";

pub const H_MEAN: &str = "H_MEAN";
pub const EMP_PRSE: &str = "EMP_PRSE";
pub const MEAN_PRSE: &str = "MEAN_PRSE";
pub const PCT_TOTAL: &str = "PCT_TOTAL";
pub const PCT_RPT: &str = "PCT_RPT";

/// Categorical columns. These are never coerced to numbers, even when they look numeric.
pub const IDENTIFIER_COLUMNS: [&str; 8] = [
    AREA_TITLE,
    PRIM_STATE,
    NAICS,
    NAICS_TITLE,
    I_GROUP,
    OCC_CODE,
    OCC_TITLE,
    O_GROUP,
];

/// Measure columns every extract must provide.
pub const REQUIRED_MEASURE_COLUMNS: [&str; 14] = [
    TOT_EMP, JOBS_1000, LOC_QUOTIENT, A_MEAN, H_PCT10, H_PCT25, H_MEDIAN, H_PCT75, H_PCT90,
    A_PCT10, A_PCT25, A_MEDIAN, A_PCT75, A_PCT90,
];

/// Measure columns carried when present; all-missing otherwise.
pub const OPTIONAL_MEASURE_COLUMNS: [&str; 5] = [H_MEAN, EMP_PRSE, MEAN_PRSE, PCT_TOTAL, PCT_RPT];

/// Returns `true` for the OEWS identifier columns.
pub fn is_identifier(column: &str) -> bool {
    IDENTIFIER_COLUMNS.contains(&column)
}

/// Schema used to read a raw OEWS extract.
///
/// Identifiers are [`DataType::Utf8`]; measures are [`DataType::Raw`] until coerced.
pub fn raw_schema() -> Schema {
    let identifiers = IDENTIFIER_COLUMNS
        .iter()
        .map(|name| Field::new(*name, DataType::Utf8));
    let required = REQUIRED_MEASURE_COLUMNS
        .iter()
        .map(|name| Field::new(*name, DataType::Raw));
    let optional = OPTIONAL_MEASURE_COLUMNS
        .iter()
        .map(|name| Field::optional(*name, DataType::Raw));
    Schema::new(identifiers.chain(required).chain(optional).collect())
}

/// A categorical column that supports sorted-distinct lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Categorical {
    AreaTitle,
    PrimState,
    Naics,
    NaicsTitle,
    IGroup,
    OccCode,
    OccTitle,
    OGroup,
}

impl Categorical {
    /// Number of categorical columns.
    pub const COUNT: usize = IDENTIFIER_COLUMNS.len();

    /// Every categorical column, in schema order.
    pub const ALL: [Categorical; Self::COUNT] = [
        Categorical::AreaTitle,
        Categorical::PrimState,
        Categorical::Naics,
        Categorical::NaicsTitle,
        Categorical::IGroup,
        Categorical::OccCode,
        Categorical::OccTitle,
        Categorical::OGroup,
    ];

    /// The OEWS column name.
    pub fn column_name(self) -> &'static str {
        IDENTIFIER_COLUMNS[self.index()]
    }

    /// Looks up a categorical column by its OEWS name.
    pub fn from_column_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.column_name() == name)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}
