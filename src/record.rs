//! Typed OEWS rows.

use serde::Serialize;

use crate::error::{IngestionError, IngestionResult};
use crate::schema::{self, NATIONAL_AREA_TITLE};
use crate::types::{DataSet, Value};

/// Hourly and annual wages at one percentile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PercentileWage {
    /// Hourly wage in dollars, `None` when suppressed.
    pub hourly: Option<f64>,
    /// Annual wage in dollars, `None` when suppressed.
    pub annual: Option<f64>,
}

/// The 10th/25th/50th/75th/90th percentile wage table of one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WagePercentiles {
    pub pct10: PercentileWage,
    pub pct25: PercentileWage,
    pub median: PercentileWage,
    pub pct75: PercentileWage,
    pub pct90: PercentileWage,
}

impl WagePercentiles {
    /// Display labels paired with each percentile, lowest first.
    pub fn labeled(&self) -> [(&'static str, PercentileWage); 5] {
        [
            ("10th", self.pct10),
            ("25th", self.pct25),
            ("50th (Median)", self.median),
            ("75th", self.pct75),
            ("90th", self.pct90),
        ]
    }
}

/// One published OEWS row with named, typed fields.
///
/// Identifier fields hold the source text verbatim (an empty string when the cell was blank).
/// Measure fields are `None` when the cell was missing, suppressed or unparseable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OewsRecord {
    pub area_title: String,
    pub prim_state: String,
    pub naics: String,
    pub naics_title: String,
    pub i_group: String,
    pub occ_code: String,
    pub occ_title: String,
    pub o_group: String,

    pub tot_emp: Option<f64>,
    pub jobs_1000: Option<f64>,
    pub loc_quotient: Option<f64>,
    pub a_mean: Option<f64>,
    pub h_mean: Option<f64>,
    pub h_pct10: Option<f64>,
    pub h_pct25: Option<f64>,
    pub h_median: Option<f64>,
    pub h_pct75: Option<f64>,
    pub h_pct90: Option<f64>,
    pub a_pct10: Option<f64>,
    pub a_pct25: Option<f64>,
    pub a_median: Option<f64>,
    pub a_pct75: Option<f64>,
    pub a_pct90: Option<f64>,
    pub emp_prse: Option<f64>,
    pub mean_prse: Option<f64>,
    pub pct_total: Option<f64>,
    pub pct_rpt: Option<f64>,
}

impl OewsRecord {
    /// `true` for rows whose area is the national marker (`U.S.`).
    pub fn is_national(&self) -> bool {
        self.area_title == NATIONAL_AREA_TITLE
    }

    /// The percentile wage table of this row.
    pub fn wage_percentiles(&self) -> WagePercentiles {
        let pct = |hourly, annual| PercentileWage { hourly, annual };
        WagePercentiles {
            pct10: pct(self.h_pct10, self.a_pct10),
            pct25: pct(self.h_pct25, self.a_pct25),
            median: pct(self.h_median, self.a_median),
            pct75: pct(self.h_pct75, self.a_pct75),
            pct90: pct(self.h_pct90, self.a_pct90),
        }
    }

    /// Identifier value for a categorical column.
    pub fn categorical(&self, column: schema::Categorical) -> &str {
        use schema::Categorical::*;
        match column {
            AreaTitle => &self.area_title,
            PrimState => &self.prim_state,
            Naics => &self.naics,
            NaicsTitle => &self.naics_title,
            IGroup => &self.i_group,
            OccCode => &self.occ_code,
            OccTitle => &self.occ_title,
            OGroup => &self.o_group,
        }
    }
}

/// Build typed records from a normalized table.
///
/// Fails with [`IngestionError::SchemaMismatch`] if any identifier or required measure column is
/// absent. Optional measure columns that are absent yield `None` for every record.
pub fn records_from_table(table: &DataSet) -> IngestionResult<Vec<OewsRecord>> {
    let missing: Vec<&str> = schema::IDENTIFIER_COLUMNS
        .iter()
        .chain(schema::REQUIRED_MEASURE_COLUMNS.iter())
        .copied()
        .filter(|name| table.schema.index_of(name).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(IngestionError::SchemaMismatch {
            message: format!("missing required OEWS columns {missing:?}"),
        });
    }

    let idx = |name: &str| table.schema.index_of(name);
    let text = |row: &[Value], i: Option<usize>| -> String {
        match i.and_then(|i| row.get(i)) {
            Some(Value::Null) | None => String::new(),
            Some(v) => v.as_str().map_or_else(|| v.to_string(), str::to_string),
        }
    };
    let num = |row: &[Value], i: Option<usize>| -> Option<f64> {
        i.and_then(|i| row.get(i))
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
    };

    let (area_title, prim_state, naics, naics_title) = (
        idx(schema::AREA_TITLE),
        idx(schema::PRIM_STATE),
        idx(schema::NAICS),
        idx(schema::NAICS_TITLE),
    );
    let (i_group, occ_code, occ_title, o_group) = (
        idx(schema::I_GROUP),
        idx(schema::OCC_CODE),
        idx(schema::OCC_TITLE),
        idx(schema::O_GROUP),
    );
    let (tot_emp, jobs_1000, loc_quotient, a_mean, h_mean) = (
        idx(schema::TOT_EMP),
        idx(schema::JOBS_1000),
        idx(schema::LOC_QUOTIENT),
        idx(schema::A_MEAN),
        idx(schema::H_MEAN),
    );
    let hourly = [
        idx(schema::H_PCT10),
        idx(schema::H_PCT25),
        idx(schema::H_MEDIAN),
        idx(schema::H_PCT75),
        idx(schema::H_PCT90),
    ];
    let annual = [
        idx(schema::A_PCT10),
        idx(schema::A_PCT25),
        idx(schema::A_MEDIAN),
        idx(schema::A_PCT75),
        idx(schema::A_PCT90),
    ];
    let (emp_prse, mean_prse, pct_total, pct_rpt) = (
        idx(schema::EMP_PRSE),
        idx(schema::MEAN_PRSE),
        idx(schema::PCT_TOTAL),
        idx(schema::PCT_RPT),
    );

    let records = table
        .rows
        .iter()
        .map(|row| OewsRecord {
            area_title: text(row, area_title),
            prim_state: text(row, prim_state),
            naics: text(row, naics),
            naics_title: text(row, naics_title),
            i_group: text(row, i_group),
            occ_code: text(row, occ_code),
            occ_title: text(row, occ_title),
            o_group: text(row, o_group),
            tot_emp: num(row, tot_emp),
            jobs_1000: num(row, jobs_1000),
            loc_quotient: num(row, loc_quotient),
            a_mean: num(row, a_mean),
            h_mean: num(row, h_mean),
            h_pct10: num(row, hourly[0]),
            h_pct25: num(row, hourly[1]),
            h_median: num(row, hourly[2]),
            h_pct75: num(row, hourly[3]),
            h_pct90: num(row, hourly[4]),
            a_pct10: num(row, annual[0]),
            a_pct25: num(row, annual[1]),
            a_median: num(row, annual[2]),
            a_pct75: num(row, annual[3]),
            a_pct90: num(row, annual[4]),
            emp_prse: num(row, emp_prse),
            mean_prse: num(row, mean_prse),
            pct_total: num(row, pct_total),
            pct_rpt: num(row, pct_rpt),
        })
        .collect();

    Ok(records)
}
