//! CSV ingestion implementation.

use std::path::Path;

use crate::error::IngestionResult;
use crate::types::{DataSet, DataType, Schema, Value};

use super::project_headers;

/// Ingest a CSV extract into a raw [`DataSet`].
///
/// Rules:
///
/// - CSV must have headers.
/// - Headers must contain all required schema fields (order can differ).
/// - Cells are kept as text; empty cells become [`Value::Null`].
pub fn ingest_csv_from_path(path: impl AsRef<Path>, schema: &Schema) -> IngestionResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr, schema)
}

/// Ingest CSV data from an existing CSV reader.
pub fn ingest_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    schema: &Schema,
) -> IngestionResult<DataSet> {
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let projection = project_headers(&headers, schema)?;

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let row = schema
            .fields
            .iter()
            .zip(&projection)
            .map(|(field, idx)| match idx.and_then(|i| record.get(i)) {
                Some(raw) => raw_text_cell(raw, field.data_type),
                None => Value::Null,
            })
            .collect();
        rows.push(row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}

/// Identifier text is kept verbatim; measure text only needs to be non-blank.
fn raw_text_cell(raw: &str, data_type: DataType) -> Value {
    let blank = match data_type {
        DataType::Utf8 => raw.is_empty(),
        DataType::Float64 | DataType::Raw => raw.trim().is_empty(),
    };
    if blank {
        Value::Null
    } else {
        Value::Utf8(raw.to_owned())
    }
}
