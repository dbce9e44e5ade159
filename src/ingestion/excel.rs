#![cfg(feature = "excel")]

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, DataType, Schema, Value};

use super::project_headers;

/// Ingest an OEWS workbook (`.xlsx`, `.xls`, `.ods`, etc.) into a raw [`DataSet`].
///
/// Behavior:
/// - Picks `sheet_name` if provided; otherwise uses the first sheet in the workbook
/// - Detects the first non-empty row as the header row
/// - Validates that all required schema fields exist as headers
/// - Keeps measure cells as read; numeric identifier cells are rendered as text
pub fn ingest_excel_from_path(
    path: impl AsRef<Path>,
    sheet_name: Option<&str>,
    schema: &Schema,
) -> IngestionResult<DataSet> {
    let sheets: Option<Vec<&str>> = sheet_name.map(|s| vec![s]);
    ingest_excel_workbook_from_path(path, sheets.as_deref(), schema)
}

/// Ingest several sheets and concatenate their rows into one [`DataSet`].
///
/// - `None` ingests every sheet in workbook order.
/// - `Some(&[...])` ingests only those sheets, in the provided order.
///
/// All sheets are expected to share the same header row.
pub fn ingest_excel_workbook_from_path(
    path: impl AsRef<Path>,
    sheet_names: Option<&[&str]>,
    schema: &Schema,
) -> IngestionResult<DataSet> {
    let mut workbook = open_workbook_auto(path)?;

    let sheets: Vec<String> = match sheet_names {
        Some(names) => names.iter().map(|s| s.to_string()).collect(),
        None => workbook.sheet_names().to_vec(),
    };
    if sheets.is_empty() {
        return Err(IngestionError::SchemaMismatch {
            message: "workbook has no sheets".to_string(),
        });
    }

    let mut all_rows: Vec<Vec<Value>> = Vec::new();
    for sheet in sheets {
        let range = workbook.worksheet_range(&sheet)?;
        let mut sheet_rows = ingest_sheet_range(&range, schema).map_err(|e| with_sheet(&sheet, e))?;
        all_rows.append(&mut sheet_rows);
    }

    Ok(DataSet::new(schema.clone(), all_rows))
}

fn ingest_sheet_range(range: &calamine::Range<Data>, schema: &Schema) -> IngestionResult<Vec<Vec<Value>>> {
    let header_row_idx = range
        .rows()
        .position(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
        .ok_or_else(|| IngestionError::SchemaMismatch {
            message: "sheet has no non-empty rows (no header row found)".to_string(),
        })?;

    let headers: Vec<String> = range
        .rows()
        .nth(header_row_idx)
        .map(|row| row.iter().map(cell_to_text).collect())
        .unwrap_or_default();
    let projection = project_headers(&headers, schema)?;

    let rows = range
        .rows()
        .skip(header_row_idx + 1)
        .map(|row| {
            schema
                .fields
                .iter()
                .zip(&projection)
                .map(|(field, idx)| match idx.and_then(|i| row.get(i)) {
                    Some(cell) => convert_cell(field.data_type, cell),
                    None => Value::Null,
                })
                .collect()
        })
        .collect();
    Ok(rows)
}

fn with_sheet(sheet: &str, err: IngestionError) -> IngestionError {
    match err {
        IngestionError::SchemaMismatch { message } => IngestionError::SchemaMismatch {
            message: format!("sheet '{sheet}': {message}"),
        },
        other => other,
    }
}

fn cell_to_text(c: &Data) -> String {
    match c {
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{f:.0}"),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(d) => d.to_string(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => String::new(),
    }
}

fn convert_cell(data_type: DataType, c: &Data) -> Value {
    match (data_type, c) {
        (_, Data::Empty) => Value::Null,
        (DataType::Utf8, other) => Value::Utf8(cell_to_text(other)),
        (_, Data::Float(f)) => Value::Float64(*f),
        (_, Data::Int(i)) => Value::Int64(*i),
        (_, other) => Value::Utf8(cell_to_text(other)),
    }
}
