//! JSON ingestion implementation.
//!
//! Supported inputs:
//! - A JSON array of records: `[{"OCC_TITLE": "...", "A_MEAN": "94,480"}, ...]`
//!   (what `DataFrame.to_json(orient="records")` produces)
//! - Newline-delimited JSON (NDJSON), one record per line

use std::fs;
use std::path::Path;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, DataType, Schema, Value};

/// Ingest a JSON extract into a raw [`DataSet`].
pub fn ingest_json_from_path(path: impl AsRef<Path>, schema: &Schema) -> IngestionResult<DataSet> {
    let text = fs::read_to_string(path)?;
    ingest_json_from_str(&text, schema)
}

/// Ingest JSON from an in-memory string into a raw [`DataSet`].
pub fn ingest_json_from_str(input: &str, schema: &Schema) -> IngestionResult<DataSet> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(IngestionError::SchemaMismatch {
            message: "json input is empty".to_string(),
        });
    }

    // First try parsing as a single JSON value (array or object).
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(trimmed) {
        match v {
            serde_json::Value::Array(items) => ingest_json_values(&items, schema),
            serde_json::Value::Object(_) => ingest_json_values(std::slice::from_ref(&v), schema),
            _ => Err(IngestionError::SchemaMismatch {
                message: "json must be an object, an array of objects, or NDJSON".to_string(),
            }),
        }
    } else {
        let values = trimmed
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(serde_json::from_str::<serde_json::Value>)
            .collect::<Result<Vec<_>, _>>()?;
        ingest_json_values(&values, schema)
    }
}

fn ingest_json_values(values: &[serde_json::Value], schema: &Schema) -> IngestionResult<DataSet> {
    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(values.len());

    for (idx0, v) in values.iter().enumerate() {
        let row_num = idx0 + 1;
        let obj = v.as_object().ok_or_else(|| IngestionError::SchemaMismatch {
            message: format!("row {row_num} is not a json object"),
        })?;

        let mut row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for field in &schema.fields {
            match obj.get(&field.name) {
                Some(jv) => row.push(convert_json_value(field.data_type, jv)),
                None if field.required => {
                    return Err(IngestionError::SchemaMismatch {
                        message: format!("row {row_num} missing required field '{}'", field.name),
                    });
                }
                None => row.push(Value::Null),
            }
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}

fn convert_json_value(data_type: DataType, v: &serde_json::Value) -> Value {
    match (data_type, v) {
        (_, serde_json::Value::Null) => Value::Null,
        (_, serde_json::Value::String(s)) => Value::Utf8(s.clone()),
        (DataType::Utf8, other) => Value::Utf8(other.to_string()),
        (_, serde_json::Value::Number(n)) => match n.as_i64() {
            Some(i) => Value::Int64(i),
            None => n.as_f64().map(Value::Float64).unwrap_or(Value::Null),
        },
        (_, other) => Value::Utf8(other.to_string()),
    }
}
