//! Column-wise numeric coercion.

use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Parse a normalized cell into a finite number, or [`Value::Null`].
///
/// This is total: text with non-numeric residue, non-finite floats and nulls all become
/// [`Value::Null`]. Surrounding whitespace is ignored.
pub fn coerce_cell(value: &Value) -> Value {
    let parsed = match value {
        Value::Float64(v) => Some(*v),
        Value::Int64(v) => Some(*v as f64),
        Value::Utf8(s) => s.trim().parse::<f64>().ok(),
        Value::Null => None,
    };
    match parsed {
        Some(v) if v.is_finite() => Value::Float64(v),
        _ => Value::Null,
    }
}

/// Convert every non-identifier column of `dataset` to [`DataType::Float64`].
///
/// Columns named in `identifiers` keep their cells verbatim and are typed [`DataType::Utf8`].
/// Rows shorter than the schema are padded with [`Value::Null`].
pub fn coerce_dataset(dataset: &DataSet, identifiers: &[&str]) -> DataSet {
    let is_identifier: Vec<bool> = dataset
        .schema
        .fields
        .iter()
        .map(|f| identifiers.contains(&f.name.as_str()))
        .collect();

    let schema = Schema::new(
        dataset
            .schema
            .fields
            .iter()
            .zip(&is_identifier)
            .map(|(f, &ident)| Field {
                data_type: if ident { DataType::Utf8 } else { DataType::Float64 },
                ..f.clone()
            })
            .collect(),
    );

    let rows = dataset
        .rows
        .iter()
        .map(|row| {
            is_identifier
                .iter()
                .enumerate()
                .map(|(idx, &ident)| {
                    let cell = row.get(idx).unwrap_or(&Value::Null);
                    if ident { cell.clone() } else { coerce_cell(cell) }
                })
                .collect()
        })
        .collect();

    DataSet::new(schema, rows)
}
