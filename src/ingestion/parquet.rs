//! Parquet ingestion implementation.

use std::collections::HashMap;
use std::path::Path;

use parquet::file::reader::{ChunkReader, FileReader};
use parquet::file::serialized_reader::SerializedFileReader;
use parquet::record::Field;

use crate::error::IngestionResult;
use crate::types::{DataSet, DataType, Schema, Value};

use super::project_headers;

/// Ingest a Parquet file into a raw [`DataSet`].
///
/// Notes:
/// - Required schema fields must exist as Parquet leaf columns (by column path string)
/// - Columns outside the schema are ignored
/// - Uses the Parquet record API (`RowIter`)
pub fn ingest_parquet_from_path(path: impl AsRef<Path>, schema: &Schema) -> IngestionResult<DataSet> {
    let reader = SerializedFileReader::try_from(path.as_ref())?;

    let leaf_columns = parquet_leaf_column_paths(&reader);
    let projection = project_headers(&leaf_columns, schema)?;

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for row_res in reader.into_iter() {
        let row = row_res?;

        let by_name: HashMap<&str, &Field> = row
            .get_column_iter()
            .map(|(name, field)| (name.as_str(), field))
            .collect();

        let out_row = schema
            .fields
            .iter()
            .zip(&projection)
            .map(|(f, idx)| match (idx, by_name.get(f.name.as_str())) {
                (Some(_), Some(field)) => convert_parquet_field(f.data_type, field),
                _ => Value::Null,
            })
            .collect();
        rows.push(out_row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}

fn parquet_leaf_column_paths<R: ChunkReader + 'static>(
    reader: &SerializedFileReader<R>,
) -> Vec<String> {
    reader
        .metadata()
        .file_metadata()
        .schema_descr()
        .columns()
        .iter()
        .map(|c| c.path().string())
        .collect()
}

fn convert_parquet_field(data_type: DataType, f: &Field) -> Value {
    let value = match f {
        Field::Null => return Value::Null,
        Field::Str(s) => return Value::Utf8(s.clone()),
        Field::Byte(v) => Value::Int64(i64::from(*v)),
        Field::Short(v) => Value::Int64(i64::from(*v)),
        Field::Int(v) => Value::Int64(i64::from(*v)),
        Field::Long(v) => Value::Int64(*v),
        Field::UByte(v) => Value::Int64(i64::from(*v)),
        Field::UShort(v) => Value::Int64(i64::from(*v)),
        Field::UInt(v) => Value::Int64(i64::from(*v)),
        Field::ULong(v) => match i64::try_from(*v) {
            Ok(v) => Value::Int64(v),
            Err(_) => Value::Float64(*v as f64),
        },
        Field::Float(v) => Value::Float64(f64::from(*v)),
        Field::Double(v) => Value::Float64(*v),
        other => return Value::Utf8(other.to_string()),
    };

    // Numeric identifier columns (e.g. an unquoted NAICS code) are read back as text.
    match (data_type, value) {
        (DataType::Utf8, Value::Int64(i)) => Value::Utf8(i.to_string()),
        (DataType::Utf8, Value::Float64(v)) if v.fract() == 0.0 && v.is_finite() => {
            Value::Utf8(format!("{v:.0}"))
        }
        (DataType::Utf8, Value::Float64(v)) => Value::Utf8(v.to_string()),
        (_, v) => v,
    }
}
