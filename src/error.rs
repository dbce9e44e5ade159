use thiserror::Error;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Error type returned by ingestion and dataset loading.
///
/// The query core never returns errors: malformed cells become missing values, and empty or
/// undefined results are represented as data. Only loading a raw table can fail.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "excel")]
    /// Excel ingestion error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// CSV ingestion error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON syntax error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Parquet ingestion error.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// The input does not carry the OEWS columns the core depends on, or its format is unknown.
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },
}

/// Returned when a geography level name is not one of `National`, `State` or `Metropolitan`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown geography level '{0}' (expected National, State or Metropolitan)")]
pub struct ParseGeoLevelError(pub String);
