//! Error types for the medfeed pipeline.

use diesel::result::DatabaseErrorKind;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Main error type for the ETL pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("database connection failed: {0}")]
    Connection(#[source] diesel::ConnectionError),

    #[error("file not found: {0}")]
    NotFound(String),

    #[error("no parseable rows in {0}")]
    EmptyData(String),

    #[error("constraint violation on {table}: {message}")]
    Constraint { table: String, message: String },

    #[error("malformed value for {column}: {value:?}")]
    MalformedValue { column: String, value: String },

    #[error("database error: {0}")]
    Driver(#[from] diesel::result::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Classify a backend error for a statement against `table`.
    ///
    /// Unique-key and foreign-key violations become [`PipelineError::Constraint`]
    /// so the orchestrator can recover from them per row; everything else stays
    /// a [`PipelineError::Driver`] error.
    pub fn from_query_error(table: &str, err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::DatabaseError(
                DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::ForeignKeyViolation,
                info,
            ) => PipelineError::Constraint {
                table: table.to_string(),
                message: info.message().to_string(),
            },
            other => PipelineError::Driver(other),
        }
    }

    /// True for errors the load loop recovers from without aborting the run.
    pub fn is_row_level(&self) -> bool {
        matches!(
            self,
            PipelineError::Constraint { .. } | PipelineError::MalformedValue { .. }
        )
    }
}
