use thiserror::Error;

/// Custom Result type for this crate.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// The Error type for pipeline operations.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Configuration validation error: {0}")]
    ConfigValidationError(String),

    /// A stage's input file does not exist. Fatal: the stage exits non-zero.
    #[error("Input file missing: {path}")]
    InputMissing { path: String },

    /// A single record could not be decoded. Recoverable: the record is
    /// skipped and counted, the batch continues.
    #[error("Malformed record '{doc_name}': {reason}")]
    RecordMalformed { doc_name: String, reason: String },

    /// The topic-modeling stage received a corpus no model can be fit on.
    #[error("Degenerate corpus: {0}")]
    DegenerateCorpus(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Parquet error: {source}")]
    ParquetError {
        #[from]
        source: parquet::errors::ParquetError,
    },

    #[error("Arrow conversion error: {source}")]
    ArrowError {
        #[from]
        source: arrow::error::ArrowError,
    },

    #[error("Serialization/Deserialization error: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Speech archive request failed: {source}")]
    HttpError {
        #[from]
        source: reqwest::Error,
    },

    #[error("Error in processing step '{step_name}': {source}")]
    StepError {
        step_name: String,
        source: Box<PipelineError>,
    },

    #[error("Chart rendering error: {0}")]
    ChartError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}
