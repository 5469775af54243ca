use thiserror::Error;

/// Convenience result type for fallible frame operations.
pub type FrameResult<T> = Result<T, FrameError>;

/// Error type for the fallible edges of the crate.
///
/// Transforms, matchers and formatters degrade to pass-through or blank output instead of
/// failing; errors only surface from I/O, strict lookups, configuration decoding and engine
/// construction.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON decoding or encoding error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input does not have the expected shape (ragged columns, missing header, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A user-supplied pattern is not a valid regular expression.
    #[error("invalid regex '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Options for a transformer, matcher or interval are malformed.
    #[error("invalid options for '{id}': {message}")]
    InvalidOptions { id: String, message: String },

    /// No transformer or unit is registered under the id.
    #[error("unknown id '{0}'")]
    UnknownId(String),

    /// The execution thread pool could not be created.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
