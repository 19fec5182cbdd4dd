use std::path::PathBuf;
use thiserror::Error;

/// Failures raised at the load/config boundary.
///
/// Country-name resolution never produces one of these: unresolvable names
/// degrade to [`crate::models::Region::Unknown`] or an absent flag URL.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("required input not found: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("{file}: missing required column '{column}'")]
    MissingColumn { file: String, column: String },

    #[error("{file}: line {line}, column '{column}': invalid value '{value}'")]
    InvalidNumber {
        file: String,
        column: String,
        line: u64,
        value: String,
    },

    #[error("{file}: csv error: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, DataError>;
