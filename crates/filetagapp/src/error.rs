use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FiletagError {
    #[error("Store unavailable at {}: {source}", location.display())]
    StorageUnavailable {
        location: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Store at {} is corrupt: {source}", location.display())]
    Corrupt {
        location: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Store at {} is read-only", .0.display())]
    ReadOnly(PathBuf),

    #[error("Invalid path {}: {reason}", path.display())]
    InvalidPath { path: PathBuf, reason: String },

    #[error("Invalid field name '{0}'")]
    InvalidField(String),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl FiletagError {
    pub(crate) fn invalid_path(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        FiletagError::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FiletagError>;
