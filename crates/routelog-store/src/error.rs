use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("history blob is not valid JSON: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("failed to serialize history: {0}")]
    Serialize(#[source] serde_json::Error),
}
