use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted by the generation engine.
///
/// Every variant is fatal at first encounter: the run aborts before
/// any output file is opened.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no value definitions for table '{table}' (last tried {path})")]
    SchemaNotFound { table: String, path: PathBuf },
    #[error("cannot find linked data file for table '{table}' (last tried {path})")]
    LinkedDataNotFound { table: String, path: PathBuf },
    #[error(transparent)]
    Schema(#[from] rowsmith_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
