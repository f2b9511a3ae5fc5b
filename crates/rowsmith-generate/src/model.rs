use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Options for one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Directory searched for `<table>.vdef.json` after the working directory.
    pub schema_dir: Option<PathBuf>,
    /// Directory searched for linked `<table>.csv` after the working directory.
    pub data_dir: Option<PathBuf>,
    /// Output path stem; defaults to the table name in the working directory.
    pub out: Option<PathBuf>,
    /// Number of rows to generate.
    pub rows: u64,
    /// Emit the DynamoDB-style wire form instead of plain JSON.
    pub wire: bool,
    /// Also emit the dataset as CSV.
    pub csv: bool,
    /// Resolve `linked` columns against sibling datasets.
    pub link: bool,
    /// RNG seed; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Attempt cap for filling a list with distinct items.
    pub max_list_attempts: u32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            schema_dir: None,
            data_dir: None,
            out: None,
            rows: 10,
            wire: false,
            csv: false,
            link: true,
            seed: None,
            max_list_attempts: 1000,
        }
    }
}

/// Summary of a completed generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub table: String,
    pub rows_generated: u64,
    /// Seed the run was driven by; replaying it reproduces the
    /// dataset for schemas without `#now` references.
    pub seed: u64,
    pub json_path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csv_path: Option<PathBuf>,
    pub duration_ms: u64,
}
