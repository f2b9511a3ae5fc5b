use std::path::{Path, PathBuf};

use rowsmith_core::{TableSchema, VDEF_SUFFIX, ValueDefDoc};

use crate::errors::GenerationError;

/// Search paths for value definition documents and linked datasets.
///
/// Both lookups try the working directory first, then the configured
/// directory, mirroring how schemas and data files are laid out next
/// to each other during a test run.
#[derive(Debug, Clone, Default)]
pub struct DataPaths {
    pub schema_dir: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}

impl DataPaths {
    /// Location of `<table>.vdef.json`, if it exists anywhere.
    pub fn vdef_file(&self, table: &str) -> Option<PathBuf> {
        locate(&format!("{table}.{VDEF_SUFFIX}"), self.schema_dir.as_deref())
    }

    /// Location of the linked dataset `<table>.csv`, if it exists.
    pub fn data_file(&self, table: &str) -> Option<PathBuf> {
        locate(&format!("{table}.csv"), self.data_dir.as_deref())
    }

    /// Path reported when a vdef lookup fails.
    pub(crate) fn missing_vdef(&self, table: &str) -> PathBuf {
        missing(&format!("{table}.{VDEF_SUFFIX}"), self.schema_dir.as_deref())
    }

    /// Path reported when a data-file lookup fails.
    pub(crate) fn missing_data(&self, table: &str) -> PathBuf {
        missing(&format!("{table}.csv"), self.data_dir.as_deref())
    }
}

fn locate(file: &str, dir: Option<&Path>) -> Option<PathBuf> {
    let local = PathBuf::from(file);
    if local.is_file() {
        return Some(local);
    }
    let fallback = dir?.join(file);
    fallback.is_file().then_some(fallback)
}

fn missing(file: &str, dir: Option<&Path>) -> PathBuf {
    match dir {
        Some(dir) => dir.join(file),
        None => PathBuf::from(file),
    }
}

/// Load and resolve the value definitions for `table`.
pub fn load_table_schema(table: &str, paths: &DataPaths) -> Result<TableSchema, GenerationError> {
    let path = paths
        .vdef_file(table)
        .ok_or_else(|| GenerationError::SchemaNotFound {
            table: table.to_string(),
            path: paths.missing_vdef(table),
        })?;
    let contents = std::fs::read_to_string(&path)?;
    let doc: ValueDefDoc = serde_json::from_str(&contents)?;
    Ok(TableSchema::resolve(table, &doc)?)
}
