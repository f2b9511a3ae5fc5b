use std::collections::HashMap;

use rand::Rng;
use tracing::debug;

use rowsmith_core::{Error, LinkRef};

use crate::errors::GenerationError;
use crate::store::{DataPaths, load_table_schema};

/// Lazily loaded key sets for linked tables.
///
/// Each linked table's CSV is read at most once per run; cached key
/// sequences live for the lifetime of the resolver and are never
/// invalidated, so a table linked from several columns costs one read.
#[derive(Debug, Default)]
pub struct LinkResolver {
    cache: HashMap<String, Vec<String>>,
}

impl LinkResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cached(&self, table: &str) -> bool {
        self.cache.contains_key(table)
    }

    /// Sample one key for `link` uniformly with replacement, loading
    /// the sibling dataset on first use.
    pub fn resolve_key(
        &mut self,
        link: &LinkRef,
        paths: &DataPaths,
        rng: &mut impl Rng,
    ) -> Result<String, GenerationError> {
        if !self.cache.contains_key(&link.table) {
            let keys = load_linked_keys(link, paths)?;
            self.cache.insert(link.table.clone(), keys);
        }

        let keys = &self.cache[&link.table];
        if keys.is_empty() {
            return Err(Error::InvalidSchema(format!(
                "linked table '{}' has no data rows to draw '{}' from",
                link.table, link.key_column
            ))
            .into());
        }
        Ok(keys[rng.random_range(0..keys.len())].clone())
    }
}

fn load_linked_keys(link: &LinkRef, paths: &DataPaths) -> Result<Vec<String>, GenerationError> {
    // The key's column index comes from the linked table's own schema,
    // not from the CSV header.
    let schema = load_table_schema(&link.table, paths)?;
    let key_index = schema.column_index(&link.key_column).ok_or_else(|| {
        Error::InvalidSchema(format!(
            "linked key column '{}' is not in the column order of table '{}'",
            link.key_column, link.table
        ))
    })?;

    let path = paths
        .data_file(&link.table)
        .ok_or_else(|| GenerationError::LinkedDataNotFound {
            table: link.table.clone(),
            path: paths.missing_data(&link.table),
        })?;

    debug!(
        table = %link.table,
        key = %link.key_column,
        path = %path.display(),
        "loading linked keys"
    );

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(&path)?;

    let mut keys = Vec::new();
    for record in reader.records() {
        let record = record?;
        let key = record.get(key_index).ok_or_else(|| {
            Error::InvalidSchema(format!(
                "row {} of '{}' has no field at index {key_index} for key '{}'",
                keys.len() + 1,
                path.display(),
                link.key_column
            ))
        })?;
        keys.push(key.to_string());
    }
    Ok(keys)
}
