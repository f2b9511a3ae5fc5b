use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Local;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use rowsmith_core::{TableSchema, Value};

use crate::errors::GenerationError;
use crate::link::LinkResolver;
use crate::model::{GenerateOptions, GenerationReport};
use crate::output::csv::write_dataset_csv;
use crate::output::json::{plain_items, wire_items};
use crate::store::{DataPaths, load_table_schema};
use crate::values::{GenContext, generate_value};

/// Entry point: builds a dataset for one table and writes the
/// configured outputs.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn run(&self, table: &str) -> Result<GenerationReport, GenerationError> {
        let start = Instant::now();
        let paths = DataPaths {
            schema_dir: self.options.schema_dir.clone(),
            data_dir: self.options.data_dir.clone(),
        };
        let schema = load_table_schema(table, &paths)?;
        let seed = self.options.seed.unwrap_or_else(|| rand::rng().random());

        info!(
            table,
            rows = self.options.rows,
            seed,
            wire = self.options.wire,
            link = self.options.link,
            "generation started"
        );

        let mut ctx = GenContext {
            paths: &paths,
            link: self.options.link,
            max_list_attempts: self.options.max_list_attempts,
            resolver: LinkResolver::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        };

        // the full dataset is built in memory before any output file
        // is opened, so a failed run never leaves a partial file
        let mut rows = Vec::with_capacity(self.options.rows as usize);
        for _ in 0..self.options.rows {
            rows.push(generate_row(&schema, &mut ctx)?);
        }

        let stem = self
            .options
            .out
            .clone()
            .unwrap_or_else(|| PathBuf::from(table));
        let timestamp = Local::now().format("%Y-%m-%dT%H-%M-%S").to_string();

        let json_path = versioned_path(&stem, "json", &timestamp);
        let items = if self.options.wire {
            wire_items(table, &schema, &rows)
        } else {
            plain_items(&schema, &rows)
        };
        std::fs::write(&json_path, serde_json::to_vec_pretty(&items)?)?;
        info!(path = %json_path.display(), wire = self.options.wire, "JSON written");

        let csv_path = if self.options.csv {
            let path = versioned_path(&stem, "csv", &timestamp);
            write_dataset_csv(&path, &schema, &rows)?;
            info!(path = %path.display(), "CSV written");
            Some(path)
        } else {
            None
        };

        let report = GenerationReport {
            table: table.to_string(),
            rows_generated: rows.len() as u64,
            seed,
            json_path,
            csv_path,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            table,
            rows_generated = report.rows_generated,
            duration_ms = report.duration_ms,
            "generation completed"
        );
        Ok(report)
    }
}

/// Generate one row in column order; later columns may read earlier
/// values through the in-progress slice.
pub fn generate_row(
    schema: &TableSchema,
    ctx: &mut GenContext<'_>,
) -> Result<Vec<Value>, GenerationError> {
    let mut row = Vec::with_capacity(schema.len());
    for column in &schema.columns {
        let value = generate_value(&column.name, &column.spec, &row, schema, ctx)?;
        row.push(value);
    }
    Ok(row)
}

/// `<stem>.<ext>`, shifting to `<stem>.<timestamp>.<ext>` when the
/// plain path is already taken.
fn versioned_path(stem: &Path, ext: &str, timestamp: &str) -> PathBuf {
    let base = PathBuf::from(format!("{}.{ext}", stem.display()));
    if !base.exists() {
        return base;
    }
    PathBuf::from(format!("{}.{timestamp}.{ext}", stem.display()))
}
