use std::path::Path;

use rowsmith_core::{TableSchema, Value};

/// Write the dataset as CSV: header row = column order, then one row
/// per generated row in plain (non-type-tagged) form.
pub fn write_dataset_csv(
    path: &Path,
    schema: &TableSchema,
    rows: &[Vec<Value>],
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(schema.columns.iter().map(|column| column.name.as_str()))?;
    for row in rows {
        writer.write_record(row.iter().map(Value::to_field))?;
    }
    writer.flush()?;
    Ok(())
}
