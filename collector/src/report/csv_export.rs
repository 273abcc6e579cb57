//! @ai:module:intent Persist the aggregation table as CSV and load it back
//! @ai:module:layer infrastructure
//! @ai:module:public_api CsvExporter, CsvExporterTrait, load_csv, format_cell
//! @ai:module:stateless true

use crate::table::{AggregationTable, Cell};
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Header of the run index column.
pub const RUN_COLUMN: &str = "Run";

/// @ai:intent Trait for tabular export
pub trait CsvExporterTrait: Send + Sync {
    /// @ai:intent Write the table to a file, replacing any existing content
    fn export(&self, table: &AggregationTable, output_path: &Path) -> Result<()>;
}

/// @ai:intent Writes `Run,<metric>...` CSV files
pub struct CsvExporter;

impl CsvExporter {
    /// @ai:intent Create a new CSV exporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvExporterTrait for CsvExporter {
    /// @ai:intent Serialize the table to CSV
    /// @ai:post numeric cells round-trip exactly, NaN is written as `NaN`, absent cells are empty
    /// @ai:effects fs:write
    fn export(&self, table: &AggregationTable, output_path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(output_path)
            .with_context(|| format!("Failed to create {}", output_path.display()))?;

        let header = std::iter::once(RUN_COLUMN).chain(table.metrics().iter().map(String::as_str));
        writer.write_record(header)?;

        for row in table.rows() {
            let cells = std::iter::once(row.run.clone())
                .chain(row.values.iter().map(|cell| format_cell(*cell)));
            writer.write_record(cells)?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// @ai:intent Text form of a cell
/// @ai:example format_cell(Some(0.5)) -> "0.5"
/// @ai:example format_cell(None) -> ""
/// @ai:effects pure
pub fn format_cell(cell: Cell) -> String {
    match cell {
        Some(value) => value.to_string(),
        None => String::new(),
    }
}

/// @ai:intent Parse the text form of a cell
/// @ai:effects pure
fn parse_cell(text: &str) -> Option<Result<f64, std::num::ParseFloatError>> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.parse::<f64>())
    }
}

/// @ai:intent Load a CSV written by CsvExporter into a table
/// @ai:pre the first header is `Run`
/// @ai:effects fs:read
pub fn load_csv(path: &Path) -> Result<AggregationTable> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let headers = reader.headers()?.clone();
    let mut columns = headers.iter();

    if columns.next() != Some(RUN_COLUMN) {
        bail!("{}: first column must be '{}'", path.display(), RUN_COLUMN);
    }

    let metrics: Vec<String> = columns.map(str::to_string).collect();
    let mut table = AggregationTable::new(metrics.iter().cloned());

    if table.metrics().len() != metrics.len() {
        bail!("{}: duplicate metric columns", path.display());
    }

    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let run = record.get(0).unwrap_or_default().to_string();

        let mut values = Vec::with_capacity(metrics.len());
        for (metric, text) in metrics.iter().zip(record.iter().skip(1)) {
            let cell = match parse_cell(text) {
                None => None,
                Some(Ok(value)) => Some(value),
                Some(Err(_)) => bail!(
                    "{}:{}: invalid value '{}' for {} of run '{}'",
                    path.display(),
                    line + 2,
                    text,
                    metric,
                    run
                ),
            };
            values.push(cell);
        }

        table.push_row(run, values);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use simstats_parser::StatRecord;
    use tempfile::TempDir;

    fn sample_table() -> AggregationTable {
        let mut table = AggregationTable::new(["sim_seconds", "ipc", "numCycles"]);

        let a: StatRecord = [
            ("sim_seconds".to_string(), 0.021334),
            ("ipc".to_string(), f64::NAN),
        ]
        .into_iter()
        .collect();
        let b: StatRecord = [
            ("sim_seconds".to_string(), 1.0 / 3.0),
            ("ipc".to_string(), 1.7976931348623157e308),
        ]
        .into_iter()
        .collect();

        table.add("width4", &a);
        table.add("width8", &b);
        table
    }

    #[test]
    fn test_export_layout() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("collected_stats.csv");

        let mut table = AggregationTable::new(["sim_seconds", "ipc"]);
        let record: StatRecord = [
            ("sim_seconds".to_string(), 0.5),
            ("ipc".to_string(), f64::NAN),
        ]
        .into_iter()
        .collect();
        table.add("a", &record);
        table.add("b", &[("sim_seconds".to_string(), 2.0)].into_iter().collect());

        CsvExporter::new().export(&table, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Run,sim_seconds,ipc\na,0.5,NaN\nb,2,\n");
    }

    #[test]
    fn test_export_overwrites_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.csv");
        std::fs::write(&path, "stale,content\nthat,is\nlonger,than,the,new,file\n").unwrap();

        let mut table = AggregationTable::new(["ipc"]);
        table.add("a", &[("ipc".to_string(), 1.0)].into_iter().collect());
        CsvExporter::new().export(&table, &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Run,ipc\na,1\n");
    }

    #[test]
    fn test_round_trip_preserves_values_and_nan() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("collected_stats.csv");
        let table = sample_table();

        CsvExporter::new().export(&table, &path).unwrap();
        let loaded = load_csv(&path).unwrap();

        assert_eq!(loaded.metrics(), table.metrics());
        assert_eq!(loaded.runs().collect::<Vec<_>>(), table.runs().collect::<Vec<_>>());

        for (original, reloaded) in table.rows().iter().zip(loaded.rows()) {
            for (x, y) in original.values.iter().zip(&reloaded.values) {
                match (x, y) {
                    (None, None) => {}
                    (Some(x), Some(y)) if x.is_nan() => assert!(y.is_nan()),
                    (Some(x), Some(y)) => assert_eq!(x.to_bits(), y.to_bits()),
                    _ => panic!("cell presence differs: {:?} vs {:?}", x, y),
                }
            }
        }
    }

    #[test]
    fn test_load_rejects_missing_run_column() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.csv");
        std::fs::write(&path, "Name,ipc\na,1\n").unwrap();

        assert!(load_csv(&path).is_err());
    }

    #[test]
    fn test_load_rejects_garbage_value() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.csv");
        std::fs::write(&path, "Run,ipc\na,fast\n").unwrap();

        let err = load_csv(&path).unwrap_err();
        assert!(err.to_string().contains("fast"));
    }
}
