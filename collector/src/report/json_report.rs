//! @ai:module:intent JSON export of the aggregation table
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonReporter, JsonReporterTrait
//! @ai:module:stateless true

use crate::table::{AggregationTable, Cell, SkippedRun};
use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// @ai:intent Trait for JSON report generation
pub trait JsonReporterTrait: Send + Sync {
    /// @ai:intent Generate JSON report from a table
    fn generate(&self, table: &AggregationTable, output_path: &Path) -> Result<()>;
}

/// @ai:intent Generates JSON reports from aggregation tables
pub struct JsonReporter;

#[derive(Serialize)]
struct JsonTable<'a> {
    generated_at: String,
    metrics: &'a [String],
    rows: Vec<JsonRow<'a>>,
    skipped: &'a [SkippedRun],
}

#[derive(Serialize)]
struct JsonRow<'a> {
    run: &'a str,
    values: Vec<Value>,
}

impl JsonReporter {
    /// @ai:intent Create a new JSON reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Render the table as a JSON document string
    /// @ai:effects pure
    pub fn render(&self, table: &AggregationTable) -> Result<String> {
        let document = JsonTable {
            generated_at: chrono::Utc::now().to_rfc3339(),
            metrics: table.metrics(),
            rows: table
                .rows()
                .iter()
                .map(|row| JsonRow {
                    run: &row.run,
                    values: row.values.iter().map(|cell| cell_to_json(*cell)).collect(),
                })
                .collect(),
            skipped: table.skipped(),
        };

        Ok(serde_json::to_string_pretty(&document)?)
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Absent cells are null; NaN and infinities are written as their token.
fn cell_to_json(cell: Cell) -> Value {
    match cell {
        None => Value::Null,
        Some(v) if v.is_finite() => Value::from(v),
        Some(v) => Value::String(v.to_string()),
    }
}

impl JsonReporterTrait for JsonReporter {
    /// @ai:intent Generate JSON report to file
    /// @ai:effects fs:write
    fn generate(&self, table: &AggregationTable, output_path: &Path) -> Result<()> {
        let json = self.render(table)?;
        std::fs::write(output_path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::SkipReason;
    use simstats_parser::StatRecord;
    use tempfile::TempDir;

    #[test]
    fn test_generate_json_report() {
        let reporter = JsonReporter::new();
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("collected.json");

        let mut table = AggregationTable::new(["sim_seconds", "ipc", "numCycles"]);
        let record: StatRecord = [
            ("sim_seconds".to_string(), 0.25),
            ("ipc".to_string(), f64::NAN),
        ]
        .into_iter()
        .collect();
        table.add("width4", &record);
        table.missing("width8", SkipReason::NoWantedMetrics);

        reporter.generate(&table, &output).unwrap();
        let value: Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();

        assert_eq!(value["metrics"][1], "ipc");
        assert_eq!(value["rows"][0]["run"], "width4");
        assert_eq!(value["rows"][0]["values"][0], 0.25);
        assert_eq!(value["rows"][0]["values"][1], "NaN");
        assert!(value["rows"][0]["values"][2].is_null());
        assert_eq!(value["skipped"][0]["run"], "width8");
        assert_eq!(value["skipped"][0]["reason"]["kind"], "no_wanted_metrics");
        assert!(value["generated_at"].is_string());
    }
}
