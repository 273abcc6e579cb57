//! @ai:module:intent Export and visualization of aggregation tables
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportGenerator, CsvExporter, JsonReporter, ChartGenerator, format_table

pub mod charts;
pub mod console;
pub mod csv_export;
pub mod json_report;

pub use charts::{ChartGenerator, ChartGeneratorTrait, PlotSummary, PlotTarget};
pub use console::{format_skipped, format_table};
pub use csv_export::{format_cell, load_csv, CsvExporter, CsvExporterTrait};
pub use json_report::{JsonReporter, JsonReporterTrait};

use crate::config::{CollectConfig, PlotMode};
use crate::table::AggregationTable;
use anyhow::Result;

/// @ai:intent Combined exporter and plotter driven by configuration
pub struct ReportGenerator {
    csv: CsvExporter,
    json: JsonReporter,
    charts: ChartGenerator,
}

impl ReportGenerator {
    /// @ai:intent Create a report generator using the configured chart size
    /// @ai:effects pure
    pub fn new(config: &CollectConfig) -> Self {
        Self {
            csv: CsvExporter::new(),
            json: JsonReporter::new(),
            charts: ChartGenerator::new(config.plot.width, config.plot.height),
        }
    }

    /// @ai:intent Write the CSV, and the JSON report when configured
    /// @ai:effects fs:write
    pub fn export(&self, table: &AggregationTable, config: &CollectConfig) -> Result<()> {
        let csv_path = &config.paths.output_csv;
        self.csv.export(table, csv_path)?;
        tracing::info!("Saved collected stats to {}", csv_path.display());

        if let Some(json_path) = &config.paths.output_json {
            self.json.generate(table, json_path)?;
            tracing::info!("Saved JSON report to {}", json_path.display());
        }

        Ok(())
    }

    /// @ai:intent Plot the requested metrics according to the plot mode
    /// @ai:post returns an empty summary when plotting is off
    /// @ai:effects fs:write, io
    pub fn plot(
        &self,
        table: &AggregationTable,
        metrics: &[String],
        config: &CollectConfig,
    ) -> Result<PlotSummary> {
        let target = match config.plot.mode {
            PlotMode::Off => return Ok(PlotSummary::default()),
            PlotMode::Display => PlotTarget::Display,
            PlotMode::Save => PlotTarget::Directory(config.paths.plots_dir.clone()),
        };

        self.charts.plot_metrics(table, metrics, &target)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(&CollectConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simstats_parser::StatRecord;
    use tempfile::TempDir;

    fn config_in(dir: &std::path::Path, mode: PlotMode) -> CollectConfig {
        let mut config = CollectConfig::default();
        config.paths.output_csv = dir.join("collected_stats.csv");
        config.paths.output_json = Some(dir.join("collected.json"));
        config.paths.plots_dir = dir.join("plots");
        config.plot.mode = mode;
        config
    }

    fn table() -> AggregationTable {
        let mut table = AggregationTable::new(["ipc"]);
        let record: StatRecord = [("ipc".to_string(), 1.5)].into_iter().collect();
        table.add("a", &record);
        table
    }

    #[test]
    fn test_export_writes_csv_and_json() {
        let temp = TempDir::new().unwrap();
        let config = config_in(temp.path(), PlotMode::Off);

        ReportGenerator::new(&config).export(&table(), &config).unwrap();

        assert!(temp.path().join("collected_stats.csv").exists());
        assert!(temp.path().join("collected.json").exists());
    }

    #[test]
    fn test_plot_off_renders_nothing() {
        let temp = TempDir::new().unwrap();
        let config = config_in(temp.path(), PlotMode::Off);

        let summary = ReportGenerator::new(&config)
            .plot(&table(), &["ipc".to_string()], &config)
            .unwrap();

        assert!(summary.rendered.is_empty());
        assert!(!temp.path().join("plots").exists());
    }
}
