//! @ai:module:intent Aggregation table keyed by run and metric
//! @ai:module:layer domain
//! @ai:module:public_api AggregationTable, TableRow, SkippedRun, SkipReason, Cell

use crate::error::{CollectError, Result};
use serde::{Deserialize, Serialize};
use simstats_parser::StatRecord;
use std::fmt;
use std::path::PathBuf;

/// A table cell: `None` is absent, `Some(NaN)` is a reported NaN.
pub type Cell = Option<f64>;

/// @ai:intent Why a run contributed no row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    MissingArtifact(PathBuf),
    NoWantedMetrics,
    Unreadable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArtifact(path) => write!(f, "{} not found", path.display()),
            Self::NoWantedMetrics => write!(f, "no requested stats present"),
            Self::Unreadable(message) => write!(f, "unreadable: {}", message),
        }
    }
}

/// @ai:intent A run that was requested but skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRun {
    pub run: String,
    pub reason: SkipReason,
}

/// @ai:intent One collected run; values align with the table's metric columns
#[derive(Debug, Clone)]
pub struct TableRow {
    pub run: String,
    pub values: Vec<Cell>,
}

/// @ai:intent Rows are runs in collection order, columns are metrics in request order
/// @ai:invariant every row has exactly one cell per metric column
/// @ai:invariant requested metrics stay as columns even when no row has a value
#[derive(Debug, Clone, Default)]
pub struct AggregationTable {
    metrics: Vec<String>,
    rows: Vec<TableRow>,
    skipped: Vec<SkippedRun>,
}

impl AggregationTable {
    /// @ai:intent Create an empty table with the given metric columns
    /// @ai:post duplicate metric names collapse to their first occurrence
    /// @ai:effects pure
    pub fn new<I, S>(metrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut columns: Vec<String> = Vec::new();
        for metric in metrics {
            let metric = metric.into();
            if !columns.contains(&metric) {
                columns.push(metric);
            }
        }

        Self {
            metrics: columns,
            rows: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// @ai:intent Insert a run's record as a row
    /// @ai:post returns false and records a skip when the record has none of the columns
    /// @ai:effects io (log)
    pub fn add(&mut self, run: impl Into<String>, record: &StatRecord) -> bool {
        let run = run.into();
        let values: Vec<Cell> = self.metrics.iter().map(|m| record.get(m)).collect();

        if values.iter().all(Option::is_none) {
            self.missing(run, SkipReason::NoWantedMetrics);
            return false;
        }

        self.rows.push(TableRow { run, values });
        true
    }

    /// @ai:intent Record a run that contributes no row
    /// @ai:effects io (log)
    pub fn missing(&mut self, run: impl Into<String>, reason: SkipReason) {
        let run = run.into();
        tracing::warn!("Skipping run '{}': {}", run, reason);
        self.skipped.push(SkippedRun { run, reason });
    }

    /// Appends a row whose cells are already aligned with the columns.
    pub(crate) fn push_row(&mut self, run: String, values: Vec<Cell>) {
        debug_assert_eq!(values.len(), self.metrics.len());
        self.rows.push(TableRow { run, values });
    }

    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn skipped(&self) -> &[SkippedRun] {
        &self.skipped
    }

    pub fn runs(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.run.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, metric: &str) -> Option<usize> {
        self.metrics.iter().position(|m| m == metric)
    }

    /// @ai:intent All cells of one metric column in row order
    /// @ai:post None when the metric is not a column
    /// @ai:effects pure
    pub fn column(&self, metric: &str) -> Option<Vec<Cell>> {
        let idx = self.column_index(metric)?;
        Some(self.rows.iter().map(|row| row.values[idx]).collect())
    }

    /// @ai:intent Close the table, turning a table with no rows into NoData
    /// @ai:effects pure
    pub fn finish(self) -> Result<Self> {
        if self.rows.is_empty() {
            Err(CollectError::NoData)
        } else {
            Ok(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(pairs: &[(&str, f64)]) -> StatRecord {
        pairs.iter().map(|(n, v)| (n.to_string(), *v)).collect()
    }

    #[test]
    fn test_duplicate_metrics_collapse() {
        let table = AggregationTable::new(["ipc", "sim_seconds", "ipc"]);
        assert_eq!(table.metrics(), &["ipc".to_string(), "sim_seconds".to_string()]);
    }

    #[test]
    fn test_add_aligns_cells_with_columns() {
        let mut table = AggregationTable::new(["sim_seconds", "ipc"]);
        assert!(table.add("width4", &record(&[("ipc", 1.5)])));

        assert_eq!(table.rows()[0].run, "width4");
        assert_eq!(table.rows()[0].values, vec![None, Some(1.5)]);
    }

    #[test]
    fn test_add_without_wanted_metrics_is_skipped() {
        let mut table = AggregationTable::new(["ipc"]);
        assert!(!table.add("width4", &StatRecord::new()));

        assert!(table.is_empty());
        assert_eq!(
            table.skipped(),
            &[SkippedRun {
                run: "width4".to_string(),
                reason: SkipReason::NoWantedMetrics,
            }]
        );
    }

    #[test]
    fn test_nan_is_present_not_absent() {
        let mut table = AggregationTable::new(["ipc"]);
        assert!(table.add("a", &record(&[("ipc", f64::NAN)])));

        let column = table.column("ipc").unwrap();
        assert!(column[0].unwrap().is_nan());
    }

    #[test]
    fn test_absent_metric_keeps_column() {
        let mut table = AggregationTable::new(["ipc", "never_reported"]);
        table.add("a", &record(&[("ipc", 1.0)]));
        table.add("b", &record(&[("ipc", 2.0)]));

        assert_eq!(table.column("never_reported"), Some(vec![None, None]));
        assert_eq!(table.column("not_requested"), None);
    }

    #[test]
    fn test_rows_keep_collection_order_and_duplicates() {
        let mut table = AggregationTable::new(["ipc"]);
        table.add("b", &record(&[("ipc", 2.0)]));
        table.missing("c", SkipReason::NoWantedMetrics);
        table.add("a", &record(&[("ipc", 1.0)]));
        table.add("b", &record(&[("ipc", 3.0)]));

        let runs: Vec<_> = table.runs().collect();
        assert_eq!(runs, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_finish_empty_is_no_data() {
        let mut table = AggregationTable::new(["ipc"]);
        table.missing("a", SkipReason::MissingArtifact(PathBuf::from("m5out/a/stats.txt")));
        assert!(matches!(table.finish(), Err(CollectError::NoData)));
    }

    #[test]
    fn test_skip_reason_display() {
        let reason = SkipReason::MissingArtifact(PathBuf::from("m5out/b/stats.txt"));
        assert_eq!(reason.to_string(), "m5out/b/stats.txt not found");
    }
}
