//! @ai:module:intent Collect per-run stat records into an aggregation table
//! @ai:module:layer application
//! @ai:module:public_api RunCollector, RunCollectorTrait
//! @ai:module:depends_on runs, table::types
//! @ai:module:stateless true

use crate::error::Result;
use crate::runs::ArtifactLocator;
use crate::table::types::{AggregationTable, SkipReason};
use simstats_parser::{parse_stats_file, MetricFilter, NameSource};

/// @ai:intent Trait for building an aggregation table from runs
pub trait RunCollectorTrait: Send + Sync {
    /// @ai:intent Parse each run's artifact and aggregate the wanted metrics
    fn collect(&self, runs: &[String], metrics: &[String]) -> Result<AggregationTable>;
}

/// @ai:intent Collects runs sequentially, one artifact read per run
pub struct RunCollector {
    locator: ArtifactLocator,
}

impl RunCollector {
    /// @ai:intent Create a collector for a given artifact layout
    /// @ai:effects pure
    pub fn new(locator: ArtifactLocator) -> Self {
        Self { locator }
    }

    /// @ai:intent Resolve run and metric lists, then collect
    /// @ai:effects fs:read
    pub fn collect_from(&self, runs: &NameSource, metrics: &NameSource) -> Result<AggregationTable> {
        let runs = runs.resolve()?;
        let metrics = metrics.resolve()?;
        self.collect(&runs, &metrics)
    }

    /// @ai:intent Parse one run and insert it into the table
    /// @ai:effects fs:read
    fn collect_run(&self, run: &str, filter: &MetricFilter, table: &mut AggregationTable) {
        let path = self.locator.artifact_path(run);

        if !path.is_file() {
            table.missing(run, SkipReason::MissingArtifact(path));
            return;
        }

        match parse_stats_file(&path, filter) {
            Ok(record) => {
                if table.add(run, &record) {
                    tracing::debug!("Collected {} stats from {}", record.len(), path.display());
                }
            }
            Err(e) => table.missing(run, SkipReason::Unreadable(e.to_string())),
        }
    }
}

impl RunCollectorTrait for RunCollector {
    /// @ai:intent Collect runs in request order
    /// @ai:post rows follow request order with skipped runs removed
    /// @ai:post Err(NoData) when no run produced a row
    /// @ai:effects fs:read
    fn collect(&self, runs: &[String], metrics: &[String]) -> Result<AggregationTable> {
        let mut table = AggregationTable::new(metrics.iter().cloned());
        let filter = MetricFilter::only(table.metrics().iter().cloned());
        let total = runs.len();

        for (i, run) in runs.iter().enumerate() {
            tracing::info!("[{}/{}] Collecting run: {}", i + 1, total, run);
            self.collect_run(run, &filter, &mut table);
        }

        tracing::info!(
            "Collected {} of {} runs ({} skipped)",
            table.len(),
            total,
            table.skipped().len()
        );

        table.finish()
    }
}
