//! @ai:module:intent Run the collect, export and plot sequence as one step
//! @ai:module:layer application
//! @ai:module:public_api CollectOutcome, run_collection
//! @ai:module:depends_on config, table, report
//! @ai:module:stateless true

use crate::config::CollectConfig;
use crate::error::CollectError;
use crate::report::{PlotSummary, ReportGenerator};
use crate::table::{AggregationTable, RunCollector, RunCollectorTrait};
use anyhow::Result;

/// @ai:intent Result of a collection pass
#[derive(Debug)]
pub enum CollectOutcome {
    /// No run produced a row. Nothing was written.
    NoData,
    /// The table was exported and plotted.
    Completed {
        table: AggregationTable,
        plots: PlotSummary,
    },
}

/// @ai:intent Collect runs, then export and plot the table
/// @ai:pre runs and metrics are already resolved
/// @ai:post on NoData no CSV, JSON or plot file is created
/// @ai:effects fs:read, fs:write, io
///
/// `on_collected` sees the table after collection and before anything is
/// written, so callers can print it ahead of interactive plotting.
pub fn run_collection<F>(
    config: &CollectConfig,
    runs: &[String],
    metrics: &[String],
    on_collected: F,
) -> Result<CollectOutcome>
where
    F: FnOnce(&AggregationTable),
{
    let collector = RunCollector::new(config.locator());
    let table = match collector.collect(runs, metrics) {
        Ok(table) => table,
        Err(CollectError::NoData) => {
            tracing::warn!("No run produced data; skipping export and plots");
            return Ok(CollectOutcome::NoData);
        }
        Err(e) => return Err(e.into()),
    };

    on_collected(&table);

    let reporter = ReportGenerator::new(config);
    reporter.export(&table, config)?;
    let plots = reporter.plot(&table, table.metrics(), config)?;

    Ok(CollectOutcome::Completed { table, plots })
}
