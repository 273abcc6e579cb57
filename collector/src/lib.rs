//! @ai:module:intent Cross-run statistics collection library
//! @ai:module:layer application
//! @ai:module:public_api config, error, pipeline, report, runs, table

pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod runs;
pub mod table;

pub use config::{CollectConfig, PlotMode};
pub use error::{CollectError, Result};
pub use pipeline::{run_collection, CollectOutcome};
pub use report::{ChartGenerator, CsvExporter, JsonReporter, ReportGenerator};
pub use runs::{ArtifactLocator, RunDiscovery, RunDiscoveryTrait};
pub use table::{AggregationTable, RunCollector, RunCollectorTrait, SkipReason};
