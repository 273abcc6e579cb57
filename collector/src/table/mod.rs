//! @ai:module:intent Cross-run aggregation of parsed statistics
//! @ai:module:layer application
//! @ai:module:public_api AggregationTable, TableRow, SkippedRun, SkipReason, Cell, RunCollector

pub mod collector;
pub mod types;

pub use collector::{RunCollector, RunCollectorTrait};
pub use types::{AggregationTable, Cell, SkipReason, SkippedRun, TableRow};
