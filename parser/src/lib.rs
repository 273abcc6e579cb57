//! @ai:module:intent Parser library for simulator statistics dumps
//! @ai:module:layer infrastructure
//! @ai:module:public_api error, names, output, parser, record
//! @ai:module:stateless true
//!
//! # simstats
//!
//! Extracts named numeric counters from the human-readable statistics dump a
//! simulator writes for each run. Only the first statistics section of a dump
//! is consumed; lines that are not `name value [# comment]` data lines are
//! ignored.
//!
//! ## Example
//!
//! ```rust,no_run
//! use simstats_parser::{parse_stats_file, MetricFilter};
//! use std::path::Path;
//!
//! let wanted = MetricFilter::only(["sim_seconds", "system.cpu.ipc"]);
//! let record = parse_stats_file(Path::new("m5out/width4/stats.txt"), &wanted).unwrap();
//! println!("{:?}", record.get("sim_seconds"));
//! ```

pub mod error;
pub mod names;
pub mod output;
pub mod parser;
pub mod record;

pub use error::{Error, Result};
pub use names::{load_name_list, parse_name_list, NameSource};
pub use output::{format_record, to_json, OutputFormat};
pub use parser::{
    parse_line, parse_stats, parse_stats_file, parse_str, LineEvent, SectionScanner,
    SectionState, StatLine,
};
pub use record::{MetricFilter, StatRecord};
