//! @ai:module:intent Scan a statistics dump and extract named numeric values
//! @ai:module:layer application
//! @ai:module:public_api parse_stats, parse_stats_file, parse_str, parse_line, SectionScanner
//! @ai:module:depends_on record, error
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::record::{MetricFilter, StatRecord};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;

const SECTION_PHRASE: &str = "Begin Simulation Statistics";
const SECTION_DASHES: &str = "----";

/// `<name> <value> [# comment]`, value is a signed decimal, scientific literal or `nan`.
const STAT_LINE_PATTERN: &str =
    r"^(?P<name>\S+)\s+(?P<value>[+-]?\d+(?:\.\d*)?(?:[eE][+-]?\d+)?|nan)(?:\s+#.*)?$";

static STAT_LINE_RE: OnceLock<Regex> = OnceLock::new();

fn stat_line_regex() -> &'static Regex {
    STAT_LINE_RE.get_or_init(|| Regex::new(STAT_LINE_PATTERN).expect("Invalid regex pattern"))
}

/// @ai:intent A single `name value` data line
#[derive(Debug, Clone, Copy)]
pub struct StatLine<'a> {
    pub name: &'a str,
    pub value: f64,
}

/// @ai:intent Position of the scanner relative to the first statistics section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionState {
    BeforeSection,
    InSection,
}

/// @ai:intent Outcome of feeding one line to the scanner
#[derive(Debug, Clone, Copy)]
pub enum LineEvent<'a> {
    /// Blank, comment, out-of-section or non-matching line.
    Skip,
    Data(StatLine<'a>),
    /// A second section marker; nothing after it belongs to this run.
    EndOfSection,
}

/// @ai:intent Two-state machine that confines parsing to the first statistics section
/// @ai:invariant only lines between the first and second section markers yield Data
#[derive(Debug, Clone)]
pub struct SectionScanner {
    state: SectionState,
}

impl SectionScanner {
    pub fn new() -> Self {
        Self {
            state: SectionState::BeforeSection,
        }
    }

    pub fn state(&self) -> SectionState {
        self.state
    }

    /// @ai:intent Classify one raw line and advance the state machine
    /// @ai:effects pure
    /// @ai:edge_cases a marker seen in InSection ends the scan instead of re-entering
    pub fn feed<'a>(&mut self, raw: &'a str) -> LineEvent<'a> {
        let line = raw.trim();
        if line.is_empty() {
            return LineEvent::Skip;
        }

        if is_section_marker(line) {
            return match self.state {
                SectionState::BeforeSection => {
                    self.state = SectionState::InSection;
                    LineEvent::Skip
                }
                SectionState::InSection => LineEvent::EndOfSection,
            };
        }

        if self.state == SectionState::BeforeSection || line.starts_with('#') {
            return LineEvent::Skip;
        }

        match parse_line(line) {
            Some(stat) => LineEvent::Data(stat),
            None => LineEvent::Skip,
        }
    }
}

impl Default for SectionScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// @ai:intent Check if a trimmed line is a statistics section marker
/// @ai:effects pure
fn is_section_marker(line: &str) -> bool {
    line.starts_with(SECTION_DASHES) && line.contains(SECTION_PHRASE)
}

/// @ai:intent Match one trimmed line against the data-line grammar
/// @ai:post None for any line that is not a data line
/// @ai:post a value token that fails numeric coercion becomes NaN
/// @ai:example parse_line("sim_seconds 0.021334") -> Some(StatLine { name: "sim_seconds", value: 0.021334 })
/// @ai:effects pure
pub fn parse_line(line: &str) -> Option<StatLine<'_>> {
    let captures = stat_line_regex().captures(line)?;
    let name = captures.name("name")?.as_str();
    let value = captures
        .name("value")
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN);

    Some(StatLine { name, value })
}

/// Accumulates the record while lines are fed through a scanner.
struct RecordBuilder<'f> {
    scanner: SectionScanner,
    filter: &'f MetricFilter,
    record: StatRecord,
}

impl<'f> RecordBuilder<'f> {
    fn new(filter: &'f MetricFilter) -> Self {
        Self {
            scanner: SectionScanner::new(),
            filter,
            record: StatRecord::new(),
        }
    }

    /// Returns false once the active section has ended.
    fn push(&mut self, raw: &str) -> bool {
        match self.scanner.feed(raw) {
            LineEvent::Skip => true,
            LineEvent::EndOfSection => false,
            LineEvent::Data(stat) => {
                if self.filter.wants(stat.name) {
                    self.record.insert(stat.name, stat.value);
                }
                true
            }
        }
    }

    fn finish(self) -> StatRecord {
        self.record
    }
}

/// @ai:intent Parse statistics from any buffered reader
/// @ai:post result keys are a subset of the filter's names
/// @ai:effects io
pub fn parse_stats<R: BufRead>(reader: R, filter: &MetricFilter) -> Result<StatRecord> {
    let mut builder = RecordBuilder::new(filter);

    for line in reader.lines() {
        let line = line?;
        if !builder.push(&line) {
            break;
        }
    }

    Ok(builder.finish())
}

/// @ai:intent Parse statistics already held in memory
/// @ai:effects pure
pub fn parse_str(content: &str, filter: &MetricFilter) -> StatRecord {
    let mut builder = RecordBuilder::new(filter);

    for line in content.lines() {
        if !builder.push(line) {
            break;
        }
    }

    builder.finish()
}

/// @ai:intent Parse a statistics file from disk
/// @ai:pre path exists and is readable
/// @ai:post the file handle is released before returning, on every path
/// @ai:effects fs:read
pub fn parse_stats_file(path: &Path, filter: &MetricFilter) -> Result<StatRecord> {
    let file = File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_stats(BufReader::new(file), filter).map_err(|e| match e {
        Error::Io(source) => Error::FileRead {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}
