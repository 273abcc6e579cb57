//! @ai:module:intent Format stat records for display (JSON, text)
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, format_record, to_json
//! @ai:module:depends_on record
//! @ai:module:stateless true

use crate::error::Result;
use crate::record::StatRecord;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

/// @ai:intent Format a stat record as a string
/// @ai:effects pure
pub fn format_record(path: &Path, record: &StatRecord, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(record, false),
        OutputFormat::JsonPretty => to_json(record, true),
        OutputFormat::Text => Ok(format_record_text(path, record)),
    }
}

/// @ai:intent Format a stat record as aligned human-readable text
/// @ai:effects pure
fn format_record_text(path: &Path, record: &StatRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", path.display().to_string().bold()));

    if record.is_empty() {
        output.push_str(&format!("  {}\n", "no matching statistics".yellow()));
        return output;
    }

    let width = record.names().map(str::len).max().unwrap_or(0);

    for (name, value) in record.iter() {
        let value_str = if value.is_nan() {
            "NaN".yellow().to_string()
        } else {
            value.to_string()
        };
        output.push_str(&format!("  {:<width$}  {}\n", name.cyan(), value_str, width = width));
    }

    output.push_str(&format!("\n{} statistics\n", record.len()));
    output
}

/// @ai:intent Format any serializable value as JSON
/// @ai:effects pure
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
