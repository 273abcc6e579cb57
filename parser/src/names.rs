//! @ai:module:intent Resolve ordered run and metric name lists
//! @ai:module:layer application
//! @ai:module:public_api NameSource, parse_name_list, load_name_list
//! @ai:module:depends_on error
//! @ai:module:stateless true
//!
//! Run identifiers and metric names are resolved the same way; only what the
//! resulting strings denote differs.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// @ai:intent Where a list of names comes from
#[derive(Debug, Clone)]
pub enum NameSource {
    /// Names given directly, e.g. on the command line.
    Literal(Vec<String>),
    /// A newline-delimited list file.
    File(PathBuf),
}

impl NameSource {
    /// @ai:intent Produce the ordered name sequence
    /// @ai:post order of first appearance is preserved, no dedup, no sorting
    /// @ai:effects fs:read
    pub fn resolve(&self) -> Result<Vec<String>> {
        match self {
            Self::Literal(names) => Ok(names.clone()),
            Self::File(path) => load_name_list(path),
        }
    }
}

impl From<Vec<String>> for NameSource {
    fn from(names: Vec<String>) -> Self {
        Self::Literal(names)
    }
}

/// @ai:intent Read a list file with one name per line
/// @ai:pre path exists and is readable
/// @ai:effects fs:read
pub fn load_name_list(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::ListRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(parse_name_list(&content))
}

/// @ai:intent Split list content into names, dropping blank and `#` lines
/// @ai:example parse_name_list("# runs\nwidth4\n\nwidth8\n") -> ["width4", "width8"]
/// @ai:effects pure
pub fn parse_name_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
