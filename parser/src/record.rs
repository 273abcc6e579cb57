//! @ai:module:intent Define the stat record extracted from one run's statistics
//! @ai:module:layer domain
//! @ai:module:public_api StatRecord, MetricFilter
//! @ai:module:stateless true

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{BTreeMap, HashSet};

/// @ai:intent Selects which metric names a parse keeps
#[derive(Debug, Clone)]
pub enum MetricFilter {
    /// Keep every data line of the active section.
    All,
    /// Keep only the named metrics; everything else is discarded.
    Only(HashSet<String>),
}

impl MetricFilter {
    /// @ai:intent Build a filter from a list of wanted names
    /// @ai:post duplicate names collapse into one entry
    /// @ai:effects pure
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(names.into_iter().map(Into::into).collect())
    }

    /// @ai:intent Check whether a metric name should be retained
    /// @ai:effects pure
    pub fn wants(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(names) => names.contains(name),
        }
    }
}

/// @ai:intent Mapping from metric name to value for a single run
///
/// `NaN` is a legal value. Names are kept in sorted order.
#[derive(Debug, Clone, Default)]
pub struct StatRecord {
    values: BTreeMap<String, f64>,
}

impl StatRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Store a value, replacing any earlier value for the same name
    /// @ai:effects pure
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl FromIterator<(String, f64)> for StatRecord {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// JSON has no NaN or infinity literals, so non-finite values are written as
/// their textual token.
impl Serialize for StatRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            if value.is_finite() {
                map.serialize_entry(name, value)?;
            } else {
                map.serialize_entry(name, &value.to_string())?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_only_matches_exact_names() {
        let filter = MetricFilter::only(["sim_seconds", "ipc"]);
        assert!(filter.wants("ipc"));
        assert!(!filter.wants("IPC"));
        assert!(!filter.wants("sim_insts"));
    }

    #[test]
    fn test_filter_all_matches_anything() {
        assert!(MetricFilter::All.wants("system.cpu.numCycles"));
    }

    #[test]
    fn test_insert_overwrites() {
        let mut record = StatRecord::new();
        record.insert("ipc", 1.0);
        record.insert("ipc", 2.5);
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("ipc"), Some(2.5));
    }

    #[test]
    fn test_serialize_nan_as_token() {
        let mut record = StatRecord::new();
        record.insert("ipc", f64::NAN);
        record.insert("sim_seconds", 0.5);

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"ipc":"NaN","sim_seconds":0.5}"#);
    }
}
