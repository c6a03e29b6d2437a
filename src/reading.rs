use std::collections::HashMap;
use chrono::{DateTime, Local};
use serde_json::Value;
use crate::fields::ATTRIBUTION;

/// Normalized snapshot of one successful fetch.
///
/// Values are kept as raw JSON values; numeric coercion happens at the
/// sensor layer so a malformed value degrades a single field rather than
/// the whole snapshot. A new reading replaces the previous one wholesale,
/// it is never merged field by field.
#[derive(Clone, Debug)]
pub struct Reading {
    values: HashMap<&'static str, Value>,
    pub last_updated: DateTime<Local>,
    pub attribution: &'static str,
}

impl Reading {
    /// Returns a Reading over the given field values, stamped with the
    /// current wall-clock time and the attribution constant
    ///
    /// # Arguments
    ///
    /// * 'values' - field values keyed by internal field key
    pub fn new(values: HashMap<&'static str, Value>) -> Reading {
        Reading {
            values,
            last_updated: Local::now(),
            attribution: ATTRIBUTION,
        }
    }

    /// Returns the raw value for a field key, or None if the API response
    /// did not include the field
    ///
    /// # Arguments
    ///
    /// * 'key' - internal field key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Number of data fields in the reading, synthetic members excluded
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reading_carries_attribution_and_timestamp() {
        let mut values = HashMap::new();
        values.insert("wave_height", json!(1.25));
        let reading = Reading::new(values);

        assert_eq!(reading.attribution, ATTRIBUTION);
        assert_eq!(reading.len(), 1);
        assert_eq!(reading.get("wave_height"), Some(&json!(1.25)));
        assert!(reading.get("wave_period").is_none());
    }
}
