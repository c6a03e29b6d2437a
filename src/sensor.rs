use std::sync::Arc;
use log::warn;
use serde_json::Value;
use crate::config::Location;
use crate::fields::FieldSpec;
use crate::monitor::Shared;

/// Read-only view over one field of a monitor's latest reading.
///
/// Sensors hold no data of their own, every accessor reads the shared
/// session state on demand.
pub struct Sensor {
    spec: &'static FieldSpec,
    location: Location,
    shared: Arc<Shared>,
}

impl Sensor {
    pub(crate) fn new(spec: &'static FieldSpec, location: Location, shared: Arc<Shared>) -> Sensor {
        Sensor { spec, location, shared }
    }

    /// Unique id of the sensor, derived from the session's coordinates and
    /// the field key
    pub fn unique_id(&self) -> String {
        format!("{}_{}", self.location.key(), self.spec.key)
    }

    pub fn name(&self) -> String {
        format!("Marine {}", self.spec.name)
    }

    pub fn unit(&self) -> &'static str {
        self.spec.unit
    }

    pub fn icon(&self) -> &'static str {
        self.spec.icon
    }

    pub fn device_class(&self) -> Option<&'static str> {
        self.spec.device_class
    }

    pub fn state_class(&self) -> &'static str {
        self.spec.state_class
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn attribution(&self) -> &'static str {
        crate::fields::ATTRIBUTION
    }

    /// The sensor's current numeric value.
    ///
    /// None if no reading has been stored yet, if the field was absent from
    /// the latest reading, or if the stored value cannot be read as a
    /// number. Coercion failure is logged and degrades this field only.
    pub fn value(&self) -> Option<f64> {
        let reading = self.shared.reading()?;
        let value = reading.get(self.spec.key)?;

        match coerce(value) {
            Some(v) => Some(v),
            None => {
                warn!("invalid value for sensor {}: {}", self.unique_id(), value);
                None
            }
        }
    }

    /// A sensor is available when the latest refresh attempt succeeded and
    /// its own field carries a usable value
    pub fn available(&self) -> bool {
        self.shared.last_success() && self.value().is_some()
    }

    /// ISO-8601 form of the latest reading's timestamp
    pub fn last_updated(&self) -> Option<String> {
        Some(self.shared.reading()?.last_updated.to_rfc3339())
    }
}

/// Reads a raw JSON value as f64. Numbers pass through, strings are parsed,
/// anything else has no numeric form.
///
/// # Arguments
///
/// * 'value' - the raw value from the reading
fn coerce(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    }
}
