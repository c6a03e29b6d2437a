pub mod errors;

use std::collections::HashMap;
use std::time::Duration;
use log::debug;
use ureq::Agent;
use crate::fields::FIELDS;
use crate::manager_openmeteo::errors::FetchError;
use crate::models::marine_current::MarineResponse;
use crate::reading::Reading;

const MARINE_API_URL: &str = "https://marine-api.open-meteo.com/v1/marine";

/// Struct for fetching current marine conditions from the Open-Meteo
/// Marine API for one coordinate pair
pub struct OpenMeteo {
    agent: Agent,
    lat: f64,
    long: f64,
}

impl OpenMeteo {
    /// Returns an OpenMeteo struct ready for fetching marine conditions
    ///
    /// The agent is configured with a 30 second global timeout, which bounds
    /// every fetch attempt including connect and body read time
    ///
    /// # Arguments
    ///
    /// * 'lat' - latitude for the point to get conditions for
    /// * 'long' - longitude for the point to get conditions for
    pub fn new(lat: f64, long: f64) -> OpenMeteo {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .build();

        let agent = config.into();

        Self { agent, lat, long }
    }

    /// Retrieves the current marine conditions for the struct's coordinates.
    ///
    /// The request asks for the six variables in the field table plus
    /// timezone=auto. Variables the API leaves out are simply absent from
    /// the returned reading, a missing "current" object however fails the
    /// whole fetch. No retries happen here, a failed fetch is retried by
    /// the monitor on its next tick.
    pub fn fetch_current(&self) -> Result<Reading, FetchError> {
        let variables = FIELDS
            .iter()
            .map(|f| f.api_param)
            .collect::<Vec<&str>>()
            .join(",");
        let url = format!("{}?latitude={}&longitude={}&current={}&timezone=auto",
                          MARINE_API_URL, self.lat, self.long, variables);

        let json = self.agent
            .get(url)
            .call()?
            .body_mut()
            .read_to_string()?;

        let reading = parse_reading(&json)?;
        debug!("fetched marine data for ({}, {}): {} of {} fields present",
               self.lat, self.long, reading.len(), FIELDS.len());

        Ok(reading)
    }
}

/// Normalizes an API response body into a Reading.
///
/// Each field table entry present in the "current" object is copied under
/// its internal key with the value untouched. Members of "current" that are
/// not in the field table (e.g. "time", "interval") are ignored.
///
/// # Arguments
///
/// * 'json' - the raw response body
fn parse_reading(json: &str) -> Result<Reading, FetchError> {
    let response: MarineResponse = serde_json::from_str(json)?;
    let current = response.current
        .ok_or_else(|| FetchError::Document("missing current data".to_string()))?;

    let mut values = HashMap::new();
    for spec in FIELDS.iter() {
        if let Some(value) = current.get(spec.api_param) {
            values.insert(spec.key, value.clone());
        }
    }

    Ok(Reading::new(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::ATTRIBUTION;
    use serde_json::json;

    const FULL_BODY: &str = r#"{
        "latitude": 56.25,
        "longitude": 15.75,
        "current": {
            "time": "2025-06-01T12:00",
            "interval": 3600,
            "wave_height": 1.24,
            "wave_direction": 183.0,
            "wave_period": 5.85,
            "sea_surface_temperature": 16.4,
            "ocean_current_velocity": 0.31,
            "ocean_current_direction": 97.0
        }
    }"#;

    #[test]
    fn full_response_yields_six_fields() {
        let reading = parse_reading(FULL_BODY).unwrap();

        assert_eq!(reading.len(), 6);
        assert_eq!(reading.get("wave_height"), Some(&json!(1.24)));
        assert_eq!(reading.get("wave_direction"), Some(&json!(183.0)));
        assert_eq!(reading.get("wave_period"), Some(&json!(5.85)));
        assert_eq!(reading.get("sea_surface_temperature"), Some(&json!(16.4)));
        assert_eq!(reading.get("current_velocity"), Some(&json!(0.31)));
        assert_eq!(reading.get("current_direction"), Some(&json!(97.0)));
        assert_eq!(reading.attribution, ATTRIBUTION);
    }

    #[test]
    fn api_members_outside_field_table_are_ignored() {
        let reading = parse_reading(FULL_BODY).unwrap();

        assert!(reading.get("time").is_none());
        assert!(reading.get("interval").is_none());
    }

    #[test]
    fn missing_field_is_omitted_not_an_error() {
        let body = r#"{
            "current": {
                "wave_height": 0.8,
                "wave_direction": 210.0,
                "sea_surface_temperature": 12.1,
                "ocean_current_velocity": 0.05,
                "ocean_current_direction": 344.0
            }
        }"#;
        let reading = parse_reading(body).unwrap();

        assert_eq!(reading.len(), 5);
        assert!(reading.get("wave_period").is_none());
        assert_eq!(reading.get("wave_height"), Some(&json!(0.8)));
    }

    #[test]
    fn missing_current_object_is_a_document_error() {
        let body = r#"{"latitude": 56.25, "longitude": 15.75}"#;

        assert!(matches!(parse_reading(body), Err(FetchError::Document(_))));
    }

    #[test]
    fn unparsable_body_is_a_document_error() {
        assert!(matches!(parse_reading("not json"), Err(FetchError::Document(_))));
    }

    #[test]
    fn non_numeric_value_survives_normalization() {
        let body = r#"{"current": {"wave_height": "abc"}}"#;
        let reading = parse_reading(body).unwrap();

        assert_eq!(reading.get("wave_height"), Some(&json!("abc")));
    }
}
