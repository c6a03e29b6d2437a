use serde::Deserialize;
use serde_json::{Map, Value};

/// Top level of an Open-Meteo Marine response.
///
/// The "current" object is kept as a raw JSON map: the API is free to omit
/// any requested variable, and it also returns members that are not sensor
/// data (e.g. "time" and "interval"). Field extraction and numeric coercion
/// happen downstream against the known field table.
#[derive(Deserialize)]
pub struct MarineResponse {
    #[serde(default)]
    pub current: Option<Map<String, Value>>,
}
