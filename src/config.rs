use std::fmt;
use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;

pub const MIN_UPDATE_INTERVAL: u32 = 15;
pub const MAX_UPDATE_INTERVAL: u32 = 1440;
pub const DEFAULT_UPDATE_INTERVAL: u32 = 60;

/// Coordinate pair a monitoring session is bound to.
///
/// Identity of a session: no two sessions may share a location.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub long: f64,
}

impl Location {
    /// Returns the identity key for the location, also the prefix of every
    /// sensor unique id derived from it
    pub fn key(&self) -> String {
        format!("{}_{}", self.lat, self.long)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.long)
    }
}

/// One configured monitoring station
#[derive(Deserialize)]
pub struct Station {
    pub lat: f64,
    pub long: f64,
    #[serde(default = "default_update_interval")]
    pub update_interval: u32,
}

fn default_update_interval() -> u32 {
    DEFAULT_UPDATE_INTERVAL
}

impl Station {
    pub fn location(&self) -> Location {
        Location { lat: self.lat, long: self.long }
    }

    /// Checks the station input against the allowed ranges.
    ///
    /// Each violation is reported as its own error kind so the configuring
    /// user sees which value was rejected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(ConfigError::InvalidLatitude(self.lat));
        }
        if !(-180.0..=180.0).contains(&self.long) {
            return Err(ConfigError::InvalidLongitude(self.long));
        }
        if self.update_interval < MIN_UPDATE_INTERVAL || self.update_interval > MAX_UPDATE_INTERVAL {
            return Err(ConfigError::InvalidInterval(self.update_interval));
        }

        Ok(())
    }
}

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct Config {
    pub general: General,
    pub stations: Vec<Station>,
}

/// Loads the configuration file and returns a struct with all configuration
/// items, with every station validated
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {

    let toml = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&toml)?;

    if config.stations.is_empty() {
        return Err(ConfigError::NoStations);
    }
    for station in &config.stations {
        station.validate()?;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(lat: f64, long: f64, update_interval: u32) -> Station {
        Station { lat, long, update_interval }
    }

    #[test]
    fn latitude_out_of_range_is_rejected() {
        assert!(matches!(
            station(90.5, 15.0, 60).validate(),
            Err(ConfigError::InvalidLatitude(_))
        ));
        assert!(matches!(
            station(-93.0, 15.0, 60).validate(),
            Err(ConfigError::InvalidLatitude(_))
        ));
    }

    #[test]
    fn longitude_out_of_range_is_rejected() {
        assert!(matches!(
            station(56.0, 180.1, 60).validate(),
            Err(ConfigError::InvalidLongitude(_))
        ));
        assert!(matches!(
            station(56.0, -200.0, 60).validate(),
            Err(ConfigError::InvalidLongitude(_))
        ));
    }

    #[test]
    fn interval_out_of_range_is_rejected() {
        assert!(matches!(
            station(56.0, 15.0, 14).validate(),
            Err(ConfigError::InvalidInterval(14))
        ));
        assert!(matches!(
            station(56.0, 15.0, 1441).validate(),
            Err(ConfigError::InvalidInterval(1441))
        ));
    }

    #[test]
    fn boundary_values_pass_validation() {
        assert!(station(90.0, 180.0, 15).validate().is_ok());
        assert!(station(-90.0, -180.0, 1440).validate().is_ok());
    }

    #[test]
    fn station_list_parses_with_default_interval() {
        let toml = r#"
            [general]
            log_path = "/var/log/seawatch/seawatch.log"
            log_level = "info"
            log_to_stdout = true

            [[stations]]
            lat = 56.22
            long = 15.65

            [[stations]]
            lat = 57.5
            long = 11.2
            update_interval = 30
        "#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.stations.len(), 2);
        assert_eq!(config.stations[0].update_interval, DEFAULT_UPDATE_INTERVAL);
        assert_eq!(config.stations[1].update_interval, 30);
        assert_eq!(config.general.log_level, LevelFilter::Info);
    }

    #[test]
    fn location_key_is_coordinate_pair() {
        let location = Location { lat: 56.22, long: 15.65 };

        assert_eq!(location.key(), "56.22_15.65");
    }
}
