use thiserror::Error;
use crate::manager_openmeteo::errors::FetchError;

/// Rejected configuration input. Validation failures carry the offending
/// value and are reported to the configuring user as distinct kinds, they
/// are never retried.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid_latitude: {0} is outside [-90, 90]")]
    InvalidLatitude(f64),
    #[error("invalid_longitude: {0} is outside [-180, 180]")]
    InvalidLongitude(f64),
    #[error("invalid_interval: {0} minutes is outside [15, 1440]")]
    InvalidInterval(u32),
    #[error("duplicate_station: ({0}, {1}) is already being monitored")]
    DuplicateStation(f64, f64),
    #[error("no stations configured")]
    NoStations,
    #[error("error reading configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("error in configuration file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Failure to bring a monitoring session up. A fetch failure is fatal here
/// and nowhere else: once a session runs, failed refreshes only mark it
/// stale.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("first refresh failed: {0}")]
    Fetch(#[from] FetchError),
}
