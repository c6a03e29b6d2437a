use std::collections::HashMap;
use log::info;
use crate::config::{Location, Station};
use crate::errors::{ConfigError, SetupError};
use crate::monitor::Monitor;

/// Registry of the running monitoring sessions, keyed by coordinate
/// identity.
///
/// Owned by the daemon boundary and passed by reference to whoever needs
/// lookup. Sessions are created here on setup and destroyed here on unload,
/// nothing else holds a monitor.
pub struct Registry {
    monitors: HashMap<String, Monitor>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry { monitors: HashMap::new() }
    }

    /// Validates a station and brings its monitoring session up.
    ///
    /// Rejects out-of-range input and a location that is already being
    /// monitored before any network traffic happens. The first refresh runs
    /// inside Monitor::start and a failure there fails the whole setup.
    ///
    /// # Arguments
    ///
    /// * 'station' - the configured station to start monitoring
    pub fn create(&mut self, station: &Station) -> Result<&Monitor, SetupError> {
        station.validate()?;

        let location = station.location();
        let key = location.key();
        if self.monitors.contains_key(&key) {
            return Err(ConfigError::DuplicateStation(location.lat, location.long).into());
        }

        let monitor = Monitor::start(location, station.update_interval)?;
        info!("session created for {}", location);

        Ok(self.monitors.entry(key).or_insert(monitor))
    }

    pub fn get(&self, location: &Location) -> Option<&Monitor> {
        self.monitors.get(&location.key())
    }

    /// Stops and discards the session for a location. Returns false if no
    /// session exists for it.
    ///
    /// # Arguments
    ///
    /// * 'location' - identity of the session to remove
    pub fn remove(&mut self, location: &Location) -> bool {
        match self.monitors.remove(&location.key()) {
            Some(mut monitor) => {
                monitor.stop();
                info!("session removed for {}", location);
                true
            }
            None => false,
        }
    }

    pub fn monitors(&self) -> impl Iterator<Item = &Monitor> {
        self.monitors.values()
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(lat: f64, long: f64) -> Station {
        Station { lat, long, update_interval: 60 }
    }

    fn registry_with_stub(lat: f64, long: f64) -> Registry {
        let mut registry = Registry::new();
        let location = Location { lat, long };
        registry.monitors.insert(location.key(), Monitor::stub(location, 60));
        registry
    }

    #[test]
    fn duplicate_location_is_rejected() {
        let mut registry = registry_with_stub(56.22, 15.65);

        let result = registry.create(&station(56.22, 15.65));
        assert!(matches!(
            result,
            Err(SetupError::Config(ConfigError::DuplicateStation(_, _)))
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn invalid_station_is_rejected_before_any_session_exists() {
        let mut registry = Registry::new();

        let result = registry.create(&station(95.0, 15.65));
        assert!(matches!(
            result,
            Err(SetupError::Config(ConfigError::InvalidLatitude(_)))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn remove_discards_the_session() {
        let location = Location { lat: 56.22, long: 15.65 };
        let mut registry = registry_with_stub(location.lat, location.long);

        assert!(registry.get(&location).is_some());
        assert!(registry.remove(&location));
        assert!(registry.get(&location).is_none());
        assert!(!registry.remove(&location));
    }
}
