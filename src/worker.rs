use std::thread;
use std::time::Duration;
use log::info;
use crate::monitor::Monitor;
use crate::registry::Registry;

/// Seconds between status reports
const REPORT_PERIOD: Duration = Duration::from_secs(600);

/// Runs the reporting loop forever.
///
/// The monitors refresh themselves on their own threads; this loop only
/// renders what they currently hold.
///
/// # Arguments
///
/// * 'registry' - the running monitoring sessions
pub fn run(registry: &Registry) {
    loop {
        thread::sleep(REPORT_PERIOD);

        for monitor in registry.monitors() {
            info!("{}", format_report(monitor));
        }
    }
}

/// Renders one station's sensors as a single report line, with a stale
/// marker when the latest refresh attempt failed
///
/// # Arguments
///
/// * 'monitor' - the session to report on
fn format_report(monitor: &Monitor) -> String {
    let values = monitor
        .sensors()
        .iter()
        .map(|sensor| match sensor.value() {
            Some(v) => format!("{} {}{}", sensor.name(), v, sensor.unit()),
            None => format!("{} n/a", sensor.name()),
        })
        .collect::<Vec<String>>()
        .join(", ");

    let staleness = if monitor.last_refresh_succeeded() { "" } else { " [stale]" };

    format!("{}{}: {}", monitor.location(), staleness, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use serde_json::json;
    use crate::config::Location;
    use crate::manager_openmeteo::errors::FetchError;
    use crate::reading::Reading;

    fn stub_monitor() -> Monitor {
        Monitor::stub(Location { lat: 56.22, long: 15.65 }, 60)
    }

    #[test]
    fn report_renders_values_and_gaps() {
        let monitor = stub_monitor();
        let mut values = HashMap::new();
        values.insert("wave_height", json!(1.2));
        monitor.shared().apply_refresh(Ok(Reading::new(values)));

        let report = format_report(&monitor);
        assert!(report.starts_with("(56.22, 15.65): "));
        assert!(report.contains("Marine Wave Height 1.2m"));
        assert!(report.contains("Marine Wave Period n/a"));
        assert!(!report.contains("[stale]"));
    }

    #[test]
    fn report_marks_stale_station() {
        let monitor = stub_monitor();
        monitor.shared().apply_refresh(Ok(Reading::new(HashMap::new())));
        monitor.shared().apply_refresh(Err(FetchError::Http("timeout".to_string())));

        assert!(format_report(&monitor).contains("[stale]"));
    }
}
