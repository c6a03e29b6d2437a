use std::sync::{Arc, Condvar, Mutex, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use log::{info, warn};
use crate::config::Location;
use crate::fields::FIELDS;
use crate::manager_openmeteo::OpenMeteo;
use crate::manager_openmeteo::errors::FetchError;
use crate::reading::Reading;
use crate::sensor::Sensor;

/// State shared between a monitor, its polling thread and its sensors
pub(crate) struct Shared {
    reading: RwLock<Option<Reading>>,
    last_success: AtomicBool,
    alive: AtomicBool,
    stopped: Mutex<bool>,
    stop_signal: Condvar,
}

impl Shared {
    pub(crate) fn new() -> Shared {
        Shared {
            reading: RwLock::new(None),
            last_success: AtomicBool::new(false),
            alive: AtomicBool::new(true),
            stopped: Mutex::new(false),
            stop_signal: Condvar::new(),
        }
    }

    /// Stores the outcome of one refresh attempt.
    ///
    /// A successful fetch replaces the stored reading as a single swap, so
    /// sensors never observe a partially updated reading. A failed fetch
    /// leaves the previous reading visible and only clears the success flag.
    /// Nothing is written once teardown has begun.
    pub(crate) fn apply_refresh(&self, result: Result<Reading, FetchError>) {
        if !self.alive.load(Ordering::SeqCst) {
            return;
        }
        match result {
            Ok(reading) => {
                if let Ok(mut guard) = self.reading.write() {
                    *guard = Some(reading);
                }
                self.last_success.store(true, Ordering::SeqCst);
            }
            Err(_) => {
                self.last_success.store(false, Ordering::SeqCst);
            }
        }
    }

    pub(crate) fn reading(&self) -> Option<Reading> {
        self.reading.read().ok()?.clone()
    }

    pub(crate) fn last_success(&self) -> bool {
        self.last_success.load(Ordering::SeqCst)
    }

    /// Waits for the next tick. Returns true if teardown was requested,
    /// which also wakes the wait before the timeout runs out.
    ///
    /// # Arguments
    ///
    /// * 'timeout' - the refresh interval
    fn wait_for_tick(&self, timeout: Duration) -> bool {
        let guard = self.stopped.lock().unwrap();
        let (guard, _) = self.stop_signal
            .wait_timeout_while(guard, timeout, |stopped| !*stopped)
            .unwrap();

        *guard
    }

    /// Begins teardown: the liveness flag blocks any further swap and the
    /// polling thread is woken out of its interval wait.
    fn request_stop(&self) {
        self.alive.store(false, Ordering::SeqCst);
        if let Ok(mut stopped) = self.stopped.lock() {
            *stopped = true;
        }
        self.stop_signal.notify_all();
    }
}

/// A monitoring session bound to one location.
///
/// Owns the polling thread that refreshes the reading on the configured
/// interval. The first refresh runs synchronously in start, before the
/// thread exists: a session that cannot produce an initial reading is not
/// created at all. After that, failed refreshes never end the session, the
/// stale reading stays visible until the next successful tick.
pub struct Monitor {
    location: Location,
    update_interval: u32,
    shared: Arc<Shared>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Monitor {
    /// Performs the initial refresh and starts the polling thread
    ///
    /// # Arguments
    ///
    /// * 'location' - the coordinate pair to monitor
    /// * 'update_interval' - minutes between refreshes
    pub fn start(location: Location, update_interval: u32) -> Result<Monitor, FetchError> {
        let openmeteo = OpenMeteo::new(location.lat, location.long);

        let reading = openmeteo.fetch_current()?;
        let shared = Arc::new(Shared::new());
        shared.apply_refresh(Ok(reading));

        let handle = spawn_poll_loop(openmeteo, Arc::clone(&shared), location, update_interval);
        info!("monitoring started for {} every {} minutes", location, update_interval);

        Ok(Monitor {
            location,
            update_interval,
            shared,
            handle: Some(handle),
        })
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn update_interval(&self) -> u32 {
        self.update_interval
    }

    /// The most recent successful reading, or None before the first fetch
    /// has been stored
    pub fn reading(&self) -> Option<Reading> {
        self.shared.reading()
    }

    /// Whether the most recent refresh attempt succeeded
    pub fn last_refresh_succeeded(&self) -> bool {
        self.shared.last_success()
    }

    /// One sensor per entry in the field table, all reading from this
    /// monitor's shared state
    pub fn sensors(&self) -> Vec<Sensor> {
        FIELDS
            .iter()
            .map(|spec| Sensor::new(spec, self.location, Arc::clone(&self.shared)))
            .collect()
    }

    /// Tears the session down: cancels the pending interval wait, blocks
    /// any in-flight refresh from storing its result and joins the polling
    /// thread, which releases the http agent it owns
    pub fn stop(&mut self) {
        self.shared.request_stop();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            info!("monitoring stopped for {}", self.location);
        }
    }

    #[cfg(test)]
    pub(crate) fn stub(location: Location, update_interval: u32) -> Monitor {
        Monitor {
            location,
            update_interval,
            shared: Arc::new(Shared::new()),
            handle: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn shared(&self) -> &Arc<Shared> {
        &self.shared
    }
}

impl Drop for Monitor {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawns the polling thread for a session.
///
/// The thread owns the http agent. Every cycle it waits one interval, then
/// fetches and stores the outcome; errors are logged and the loop simply
/// waits for the next tick, there is no backoff and no immediate retry.
fn spawn_poll_loop(
    openmeteo: OpenMeteo,
    shared: Arc<Shared>,
    location: Location,
    update_interval: u32,
) -> thread::JoinHandle<()> {
    let interval = Duration::from_secs(update_interval as u64 * 60);

    thread::spawn(move || {
        loop {
            if shared.wait_for_tick(interval) {
                break;
            }

            let result = openmeteo.fetch_current();
            if let Err(e) = &result {
                warn!("refresh failed for {}: {}", location, e);
            }
            shared.apply_refresh(result);
        }
    })
}
