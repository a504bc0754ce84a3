//! Monitor service: the tick loop.
//!
//! One tick runs generate → evaluate → append → (on alert) record, in that
//! order. The timer is interval-based, not chained: it fires on a fixed
//! deadline schedule and each tick executes on its own thread, so a slow
//! alert store in tick N never delays tick N+1. Persistence and
//! notification failures are logged and swallowed; no single tick can take
//! the loop down.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::alert::{self, AlertRecord};
use crate::history::{HistoryStore, DEFAULT_CAPACITY};
use crate::notify::{LogNotifier, Notifier};
use crate::reading::{Reading, ReadingSource, SyntheticGenerator};
use crate::store::{AlertStore, MemoryAlertStore};

/// Default interval between ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(2000);

/// Monitor wiring knobs.
pub struct MonitorConfig {
    /// History buffer capacity.
    pub capacity: usize,
    /// Interval between ticks.
    pub tick_interval: Duration,
    /// Alert notification recipient. `None` disables notification.
    pub notify_to: Option<String>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            tick_interval: DEFAULT_TICK_INTERVAL,
            notify_to: None,
        }
    }
}

/// Everything one tick touches. Shared with the interval thread.
struct MonitorInner {
    source: Box<dyn ReadingSource>,
    history: Arc<HistoryStore>,
    alerts: Box<dyn AlertStore>,
    notifier: Box<dyn Notifier>,
    notify_to: Option<String>,
    last_alert: Mutex<Option<Reading>>,
}

impl MonitorInner {
    fn tick(&self) {
        let mut reading = self.source.generate();
        if let Some(pesan) = alert::evaluate(reading.cpu, reading.suhu) {
            reading.alert = true;
            reading.pesan_alert = Some(pesan);
        }
        self.history.append(reading.clone());
        if reading.alert {
            self.record_alert(&reading);
        }
    }

    /// Cache, persist and notify one alerting reading. The cache updates
    /// regardless of persistence outcome; failures are logged and swallowed.
    fn record_alert(&self, reading: &Reading) {
        *self.last_alert.lock().unwrap() = Some(reading.clone());

        let record = AlertRecord::from_reading(reading);
        if let Err(err) = self.alerts.insert(&record) {
            log::warn!("failed to persist alert: {err}");
        }

        if let Some(to) = &self.notify_to {
            if !self.notifier.send(to, "Server alert", &record.pesan) {
                log::warn!("alert notification to {to} was not delivered");
            }
        }
    }
}

/// The process-wide monitoring service.
///
/// Owns the reading source, the bounded history, the durable alert store
/// and the notifier. `start`/`stop` manage a background interval thread;
/// [`MonitorService::tick`] is also callable directly, which is how tests
/// drive the pipeline deterministically.
pub struct MonitorService {
    inner: Arc<MonitorInner>,
    tick_interval: Duration,
    loop_handle: Mutex<Option<(Sender<()>, JoinHandle<()>)>>,
}

impl MonitorService {
    pub fn new(
        config: MonitorConfig,
        source: Box<dyn ReadingSource>,
        alerts: Box<dyn AlertStore>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            inner: Arc::new(MonitorInner {
                source,
                history: Arc::new(HistoryStore::new(config.capacity)),
                alerts,
                notifier,
                notify_to: config.notify_to,
                last_alert: Mutex::new(None),
            }),
            tick_interval: config.tick_interval,
            loop_handle: Mutex::new(None),
        }
    }

    /// Synthetic generator, in-memory alert store, log notifier.
    pub fn with_defaults(config: MonitorConfig) -> Self {
        Self::new(
            config,
            Box::new(SyntheticGenerator::new()),
            Box::new(MemoryAlertStore::new()),
            Box::new(LogNotifier),
        )
    }

    /// Run one generate → evaluate → store cycle.
    pub fn tick(&self) {
        self.inner.tick();
    }

    /// Arm the interval thread. Idempotent: a second call while running is
    /// a no-op.
    pub fn start(&self) {
        let mut handle = self.loop_handle.lock().unwrap();
        if handle.is_some() {
            return;
        }

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let inner = Arc::clone(&self.inner);
        let interval = self.tick_interval;

        let join = std::thread::spawn(move || {
            let mut next = Instant::now() + interval;
            loop {
                let wait = next.saturating_duration_since(Instant::now());
                match stop_rx.recv_timeout(wait) {
                    Err(RecvTimeoutError::Timeout) => {
                        // Advance the deadline before running the tick so
                        // tick work never pushes the schedule, and run the
                        // tick off the timer thread so a slow store cannot
                        // hold up the next fire.
                        next += interval;
                        let inner = Arc::clone(&inner);
                        std::thread::spawn(move || inner.tick());
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        *handle = Some((stop_tx, join));
        log::info!("monitor started (tick every {:?})", interval);
    }

    /// Disarm the interval thread and wait for it. Safe to call when
    /// already stopped.
    pub fn stop(&self) {
        let taken = self.loop_handle.lock().unwrap().take();
        if let Some((stop_tx, join)) = taken {
            let _ = stop_tx.send(());
            let _ = join.join();
            log::info!("monitor stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.loop_handle.lock().unwrap().is_some()
    }

    /// Shared handle to the history buffer.
    pub fn history(&self) -> Arc<HistoryStore> {
        Arc::clone(&self.inner.history)
    }

    /// The most recent reading, if any.
    pub fn latest(&self) -> Option<Reading> {
        self.inner.history.latest()
    }

    /// The most recent alerting reading, if any. In-memory convenience
    /// cache, not a read of the durable store.
    pub fn last_alert(&self) -> Option<Reading> {
        self.inner.last_alert.lock().unwrap().clone()
    }
}

impl Drop for MonitorService {
    fn drop(&mut self) {
        self.stop();
    }
}
