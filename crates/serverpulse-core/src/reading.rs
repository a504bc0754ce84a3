//! Telemetry readings and synthetic generation.
//!
//! A [`Reading`] is one immutable telemetry sample. Readings come from a
//! [`ReadingSource`]; the default [`SyntheticGenerator`] draws each metric
//! uniformly from a fixed range, stamped by an injectable [`Clock`] so tests
//! can drive time deterministically.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// One telemetry sample. Field names follow the wire format consumed by the
/// dashboard (`waktu` = timestamp, `suhu` = temperature, `pesanAlert` =
/// alert message).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Timestamp in milliseconds since the Unix epoch.
    pub waktu: i64,
    /// CPU utilization, 0-100.
    pub cpu: f64,
    /// Memory utilization, 0-100.
    pub mem: f64,
    /// Disk utilization, 0-100.
    pub disk: f64,
    /// Temperature in degrees Celsius.
    pub suhu: f64,
    /// Whether any threshold fired for this sample.
    pub alert: bool,
    /// Combined alert message, `None` when no threshold fired.
    #[serde(rename = "pesanAlert")]
    pub pesan_alert: Option<String>,
}

/// Millisecond clock. Injectable so the tick pipeline can run against fake
/// time in tests.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

/// Wall clock backed by [`SystemTime`].
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }
}

/// Trait that every reading producer must implement.
///
/// Produces one sample per call with alert fields unset; threshold
/// evaluation happens downstream in the monitor.
pub trait ReadingSource: Send + Sync {
    fn generate(&self) -> Reading;
}

/// Synthetic reading generator.
///
/// Each metric is drawn independently and uniformly: CPU [5,100],
/// memory [10,95], disk [5,95], temperature [18,95]. Generation never
/// blocks and keeps no history.
pub struct SyntheticGenerator {
    rng: Mutex<StdRng>,
    clock: Box<dyn Clock>,
}

impl SyntheticGenerator {
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
            clock,
        }
    }

    /// Deterministic generator for tests.
    pub fn seeded(seed: u64, clock: Box<dyn Clock>) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            clock,
        }
    }
}

impl Default for SyntheticGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadingSource for SyntheticGenerator {
    fn generate(&self) -> Reading {
        let mut rng = self.rng.lock().unwrap();
        Reading {
            waktu: self.clock.now_ms(),
            cpu: rng.random_range(5.0..=100.0),
            mem: rng.random_range(10.0..=95.0),
            disk: rng.random_range(5.0..=95.0),
            suhu: rng.random_range(18.0..=95.0),
            alert: false,
            pesan_alert: None,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::SteppingClock;
    use super::*;

    #[test]
    fn generated_metrics_stay_in_range() {
        let generator = SyntheticGenerator::seeded(7, Box::new(SteppingClock::new(0, 1)));
        for _ in 0..500 {
            let r = generator.generate();
            assert!((5.0..=100.0).contains(&r.cpu), "cpu out of range: {}", r.cpu);
            assert!((10.0..=95.0).contains(&r.mem), "mem out of range: {}", r.mem);
            assert!((5.0..=95.0).contains(&r.disk), "disk out of range: {}", r.disk);
            assert!((18.0..=95.0).contains(&r.suhu), "suhu out of range: {}", r.suhu);
            assert!(!r.alert);
            assert!(r.pesan_alert.is_none());
        }
    }

    #[test]
    fn timestamps_come_from_the_clock_and_are_monotonic() {
        let generator = SyntheticGenerator::seeded(1, Box::new(SteppingClock::new(1_000, 2_000)));
        let a = generator.generate();
        let b = generator.generate();
        assert_eq!(a.waktu, 1_000);
        assert_eq!(b.waktu, 3_000);
    }

    #[test]
    fn reading_serializes_with_wire_field_names() {
        let r = Reading {
            waktu: 42,
            cpu: 10.0,
            mem: 20.0,
            disk: 30.0,
            suhu: 40.0,
            alert: false,
            pesan_alert: None,
        };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["waktu"], 42);
        assert_eq!(json["pesanAlert"], serde_json::Value::Null);
        assert!(json.get("pesan_alert").is_none());
    }
}
