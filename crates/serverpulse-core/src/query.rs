//! Read-only metric projection over the history buffer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::history::HistoryStore;
use crate::reading::Reading;

/// Default number of points served when the client omits `limit`.
pub const DEFAULT_HISTORY_LIMIT: usize = 120;

/// A queryable metric field of a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Cpu,
    Mem,
    Disk,
    /// Temperature (°C).
    Suhu,
}

impl Metric {
    pub fn extract(&self, reading: &Reading) -> f64 {
        match self {
            Self::Cpu => reading.cpu,
            Self::Mem => reading.mem,
            Self::Disk => reading.disk,
            Self::Suhu => reading.suhu,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Mem => write!(f, "mem"),
            Self::Disk => write!(f, "disk"),
            Self::Suhu => write!(f, "suhu"),
        }
    }
}

/// Unknown metric name — a client error, rejected before it reaches the
/// history store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMetricError {
    pub name: String,
}

impl fmt::Display for ParseMetricError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown metric: {} (expected cpu|mem|disk|suhu)", self.name)
    }
}

impl std::error::Error for ParseMetricError {}

impl FromStr for Metric {
    type Err = ParseMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cpu" => Ok(Self::Cpu),
            "mem" => Ok(Self::Mem),
            "disk" => Ok(Self::Disk),
            "suhu" => Ok(Self::Suhu),
            other => Err(ParseMetricError {
                name: other.to_string(),
            }),
        }
    }
}

/// One projected history point, as served over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    /// Timestamp in milliseconds since the Unix epoch.
    pub waktu: i64,
    pub value: f64,
}

/// Project at most the `limit` most recent readings onto one metric,
/// oldest-first. Pure read; never mutates the store.
pub fn query(store: &HistoryStore, metric: Metric, limit: usize) -> Vec<MetricPoint> {
    store
        .slice(limit)
        .iter()
        .map(|r| MetricPoint {
            waktu: r.waktu,
            value: metric.extract(r),
        })
        .collect()
}
