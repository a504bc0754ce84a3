//! # serverpulse-core
//!
//! Core library for the serverpulse health dashboard: synthetic telemetry
//! generation, a bounded in-memory history, threshold alerting with durable
//! persistence, and the client-side sliding-window reconciler that keeps
//! the chart smooth across polls.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use serverpulse_core::{Metric, MonitorConfig, MonitorService, query};
//!
//! let monitor = Arc::new(MonitorService::with_defaults(MonitorConfig::default()));
//! monitor.start();
//!
//! // ... later, serve history queries:
//! let points = query(&monitor.history(), Metric::Cpu, 120);
//! println!("{} points", points.len());
//! ```
//!
//! ## Architecture
//!
//! Tick: generator → alert evaluation → history append → (on alert)
//! durable store + notifier. The timer fires on a fixed interval schedule;
//! each tick runs independently, so a slow or failing store or notifier is
//! logged and never delays or stops the next tick.
//!
//! The history buffer keeps the newest [`DEFAULT_CAPACITY`] readings,
//! FIFO-evicted. [`VisibleWindow`] applies the same eviction policy
//! client-side, one step per admitted point, guarded by a timestamp
//! watermark so stale poll responses change nothing.

pub mod alert;
pub mod history;
pub mod monitor;
pub mod notify;
pub mod query;
pub mod reading;
pub mod store;
pub mod window;

pub use alert::{evaluate, parse_segments, AlertRecord, AlertSegment, Severity};
pub use history::{HistoryStore, DEFAULT_CAPACITY};
pub use monitor::{MonitorConfig, MonitorService, DEFAULT_TICK_INTERVAL};
pub use notify::{DisabledNotifier, LogNotifier, Notifier};
pub use query::{query, Metric, MetricPoint, ParseMetricError, DEFAULT_HISTORY_LIMIT};
pub use reading::{Clock, Reading, ReadingSource, SyntheticGenerator, SystemClock};
pub use store::{AlertStore, JsonlAlertStore, MemoryAlertStore, StoreError};
pub use window::{VisibleWindow, WindowPoint, DEFAULT_WINDOW_SIZE};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
