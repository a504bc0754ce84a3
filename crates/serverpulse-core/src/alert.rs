//! Threshold alerting.
//!
//! [`evaluate`] is the single place thresholds live: CPU above 90% and
//! temperature above 80°C. The message format is a wire contract — the
//! dashboard's alert panel splits the combined message on `';'` and
//! classifies each segment by keyword, so the separator, segment order
//! (CPU first) and the `CPU tinggi` / `Suhu tinggi` tokens must not change.

use serde::{Deserialize, Serialize};

use crate::reading::Reading;

/// CPU utilization threshold, percent.
pub const CPU_THRESHOLD: f64 = 90.0;
/// Temperature threshold, degrees Celsius.
pub const SUHU_THRESHOLD: f64 = 80.0;

/// Evaluate alert thresholds for one sample.
///
/// Returns the combined alert message, or `None` when no threshold fired.
/// Both rules are checked independently; when both fire the messages are
/// joined with `"; "`, CPU first.
pub fn evaluate(cpu: f64, suhu: f64) -> Option<String> {
    let mut parts = Vec::new();
    if cpu > CPU_THRESHOLD {
        parts.push(format!("CPU tinggi: {cpu:.1}%"));
    }
    if suhu > SUHU_THRESHOLD {
        parts.push(format!("Suhu tinggi: {suhu:.1}°C"));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}

/// Persisted projection of an alerting reading. Write-once; the durable
/// alert collection is append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub waktu: i64,
    pub cpu: f64,
    pub suhu: f64,
    pub pesan: String,
}

impl AlertRecord {
    /// Project an alerting reading into its persisted form. Only meaningful
    /// when `reading.alert` is set.
    pub fn from_reading(reading: &Reading) -> Self {
        Self {
            waktu: reading.waktu,
            cpu: reading.cpu,
            suhu: reading.suhu,
            pesan: reading.pesan_alert.clone().unwrap_or_default(),
        }
    }
}

/// Severity assigned to one parsed alert segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// One classified segment of a combined alert message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertSegment {
    /// Short category label ("CPU", "Temp", or "Alert" for unknowns).
    pub label: String,
    /// The raw segment text, trimmed.
    pub text: String,
    pub severity: Severity,
}

/// Split a combined alert message on `';'` and classify each segment by
/// keyword: `cpu` → CPU/warning, `suhu`/`temp`/`temperature` →
/// Temp/critical, anything else → generic info.
pub fn parse_segments(pesan: &str) -> Vec<AlertSegment> {
    pesan
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let lower = s.to_lowercase();
            if lower.contains("cpu") {
                AlertSegment {
                    label: "CPU".to_string(),
                    text: s.to_string(),
                    severity: Severity::Warning,
                }
            } else if lower.contains("suhu") || lower.contains("temp") {
                AlertSegment {
                    label: "Temp".to_string(),
                    text: s.to_string(),
                    severity: Severity::Critical,
                }
            } else {
                AlertSegment {
                    label: "Alert".to_string(),
                    text: s.to_string(),
                    severity: Severity::Info,
                }
            }
        })
        .collect()
}
