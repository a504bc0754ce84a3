//! Client-side sliding-window reconciliation.
//!
//! The chart polls the history endpoint every few seconds and receives a
//! page that overlaps what it already shows. Replacing the whole series on
//! every poll makes the chart jump and re-animate; [`VisibleWindow`]
//! instead admits only points newer than its watermark, evicting one old
//! point per admitted item so every refresh is a smooth single-step slide.
//!
//! Pure state machine: no rendering dependency, no I/O.

use crate::query::MetricPoint;

/// Default number of visible chart points.
pub const DEFAULT_WINDOW_SIZE: usize = 30;

/// One on-screen point.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowPoint {
    /// Raw timestamp (ms since epoch), kept for watermark comparisons.
    pub t: i64,
    /// Human-readable time label (HH:MM:SS, local time).
    pub label: String,
    /// Metric value, rounded to one decimal for display.
    pub value: f64,
}

impl WindowPoint {
    fn from_metric(p: &MetricPoint) -> Self {
        Self {
            t: p.waktu,
            label: time_label(p.waktu),
            value: round1(p.value),
        }
    }
}

fn time_label(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Fixed-capacity window over the most recent points, with a watermark of
/// the highest timestamp already incorporated.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleWindow {
    size: usize,
    points: Vec<WindowPoint>,
    last_seen: Option<i64>,
}

impl VisibleWindow {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            points: Vec::with_capacity(size),
            last_seen: None,
        }
    }

    pub fn points(&self) -> &[WindowPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Highest timestamp already incorporated; `None` until seeded.
    pub fn last_seen(&self) -> Option<i64> {
        self.last_seen
    }

    /// Merge a freshly fetched history page (ascending timestamps) into the
    /// window. Returns `true` when the window changed, so the renderer can
    /// skip redundant redraws.
    ///
    /// First page seeds the window with its tail. Afterwards only points
    /// newer than the watermark are admitted, one FIFO eviction per
    /// admitted point — even mid-batch, so a page larger than the remaining
    /// room evicts earlier points of the same batch.
    pub fn reconcile(&mut self, page: &[MetricPoint]) -> bool {
        let Some(last) = page.last() else {
            return false;
        };

        let Some(seen) = self.last_seen else {
            let start = page.len().saturating_sub(self.size);
            self.points = page[start..].iter().map(WindowPoint::from_metric).collect();
            self.last_seen = Some(last.waktu);
            return true;
        };

        // Stale or duplicate page (out-of-order poll response): ignore.
        if last.waktu <= seen {
            return false;
        }

        let mut newest = seen;
        let mut changed = false;
        for p in page.iter().filter(|p| p.waktu > seen) {
            if self.points.len() >= self.size {
                self.points.remove(0);
            }
            self.points.push(WindowPoint::from_metric(p));
            newest = newest.max(p.waktu);
            changed = true;
        }

        if changed {
            self.last_seen = Some(newest);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(range: std::ops::Range<i64>) -> Vec<MetricPoint> {
        range
            .map(|i| MetricPoint {
                waktu: i * 1000,
                value: i as f64,
            })
            .collect()
    }

    fn timestamps(w: &VisibleWindow) -> Vec<i64> {
        w.points().iter().map(|p| p.t).collect()
    }

    #[test]
    fn empty_page_is_a_no_op() {
        let mut w = VisibleWindow::new(5);
        assert!(!w.reconcile(&[]));
        assert!(w.is_empty());
        assert_eq!(w.last_seen(), None);
    }

    #[test]
    fn first_page_seeds_with_the_tail() {
        let mut w = VisibleWindow::new(3);
        assert!(w.reconcile(&page(0..5)));
        assert_eq!(timestamps(&w), vec![2000, 3000, 4000]);
        assert_eq!(w.last_seen(), Some(4000));
    }

    #[test]
    fn short_first_page_seeds_everything() {
        let mut w = VisibleWindow::new(10);
        assert!(w.reconcile(&page(0..4)));
        assert_eq!(w.len(), 4);
    }

    #[test]
    fn repeated_page_is_idempotent() {
        let mut w = VisibleWindow::new(5);
        w.reconcile(&page(0..5));
        let before = w.clone();
        assert!(!w.reconcile(&page(0..5)));
        assert_eq!(w, before);
    }

    #[test]
    fn overlapping_page_appends_only_new_points() {
        let mut w = VisibleWindow::new(10);
        w.reconcile(&page(0..5));
        assert!(w.reconcile(&page(2..8)));
        assert_eq!(timestamps(&w), vec![0, 1000, 2000, 3000, 4000, 5000, 6000, 7000]);
        assert_eq!(w.last_seen(), Some(7000));
    }

    #[test]
    fn window_stays_bounded_with_single_step_eviction() {
        let mut w = VisibleWindow::new(3);
        w.reconcile(&page(0..3));
        for i in 3..20 {
            w.reconcile(&page(i - 2..i + 1));
            assert!(w.len() <= 3);
        }
        assert_eq!(timestamps(&w), vec![17_000, 18_000, 19_000]);
    }

    #[test]
    fn batch_larger_than_room_evicts_per_item() {
        // Window of 3 holding [0,1,2]; 5 new points arrive at once. Each
        // admitted point evicts one, so only the batch tail survives.
        let mut w = VisibleWindow::new(3);
        w.reconcile(&page(0..3));
        assert!(w.reconcile(&page(0..8)));
        assert_eq!(timestamps(&w), vec![5000, 6000, 7000]);
    }

    #[test]
    fn stale_page_changes_nothing() {
        let mut w = VisibleWindow::new(5);
        w.reconcile(&page(0..6));
        let before = w.clone();
        // A late-arriving response whose max timestamp is behind the
        // watermark must be ignored entirely.
        assert!(!w.reconcile(&page(0..4)));
        assert_eq!(w, before);
        assert_eq!(w.last_seen(), Some(5000));
    }

    #[test]
    fn values_are_rounded_to_one_decimal() {
        let mut w = VisibleWindow::new(2);
        w.reconcile(&[MetricPoint {
            waktu: 1000,
            value: 33.333,
        }]);
        assert_eq!(w.points()[0].value, 33.3);
    }

    #[test]
    fn timestamps_stay_strictly_increasing() {
        let mut w = VisibleWindow::new(4);
        w.reconcile(&page(0..6));
        w.reconcile(&page(4..9));
        let ts = timestamps(&w);
        assert!(ts.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
