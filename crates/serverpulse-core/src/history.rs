//! Bounded in-memory reading history.

use std::collections::VecDeque;
use std::sync::RwLock;

use crate::reading::Reading;

/// Default number of readings kept in memory (300 × 2s ticks ≈ 10 minutes).
pub const DEFAULT_CAPACITY: usize = 300;

/// Fixed-capacity, oldest-first buffer of readings.
///
/// Written by the tick pipeline, read concurrently by API handlers.
/// Reads return owned snapshots so a reader never observes a half-applied
/// append.
pub struct HistoryStore {
    capacity: usize,
    readings: RwLock<VecDeque<Reading>>,
}

impl HistoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            readings: RwLock::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.readings.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.read().unwrap().is_empty()
    }

    /// Append one reading, evicting the oldest when over capacity.
    pub fn append(&self, reading: Reading) {
        let mut readings = self.readings.write().unwrap();
        readings.push_back(reading);
        if readings.len() > self.capacity {
            readings.pop_front();
        }
    }

    /// The most recent reading, if any.
    pub fn latest(&self) -> Option<Reading> {
        self.readings.read().unwrap().back().cloned()
    }

    /// At most the `limit` most recent readings, oldest-first.
    ///
    /// `limit == 0` yields an empty vec; a limit beyond the stored count
    /// returns everything available.
    pub fn slice(&self, limit: usize) -> Vec<Reading> {
        let readings = self.readings.read().unwrap();
        let start = readings.len().saturating_sub(limit);
        readings.iter().skip(start).cloned().collect()
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(waktu: i64) -> Reading {
        Reading {
            waktu,
            cpu: waktu as f64,
            mem: 50.0,
            disk: 50.0,
            suhu: 40.0,
            alert: false,
            pesan_alert: None,
        }
    }

    #[test]
    fn length_is_bounded_and_contents_are_the_tail() {
        let capacity = 5;
        let store = HistoryStore::new(capacity);
        for i in 0..12_i64 {
            store.append(reading(i));
            let expected = ((i + 1) as usize).min(capacity);
            assert_eq!(store.len(), expected);
        }
        let kept: Vec<i64> = store.slice(capacity).iter().map(|r| r.waktu).collect();
        assert_eq!(kept, vec![7, 8, 9, 10, 11]);
    }

    #[test]
    fn latest_tracks_the_last_append() {
        let store = HistoryStore::new(3);
        assert!(store.latest().is_none());
        store.append(reading(1));
        store.append(reading(2));
        assert_eq!(store.latest().unwrap().waktu, 2);
    }

    #[test]
    fn slice_returns_most_recent_oldest_first() {
        let store = HistoryStore::new(10);
        for i in 0..6_i64 {
            store.append(reading(i));
        }
        let tail: Vec<i64> = store.slice(3).iter().map(|r| r.waktu).collect();
        assert_eq!(tail, vec![3, 4, 5]);
    }

    #[test]
    fn slice_with_zero_limit_is_empty() {
        let store = HistoryStore::new(10);
        store.append(reading(1));
        assert!(store.slice(0).is_empty());
    }

    #[test]
    fn slice_beyond_count_returns_everything() {
        let store = HistoryStore::new(10);
        for i in 0..3_i64 {
            store.append(reading(i));
        }
        assert_eq!(store.slice(100).len(), 3);
    }

    #[test]
    fn empty_store_yields_empty_slice_not_an_error() {
        let store = HistoryStore::default();
        assert!(store.slice(120).is_empty());
        assert!(store.latest().is_none());
    }
}
