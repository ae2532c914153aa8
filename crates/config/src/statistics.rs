//! Calculation statistics
//!
//! A running count/sum/min/max of completed calculations, persisted after
//! every mutation so a restart never loses more than the write in flight.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::store::ConfigStore;

/// Persisted statistics record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_calculations: u64,
    pub total_amount: Decimal,
    /// Seeded at `Decimal::MAX` so the first recorded total becomes the
    /// minimum; render as zero while still at the sentinel.
    pub min_amount: Decimal,
    pub max_amount: Decimal,
    pub start_time: DateTime<Utc>,
    pub last_saved: DateTime<Utc>,
}

impl Default for Statistics {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            total_calculations: 0,
            total_amount: Decimal::ZERO,
            min_amount: Decimal::MAX,
            max_amount: Decimal::ZERO,
            start_time: now,
            last_saved: now,
        }
    }
}

impl Statistics {
    /// Fold one completed calculation into the record
    pub fn record(&mut self, total: Decimal) {
        self.total_calculations += 1;
        self.total_amount += total;
        if total < self.min_amount {
            self.min_amount = total;
        }
        if total > self.max_amount {
            self.max_amount = total;
        }
    }

    /// Average calculation total, zero before the first record
    pub fn average(&self) -> Decimal {
        if self.total_calculations == 0 {
            Decimal::ZERO
        } else {
            self.total_amount / Decimal::from(self.total_calculations)
        }
    }

    /// Minimum with the sentinel masked for display
    pub fn display_min(&self) -> Decimal {
        if self.min_amount == Decimal::MAX {
            Decimal::ZERO
        } else {
            self.min_amount
        }
    }
}

/// Live statistics guarded by a mutex, persisting through the store after
/// every mutation. `record` is the only way a calculation enters the record.
pub struct StatsTracker {
    store: Arc<ConfigStore>,
    stats: Mutex<Statistics>,
}

impl StatsTracker {
    /// Load persisted statistics (or defaults) from the store
    pub fn new(store: Arc<ConfigStore>) -> Self {
        let stats = store.load_statistics();
        Self {
            store,
            stats: Mutex::new(stats),
        }
    }

    /// Record one completed calculation and persist
    pub fn record(&self, total: Decimal) {
        let snapshot = {
            let mut stats = self.stats.lock();
            stats.record(total);
            stats.clone()
        };
        tracing::info!(
            total_calculations = snapshot.total_calculations,
            %total,
            "calculation recorded"
        );
        if let Err(err) = self.store.save_statistics(&snapshot) {
            tracing::error!(%err, "failed to persist statistics");
        }
    }

    /// Reset counters; the start time is kept
    pub fn reset(&self) {
        let snapshot = {
            let mut stats = self.stats.lock();
            let start_time = stats.start_time;
            *stats = Statistics {
                start_time,
                ..Statistics::default()
            };
            stats.clone()
        };
        if let Err(err) = self.store.save_statistics(&snapshot) {
            tracing::error!(%err, "failed to persist statistics reset");
        }
    }

    /// Current statistics snapshot
    pub fn snapshot(&self) -> Statistics {
        self.stats.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_record_monotonicity() {
        let mut stats = Statistics::default();
        stats.record(dec!(42000));

        assert_eq!(stats.total_calculations, 1);
        assert_eq!(stats.total_amount, dec!(42000));
        assert_eq!(stats.min_amount, dec!(42000));
        assert_eq!(stats.max_amount, dec!(42000));

        stats.record(dec!(10000));
        stats.record(dec!(90000));

        assert_eq!(stats.total_calculations, 3);
        assert_eq!(stats.total_amount, dec!(142000));
        assert_eq!(stats.min_amount, dec!(10000));
        assert_eq!(stats.max_amount, dec!(90000));
    }

    #[test]
    fn test_average_and_sentinel_display() {
        let stats = Statistics::default();
        assert_eq!(stats.average(), Decimal::ZERO);
        assert_eq!(stats.display_min(), Decimal::ZERO);

        let mut stats = Statistics::default();
        stats.record(dec!(100));
        stats.record(dec!(200));
        assert_eq!(stats.average(), dec!(150));
        assert_eq!(stats.display_min(), dec!(100));
    }

    #[test]
    fn test_tracker_persists_each_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(ConfigStore::new(dir.path()).unwrap());
        let tracker = StatsTracker::new(Arc::clone(&store));

        tracker.record(dec!(55000));

        let reloaded = store.load_statistics();
        assert_eq!(reloaded.total_calculations, 1);
        assert_eq!(reloaded.total_amount, dec!(55000));
    }

    #[test]
    fn test_tracker_reset_keeps_start_time() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(ConfigStore::new(dir.path()).unwrap());
        let tracker = StatsTracker::new(store);

        let started = tracker.snapshot().start_time;
        tracker.record(dec!(1000));
        tracker.reset();

        let stats = tracker.snapshot();
        assert_eq!(stats.total_calculations, 0);
        assert_eq!(stats.min_amount, Decimal::MAX);
        assert_eq!(stats.start_time, started);
    }
}
