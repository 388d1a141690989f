//! Best-distance record
//!
//! A single integer (meters) persisted under a fixed key. Read once at
//! startup, written whenever a run beats it.

use crate::persistence::RecordStore;

/// Storage key for the best distance
pub const BEST_DISTANCE_KEY: &str = "hill_climb_best_distance";

/// Best distance backed by a storage collaborator
#[derive(Debug)]
pub struct BestRecord<S: RecordStore> {
    store: S,
    best: u32,
}

impl<S: RecordStore> BestRecord<S> {
    /// Read the stored record once. Absent or nonsensical values become 0.
    pub fn load(store: S) -> Self {
        let best = match store.get(BEST_DISTANCE_KEY) {
            Some(value) if value >= 0 => value.min(u32::MAX as i64) as u32,
            Some(value) => {
                log::warn!("Ignoring negative stored record {}", value);
                0
            }
            None => 0,
        };
        log::info!("Best record: {} m", best);
        Self { store, best }
    }

    /// Current best in meters
    pub fn best(&self) -> u32 {
        self.best
    }

    /// Offer a distance. Persists and returns true only if it beats the record.
    pub fn submit(&mut self, distance: u32) -> bool {
        if distance <= self.best {
            return false;
        }
        self.best = distance;
        self.store.set(BEST_DISTANCE_KEY, distance as i64);
        true
    }

    /// Push buffered writes out (phase changes, leaving the page)
    pub fn flush(&mut self) {
        self.store.flush();
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_absent_defaults_to_zero() {
        let record = BestRecord::load(MemoryStore::new());
        assert_eq!(record.best(), 0);
    }

    #[test]
    fn test_loads_existing() {
        let record = BestRecord::load(MemoryStore::with_value(BEST_DISTANCE_KEY, 812));
        assert_eq!(record.best(), 812);
    }

    #[test]
    fn test_negative_is_ignored() {
        let record = BestRecord::load(MemoryStore::with_value(BEST_DISTANCE_KEY, -5));
        assert_eq!(record.best(), 0);
    }

    #[test]
    fn test_submit_is_monotonic() {
        let mut record = BestRecord::load(MemoryStore::with_value(BEST_DISTANCE_KEY, 100));
        assert!(!record.submit(50));
        assert!(!record.submit(100));
        assert_eq!(record.store().writes, 0);

        assert!(record.submit(150));
        assert_eq!(record.best(), 150);
        assert_eq!(record.store().get(BEST_DISTANCE_KEY), Some(150));
        assert!(!record.submit(120));
        assert_eq!(record.best(), 150);
    }
}
