//! Whole-document byte storage with amortized growth.

use crate::error::{Error, Result};
use std::ops::Range;
use tracing::debug;

/// Growth and compaction thresholds of a document store, in bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaterMarks {
    /// Size past which inserts at the end shift consumed text out of the
    /// front of the store.
    pub high: usize,
    /// Amount of text kept when compacting.
    pub low: usize,
    /// Slack added on every growth.
    pub min: usize,
}

impl Default for WaterMarks {
    fn default() -> Self {
        Self {
            high: 1024 * 1024,
            low: 2 * 1024,
            min: 1024,
        }
    }
}

/// The document: one contiguous growable byte array.
///
/// `capacity` is the logical capacity chosen by the growth rule, which the
/// allocation is guaranteed to cover.
#[derive(Clone, Debug, Default)]
pub(crate) struct Store {
    bytes: Vec<u8>,
    capacity: usize,
}

impl Store {
    pub(crate) const fn new() -> Self {
        Self {
            bytes: Vec::new(),
            capacity: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }

    pub(crate) const fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Drop `m` bytes from the front.
    pub(crate) fn compact_front(&mut self, m: usize) {
        self.bytes.drain(..m);
    }

    /// Make room for `n` more bytes.
    ///
    /// Below the high water mark capacity roughly doubles; above it, it
    /// grows to exactly what is needed plus the minimum slack.
    pub(crate) fn reserve_for(&mut self, n: usize, water: &WaterMarks) -> Result<()> {
        let need = self.len() + n;
        if need <= self.capacity {
            return Ok(());
        }
        let mut m = need
            .saturating_mul(2)
            .min(water.high)
            .max(need)
            .saturating_add(water.min);
        if m > water.high {
            m = water.high.saturating_add(water.min).max(need);
        }
        if m <= self.capacity {
            return Ok(());
        }
        self.bytes
            .try_reserve_exact(m - self.bytes.len())
            .map_err(|source| Error::Capacity {
                requested: m,
                source,
            })?;
        debug!(from = self.capacity, to = m, "grew document store");
        self.capacity = m;
        Ok(())
    }

    /// Insert `bytes` at `at`. Room must have been reserved.
    pub(crate) fn insert(&mut self, at: usize, bytes: &[u8]) {
        self.bytes.splice(at..at, bytes.iter().copied());
    }

    pub(crate) fn remove(&mut self, range: Range<usize>) {
        self.bytes.drain(range);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_doubles_below_high_water() {
        let water = WaterMarks::default();
        let mut store = Store::new();
        store.reserve_for(2000, &water).unwrap();
        assert_eq!(store.capacity(), 5024);
        store.insert(0, &[b'a'; 2000]);
        store.reserve_for(10, &water).unwrap();
        assert_eq!(store.capacity(), 5024);
        store.reserve_for(3100, &water).unwrap();
        assert_eq!(store.capacity(), 11224);
    }

    #[test]
    fn test_growth_above_high_water_is_exact() {
        let water = WaterMarks {
            high: 100,
            low: 20,
            min: 10,
        };
        let mut store = Store::new();
        store.reserve_for(60, &water).unwrap();
        assert_eq!(store.capacity(), 110);
        store.insert(0, &[0; 60]);
        store.reserve_for(90, &water).unwrap();
        assert_eq!(store.capacity(), 150);
    }

    #[test]
    fn test_allocation_covers_capacity() {
        let mut store = Store::new();
        store.reserve_for(7, &WaterMarks::default()).unwrap();
        assert!(store.bytes.capacity() >= store.capacity());
    }

    #[test]
    fn test_capacity_error_on_impossible_growth() {
        let water = WaterMarks {
            high: usize::MAX / 4,
            low: 0,
            min: 0,
        };
        let mut store = Store::new();
        let err = store.reserve_for(usize::MAX / 8, &water).unwrap_err();
        assert!(matches!(err, Error::Capacity { .. }));
        assert_eq!(store.capacity(), 0);
    }

    #[test]
    fn test_compact_and_remove() {
        let mut store = Store::new();
        store.reserve_for(6, &WaterMarks::default()).unwrap();
        store.insert(0, b"abcdef");
        store.compact_front(2);
        assert_eq!(store.bytes(), b"cdef");
        store.remove(1..3);
        assert_eq!(store.bytes(), b"cf");
    }
}
