//! Bounded append-only log

use std::collections::VecDeque;

use serde::Serialize;

/// Keeps the newest `capacity` entries; older ones are dropped on push.
#[derive(Debug, Clone)]
pub struct RingLog<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> RingLog<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: T) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&T> {
        self.entries.back()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: Serialize> Serialize for RingLog<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_exceeds_capacity() {
        let mut log = RingLog::with_capacity(3);
        for i in 0..10 {
            log.push(i);
            assert!(log.len() <= 3);
        }
        assert_eq!(log.iter().copied().collect::<Vec<_>>(), vec![7, 8, 9]);
        assert_eq!(log.latest(), Some(&9));
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let mut log = RingLog::with_capacity(0);
        log.push("dropped");
        assert!(log.is_empty());
    }
}
