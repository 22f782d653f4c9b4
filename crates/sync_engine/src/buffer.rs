//! Per-stream candidate buffer with consume-once semantics.
//!
//! Entries live in a `Slab`, so removing a matched entry is O(1) and never
//! moves the remaining payloads. Keys are assigned in insertion order and
//! nothing is inserted after construction, so slab iteration visits entries
//! in the order they were supplied (timestamp order for loader output).

use std::fmt;

use contracts::TimestampedEntry;
use slab::Slab;

/// Nearest-candidate lookup result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Key into the buffer storage
    pub key: usize,
    /// Absolute timestamp difference to the query time
    pub delta: f64,
}

/// Set of not-yet-consumed entries of one stream
pub struct StreamBuffer<T> {
    storage: Slab<TimestampedEntry<T>>,
}

impl<T> fmt::Debug for StreamBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamBuffer")
            .field("len", &self.storage.len())
            .finish()
    }
}

impl<T> StreamBuffer<T> {
    /// Create a buffer holding `entries`
    pub fn new(entries: Vec<TimestampedEntry<T>>) -> Self {
        let mut storage = Slab::with_capacity(entries.len());
        for entry in entries {
            storage.insert(entry);
        }
        Self { storage }
    }

    /// Find the entry closest in time to `target`.
    ///
    /// Linear scan over the remaining entries. On equal distance the entry
    /// met first by the scan wins; the tie-break carries no meaning beyond
    /// being deterministic.
    #[inline]
    pub fn nearest(&self, target: f64) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        for (key, entry) in self.storage.iter() {
            let delta = entry.delta_to(target);
            match best {
                Some(b) if delta >= b.delta => {}
                _ => best = Some(Candidate { key, delta }),
            }
        }
        best
    }

    /// Borrow a remaining entry
    #[inline]
    pub fn get(&self, key: usize) -> Option<&TimestampedEntry<T>> {
        self.storage.get(key)
    }

    /// Remove and return an entry; it can never be matched again.
    #[inline]
    pub fn take(&mut self, key: usize) -> Option<TimestampedEntry<T>> {
        self.storage.try_remove(key)
    }

    /// Number of remaining entries
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Check if every entry has been consumed (or none was supplied)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}
