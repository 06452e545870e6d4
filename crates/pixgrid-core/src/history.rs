//! Bounded, linear undo history.
//!
//! Entries are kept in insertion order. The first entry is pinned: once the
//! history exceeds its capacity, the oldest entry *after* the first is evicted,
//! so the initial snapshot (normally the freshly loaded image) always stays
//! reachable.
//!
//! Jumping to an entry truncates every later entry. There is no redo branch.

use std::collections::VecDeque;

use tracing::warn;

use crate::session::Operation;

/// Smallest capacity that still leaves room for one entry after the anchor.
pub const MIN_CAPACITY: usize = 2;

/// A snapshot tagged with the operation that produced it.
#[derive(Debug, Clone)]
pub struct HistoryEntry<T> {
    pub operation: Operation,
    pub snapshot: T,
}

/// Bounded history with a pinned first slot.
#[derive(Debug, Clone)]
pub struct History<T> {
    anchor: Option<HistoryEntry<T>>,
    tail: VecDeque<HistoryEntry<T>>,
    capacity: usize,
    recording: bool,
}

impl<T> History<T> {
    /// Create an empty, recording history holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            anchor: None,
            tail: VecDeque::new(),
            capacity: capacity.max(MIN_CAPACITY),
            recording: true,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Enable or disable recording. Disabling clears every entry.
    pub fn set_recording(&mut self, recording: bool) {
        if !recording {
            self.clear();
        }
        self.recording = recording;
    }

    pub fn len(&self) -> usize {
        self.anchor.iter().count() + self.tail.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchor.is_none()
    }

    pub fn clear(&mut self) {
        self.anchor = None;
        self.tail.clear();
    }

    /// Append an entry. Ignored while recording is disabled.
    ///
    /// Returns the evicted entry when the push overflowed the capacity.
    pub fn push(&mut self, operation: Operation, snapshot: T) -> Option<HistoryEntry<T>> {
        if !self.recording {
            return None;
        }

        let entry = HistoryEntry {
            operation,
            snapshot,
        };
        if self.anchor.is_none() {
            self.anchor = Some(entry);
            return None;
        }

        self.tail.push_back(entry);
        if self.len() > self.capacity {
            let evicted = self.tail.pop_front();
            if let Some(evicted) = &evicted {
                warn!(operation = %evicted.operation, "Evicted history entry");
            }
            return evicted;
        }
        None
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry<T>> {
        match index {
            0 => self.anchor.as_ref(),
            i => self.tail.get(i - 1),
        }
    }

    pub fn last(&self) -> Option<&HistoryEntry<T>> {
        self.tail.back().or(self.anchor.as_ref())
    }

    /// Keep entries `0..=index` and return the entry at `index`.
    ///
    /// Returns `None` (and changes nothing) when `index` is out of range.
    pub fn jump_to(&mut self, index: usize) -> Option<&HistoryEntry<T>> {
        if index >= self.len() {
            return None;
        }
        self.tail.truncate(index);
        self.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry<T>> {
        self.anchor.iter().chain(self.tail.iter())
    }

    /// `(index, operation)` pairs for a list view.
    pub fn labels(&self) -> Vec<(usize, Operation)> {
        self.iter()
            .enumerate()
            .map(|(i, entry)| (i, entry.operation))
            .collect()
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
