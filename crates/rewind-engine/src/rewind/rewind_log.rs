use std::collections::VecDeque;

use super::record::UndoRecord;

/// LIFO stack of pending undo records.
///
/// The back of the deque is the top of the stack. An optional capacity bounds
/// memory for long sessions: pushing past it discards the oldest record
/// (bottom of the stack) without running it.
#[derive(Debug, Default)]
pub struct RewindLog {
    records: VecDeque<UndoRecord>,
    capacity: Option<usize>,
}

impl RewindLog {
    /// Creates an unbounded log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a log holding at most `capacity` records.
    pub fn bounded(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    #[inline]
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Pushes a record on top. Returns the evicted bottom record when the log
    /// was full.
    pub fn push(&mut self, record: UndoRecord) -> Option<UndoRecord> {
        debug_assert!(
            self.peek_timestamp().is_none_or(|top| top <= record.timestamp()),
            "undo records must be pushed in non-decreasing timestamp order"
        );

        self.records.push_back(record);

        match self.capacity {
            Some(cap) if self.records.len() > cap => self.records.pop_front(),
            _ => None,
        }
    }

    /// Timestamp of the most recent pending record.
    #[inline]
    pub fn peek_timestamp(&self) -> Option<f64> {
        self.records.back().map(UndoRecord::timestamp)
    }

    /// Pops the top record if it was recorded at or after `target`.
    pub fn pop_at_or_after(&mut self, target: f64) -> Option<UndoRecord> {
        match self.peek_timestamp() {
            Some(ts) if ts >= target => self.records.pop_back(),
            _ => None,
        }
    }

    pub fn pop(&mut self) -> Option<UndoRecord> {
        self.records.pop_back()
    }

    /// Drops every pending record without running it. Returns how many were
    /// discarded.
    pub fn clear(&mut self) -> usize {
        let n = self.records.len();
        self.records.clear();
        n
    }
}
