//! Discrete-event queue.
//!
//! Owns the simulated clock. Entries fire in time order; entries scheduled
//! for the same instant fire in the order they were scheduled. Any pending
//! entry can be cancelled through the id returned when it was scheduled.

use std::collections::BTreeMap;
use std::time::Duration;

/// Handle of a scheduled entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventId {
    at: Duration,
    seq: u64,
}

impl EventId {
    /// Simulated time the entry fires at.
    pub fn at(&self) -> Duration {
        self.at
    }
}

#[derive(Debug, Clone)]
pub struct EventQueue<T> {
    now: Duration,
    next_seq: u64,
    pending: BTreeMap<EventId, T>,
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: BTreeMap::new(),
        }
    }

    /// Current simulated time.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn is_pending(&self, id: EventId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Schedule `payload` to fire `delay` after now.
    pub fn schedule(&mut self, delay: Duration, payload: T) -> EventId {
        let id = EventId {
            at: self.now.saturating_add(delay),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.pending.insert(id, payload);
        id
    }

    /// Remove a pending entry. Returns `None` if it already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, id: EventId) -> Option<T> {
        self.pending.remove(&id)
    }

    /// Pop the earliest entry firing strictly before `stop`, advancing the
    /// clock to its time.
    pub fn pop_before(&mut self, stop: Duration) -> Option<(EventId, T)> {
        self.pop_if(|at| at < stop)
    }

    /// Pop the earliest entry firing at or before `t`.
    pub fn pop_through(&mut self, t: Duration) -> Option<(EventId, T)> {
        self.pop_if(|at| at <= t)
    }

    fn pop_if(&mut self, due: impl Fn(Duration) -> bool) -> Option<(EventId, T)> {
        let first = *self.pending.keys().next()?;
        if !due(first.at) {
            return None;
        }
        let payload = self.pending.remove(&first)?;
        self.now = first.at;
        Some((first, payload))
    }

    /// Move the clock forward to `t` without firing anything. Never moves
    /// it backwards.
    pub fn advance_to(&mut self, t: Duration) {
        if t > self.now {
            self.now = t;
        }
    }
}
