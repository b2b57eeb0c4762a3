//! Cooperative one-shot timers on a virtual clock
//!
//! Stands in for a host `setTimeout`: tasks are scheduled a delay into the
//! future and handed back by `pop_due` in due order. Repeating work re-arms
//! itself after each run, and a pending task can be cancelled by id.

use std::collections::{BTreeMap, HashMap};

/// Handle to a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Pending tasks ordered by (due time, scheduling order)
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    /// Current time in milliseconds
    now: u64,
    next_id: u64,
    pending: BTreeMap<(u64, TimerId), T>,
    due_by_id: HashMap<TimerId, u64>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_id: 0,
            pending: BTreeMap::new(),
            due_by_id: HashMap::new(),
        }
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    /// Run `task` `delay_ms` from now. Equal due times fire in scheduling order.
    pub fn schedule(&mut self, delay_ms: u64, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due = self.now + delay_ms;
        self.pending.insert((due, id), task);
        self.due_by_id.insert(id, due);
        id
    }

    /// Drop a pending task. Returns it if it had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let due = self.due_by_id.remove(&id)?;
        self.pending.remove(&(due, id))
    }

    /// Take the earliest task due at or before `until`, moving the clock to
    /// its due time. Returns `None` once nothing is due by `until`.
    pub fn pop_due(&mut self, until: u64) -> Option<(TimerId, T)> {
        let (&(due, id), _) = self.pending.first_key_value()?;
        if due > until {
            return None;
        }
        let task = self.pending.remove(&(due, id))?;
        self.due_by_id.remove(&id);
        self.now = self.now.max(due);
        Some((id, task))
    }

    /// Move the clock forward without running anything
    pub fn advance_to(&mut self, time: u64) {
        self.now = self.now.max(time);
    }
}
