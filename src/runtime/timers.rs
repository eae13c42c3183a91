use std::collections::{BTreeMap, HashMap};

use crate::foundation::core::Millis;

/// Handle to a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

#[derive(Clone, Debug)]
struct Armed<E> {
    id: TimerId,
    event: E,
    repeat: Option<Millis>,
}

/// Owned registry of one-shot and repeating timers.
///
/// The registry never runs anything by itself: the owner polls [`TimerRegistry::pop_due`]
/// with the current time and handles each event before asking for the next one, so a
/// handler may schedule or cancel timers and still observe a consistent deadline order.
/// Ties on the same deadline fire in scheduling order.
#[derive(Clone, Debug)]
pub struct TimerRegistry<E> {
    queue: BTreeMap<(Millis, u64), Armed<E>>,
    index: HashMap<TimerId, (Millis, u64)>,
    next_seq: u64,
    next_id: u64,
}

impl<E> Default for TimerRegistry<E> {
    fn default() -> Self {
        Self {
            queue: BTreeMap::new(),
            index: HashMap::new(),
            next_seq: 0,
            next_id: 1,
        }
    }
}

impl<E: Clone> TimerRegistry<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `event` once at `at`.
    pub fn schedule_at(&mut self, at: Millis, event: E) -> TimerId {
        let id = self.alloc_id();
        self.arm(at, id, event, None);
        id
    }

    /// Fire `event` at `first`, then every `interval` after the previous deadline.
    ///
    /// A zero interval is bumped to 1 ms so polling always terminates.
    pub fn schedule_every(&mut self, first: Millis, interval: Millis, event: E) -> TimerId {
        let id = self.alloc_id();
        let interval = Millis(interval.0.max(1));
        self.arm(first, id, event, Some(interval));
        id
    }

    /// Cancel a timer; returns whether it was still armed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.index.remove(&id) {
            Some(key) => self.queue.remove(&key).is_some(),
            None => false,
        }
    }

    /// Cancel every armed timer; returns how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.queue.len();
        self.queue.clear();
        self.index.clear();
        n
    }

    pub fn is_armed(&self, id: TimerId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.queue.keys().next().map(|(at, _)| *at)
    }

    /// Remove and return the earliest timer due at or before `now`.
    ///
    /// Repeating timers are re-armed under the same id before returning.
    pub fn pop_due(&mut self, now: Millis) -> Option<(TimerId, Millis, E)> {
        let (&key, _) = self.queue.iter().next()?;
        if key.0 > now {
            return None;
        }
        let armed = self.queue.remove(&key)?;
        self.index.remove(&armed.id);
        let (at, _) = key;
        if let Some(interval) = armed.repeat {
            self.arm(at + interval, armed.id, armed.event.clone(), Some(interval));
        }
        Some((armed.id, at, armed.event))
    }

    fn alloc_id(&mut self) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        id
    }

    fn arm(&mut self, at: Millis, id: TimerId, event: E, repeat: Option<Millis>) {
        let key = (at, self.next_seq);
        self.next_seq += 1;
        self.queue.insert(key, Armed { id, event, repeat });
        self.index.insert(id, key);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/timers.rs"]
mod tests;
