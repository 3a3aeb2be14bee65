//! Millisecond timer service for the single-threaded event loop.
//!
//! Each key owns at most one slot: scheduling a key that is already pending
//! replaces the old entry, which keeps "cancel before reschedule" structural
//! rather than a convention callers have to remember.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    /// Start of the current period: when the entry was scheduled, or when a
    /// repeating entry last fired.
    armed_at: u64,
    due: u64,
    seq: u64,
    period: Option<u64>,
}

/// Pending timers ordered by due time, then by scheduling order.
#[derive(Debug)]
pub struct TimerQueue<K> {
    slots: HashMap<K, Slot>,
    order: BTreeMap<(u64, u64), K>,
    next_seq: u64,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
            order: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl<K: Copy + Eq + Hash> TimerQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms `key` to fire once, `after_ms` from `now`.
    pub fn schedule_once(&mut self, key: K, now: u64, after_ms: u64) {
        self.insert(key, now, now.saturating_add(after_ms), None);
    }

    /// Arms `key` to fire every `every_ms`, first firing one period from `now`.
    pub fn schedule_repeating(&mut self, key: K, now: u64, every_ms: u64) {
        let period = every_ms.max(1);
        self.insert(key, now, now.saturating_add(period), Some(period));
    }

    /// Drops the pending entry for `key`. Returns whether one existed.
    pub fn cancel(&mut self, key: K) -> bool {
        match self.slots.remove(&key) {
            Some(slot) => {
                self.order.remove(&(slot.due, slot.seq));
                true
            }
            None => false,
        }
    }

    /// Drops every pending entry matching `predicate`.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&K) -> bool) -> usize {
        let doomed: Vec<K> = self.slots.keys().filter(|k| predicate(k)).copied().collect();
        for key in &doomed {
            self.cancel(*key);
        }
        doomed.len()
    }

    pub fn is_pending(&self, key: K) -> bool {
        self.slots.contains_key(&key)
    }

    pub fn due_at(&self, key: K) -> Option<u64> {
        self.slots.get(&key).map(|slot| slot.due)
    }

    /// When the pending period of `key` began.
    pub fn armed_at(&self, key: K) -> Option<u64> {
        self.slots.get(&key).map(|slot| slot.armed_at)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Earliest due time of any pending entry.
    pub fn next_due(&self) -> Option<u64> {
        self.order.keys().next().map(|&(due, _)| due)
    }

    /// Removes and returns the earliest entry due at or before `now`,
    /// together with the time it was due. Repeating entries are re-armed one
    /// period after their due time.
    pub fn pop_due(&mut self, now: u64) -> Option<(K, u64)> {
        let (&(due, seq), &key) = self.order.iter().next()?;
        if due > now {
            return None;
        }
        self.order.remove(&(due, seq));
        let slot = self.slots.remove(&key);
        if let Some(period) = slot.and_then(|s| s.period) {
            self.insert(key, due, due.saturating_add(period), Some(period));
        }
        Some((key, due))
    }

    fn insert(&mut self, key: K, armed_at: u64, due: u64, period: Option<u64>) {
        self.cancel(key);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.slots.insert(key, Slot { armed_at, due, seq, period });
        self.order.insert((due, seq), key);
    }
}
