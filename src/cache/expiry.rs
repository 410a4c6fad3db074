//! Expiry Queue Module
//!
//! Orders cache keys by expiration deadline so sweeps only touch entries that
//! are actually due.

use std::collections::BTreeSet;
use std::time::Instant;

// == Expiry Queue ==
/// Keys ordered by their expiration deadline, soonest first.
///
/// Pairs are unique because a key is scheduled at most once at a time; ties
/// on the deadline fall back to key order.
#[derive(Debug, Default)]
pub struct ExpiryQueue {
    queue: BTreeSet<(Instant, String)>,
}

impl ExpiryQueue {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Schedule ==
    /// Registers `key` to expire at `at`.
    pub fn schedule(&mut self, key: String, at: Instant) {
        self.queue.insert((at, key));
    }

    // == Cancel ==
    /// Drops the deadline previously scheduled for `key`.
    ///
    /// Returns false if no such deadline was registered.
    pub fn cancel(&mut self, key: &str, at: Instant) -> bool {
        self.queue.remove(&(at, key.to_owned()))
    }

    // == Reschedule ==
    /// Moves `key` from deadline `old` to deadline `new`.
    pub fn reschedule(&mut self, key: &str, old: Instant, new: Instant) {
        if old == new {
            return;
        }
        self.cancel(key, old);
        self.queue.insert((new, key.to_owned()));
    }

    // == Pop Expired ==
    /// Removes and returns the soonest-to-expire key if it is due at `now`.
    pub fn pop_expired(&mut self, now: Instant) -> Option<String> {
        match self.queue.first() {
            Some((at, _)) if *at <= now => self.queue.pop_first().map(|(_, key)| key),
            _ => None,
        }
    }

    // == Peek Earliest ==
    /// Returns the soonest deadline and its key without removing it.
    #[cfg(test)]
    pub(crate) fn peek_earliest(&self) -> Option<(Instant, &str)> {
        self.queue.first().map(|(at, key)| (*at, key.as_str()))
    }

    // == Count Expired ==
    /// Counts keys whose deadline has passed at `now`.
    pub fn count_expired(&self, now: Instant) -> usize {
        self.queue.iter().take_while(|(at, _)| *at <= now).count()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
