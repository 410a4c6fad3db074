//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use std::collections::BTreeMap;

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Every touch hands out a fresh, strictly increasing recency mark. Keys are
/// ordered by mark, so:
/// - First = Least recently used
/// - Last = Most recently used
///
/// The owner stores the mark next to its entry and passes it back on the next
/// touch or removal, which keeps every operation `O(log n)`.
#[derive(Debug, Default)]
pub struct LruTracker {
    /// Keys ordered by recency mark
    order: BTreeMap<u64, String>,
    /// Next mark to hand out
    clock: u64,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as recently used and returns its new recency mark.
    ///
    /// `previous` is the mark returned by the last touch of this key, or
    /// `None` when the key is new to the tracker.
    pub fn touch(&mut self, key: &str, previous: Option<u64>) -> u64 {
        let owned = previous
            .and_then(|mark| self.order.remove(&mark))
            .unwrap_or_else(|| key.to_string());

        let mark = self.clock;
        self.clock += 1;
        self.order.insert(mark, owned);
        mark
    }

    // == Remove ==
    /// Removes the key holding `mark` from the tracker.
    pub fn remove(&mut self, mark: u64) -> Option<String> {
        self.order.remove(&mark)
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.order.pop_first().map(|(_, key)| key)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    #[cfg(test)]
    pub(crate) fn peek_oldest(&self) -> Option<&str> {
        self.order.first_key_value().map(|(_, key)| key.as_str())
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[cfg(test)]
    fn contains(&self, key: &str) -> bool {
        self.order.values().any(|k| k == key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Keeps the key -> mark bookkeeping the cache store normally does.
    #[derive(Default)]
    struct Harness {
        lru: LruTracker,
        marks: HashMap<String, u64>,
    }

    impl Harness {
        fn touch(&mut self, key: &str) {
            let previous = self.marks.get(key).copied();
            let mark = self.lru.touch(key, previous);
            self.marks.insert(key.to_string(), mark);
        }

        fn remove(&mut self, key: &str) {
            if let Some(mark) = self.marks.remove(key) {
                self.lru.remove(mark);
            }
        }

        fn evict(&mut self) -> Option<String> {
            let key = self.lru.evict_oldest()?;
            self.marks.remove(&key);
            Some(key)
        }
    }

    #[test]
    fn test_lru_new() {
        let lru = LruTracker::new();
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
    }

    #[test]
    fn test_marks_strictly_increase() {
        let mut lru = LruTracker::new();

        let a = lru.touch("a", None);
        let b = lru.touch("b", None);
        let a2 = lru.touch("a", Some(a));

        assert!(a < b);
        assert!(b < a2);
        assert_eq!(lru.len(), 2);
    }

    #[test]
    fn test_lru_touch_new_key() {
        let mut h = Harness::default();

        h.touch("key1");
        h.touch("key2");
        h.touch("key3");

        assert_eq!(h.lru.len(), 3);
        assert_eq!(h.lru.peek_oldest(), Some("key1"));
    }

    #[test]
    fn test_lru_touch_existing_key() {
        let mut h = Harness::default();

        h.touch("key1");
        h.touch("key2");
        h.touch("key3");
        h.touch("key1");

        assert_eq!(h.lru.len(), 3);
        assert_eq!(h.lru.peek_oldest(), Some("key2"));
    }

    #[test]
    fn test_lru_evict_oldest() {
        let mut h = Harness::default();

        h.touch("key1");
        h.touch("key2");
        h.touch("key3");

        assert_eq!(h.evict(), Some("key1".to_string()));
        assert_eq!(h.lru.len(), 2);

        assert_eq!(h.evict(), Some("key2".to_string()));
        assert_eq!(h.lru.len(), 1);
    }

    #[test]
    fn test_lru_evict_empty() {
        let mut lru = LruTracker::new();
        assert_eq!(lru.evict_oldest(), None);
        assert_eq!(lru.peek_oldest(), None);
    }

    #[test]
    fn test_lru_remove() {
        let mut h = Harness::default();

        h.touch("key1");
        h.touch("key2");
        h.touch("key3");

        h.remove("key2");

        assert_eq!(h.lru.len(), 2);
        assert!(!h.lru.contains("key2"));
        assert!(h.lru.contains("key1"));
        assert!(h.lru.contains("key3"));
    }

    #[test]
    fn test_lru_remove_unknown_mark() {
        let mut lru = LruTracker::new();
        lru.touch("key1", None);

        assert_eq!(lru.remove(999), None);
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_lru_order_after_multiple_touches() {
        let mut h = Harness::default();

        h.touch("a");
        h.touch("b");
        h.touch("c");

        h.touch("a");
        h.touch("c");
        h.touch("b");

        // Touch order is now a, c, b
        assert_eq!(h.evict(), Some("a".to_string()));
        assert_eq!(h.evict(), Some("c".to_string()));
        assert_eq!(h.evict(), Some("b".to_string()));
        assert!(h.lru.is_empty());
    }

    #[test]
    fn test_lru_touch_same_key_multiple_times() {
        let mut h = Harness::default();

        h.touch("key1");
        h.touch("key1");
        h.touch("key1");

        assert_eq!(h.lru.len(), 1);
        assert_eq!(h.evict(), Some("key1".to_string()));
        assert!(h.lru.is_empty());
    }
}
