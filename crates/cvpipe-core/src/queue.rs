//! Lock-free work distribution across parallel workers

use std::sync::atomic::{AtomicUsize, Ordering};

/// Shared cursor over an immutable slice of work.
///
/// Workers call [`claim()`](WorkQueue::claim) to atomically take the next
/// unprocessed entry. Once `claim` returns `None` the batch is drained.
pub struct WorkQueue<'a, T> {
    entries: &'a [T],
    cursor: AtomicUsize,
}

impl<'a, T> WorkQueue<'a, T> {
    pub fn new(entries: &'a [T]) -> Self {
        Self {
            entries,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Atomically claim the next entry, or `None` when drained.
    pub fn claim(&self) -> Option<&'a T> {
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.entries.get(i)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_in_order() {
        let entries = [10, 20, 30];
        let q = WorkQueue::new(&entries);
        assert_eq!(q.len(), 3);
        assert_eq!(q.claim(), Some(&10));
        assert_eq!(q.claim(), Some(&20));
        assert_eq!(q.claim(), Some(&30));
        assert_eq!(q.claim(), None);
    }

    #[test]
    fn empty_queue() {
        let entries: [i32; 0] = [];
        let q = WorkQueue::new(&entries);
        assert!(q.is_empty());
        assert_eq!(q.claim(), None);
    }

    #[test]
    fn no_entry_claimed_twice() {
        use std::collections::HashSet;
        use std::sync::Mutex;

        let entries: Vec<usize> = (0..1000).collect();
        let q = WorkQueue::new(&entries);
        let seen = Mutex::new(HashSet::new());

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    while let Some(&v) = q.claim() {
                        assert!(seen.lock().unwrap().insert(v), "duplicate claim: {v}");
                    }
                });
            }
        });

        assert_eq!(seen.lock().unwrap().len(), 1000);
    }
}
