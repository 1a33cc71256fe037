//! Identifier allocation for form elements
//!
//! Two generation strategies behind one interface: sequential ids for
//! elements created directly on the canvas, generated ids for fields
//! produced by group instantiation. The strategies cannot collide:
//! sequential ids are all digits, generated ids always contain a dash.
//! The allocator additionally tracks every id it has issued or seen, so
//! an id is never handed out twice regardless of its origin.

use std::collections::HashSet;

use rand::distributions::Alphanumeric;
use rand::Rng;

const GENERATED_SUFFIX_LEN: usize = 9;

#[derive(Debug, Clone)]
pub struct IdAllocator {
    next_sequential: u64,
    issued: HashSet<String>,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self {
            next_sequential: 1,
            issued: HashSet::new(),
        }
    }

    /// Next store-assigned id: "1", "2", ... Skips values reserved from
    /// outside.
    pub fn next_sequential(&mut self) -> String {
        loop {
            let id = self.next_sequential.to_string();
            self.next_sequential += 1;
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }

    /// Next generated id: "<unix-millis>-<random suffix>". Used for fields
    /// created by group instantiation.
    pub fn next_generated(&mut self) -> String {
        loop {
            let millis = chrono::Utc::now().timestamp_millis();
            let suffix: String = rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(GENERATED_SUFFIX_LEN)
                .map(char::from)
                .collect();
            let id = format!("{}-{}", millis, suffix.to_lowercase());
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }

    /// Register an externally supplied id. Returns false when the id is
    /// already taken; the caller must then allocate a fresh one.
    pub fn reserve(&mut self, id: &str) -> bool {
        self.issued.insert(id.to_string())
    }

    pub fn is_issued(&self, id: &str) -> bool {
        self.issued.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_are_unique() {
        let mut allocator = IdAllocator::new();
        let a = allocator.next_sequential();
        let b = allocator.next_sequential();
        assert_eq!(a, "1");
        assert_eq!(b, "2");
        assert_ne!(a, b);
    }

    #[test]
    fn test_sequential_skips_reserved() {
        let mut allocator = IdAllocator::new();
        assert!(allocator.reserve("1"));
        assert!(allocator.reserve("2"));
        assert_eq!(allocator.next_sequential(), "3");
    }

    #[test]
    fn test_reserve_rejects_taken_ids() {
        let mut allocator = IdAllocator::new();
        let id = allocator.next_sequential();
        assert!(!allocator.reserve(&id));
        assert!(allocator.reserve("99"));
    }

    #[test]
    fn test_generated_ids_are_unique_and_dashed() {
        let mut allocator = IdAllocator::new();
        let mut seen = HashSet::new();
        for _ in 0..100 {
            let id = allocator.next_generated();
            assert!(id.contains('-'), "generated id must contain a dash: {}", id);
            assert!(seen.insert(id));
        }
    }

    #[test]
    fn test_strategies_never_collide() {
        let mut allocator = IdAllocator::new();
        let mut all = HashSet::new();
        for _ in 0..50 {
            assert!(all.insert(allocator.next_sequential()));
            assert!(all.insert(allocator.next_generated()));
        }
        // sequential ids are pure digits, generated ones never are
        for id in &all {
            let digits_only = id.chars().all(|c| c.is_ascii_digit());
            assert_eq!(digits_only, !id.contains('-'));
        }
    }
}
