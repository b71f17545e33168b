//! Memoization table for resolver results.
//!
//! Backtracking makes the same sub-sequence come up over and over; each
//! resolver instance owns one of these tables so every sub-sequence is
//! resolved at most once per resolver. Keys compare by sequence content, so
//! identical sub-sequences from different parse attempts share an entry.
//! There is no eviction: token sequences are immutable, cached results stay
//! valid, and the number of distinct sub-sequences is bounded by the input
//! length. The table lives exactly as long as its owning resolver.

use core::cell::RefCell;
use std::collections::HashMap;

use crate::token::TokenSeq;

pub struct ResolverCache<T> {
    entries: RefCell<HashMap<TokenSeq, T>>,
}

impl<T: Clone> ResolverCache<T> {
    pub fn new() -> Self {
        ResolverCache {
            entries: RefCell::new(HashMap::new()),
        }
    }

    pub fn get(&self, seq: &TokenSeq) -> Option<T> {
        self.entries.borrow().get(seq).cloned()
    }

    pub fn contains(&self, seq: &TokenSeq) -> bool {
        self.entries.borrow().contains_key(seq)
    }

    /// Store `value` under `seq` and hand it back for chaining.
    pub fn put(&self, seq: TokenSeq, value: T) -> T {
        self.entries.borrow_mut().insert(seq, value.clone());
        value
    }
}

impl<T: Clone> Default for ResolverCache<T> {
    fn default() -> Self {
        ResolverCache::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Token, TokenKind};

    #[test]
    fn test_put_then_get_by_equal_key() {
        let cache = ResolverCache::new();
        let a = TokenSeq::new(vec![Token::new(TokenKind::Number, "7")]);
        let b = TokenSeq::new(vec![Token::new(TokenKind::Number, "7")]);

        assert_eq!(cache.get(&a), None);
        assert_eq!(cache.put(a, 42), 42);
        // A structurally equal key from a different buffer hits the entry.
        assert_eq!(cache.get(&b), Some(42));
        assert!(cache.contains(&b));
    }
}
