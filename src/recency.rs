use std::collections::VecDeque;

use crate::models::SearchTerm;

/// How many recent terms are kept for the quick-access buttons.
pub const RECENT_TERMS_CAPACITY: usize = 5;

/// Bounded, de-duplicated list of recently searched terms, oldest first.
#[derive(Debug, Clone)]
pub struct RecencyTracker {
    terms: VecDeque<SearchTerm>,
    capacity: usize,
}

impl RecencyTracker {
    pub fn new() -> Self {
        Self::with_capacity(RECENT_TERMS_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            terms: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Records `term`. A term already tracked keeps its position.
    /// Returns the tracked terms, oldest first.
    pub fn record(&mut self, term: SearchTerm) -> &[SearchTerm] {
        if !self.contains(&term) {
            self.terms.push_back(term);
            while self.terms.len() > self.capacity {
                self.evict_oldest();
            }
        }
        self.terms.make_contiguous()
    }

    /// Drops the least recently recorded term, if any.
    pub fn evict_oldest(&mut self) -> Option<SearchTerm> {
        let evicted = self.terms.pop_front();
        if let Some(term) = &evicted {
            tracing::debug!(term = %term, "evicted from recent terms");
        }
        evicted
    }

    pub fn contains(&self, term: &SearchTerm) -> bool {
        self.terms.iter().any(|t| t == term)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SearchTerm> {
        self.terms.iter()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Default for RecencyTracker {
    fn default() -> Self {
        Self::new()
    }
}
