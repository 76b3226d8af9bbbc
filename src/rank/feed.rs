//! Accumulated feed state and the stagnation heuristic
//!
//! `ResultFeed` keeps every entry href in first-seen order with exact-string
//! dedup; rank is positional, so feed order is the one thing that must never
//! be disturbed. `StagnationGauge` watches the trailing window of each fresh
//! read and counts consecutive identical windows as the "nothing new is
//! loading" signal.

use std::collections::HashSet;

/// Order-preserving, deduplicated accumulation of result entry hrefs
#[derive(Debug, Default)]
pub struct ResultFeed {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl ResultFeed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a freshly-read batch, keeping first-appearance order
    pub fn extend(&mut self, batch: &[String]) {
        for href in batch {
            if self.seen.insert(href.clone()) {
                self.order.push(href.clone());
            }
        }
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Consecutive-identical-trailing-window counter
///
/// The fingerprint covers only the last `window` entries of each fresh read,
/// not the accumulated feed: a cheap proxy for "no new items rendered" that
/// tolerates the feed re-serving everything above the fold every cycle.
#[derive(Debug)]
pub struct StagnationGauge {
    window: usize,
    limit: u32,
    streak: u32,
    fingerprint: String,
}

impl StagnationGauge {
    #[must_use]
    pub fn new(window: usize, limit: u32) -> Self {
        Self {
            window,
            limit,
            streak: 0,
            fingerprint: String::new(),
        }
    }

    /// Feed one read cycle's batch into the gauge
    ///
    /// Returns true when the trailing window repeated the previous cycle's.
    pub fn observe(&mut self, batch: &[String]) -> bool {
        let tail_start = batch.len().saturating_sub(self.window);
        let tail = batch[tail_start..].join(",");
        if tail == self.fingerprint {
            self.streak += 1;
            true
        } else {
            self.streak = 1;
            self.fingerprint = tail;
            false
        }
    }

    /// Whether the streak has hit the terminal limit
    #[must_use]
    pub fn exhausted(&self) -> bool {
        self.streak >= self.limit
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }
}
