// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Buckets of candidates keyed by path skeleton.
//!
//! A query only tests the candidates whose skeleton equals its own, and
//! a query with no bucket is rejected without running any regex. This
//! requires patterns whose matching is decided by their skeleton: regex
//! constructs belong inside quoted attribute values. Alternation or
//! optional groups elsewhere can make lookups miss silently.

use std::collections::HashMap;

use super::{Entry, Hit, MatchStore, Rank, Slot, Strategy};
use crate::finder::{Context, Finder};
use crate::starrer::{skeleton, skeleton_query};

#[derive(Debug)]
pub struct StarStore<T> {
    buckets: HashMap<String, Vec<Slot<T>>>,
    len: usize,
    next_rank: Rank,
}

impl<T> StarStore<T> {
    pub fn new() -> Self {
        Self {
            buckets: HashMap::new(),
            len: 0,
            next_rank: 0,
        }
    }

    /// Number of distinct skeletons.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    fn slot(&self, pattern: &str) -> Option<&Slot<T>> {
        self.buckets
            .get(&skeleton(pattern))?
            .iter()
            .find(|slot| slot.finder.pattern() == pattern)
    }

    fn slot_mut(&mut self, pattern: &str) -> Option<&mut Slot<T>> {
        self.buckets
            .get_mut(&skeleton(pattern))?
            .iter_mut()
            .find(|slot| slot.finder.pattern() == pattern)
    }
}

impl<T> Default for StarStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync> MatchStore<T> for StarStore<T> {
    fn put(&mut self, finder: Box<dyn Finder>, value: T) {
        if let Some(slot) = self.slot_mut(finder.pattern()) {
            slot.value = value;
            return;
        }
        let key = skeleton(finder.pattern());
        tracing::trace!("bucket {} <- {}", key, finder.pattern());
        self.buckets.entry(key).or_default().push(Slot {
            finder,
            value,
            rank: self.next_rank,
        });
        self.next_rank += 1;
        self.len += 1;
    }

    fn get_exact(&self, pattern: &str) -> Option<&T> {
        self.slot(pattern).map(|slot| &slot.value)
    }

    fn get_exact_mut(&mut self, pattern: &str) -> Option<&mut T> {
        self.slot_mut(pattern).map(|slot| &mut slot.value)
    }

    fn get_all<'a>(&'a self, text: &str, ctx: Context<'_>) -> Vec<Hit<'a, T>> {
        let Some(candidates) = self.buckets.get(&skeleton_query(text)) else {
            return Vec::new();
        };
        let mut hits: Vec<_> = candidates
            .iter()
            .filter_map(|slot| slot.hit(text, ctx))
            .collect();
        hits.sort_by_key(|hit| hit.rank);
        hits
    }

    fn entries(&self) -> Vec<Entry<'_, T>> {
        let mut entries: Vec<_> = self.buckets.values().flatten().map(Slot::entry).collect();
        entries.sort_by_key(|entry| entry.rank);
        entries
    }

    fn len(&self) -> usize {
        self.len
    }

    fn strategy(&self) -> Strategy {
        Strategy::Star
    }

    fn dump(&self) -> String {
        let mut keys: Vec<_> = self.buckets.keys().collect();
        keys.sort();
        let mut out = String::new();
        for key in keys {
            out.push_str(key);
            out.push('\n');
            let mut slots: Vec<_> = self.buckets[key].iter().collect();
            slots.sort_by_key(|slot| slot.rank);
            for slot in slots {
                out.push('\t');
                out.push_str(slot.finder.pattern());
                out.push('\n');
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "star_tests.rs"]
mod tests;
