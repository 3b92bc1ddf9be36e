// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Insertion-ordered list scanned on every query.
//!
//! The fallback strategy: any regex works, at O(n) per query.

use std::collections::HashMap;

use super::{Entry, Hit, MatchStore, Rank, Slot, Strategy};
use crate::finder::{Context, Finder};

#[derive(Debug)]
pub struct LinearStore<T> {
    slots: Vec<Slot<T>>,
    /// Pattern text -> position in `slots`.
    index: HashMap<String, usize>,
    next_rank: Rank,
}

impl<T> LinearStore<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
            next_rank: 0,
        }
    }
}

impl<T> Default for LinearStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync> MatchStore<T> for LinearStore<T> {
    fn put(&mut self, finder: Box<dyn Finder>, value: T) {
        if let Some(&pos) = self.index.get(finder.pattern()) {
            self.slots[pos].value = value;
            return;
        }
        self.index.insert(finder.pattern().to_string(), self.slots.len());
        self.slots.push(Slot {
            finder,
            value,
            rank: self.next_rank,
        });
        self.next_rank += 1;
    }

    fn get_exact(&self, pattern: &str) -> Option<&T> {
        let pos = *self.index.get(pattern)?;
        Some(&self.slots[pos].value)
    }

    fn get_exact_mut(&mut self, pattern: &str) -> Option<&mut T> {
        let pos = *self.index.get(pattern)?;
        Some(&mut self.slots[pos].value)
    }

    fn get_all<'a>(&'a self, text: &str, ctx: Context<'_>) -> Vec<Hit<'a, T>> {
        // Slots are already in rank order.
        self.slots
            .iter()
            .filter_map(|slot| slot.hit(text, ctx))
            .collect()
    }

    fn first<'a>(&'a self, text: &str, ctx: Context<'_>) -> Option<Hit<'a, T>> {
        self.slots.iter().find_map(|slot| slot.hit(text, ctx))
    }

    fn entries(&self) -> Vec<Entry<'_, T>> {
        self.slots.iter().map(Slot::entry).collect()
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn strategy(&self) -> Strategy {
        Strategy::Linear
    }
}

#[cfg(test)]
#[path = "linear_tests.rs"]
mod tests;
