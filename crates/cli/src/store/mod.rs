// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Storage strategies for registered patterns.
//!
//! Three interchangeable implementations of [`MatchStore`]:
//! - [`LinearStore`]: insertion-ordered scan, any regex
//! - [`StarStore`]: skeleton buckets, directory-plus-predicate patterns
//! - [`TreeStore`]: self-splitting prefix tree, directory patterns
//!
//! For pattern sets all three can express, queries return the same hits
//! in the same rank order.

pub mod linear;
pub mod star;
pub mod tree;

use std::fmt;

use serde::Deserialize;

use crate::finder::{Context, Finder, FinderOptions, MatchInfo};

pub use linear::LinearStore;
pub use star::StarStore;
pub use tree::TreeStore;

/// Registration order of an entry. Smallest rank wins ambiguous lookups.
pub type Rank = usize;

/// A registered `(finder, value, rank)` triple.
#[derive(Debug)]
pub struct Entry<'a, T> {
    pub finder: &'a dyn Finder,
    pub value: &'a T,
    pub rank: Rank,
}

/// An entry whose finder matched a query, with its captures.
#[derive(Debug)]
pub struct Hit<'a, T> {
    pub finder: &'a dyn Finder,
    pub value: &'a T,
    pub rank: Rank,
    pub info: MatchInfo,
}

/// Storage contract shared by every strategy.
pub trait MatchStore<T>: Send + Sync {
    /// Insert an entry, or overwrite the value of an entry with the same
    /// pattern text. Overwrites keep the original rank.
    fn put(&mut self, finder: Box<dyn Finder>, value: T);

    /// Value registered under exactly this pattern text.
    fn get_exact(&self, pattern: &str) -> Option<&T>;

    fn get_exact_mut(&mut self, pattern: &str) -> Option<&mut T>;

    /// Every entry whose finder matches `text`, in ascending rank order.
    fn get_all<'a>(&'a self, text: &str, ctx: Context<'_>) -> Vec<Hit<'a, T>>;

    /// The lowest-ranked matching entry.
    fn first<'a>(&'a self, text: &str, ctx: Context<'_>) -> Option<Hit<'a, T>> {
        self.get_all(text, ctx).into_iter().next()
    }

    /// All entries in registration order.
    fn entries(&self) -> Vec<Entry<'_, T>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn strategy(&self) -> Strategy;

    /// Human-readable rendering of the internal structure.
    fn dump(&self) -> String {
        let mut out = String::new();
        for entry in self.entries() {
            out.push_str(entry.finder.pattern());
            out.push('\n');
        }
        out
    }
}

/// Which storage strategy a lookup uses. Chosen once at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Prefix tree over directory-style patterns.
    #[default]
    Tree,
    /// Buckets keyed by path skeleton.
    Star,
    /// Ordered scan; accepts any regex.
    Linear,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Tree, Strategy::Star, Strategy::Linear];

    /// Create an empty store for this strategy.
    ///
    /// `options` are the flags leaf patterns are compiled with; the tree
    /// compiles its group patterns the same way.
    pub fn build<T: Send + Sync + 'static>(self, options: FinderOptions) -> Box<dyn MatchStore<T>> {
        match self {
            Strategy::Tree => Box::new(TreeStore::with_options(options)),
            Strategy::Star => Box::new(StarStore::new()),
            Strategy::Linear => Box::new(LinearStore::new()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Tree => "tree",
            Strategy::Star => "star",
            Strategy::Linear => "linear",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry storage shared by the list-based strategies.
#[derive(Debug)]
pub(crate) struct Slot<T> {
    pub(crate) finder: Box<dyn Finder>,
    pub(crate) value: T,
    pub(crate) rank: Rank,
}

impl<T> Slot<T> {
    pub(crate) fn entry(&self) -> Entry<'_, T> {
        Entry {
            finder: self.finder.as_ref(),
            value: &self.value,
            rank: self.rank,
        }
    }

    pub(crate) fn hit(&self, text: &str, ctx: Context<'_>) -> Option<Hit<'_, T>> {
        let info = self.finder.find(text, ctx)?;
        Some(Hit {
            finder: self.finder.as_ref(),
            value: &self.value,
            rank: self.rank,
            info,
        })
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
