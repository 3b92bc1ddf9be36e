// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The pattern registry: register `(pattern, value)` pairs, then resolve
//! query strings to the values whose patterns match.
//!
//! ```
//! use pathmatch::{RegexLookup, Strategy};
//!
//! let mut lookup = RegexLookup::new(Strategy::Tree);
//! lookup.add(r"^a/b/c$", "exact").unwrap();
//! lookup.add(r"^a/b/(.*)$", "any").unwrap();
//! assert_eq!(lookup.get("a/b/c"), Some(&"exact"));
//! assert_eq!(lookup.get("a/b/d"), Some(&"any"));
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};
use crate::finder::{Context, Finder, FinderOptions, Mismatch, RegexFinder};
use crate::source::{Line, RuleFile};
use crate::store::{Entry, Hit, MatchStore, Strategy};
use crate::transform::PatternTransform;
use crate::variables::VariableReplacer;

/// Combines a duplicate registration into the stored value.
pub type Merger<T> = Box<dyn Fn(&mut T, T) + Send + Sync>;

/// Pattern-to-value registry over a pluggable store.
pub struct RegexLookup<T> {
    store: Box<dyn MatchStore<T>>,
    variables: VariableReplacer,
    transform: PatternTransform,
    options: FinderOptions,
    merger: Option<Merger<T>>,
    allow_empty: bool,
}

impl<T: fmt::Debug + Send + Sync + 'static> RegexLookup<T> {
    pub fn new(strategy: Strategy) -> Self {
        Self::with_options(strategy, FinderOptions::default())
    }

    /// Create a lookup whose patterns compile with `options`.
    pub fn with_options(strategy: Strategy, options: FinderOptions) -> Self {
        Self {
            store: strategy.build(options),
            variables: VariableReplacer::new(),
            transform: PatternTransform::Plain,
            options,
            merger: None,
            allow_empty: false,
        }
    }

    pub fn set_transform(&mut self, transform: PatternTransform) -> &mut Self {
        self.transform = transform;
        self
    }

    /// Merge duplicates with `merge(&mut old, new)` instead of failing.
    pub fn set_merger(&mut self, merge: impl Fn(&mut T, T) + Send + Sync + 'static) -> &mut Self {
        self.merger = Some(Box::new(merge));
        self
    }

    /// Accept blank value text in [`add_text`](Self::add_text).
    pub fn set_allow_empty(&mut self, allow: bool) -> &mut Self {
        self.allow_empty = allow;
        self
    }

    pub fn add_variable(&mut self, name: &str, value: &str) -> Result<&mut Self> {
        self.variables.add(name, value)?;
        Ok(self)
    }

    pub fn variables(&self) -> &VariableReplacer {
        &self.variables
    }

    pub fn strategy(&self) -> Strategy {
        self.store.strategy()
    }

    /// Register a textual pattern.
    ///
    /// `%name` references are substituted, the pattern transform is
    /// applied, and the result is compiled with this lookup's options.
    pub fn add(&mut self, pattern: &str, value: T) -> Result<&mut Self> {
        let resolved = self.variables.resolve(pattern)?;
        let source = self.transform.apply(&resolved);
        let finder = RegexFinder::with_options(&source, self.options)?;
        self.add_finder(Box::new(finder), value)
    }

    /// Register a pre-built finder.
    ///
    /// A pattern already present is merged when a merger is set and
    /// rejected otherwise. A merge keeps the original rank.
    pub fn add_finder(&mut self, finder: Box<dyn Finder>, value: T) -> Result<&mut Self> {
        if let Some(old) = self.store.get_exact_mut(finder.pattern()) {
            let Some(merge) = &self.merger else {
                return Err(Error::DuplicatePattern {
                    pattern: finder.pattern().to_string(),
                    old: format!("{old:?}"),
                    new: format!("{value:?}"),
                });
            };
            tracing::debug!("merging duplicate pattern {}", finder.pattern());
            merge(old, value);
            return Ok(self);
        }
        self.store.put(finder, value);
        Ok(self)
    }

    /// Register a pattern whose value arrives as text.
    ///
    /// Blank text stands for "no value" and is rejected unless
    /// [`set_allow_empty`](Self::set_allow_empty) is on.
    pub fn add_text<F>(&mut self, pattern: &str, value_text: &str, parse: F) -> Result<&mut Self>
    where
        F: FnOnce(&str) -> Result<T>,
    {
        if value_text.trim().is_empty() && !self.allow_empty {
            return Err(Error::EmptyValue {
                pattern: pattern.to_string(),
            });
        }
        let value = parse(value_text)?;
        self.add(pattern, value)
    }

    /// Register every line of a parsed rule file, in order.
    pub fn load(&mut self, file: &RuleFile, mut parse: impl FnMut(&str) -> Result<T>) -> Result<()> {
        for numbered in &file.lines {
            let added = match &numbered.content {
                Line::Variable { name, value } => self.add_variable(name, value).map(drop),
                Line::Rule { pattern, value } => self.add_text(pattern, value, &mut parse).map(drop),
            };
            added.map_err(|err| Error::Parse {
                path: file.path.clone(),
                line: numbered.line,
                message: err.to_string(),
            })?;
        }
        tracing::debug!("loaded {} patterns from {}", self.len(), file.path.display());
        Ok(())
    }

    /// Parse rule text and register it.
    pub fn load_str(
        &mut self,
        content: &str,
        path: &Path,
        parse: impl FnMut(&str) -> Result<T>,
    ) -> Result<()> {
        let file = RuleFile::parse(content, path)?;
        self.load(&file, parse)
    }

    /// Read a rule file and register it.
    pub fn load_file(&mut self, path: &Path, parse: impl FnMut(&str) -> Result<T>) -> Result<()> {
        let file = RuleFile::load(path)?;
        self.load(&file, parse)
    }

    /// Value of the lowest-ranked matching pattern.
    pub fn get(&self, text: &str) -> Option<&T> {
        self.store.first(text, None).map(|hit| hit.value)
    }

    /// Lowest-ranked hit, with its finder and captures.
    pub fn get_with(&self, text: &str, ctx: Context<'_>) -> Option<Hit<'_, T>> {
        let hit = self.store.first(text, ctx);
        tracing::trace!(text, found = hit.is_some(), "get");
        hit
    }

    /// As [`get_with`](Self::get_with), reporting every pattern's fail
    /// point on a miss.
    pub fn get_or_diagnose(
        &self,
        text: &str,
        ctx: Context<'_>,
    ) -> std::result::Result<Hit<'_, T>, Vec<Mismatch>> {
        self.get_with(text, ctx).ok_or_else(|| self.diagnose(text))
    }

    /// Every hit in rank order.
    pub fn get_all(&self, text: &str, ctx: Context<'_>) -> Vec<Hit<'_, T>> {
        self.store.get_all(text, ctx)
    }

    pub fn get_all_or_diagnose(
        &self,
        text: &str,
        ctx: Context<'_>,
    ) -> std::result::Result<Vec<Hit<'_, T>>, Vec<Mismatch>> {
        let hits = self.get_all(text, ctx);
        if hits.is_empty() {
            Err(self.diagnose(text))
        } else {
            Ok(hits)
        }
    }

    /// Fail point of every registered pattern against `text`.
    pub fn diagnose(&self, text: &str) -> Vec<Mismatch> {
        self.store
            .entries()
            .iter()
            .map(|entry| Mismatch::diagnose(entry.finder, text))
            .collect()
    }

    /// Registered patterns whose text is not in `matched`, in
    /// registration order.
    pub fn unmatched_patterns(&self, matched: &HashSet<String>) -> Vec<Entry<'_, T>> {
        self.store
            .entries()
            .into_iter()
            .filter(|entry| !matched.contains(entry.finder.pattern()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// All entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = Entry<'_, T>> {
        self.store.entries().into_iter()
    }

    /// Rendering of the underlying store's structure.
    pub fn dump(&self) -> String {
        self.store.dump()
    }
}

impl<T: fmt::Debug + Send + Sync + 'static> Default for RegexLookup<T> {
    fn default() -> Self {
        Self::new(Strategy::default())
    }
}

impl<T> fmt::Debug for RegexLookup<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegexLookup")
            .field("strategy", &self.store.strategy())
            .field("len", &self.store.len())
            .field("transform", &self.transform)
            .field("variables", &self.variables.len())
            .field("merger", &self.merger.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "lookup_tests.rs"]
mod tests;
