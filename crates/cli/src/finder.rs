// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Compiled pattern finders.
//!
//! A finder owns one compiled pattern and is identified by its pattern
//! text: two finders built independently from the same text compare and
//! hash equal. Match results are returned by value, so a finder carries
//! no per-call cursor and can be shared across threads.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use regex::{Captures, Regex, RegexBuilder};
use regex_automata::hybrid::dfa::DFA;
use regex_automata::nfa::thompson;
use regex_automata::util::syntax;
use regex_automata::{Anchored, Input};
use serde::Serialize;

use crate::error::{Error, Result};

/// Caller-defined state passed through to every finder call.
pub type Context<'a> = Option<&'a dyn Any>;

/// Capture groups of a successful match.
///
/// Index 0 is the whole match. Groups that did not participate are
/// `None`, never an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchInfo {
    groups: Vec<Option<String>>,
}

impl MatchInfo {
    pub fn new(groups: Vec<Option<String>>) -> Self {
        Self { groups }
    }

    fn from_captures(caps: &Captures<'_>) -> Self {
        let groups = caps
            .iter()
            .map(|m| m.map(|m| m.as_str().to_string()))
            .collect();
        Self { groups }
    }

    /// Number of groups, including group 0.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Text of group `index`, if it participated in the match.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.groups.get(index).and_then(|g| g.as_deref())
    }

    /// The whole match (group 0).
    pub fn whole(&self) -> &str {
        self.get(0).unwrap_or("")
    }

    pub fn groups(&self) -> &[Option<String>] {
        &self.groups
    }

    /// Substitute `$0`..`$9` in `template` with captured groups.
    ///
    /// Non-participating groups expand to nothing. A `$` not followed by
    /// a digit is kept as is.
    pub fn expand(&self, template: &str) -> Result<String> {
        let mut out = String::with_capacity(template.len());
        let mut chars = template.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '$' {
                out.push(c);
                continue;
            }
            let Some(index) = chars.peek().and_then(|d| d.to_digit(10)) else {
                out.push('$');
                continue;
            };
            chars.next();
            let index = index as usize;
            if index >= self.groups.len() {
                return Err(Error::MissingCapture {
                    template: template.to_string(),
                    index,
                    available: self.groups.len(),
                });
            }
            out.push_str(self.get(index).unwrap_or(""));
        }
        Ok(out)
    }
}

/// A compiled pattern with search, full-match and diagnostic operations.
pub trait Finder: fmt::Debug + Send + Sync {
    /// Pattern text; doubles as the finder's identity.
    fn pattern(&self) -> &str;

    /// Unanchored search. Succeeds if the pattern occurs anywhere in
    /// `text` consistent with its own anchors.
    fn find(&self, text: &str, ctx: Context<'_>) -> Option<MatchInfo>;

    /// Succeeds only if the pattern matches all of `text`.
    fn matches(&self, text: &str, ctx: Context<'_>) -> Option<MatchInfo>;

    /// Byte offset where the pattern first diverges from `text`.
    ///
    /// Diagnostic only. `None` when no meaningful offset can be computed.
    fn fail_point(&self, _text: &str) -> Option<usize> {
        None
    }
}

impl PartialEq for dyn Finder {
    fn eq(&self, other: &Self) -> bool {
        self.pattern() == other.pattern()
    }
}

impl Eq for dyn Finder {}

impl Hash for dyn Finder {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pattern().hash(state);
    }
}

impl fmt::Display for dyn Finder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern())
    }
}

/// Flags applied when compiling a [`RegexFinder`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FinderOptions {
    /// Ignore whitespace and allow `#` comments in patterns.
    pub ignore_whitespace: bool,
    pub case_insensitive: bool,
}

/// Finder backed by the `regex` crate.
#[derive(Clone)]
pub struct RegexFinder {
    pattern: String,
    options: FinderOptions,
    regex: Regex,
    /// Whole-text variant, compiled on first `matches` call.
    full: OnceLock<Option<Regex>>,
    /// Lazy DFA for fail points, built on first `fail_point` call.
    diagnostic: OnceLock<Option<DFA>>,
}

/// Upper bound on the NFA behind a fail-point DFA.
const FAIL_POINT_NFA_LIMIT: usize = 1 << 20;

/// Transition cache of a fail-point DFA, per call.
const FAIL_POINT_CACHE_CAPACITY: usize = 1 << 20;

impl RegexFinder {
    /// Compile with default options.
    pub fn new(pattern: &str) -> Result<Self> {
        Self::with_options(pattern, FinderOptions::default())
    }

    pub fn with_options(pattern: &str, options: FinderOptions) -> Result<Self> {
        let regex = build_regex(pattern, options)?;
        Ok(Self {
            pattern: pattern.to_string(),
            options,
            regex,
            full: OnceLock::new(),
            diagnostic: OnceLock::new(),
        })
    }

    pub fn options(&self) -> FinderOptions {
        self.options
    }

    fn full_regex(&self) -> Option<&Regex> {
        self.full
            .get_or_init(|| {
                // A trailing newline closes any `#` comment in verbose mode.
                let wrapped = if self.options.ignore_whitespace {
                    format!(r"\A(?:{}{})\z", self.pattern, '\n')
                } else {
                    format!(r"\A(?:{})\z", self.pattern)
                };
                build_regex(&wrapped, self.options).ok()
            })
            .as_ref()
    }

    /// `None` when the pattern is too large for the size limits.
    fn fail_point_dfa(&self) -> Option<&DFA> {
        self.diagnostic
            .get_or_init(|| {
                let syntax = syntax::Config::new()
                    .ignore_whitespace(self.options.ignore_whitespace)
                    .case_insensitive(self.options.case_insensitive);
                let nfa = thompson::Config::new().nfa_size_limit(Some(FAIL_POINT_NFA_LIMIT));
                let config = DFA::config()
                    .cache_capacity(FAIL_POINT_CACHE_CAPACITY)
                    .unicode_word_boundary(true);
                DFA::builder()
                    .syntax(syntax)
                    .thompson(nfa)
                    .configure(config)
                    .build(&self.pattern)
                    .map_err(|e| tracing::debug!("no fail-point DFA for {}: {}", self.pattern, e))
                    .ok()
            })
            .as_ref()
    }
}

fn build_regex(pattern: &str, options: FinderOptions) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .ignore_whitespace(options.ignore_whitespace)
        .case_insensitive(options.case_insensitive)
        .build()
        .map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

impl Finder for RegexFinder {
    fn pattern(&self) -> &str {
        &self.pattern
    }

    fn find(&self, text: &str, _ctx: Context<'_>) -> Option<MatchInfo> {
        self.regex
            .captures(text)
            .map(|caps| MatchInfo::from_captures(&caps))
    }

    fn matches(&self, text: &str, _ctx: Context<'_>) -> Option<MatchInfo> {
        match self.full_regex() {
            // `(?:...)` does not capture, so group numbers line up.
            Some(full) => full
                .captures(text)
                .map(|caps| MatchInfo::from_captures(&caps)),
            None => self
                .regex
                .captures(text)
                .filter(|caps| caps.get(0).is_some_and(|m| m.range() == (0..text.len())))
                .map(|caps| MatchInfo::from_captures(&caps)),
        }
    }

    fn fail_point(&self, text: &str) -> Option<usize> {
        let dfa = self.fail_point_dfa()?;
        let mut cache = dfa.create_cache();

        let input = Input::new(text).anchored(Anchored::Yes);
        let mut state = dfa.start_state_forward(&mut cache, &input).ok()?;
        for (offset, &byte) in text.as_bytes().iter().enumerate() {
            state = dfa.next_state(&mut cache, state, byte).ok()?;
            if state.is_quit() {
                return None;
            }
            if state.is_dead() {
                return Some(char_floor(text, offset));
            }
        }
        Some(text.len())
    }
}

/// Largest char boundary at or below `offset`.
fn char_floor(text: &str, mut offset: usize) -> usize {
    while offset > 0 && !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

impl fmt::Debug for RegexFinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RegexFinder").field(&self.pattern).finish()
    }
}

impl fmt::Display for RegexFinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl PartialEq for RegexFinder {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for RegexFinder {}

impl Hash for RegexFinder {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pattern.hash(state);
    }
}

/// Report line for a pattern that did not match a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub pattern: String,
    /// Byte offset into the query, when one could be computed.
    pub offset: Option<usize>,
    /// Query text with `☹` inserted at the offset.
    pub marked: String,
}

impl Mismatch {
    /// Diagnose why `finder` did not match `text`.
    pub fn diagnose(finder: &dyn Finder, text: &str) -> Self {
        let offset = finder.fail_point(text).filter(|&o| text.is_char_boundary(o));
        let marked = match offset {
            Some(o) => format!("{}☹{}", &text[..o], &text[o..]),
            None => text.to_string(),
        };
        Self {
            pattern: finder.pattern().to_string(),
            offset,
            marked,
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.marked, self.pattern)
    }
}

#[cfg(test)]
#[path = "finder_tests.rs"]
mod tests;
