// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Regex pattern dispatch for path-like strings.
//!
//! A [`RegexLookup`] maps many regular expressions to values and answers
//! which value applies to a query such as
//! `//ldml/dates/calendars/calendar[@type="gregorian"]`. Patterns live in
//! one of three interchangeable stores (see [`Strategy`]).

pub mod cli;
pub mod color;
pub mod config;
pub mod discovery;
pub mod error;
pub mod finder;
pub mod loader;
pub mod lookup;
pub mod output;
pub mod resolution;
pub mod source;
pub mod starrer;
pub mod store;
pub mod transform;
pub mod variables;

pub use error::{Error, ExitCode, Result};
pub use finder::{Context, Finder, FinderOptions, MatchInfo, Mismatch, RegexFinder};
pub use lookup::{Merger, RegexLookup};
pub use starrer::{skeleton, skeleton_query};
pub use store::{Entry, Hit, LinearStore, MatchStore, Rank, StarStore, Strategy, TreeStore};
pub use transform::PatternTransform;
pub use variables::VariableReplacer;
