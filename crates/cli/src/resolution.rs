// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Query results in a serializable shape for the output formatters.

use serde::Serialize;

use crate::error::Result;
use crate::finder::Mismatch;
use crate::lookup::RegexLookup;
use crate::store::{Entry, Hit, Rank};

/// What to collect for each query.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    /// Every match instead of the lowest-ranked one.
    pub all: bool,
    /// Fail points of every pattern when nothing matches.
    pub explain: bool,
}

/// One matching pattern with its capture-expanded value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    pub rank: Rank,
    pub pattern: String,
    pub value: String,
    pub groups: Vec<Option<String>>,
}

impl MatchRecord {
    /// Expand `$n` references in the hit's value with its captures.
    pub fn from_hit(hit: &Hit<'_, String>) -> Result<Self> {
        Ok(Self {
            rank: hit.rank,
            pattern: hit.finder.pattern().to_string(),
            value: hit.info.expand(hit.value)?,
            groups: hit.info.groups().to_vec(),
        })
    }
}

/// Outcome of resolving one query path.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub path: String,
    pub matches: Vec<MatchRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mismatches: Vec<Mismatch>,
}

impl Resolution {
    pub fn is_match(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// Resolve `path` against `lookup`.
pub fn resolve(
    lookup: &RegexLookup<String>,
    path: &str,
    options: ResolveOptions,
) -> Result<Resolution> {
    let hits = if options.all {
        lookup.get_all(path, None)
    } else {
        lookup.get_with(path, None).into_iter().collect()
    };
    let matches = hits
        .iter()
        .map(MatchRecord::from_hit)
        .collect::<Result<Vec<_>>>()?;
    let mismatches = if matches.is_empty() && options.explain {
        lookup.diagnose(path)
    } else {
        Vec::new()
    };
    Ok(Resolution {
        path: path.to_string(),
        matches,
        mismatches,
    })
}

/// A registered pattern no query matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedRecord {
    pub rank: Rank,
    pub pattern: String,
    pub value: String,
}

impl From<&Entry<'_, String>> for UnmatchedRecord {
    fn from(entry: &Entry<'_, String>) -> Self {
        Self {
            rank: entry.rank,
            pattern: entry.finder.pattern().to_string(),
            value: entry.value.clone(),
        }
    }
}

#[cfg(test)]
#[path = "resolution_tests.rs"]
mod tests;
