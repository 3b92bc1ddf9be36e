// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for lookup results.

pub mod json;
pub mod text;

/// Totals over a batch of resolved paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct Summary {
    pub matched: usize,
    pub missed: usize,
}

impl Summary {
    pub fn from_resolutions(results: &[crate::resolution::Resolution]) -> Self {
        let matched = results.iter().filter(|r| r.is_match()).count();
        Self {
            matched,
            missed: results.len() - matched,
        }
    }

    pub fn total(&self) -> usize {
        self.matched + self.missed
    }
}
