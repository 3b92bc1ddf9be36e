// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON output formatter.
//!
//! JSON is buffered and written at the end (not streamed).

use std::io::Write;

use serde::Serialize;

use super::Summary;
use crate::resolution::{Resolution, UnmatchedRecord};

/// Document written by `pathmatch lookup -o json`.
#[derive(Debug, Serialize)]
struct LookupOutput<'a> {
    passed: bool,
    #[serde(flatten)]
    summary: Summary,
    results: &'a [Resolution],
}

/// Document written by `pathmatch unmatched -o json`.
#[derive(Debug, Serialize)]
struct UnmatchedOutput<'a> {
    total: usize,
    unmatched: &'a [UnmatchedRecord],
}

/// Document written by `pathmatch check -o json`.
#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub strategy: String,
    pub patterns: usize,
    pub variables: usize,
}

/// JSON output formatter.
pub struct JsonFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write all resolutions with totals.
    pub fn write_lookup(&mut self, results: &[Resolution]) -> std::io::Result<()> {
        let summary = Summary::from_resolutions(results);
        self.write_json(&LookupOutput {
            passed: summary.missed == 0,
            summary,
            results,
        })
    }

    pub fn write_unmatched(&mut self, records: &[UnmatchedRecord], total: usize) -> std::io::Result<()> {
        self.write_json(&UnmatchedOutput {
            total,
            unmatched: records,
        })
    }

    pub fn write_check(&mut self, output: &CheckOutput) -> std::io::Result<()> {
        self.write_json(output)
    }

    fn write_json<T: Serialize>(&mut self, value: &T) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{}", json)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
