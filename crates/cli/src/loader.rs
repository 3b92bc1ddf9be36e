// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Builds a lookup from config and rule files, and reads query paths.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::config;
use crate::discovery;
use crate::error::{Error, Result};
use crate::lookup::RegexLookup;
use crate::store::Strategy;

/// Discover the config, then load `rules` in order into one lookup.
pub fn load_lookup(
    config_path: Option<&Path>,
    cwd: &Path,
    rules: &[PathBuf],
    strategy: Option<Strategy>,
) -> Result<RegexLookup<String>> {
    let resolved = discovery::resolve_config(config_path, cwd)?;
    let config = config::load_or_default(resolved.as_deref())?;

    let mut lookup = config.new_lookup(strategy)?;
    for path in rules {
        lookup.load_file(path, |text| Ok(text.to_string()))?;
    }
    tracing::debug!(
        "{} patterns loaded with {} strategy",
        lookup.len(),
        lookup.strategy()
    );
    Ok(lookup)
}

/// Query paths from the command line, or one per line from `stdin`.
///
/// Blank lines are skipped.
pub fn read_queries(args: &[String], stdin: impl BufRead) -> Result<Vec<String>> {
    if !args.is_empty() {
        return Ok(args.to_vec());
    }
    let mut queries = Vec::new();
    for line in stdin.lines() {
        let line = line.map_err(|source| Error::Io {
            path: PathBuf::from("<stdin>"),
            source,
        })?;
        let line = line.trim_end_matches('\r');
        if !line.trim().is_empty() {
            queries.push(line.to_string());
        }
    }
    Ok(queries)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
