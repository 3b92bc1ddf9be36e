// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rule file parsing.
//!
//! One rule per line:
//!
//! ```text
//! # comment
//! %lang=[a-z]{2,3}
//! ^//ldml/%lang/names$ ; names
//! ```
//!
//! Pattern and value are split at the first `"; "`. Lines whose first
//! non-blank character is `#` are comments; blank lines are skipped.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Separator between pattern and value.
pub const SEPARATOR: &str = "; ";

/// One meaningful line of a rule file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Variable { name: String, value: String },
    Rule { pattern: String, value: String },
}

/// A parsed line with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Numbered {
    pub line: usize,
    pub content: Line,
}

/// Parsed rule file.
#[derive(Debug, Clone)]
pub struct RuleFile {
    pub path: PathBuf,
    pub lines: Vec<Numbered>,
}

impl RuleFile {
    /// Read and parse a rule file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse rule text; `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let mut lines = Vec::new();
        for (idx, raw) in content.lines().enumerate() {
            let line = idx + 1;
            match parse_line(raw) {
                Ok(Some(content)) => lines.push(Numbered { line, content }),
                Ok(None) => {}
                Err(message) => {
                    return Err(Error::Parse {
                        path: path.to_path_buf(),
                        line,
                        message,
                    });
                }
            }
        }
        tracing::debug!("parsed {} rule lines from {}", lines.len(), path.display());
        Ok(Self {
            path: path.to_path_buf(),
            lines,
        })
    }

    pub fn rules(&self) -> impl Iterator<Item = (&str, &str)> {
        self.lines.iter().filter_map(|l| match &l.content {
            Line::Rule { pattern, value } => Some((pattern.as_str(), value.as_str())),
            Line::Variable { .. } => None,
        })
    }
}

/// Classify one line. `Ok(None)` for blank lines and comments.
pub fn parse_line(raw: &str) -> std::result::Result<Option<Line>, String> {
    let line = raw.trim_start_matches('\u{feff}').trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    if let Some((name, value)) = line.split_once('=')
        && is_definition_name(name.trim())
    {
        return Ok(Some(Line::Variable {
            name: name.trim().to_string(),
            value: value.trim().to_string(),
        }));
    }

    // Trimming eats the space of a separator followed by an empty value.
    let split = line
        .split_once(SEPARATOR)
        .or_else(|| line.strip_suffix(';').map(|pattern| (pattern, "")));
    match split {
        Some((pattern, value)) => {
            let pattern = pattern.trim();
            if pattern.is_empty() {
                return Err("empty pattern".to_string());
            }
            Ok(Some(Line::Rule {
                pattern: pattern.to_string(),
                value: value.trim().to_string(),
            }))
        }
        None => Err(format!("expected `pattern{SEPARATOR}value`, got: {line}")),
    }
}

/// `%` followed by identifier characters.
fn is_definition_name(name: &str) -> bool {
    name.strip_prefix('%').is_some_and(|rest| {
        !rest.is_empty() && rest.chars().all(|c| c.is_alphanumeric() || c == '_')
    })
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
