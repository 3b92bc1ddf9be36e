// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rewrites applied to pattern text before it is compiled.

use std::borrow::Cow;
use std::fmt;

use serde::Deserialize;

/// How raw pattern text is turned into regex source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PatternTransform {
    /// Pattern text is the regex.
    #[default]
    Plain,
    /// XPath convenience: `[@` becomes `\[@` and patterns starting with
    /// `//` are anchored with `^`.
    Xpath,
    /// As `xpath`, and single quotes become double quotes.
    XpathDoubleQuote,
}

impl PatternTransform {
    pub fn apply<'a>(self, pattern: &'a str) -> Cow<'a, str> {
        match self {
            PatternTransform::Plain => Cow::Borrowed(pattern),
            PatternTransform::Xpath => Cow::Owned(xpath(pattern)),
            PatternTransform::XpathDoubleQuote => Cow::Owned(xpath(&pattern.replace('\'', "\""))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PatternTransform::Plain => "plain",
            PatternTransform::Xpath => "xpath",
            PatternTransform::XpathDoubleQuote => "xpath-double-quote",
        }
    }
}

impl fmt::Display for PatternTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn xpath(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    if pattern.starts_with("//") {
        out.push('^');
    }
    let mut escaped = false;
    for (i, c) in pattern.char_indices() {
        // Already-escaped `\[@` stays as written.
        if c == '[' && !escaped && pattern[i + 1..].starts_with('@') {
            out.push('\\');
        }
        escaped = c == '\\' && !escaped;
        out.push(c);
    }
    out
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
