// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Path skeletons ("star patterns") used to bucket patterns.
//!
//! The skeleton of a directory-style pattern and the skeleton of any path
//! it matches are equal, provided the pattern keeps its regex constructs
//! inside quoted attribute values:
//!
//! ```text
//! ^//ldml/dates/calendar\[@type="([^"]*)"]/months   ->  //ldml/dates/calendar[@type="*"]/months
//!  //ldml/dates/calendar[@type="gregorian"]/months  ->  //ldml/dates/calendar[@type="*"]/months
//! ```
//!
//! Patterns go through [`skeleton`], which reads regex syntax. Query
//! strings are literal text and go through [`skeleton_query`].

/// Placeholder substituted for every variable position.
pub const STAR: char = '*';

/// Regex idioms for "any run of unquoted characters", longest first.
const UNQUOTED_RUNS: &[&str] = &[
    r#"([^"']++)"#,
    r#"([^"']*)"#,
    r#"([^"']+)"#,
    r#"([^"]++)"#,
    r#"([^"]*)"#,
    r#"([^"]+)"#,
    r#"[^"']*"#,
    r#"[^"']+"#,
    r#"[^"]*"#,
    r#"[^"]+"#,
];

/// Compute the skeleton of a regex pattern.
///
/// Escapes and bracket classes are honored, so a quote inside `[^"]`
/// does not end an attribute value.
pub fn skeleton(input: &str) -> String {
    let body = strip_anchors(input);
    let bytes = body.as_bytes();
    let mut out = String::with_capacity(body.len());
    let mut i = 0;

    while i < bytes.len() {
        let rest = &body[i..];

        if let Some(idiom) = UNQUOTED_RUNS.iter().find(|idiom| rest.starts_with(**idiom)) {
            out.push(STAR);
            i += idiom.len();
            continue;
        }

        match bytes[i] {
            b'\\' => {
                let Some(next) = rest[1..].chars().next() else {
                    out.push('\\');
                    i += 1;
                    continue;
                };
                // `\[` in a pattern is `[` in the text it matches.
                if !next.is_ascii_punctuation() {
                    out.push('\\');
                }
                out.push(next);
                i += 1 + next.len_utf8();
            }
            b'=' if matches!(bytes.get(i + 1), Some(b'"' | b'\'')) => {
                let quote = bytes[i + 1];
                out.push('=');
                out.push(quote as char);
                out.push(STAR);
                match quoted_end(bytes, i + 2, quote) {
                    Some(close) => {
                        out.push(quote as char);
                        i = close + 1;
                    }
                    None => i = bytes.len(),
                }
            }
            _ => {
                let Some(c) = rest.chars().next() else { break };
                out.push(c);
                i += c.len_utf8();
            }
        }
    }

    out
}

/// Compute the skeleton of a literal query string.
///
/// Nothing is unescaped and no anchors are stripped: a quoted value runs
/// to the next matching quote whatever it contains.
pub fn skeleton_query(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(eq) = rest.find('=') {
        let (head, tail) = rest.split_at(eq + 1);
        out.push_str(head);
        let Some(quote) = tail.chars().next().filter(|c| matches!(c, '"' | '\'')) else {
            rest = tail;
            continue;
        };
        out.push(quote);
        out.push(STAR);
        match tail[1..].find(quote) {
            Some(close) => {
                out.push(quote);
                rest = &tail[close + 2..];
            }
            None => rest = "",
        }
    }
    out.push_str(rest);
    out
}

/// Drop a leading `^` and a trailing unescaped `$`.
fn strip_anchors(input: &str) -> &str {
    let body = input.strip_prefix('^').unwrap_or(input);
    match body.strip_suffix('$') {
        Some(stripped) if trailing_backslashes(stripped) % 2 == 0 => stripped,
        _ => body,
    }
}

fn trailing_backslashes(s: &str) -> usize {
    s.bytes().rev().take_while(|&b| b == b'\\').count()
}

/// Index of the quote closing a value that starts at `start`.
///
/// Escapes and bracket classes (`[^"]`) are skipped so a quote inside a
/// class does not close the value.
fn quoted_end(bytes: &[u8], start: usize, quote: u8) -> Option<usize> {
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'[' => match class_end(bytes, i) {
                Some(end) => i = end + 1,
                None => i += 1,
            },
            b if b == quote => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Index of the `]` closing a bracket class opened at `open`.
fn class_end(bytes: &[u8], open: usize) -> Option<usize> {
    let mut i = open + 1;
    if bytes.get(i) == Some(&b'^') {
        i += 1;
    }
    // A `]` right after the opener is a literal member.
    if bytes.get(i) == Some(&b']') {
        i += 1;
    }
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b']' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

#[cfg(test)]
#[path = "starrer_tests.rs"]
mod tests;
