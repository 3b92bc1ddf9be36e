// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use yare::parameterized;

fn replacer(defs: &[(&str, &str)]) -> VariableReplacer {
    let mut r = VariableReplacer::new();
    for (name, value) in defs {
        r.add(name, value).unwrap();
    }
    r
}

#[test]
fn longest_name_wins() {
    let r = replacer(&[("%a", "short"), ("%ab", "long")]);
    assert_eq!(r.replace("x/%ab/%a").unwrap(), "x/long/short");
}

#[test]
fn expands_until_stable() {
    let r = replacer(&[("%outer", "(%inner|z)"), ("%inner", "[a-y]")]);
    assert_eq!(r.resolve("^%outer$").unwrap(), "^([a-y]|z)$");
}

#[test]
fn redefinition_replaces_value() {
    let r = replacer(&[("%x", "1"), ("%x", "2")]);
    assert_eq!(r.len(), 1);
    assert_eq!(r.get("%x"), Some("2"));
}

#[test]
fn definitions_are_trimmed() {
    let r = replacer(&[(" %x ", "  v  ")]);
    assert_eq!(r.get("%x"), Some("v"));
}

#[parameterized(
    no_percent = { "x" },
    bare_percent = { "%" },
    punctuation = { "%a-b" },
    empty = { "" },
)]
fn rejects_bad_names(name: &str) {
    let err = VariableReplacer::new().add(name, "v").unwrap_err();
    assert!(matches!(err, Error::InvalidVariable(_)));
}

#[test]
fn cycle_is_an_error() {
    let r = replacer(&[("%a", "<%b>"), ("%b", "<%a>")]);
    assert!(matches!(r.replace("%a"), Err(Error::RecursiveVariable(_))));
}

#[test]
fn leftover_reference_is_unresolved() {
    let r = replacer(&[("%lang", "en")]);
    let err = r.resolve("^%lang/%region$").unwrap_err();
    match err {
        Error::UnresolvedVariable { name, pattern } => {
            assert_eq!(name, "%region");
            assert_eq!(pattern, "^%lang/%region$");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[parameterized(
    trailing = { "100%" },
    before_space = { "a% b" },
    before_brace = { "x{1}%{2}" },
)]
fn literal_percent_survives(pattern: &str) {
    assert_eq!(VariableReplacer::new().resolve(pattern).unwrap(), pattern);
}
