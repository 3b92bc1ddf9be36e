// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::BTreeMap;

use super::*;
use crate::finder::RegexFinder;
use proptest::prelude::*;
use proptest::strategy::Strategy;
use yare::parameterized;

fn put(store: &mut TreeStore<String>, pattern: &str, value: &str) {
    store.put(Box::new(RegexFinder::new(pattern).unwrap()), value.to_string());
}

fn tree(patterns: &[&str]) -> TreeStore<String> {
    let mut store = TreeStore::new();
    for (i, p) in patterns.iter().enumerate() {
        put(&mut store, p, &i.to_string());
    }
    store
}

fn values(hits: &[Hit<'_, String>]) -> Vec<String> {
    hits.iter().map(|h| h.value.clone()).collect()
}

#[test]
fn nested_matches_return_in_rank_order() {
    let mut s = TreeStore::new();
    put(&mut s, "^a/b/c$", "X");
    put(&mut s, "^a/b/(.*)$", "Y");
    put(&mut s, "^a/(.*)$", "Z");

    assert_eq!(values(&s.get_all("a/b/c", None)), ["X", "Y", "Z"]);
    assert_eq!(s.first("a/b/c", None).unwrap().value, "X");
    s.validate().unwrap();
}

#[test]
fn groups_form_at_directory_boundaries() {
    let s = tree(&["^a/b/c$", "^a/b/(.*)$", "^a/(.*)$"]);
    similar_asserts::assert_eq!(
        s.dump(),
        "^a.*\n\t^a/b.*\n\t\t^a/b/c$\n\t\t^a/b/(.*)$\n\t^a/(.*)$\n"
    );
}

#[test]
fn unrelated_patterns_stay_siblings() {
    let s = tree(&["^p/1$", "^q/1$", "^r/1$"]);
    similar_asserts::assert_eq!(s.dump(), "^p/1$\n^q/1$\n^r/1$\n");
}

#[test]
fn new_pattern_descends_into_matching_group() {
    let s = tree(&["^a/b/1$", "^a/b/2$", "^a/b/3$"]);
    similar_asserts::assert_eq!(s.dump(), "^a/b.*\n\t^a/b/1$\n\t^a/b/2$\n\t^a/b/3$\n");
}

#[test]
fn no_match_yields_nothing() {
    let s = tree(&["^x/1$", "^x/2$"]);
    assert!(s.get_all("x/3", None).is_empty());
    assert!(s.first("x/3", None).is_none());
}

#[test]
fn query_outside_every_group_tests_only_top_level() {
    let s = tree(&["^a/b/1$", "^a/b/2$", "^c/d/1$", "^c/d/2$"]);
    assert!(s.get_all("e/f", None).is_empty());
    assert_eq!(values(&s.get_all("c/d/2", None)), ["3"]);
}

#[test]
fn overwrite_keeps_rank_and_count() {
    let mut s = tree(&["^a/b/1$", "^a/b/2$"]);
    put(&mut s, "^a/b/1$", "again");
    assert_eq!(s.len(), 2);
    let hit = s.first("a/b/1", None).unwrap();
    assert_eq!(hit.value, "again");
    assert_eq!(hit.rank, 0);
}

#[test]
fn registering_a_group_pattern_promotes_it() {
    let mut s = tree(&["^a/b/1$", "^a/b/2$"]);
    let before = s.node_count();
    put(&mut s, "^a/b.*", "group");

    assert_eq!(s.node_count(), before);
    assert_eq!(s.len(), 3);
    assert_eq!(values(&s.get_all("a/b/1", None)), ["0", "group"]);

    // Later patterns still land inside the promoted group.
    put(&mut s, "^a/b/3$", "3");
    similar_asserts::assert_eq!(s.dump(), "^a/b.*\n\t^a/b/1$\n\t^a/b/2$\n\t^a/b/3$\n");
    assert_eq!(s.get_exact("^a/b/3$").map(String::as_str), Some("3"));
    s.validate().unwrap();
}

#[test]
fn equal_prefixes_pick_first_child() {
    let mut s: TreeStore<String> = TreeStore::new();
    for p in ["^a/b/1$", "^a/b/2$"] {
        let id = s.new_leaf(Box::new(RegexFinder::new(p).unwrap()), p.to_string());
        s.nodes[ROOT].children.push(id);
    }
    match s.place(ROOT, "^a/b/3$") {
        Placement::Split { index, prefix } => {
            assert_eq!(index, 0);
            assert_eq!(prefix, "^a/b");
        }
        _ => panic!("expected a split"),
    }
}

#[test]
fn never_groups_inside_an_open_paren() {
    let s = tree(&["^a/(b/c|d)/1$", "^a/(b/c|d)/2$", "^a/(b/e)$"]);
    s.validate().unwrap();
    for node in &s.nodes {
        if node.synthetic {
            assert!(is_balanced(node.effective_prefix()), "{}", node.pattern());
        }
    }
    assert_eq!(values(&s.get_all("a/b/c/2", None)), ["1"]);
    assert_eq!(values(&s.get_all("a/b/e", None)), ["2"]);
}

#[test]
fn get_exact_finds_leaves_only() {
    let s = tree(&["^a/b/1$", "^a/b/2$"]);
    assert_eq!(s.get_exact("^a/b/2$").map(String::as_str), Some("1"));
    assert!(s.get_exact("^a/b.*").is_none());
    assert!(s.get_exact("^a/b/3$").is_none());
}

#[test]
fn entries_in_registration_order() {
    let s = tree(&["^m/1$", "^a/1$", "^m/2$"]);
    let patterns: Vec<_> = s.entries().iter().map(|e| e.finder.pattern()).collect();
    assert_eq!(patterns, ["^m/1$", "^a/1$", "^m/2$"]);
}

#[test]
fn validate_reports_broken_prefix() {
    let mut s = tree(&["^a/b/1$", "^a/b/2$"]);
    let stray = s.new_leaf(Box::new(RegexFinder::new("^z/1$").unwrap()), "z".into());
    let group = s.nodes[ROOT].children[0];
    s.nodes[group].children.push(stray);
    let err = s.validate().unwrap_err();
    assert!(matches!(err, Error::Invariant(_)));
    assert!(err.to_string().contains("^z/1$"));
}

#[parameterized(
    simple = { "^a/b/c", "^a/b" },
    trailing_slash = { "^a/b/", "^a/b" },
    no_slash = { "^abc", "" },
    open_paren = { "^a/(b/c", "^a" },
    open_class = { "^a/[/x/y", "^a" },
    closed_class = { "^a/[/]x/y", "^a/[/]x" },
    open_brace = { "^a/x{1,/b/c", "^a" },
    dangling_escape = { r"^a/b\/c", "^a" },
    closed_group = { "^a/(b|c)/d", "^a/(b|c)" },
)]
fn directory_prefix_cases(shared: &str, expected: &str) {
    assert_eq!(directory_prefix(shared), expected);
}

#[test]
fn common_prefix_respects_char_boundaries() {
    assert_eq!(common_prefix("^a/é", "^a/è"), "^a/");
    assert_eq!(common_prefix("abc", "abd"), "ab");
    assert_eq!(common_prefix("ab", "abc"), "ab");
}

fn directory_pattern() -> impl Strategy<Value = String> {
    let segment = prop_oneof![
        4 => "[abc]{1,2}",
        1 => Just("([^/]*)".to_string()),
        1 => Just(r"\d+".to_string()),
    ];
    (prop::collection::vec(segment, 1..5), any::<bool>()).prop_map(|(segments, anchored)| {
        let mut p = format!("^{}", segments.join("/"));
        if anchored {
            p.push('$');
        }
        p
    })
}

proptest! {
    #[test]
    fn prefix_invariant_holds_after_any_insertions(
        patterns in prop::collection::vec(directory_pattern(), 1..40),
    ) {
        let mut s = TreeStore::new();
        let mut expected = BTreeMap::new();
        for (i, p) in patterns.iter().enumerate() {
            put(&mut s, p, &i.to_string());
            expected.insert(p.clone(), i.to_string());
        }
        prop_assert!(s.validate().is_ok(), "{:?}\n{}", s.validate(), s.dump());
        prop_assert_eq!(s.len(), expected.len());
        for (pattern, value) in &expected {
            prop_assert_eq!(s.get_exact(pattern), Some(value));
        }
    }

    #[test]
    fn tree_finds_what_a_scan_finds(
        patterns in prop::collection::vec(directory_pattern(), 1..30),
        query in "[abc1/]{0,10}",
    ) {
        let mut s = TreeStore::new();
        let mut scan = crate::store::LinearStore::new();
        for (i, p) in patterns.iter().enumerate() {
            put(&mut s, p, &i.to_string());
            scan.put(Box::new(RegexFinder::new(p).unwrap()), i.to_string());
        }
        let tree_hits: Vec<_> = s.get_all(&query, None).iter().map(|h| (h.rank, h.value.clone())).collect();
        let scan_hits: Vec<_> = scan.get_all(&query, None).iter().map(|h| (h.rank, h.value.clone())).collect();
        prop_assert_eq!(tree_hits, scan_hits);
    }
}
