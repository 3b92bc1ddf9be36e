// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Self-splitting prefix tree over directory-style patterns.
//!
//! Patterns like `^//ldml/dates/calendars/calendar\[@type="([^"]*)"]/months$`
//! are grouped under synthetic nodes whose pattern is a shared literal
//! prefix ending at a `/` boundary plus `.*`. A query only descends into
//! groups whose prefix pattern it matches, so most of the set is never
//! tested.
//!
//! Nodes live in an arena indexed by [`NodeId`]; the root is node 0 and
//! has no finder.

use super::{Entry, Hit, MatchStore, Rank, Strategy};
use crate::error::{Error, Result};
use crate::finder::{Context, Finder, FinderOptions, RegexFinder};

/// Index of a node in the arena.
pub type NodeId = usize;

const ROOT: NodeId = 0;

/// Continuation appended to a shared prefix to form a group pattern.
const GROUP_SUFFIX: &str = ".*";

#[derive(Debug)]
struct Node<T> {
    /// `None` only for the root.
    finder: Option<Box<dyn Finder>>,
    value: Option<T>,
    /// `None` for structural nodes.
    rank: Option<Rank>,
    /// Pattern was synthesized from a shared prefix. Stays set if a
    /// caller later registers the same text, so the subtree stays
    /// reachable.
    synthetic: bool,
    children: Vec<NodeId>,
}

impl<T> Node<T> {
    fn pattern(&self) -> &str {
        self.finder.as_deref().map_or("", |f| f.pattern())
    }

    fn is_leaf(&self) -> bool {
        self.rank.is_some()
    }

    /// Pattern with its trailing `$` or synthetic `.*` removed.
    fn effective_prefix(&self) -> &str {
        let pattern = self.pattern();
        if let Some(stripped) = pattern.strip_suffix('$') {
            return stripped;
        }
        if self.synthetic {
            return pattern.strip_suffix(GROUP_SUFFIX).unwrap_or(pattern);
        }
        pattern
    }
}

/// Where a new pattern goes relative to one parent's children.
enum Placement {
    /// Structural node with identical text: promote it.
    Promote(NodeId),
    /// Group whose prefix the pattern starts with: continue below it.
    Descend(NodeId),
    /// No narrower grouping: append as a sibling.
    Append,
    /// Wrap `children[index]` and the new node in a group with `prefix`.
    Split { index: usize, prefix: String },
}

#[derive(Debug)]
pub struct TreeStore<T> {
    nodes: Vec<Node<T>>,
    options: FinderOptions,
    len: usize,
    next_rank: Rank,
}

impl<T> TreeStore<T> {
    pub fn new() -> Self {
        Self::with_options(FinderOptions::default())
    }

    /// Group nodes are compiled with `options`, which should match the
    /// options of the leaf patterns.
    pub fn with_options(options: FinderOptions) -> Self {
        let root = Node {
            finder: None,
            value: None,
            rank: None,
            synthetic: true,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root],
            options,
            len: 0,
            next_rank: 0,
        }
    }

    /// Total nodes including the root and structural nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Leaf registered under exactly `pattern`.
    fn locate(&self, pattern: &str) -> Option<NodeId> {
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            for &child_id in &self.nodes[id].children {
                let child = &self.nodes[child_id];
                if child.is_leaf() && child.pattern() == pattern {
                    return Some(child_id);
                }
                if !child.children.is_empty() && pattern.starts_with(child.effective_prefix()) {
                    stack.push(child_id);
                }
            }
        }
        None
    }

    fn place(&self, parent: NodeId, pattern: &str) -> Placement {
        let node = &self.nodes[parent];
        let mut best: Option<(usize, &str)> = None;

        for (index, &child_id) in node.children.iter().enumerate() {
            let child = &self.nodes[child_id];
            if !child.is_leaf() && child.pattern() == pattern {
                return Placement::Promote(child_id);
            }
            let child_prefix = child.effective_prefix();
            if child.synthetic && pattern.starts_with(child_prefix) {
                return Placement::Descend(child_id);
            }
            let shared = directory_prefix(common_prefix(child_prefix, pattern));
            // Strictly longer: the first child wins ties.
            if shared.len() > best.map_or(0, |(_, p)| p.len()) {
                best = Some((index, shared));
            }
        }

        match best {
            Some((index, prefix)) if prefix.len() > node.effective_prefix().len() => {
                Placement::Split {
                    index,
                    prefix: prefix.to_string(),
                }
            }
            _ => Placement::Append,
        }
    }

    fn push_node(&mut self, node: Node<T>) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn new_leaf(&mut self, finder: Box<dyn Finder>, value: T) -> NodeId {
        let rank = self.next_rank;
        self.next_rank += 1;
        self.len += 1;
        self.push_node(Node {
            finder: Some(finder),
            value: Some(value),
            rank: Some(rank),
            synthetic: false,
            children: Vec::new(),
        })
    }

    fn split(&mut self, parent: NodeId, index: usize, prefix: &str, leaf: NodeId) {
        let pattern = format!("{prefix}{GROUP_SUFFIX}");
        let finder = match RegexFinder::with_options(&pattern, self.options) {
            Ok(finder) => finder,
            Err(e) => {
                tracing::warn!("cannot group under {}: {}", pattern, e);
                self.nodes[parent].children.push(leaf);
                return;
            }
        };
        tracing::debug!("split {} under {}", pattern, self.nodes[parent].pattern());

        let displaced = self.nodes[parent].children[index];
        let group = self.push_node(Node {
            finder: Some(Box::new(finder)),
            value: None,
            rank: None,
            synthetic: true,
            children: vec![displaced, leaf],
        });
        self.nodes[parent].children[index] = group;
    }

    /// Check that every group's prefix is a literal prefix of every
    /// pattern below it.
    pub fn validate(&self) -> Result<()> {
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if node.is_leaf() != node.value.is_some() {
                return Err(Error::Invariant(format!(
                    "node {id} <{}> has rank {:?} but value present: {}",
                    node.pattern(),
                    node.rank,
                    node.value.is_some()
                )));
            }
            if node.synthetic {
                let prefix = node.effective_prefix();
                for below in self.descendants(id) {
                    let pattern = self.nodes[below].pattern();
                    if !pattern.starts_with(prefix) {
                        return Err(Error::Invariant(format!(
                            "group <{}> is not a prefix of <{pattern}>",
                            node.pattern()
                        )));
                    }
                }
            }
            stack.extend(node.children.iter().copied());
        }
        Ok(())
    }

    fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[id].children.clone();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.nodes[next].children.iter().copied());
        }
        out
    }

    fn dump_node(&self, id: NodeId, depth: usize, out: &mut String) {
        for &child_id in &self.nodes[id].children {
            let child = &self.nodes[child_id];
            out.push_str(&"\t".repeat(depth));
            out.push_str(child.pattern());
            out.push('\n');
            self.dump_node(child_id, depth + 1, out);
        }
    }
}

impl<T> Default for TreeStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync> MatchStore<T> for TreeStore<T> {
    fn put(&mut self, finder: Box<dyn Finder>, value: T) {
        if let Some(id) = self.locate(finder.pattern()) {
            self.nodes[id].value = Some(value);
            return;
        }

        let mut parent = ROOT;
        loop {
            if self.nodes[parent].children.is_empty() {
                let leaf = self.new_leaf(finder, value);
                self.nodes[parent].children.push(leaf);
                return;
            }
            match self.place(parent, finder.pattern()) {
                Placement::Promote(id) => {
                    let rank = self.next_rank;
                    self.next_rank += 1;
                    self.len += 1;
                    let node = &mut self.nodes[id];
                    node.finder = Some(finder);
                    node.value = Some(value);
                    node.rank = Some(rank);
                    return;
                }
                Placement::Descend(id) => parent = id,
                Placement::Append => {
                    let leaf = self.new_leaf(finder, value);
                    self.nodes[parent].children.push(leaf);
                    return;
                }
                Placement::Split { index, prefix } => {
                    let leaf = self.new_leaf(finder, value);
                    self.split(parent, index, &prefix, leaf);
                    return;
                }
            }
        }
    }

    fn get_exact(&self, pattern: &str) -> Option<&T> {
        let id = self.locate(pattern)?;
        self.nodes[id].value.as_ref()
    }

    fn get_exact_mut(&mut self, pattern: &str) -> Option<&mut T> {
        let id = self.locate(pattern)?;
        self.nodes[id].value.as_mut()
    }

    fn get_all<'a>(&'a self, text: &str, ctx: Context<'_>) -> Vec<Hit<'a, T>> {
        let mut hits = Vec::new();
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            for &child_id in &self.nodes[id].children {
                let child = &self.nodes[child_id];
                let Some(finder) = child.finder.as_deref() else {
                    continue;
                };
                // `find`, not `matches`: group patterns end in `.*`.
                let Some(info) = finder.find(text, ctx) else {
                    continue;
                };
                tracing::trace!("{} matched {}", text, finder.pattern());
                if let (Some(rank), Some(value)) = (child.rank, child.value.as_ref()) {
                    hits.push(Hit {
                        finder,
                        value,
                        rank,
                        info,
                    });
                }
                stack.push(child_id);
            }
        }
        hits.sort_by_key(|hit| hit.rank);
        hits
    }

    fn entries(&self) -> Vec<Entry<'_, T>> {
        let mut entries: Vec<_> = self
            .nodes
            .iter()
            .filter_map(|node| {
                Some(Entry {
                    finder: node.finder.as_deref()?,
                    value: node.value.as_ref()?,
                    rank: node.rank?,
                })
            })
            .collect();
        entries.sort_by_key(|entry| entry.rank);
        entries
    }

    fn len(&self) -> usize {
        self.len
    }

    fn strategy(&self) -> Strategy {
        Strategy::Tree
    }

    fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_node(ROOT, 0, &mut out);
        out
    }
}

/// Longest common prefix of `a` and `b`, on a char boundary.
fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let mut end = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    while !a.is_char_boundary(end) {
        end -= 1;
    }
    &a[..end]
}

/// Cut `shared` back to the last `/` that leaves no group, class or
/// repetition open and no dangling escape.
fn directory_prefix(shared: &str) -> &str {
    let mut candidate = &shared[..shared.rfind('/').unwrap_or(0)];
    while !candidate.is_empty() && !is_balanced(candidate) {
        candidate = &candidate[..candidate.rfind('/').unwrap_or(0)];
    }
    candidate
}

/// No open `(`, `[`, `{` and no trailing lone backslash.
fn is_balanced(text: &str) -> bool {
    let (mut parens, mut braces) = (0usize, 0usize);
    let mut in_class = false;
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if chars.next().is_none() {
                    return false;
                }
            }
            _ if in_class => in_class = c != ']',
            '[' => in_class = true,
            '(' => parens += 1,
            ')' => parens = parens.saturating_sub(1),
            '{' => braces += 1,
            '}' => braces = braces.saturating_sub(1),
            _ => {}
        }
    }
    parens == 0 && braces == 0 && !in_class
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
