// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `%name` variable substitution for pattern text.
//!
//! Rule files define shared fragments once (`%lang=[a-z]{2,3}`) and
//! reference them in patterns (`^//ldml/%lang/x$`).

use crate::error::{Error, Result};

/// Substitution rounds before expansion is declared non-terminating.
const MAX_ROUNDS: usize = 32;

/// Ordered set of `%name -> value` definitions.
#[derive(Debug, Clone, Default)]
pub struct VariableReplacer {
    /// Longest name first, so `%lang` is replaced before `%la`.
    vars: Vec<(String, String)>,
}

impl VariableReplacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or redefine a variable. Name and value are trimmed.
    pub fn add(&mut self, name: &str, value: &str) -> Result<()> {
        let name = name.trim();
        if !is_variable_name(name) {
            return Err(Error::InvalidVariable(name.to_string()));
        }
        let value = value.trim().to_string();
        match self.vars.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => {
                self.vars.push((name.to_string(), value));
                self.vars
                    .sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Replace every defined variable until the text stops changing.
    ///
    /// Undefined `%` references are left as they are; see [`resolve`].
    ///
    /// [`resolve`]: Self::resolve
    pub fn replace(&self, text: &str) -> Result<String> {
        let mut current = text.to_string();
        for _ in 0..MAX_ROUNDS {
            let mut next = current.clone();
            for (name, value) in &self.vars {
                if next.contains(name.as_str()) {
                    next = next.replace(name.as_str(), value);
                }
            }
            if next == current {
                return Ok(current);
            }
            current = next;
        }
        Err(Error::RecursiveVariable(text.to_string()))
    }

    /// Replace variables, then reject any `%name` reference left over.
    pub fn resolve(&self, pattern: &str) -> Result<String> {
        if !pattern.contains('%') {
            return Ok(pattern.to_string());
        }
        let replaced = self.replace(pattern)?;
        match leftover_reference(&replaced) {
            Some(name) => Err(Error::UnresolvedVariable {
                name: name.to_string(),
                pattern: pattern.to_string(),
            }),
            None => Ok(replaced),
        }
    }
}

/// `%` followed by at least one identifier character.
fn is_variable_name(name: &str) -> bool {
    name.strip_prefix('%')
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(is_ident_char))
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// First `%ident` in `text`. A lone `%` or `%` before a non-identifier
/// character is literal.
fn leftover_reference(text: &str) -> Option<&str> {
    let mut search = 0;
    while let Some(pos) = text[search..].find('%') {
        let start = search + pos;
        let end = text[start + 1..]
            .find(|c: char| !is_ident_char(c))
            .map_or(text.len(), |n| start + 1 + n);
        if end > start + 1 {
            return Some(&text[start..end]);
        }
        search = start + 1;
    }
    None
}

#[cfg(test)]
#[path = "variables_tests.rs"]
mod tests;
