// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles pathmatch.toml parsing with version validation and unknown key warnings.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::finder::FinderOptions;
use crate::lookup::RegexLookup;
use crate::store::Strategy;
use crate::transform::PatternTransform;

/// Supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Config file name searched for during discovery.
pub const CONFIG_FILE: &str = "pathmatch.toml";

const KNOWN_KEYS: &[&str] = &["version", "lookup", "variables"];

const KNOWN_LOOKUP_KEYS: &[&str] = &[
    "strategy",
    "transform",
    "ignore_whitespace",
    "case_insensitive",
    "on_duplicate",
    "separator",
    "allow_empty",
];

/// Config with flexible parsing that captures unknown keys.
#[derive(Deserialize)]
struct FlexibleConfig {
    version: Option<i64>,

    #[serde(default)]
    lookup: Option<toml::Value>,

    #[serde(default)]
    variables: Option<toml::Value>,

    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Lookup construction settings.
    pub lookup: LookupConfig,

    /// `%name -> value` definitions available to every rule file.
    pub variables: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            lookup: LookupConfig::default(),
            variables: BTreeMap::new(),
        }
    }
}

/// What to do when a rule file registers the same pattern twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OnDuplicate {
    /// Fail with a duplicate-pattern error.
    #[default]
    Error,
    /// Keep the first value.
    KeepFirst,
    /// Keep the last value.
    Replace,
    /// Join the values with `separator`.
    Append,
}

/// `[lookup]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    pub strategy: Strategy,
    pub transform: PatternTransform,
    pub ignore_whitespace: bool,
    pub case_insensitive: bool,
    pub on_duplicate: OnDuplicate,
    /// Joiner for `on_duplicate = "append"`.
    pub separator: String,
    pub allow_empty: bool,
}

impl LookupConfig {
    pub fn finder_options(&self) -> FinderOptions {
        FinderOptions {
            ignore_whitespace: self.ignore_whitespace,
            case_insensitive: self.case_insensitive,
        }
    }
}

impl Config {
    /// Build an empty lookup of string values configured from this file.
    ///
    /// `strategy` overrides the configured strategy when given.
    pub fn new_lookup(&self, strategy: Option<Strategy>) -> Result<RegexLookup<String>> {
        let settings = &self.lookup;
        let mut lookup = RegexLookup::with_options(
            strategy.unwrap_or(settings.strategy),
            settings.finder_options(),
        );
        lookup
            .set_transform(settings.transform)
            .set_allow_empty(settings.allow_empty);

        match settings.on_duplicate {
            OnDuplicate::Error => {}
            OnDuplicate::KeepFirst => {
                lookup.set_merger(|_old: &mut String, _new| {});
            }
            OnDuplicate::Replace => {
                lookup.set_merger(|old: &mut String, new| *old = new);
            }
            OnDuplicate::Append => {
                let separator = settings.separator.clone();
                lookup.set_merger(move |old: &mut String, new| {
                    old.push_str(&separator);
                    old.push_str(&new);
                });
            }
        }

        for (name, value) in &self.variables {
            lookup.add_variable(name, value)?;
        }
        Ok(lookup)
    }
}

/// Load configuration from a file, warning on unknown keys.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&content, path)
}

/// Load the file at `path`, or defaults when there is none.
pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => load(path),
        None => Ok(Config::default()),
    }
}

/// Parse config from string content, warning on unknown keys.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let flexible: FlexibleConfig = toml::from_str(content).map_err(|e| config_error(e, path))?;

    let version = flexible.version.ok_or_else(|| Error::Config {
        message: "missing required field: version".to_string(),
        path: Some(path.to_path_buf()),
    })?;

    if version != SUPPORTED_VERSION {
        return Err(Error::Config {
            message: format!(
                "unsupported config version {} (supported: {})\n  Upgrade pathmatch to use this config.",
                version, SUPPORTED_VERSION
            ),
            path: Some(path.to_path_buf()),
        });
    }

    for key in flexible.unknown.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            warn_unknown_key(path, key);
        }
    }

    let lookup = match flexible.lookup {
        Some(toml::Value::Table(mut t)) => {
            let unknown: Vec<String> = t
                .keys()
                .filter(|key| !KNOWN_LOOKUP_KEYS.contains(&key.as_str()))
                .cloned()
                .collect();
            for key in unknown {
                warn_unknown_key(path, &format!("lookup.{}", key));
                t.remove(&key);
            }
            toml::Value::Table(t)
                .try_into()
                .map_err(|e| config_error(e, path))?
        }
        Some(_) => {
            return Err(Error::Config {
                message: "[lookup] must be a table".to_string(),
                path: Some(path.to_path_buf()),
            });
        }
        None => LookupConfig::default(),
    };

    let variables = match flexible.variables {
        Some(toml::Value::Table(t)) => {
            let mut variables = BTreeMap::new();
            for (name, value) in t {
                let toml::Value::String(value) = value else {
                    return Err(Error::Config {
                        message: format!("variable {} must be a string", name),
                        path: Some(path.to_path_buf()),
                    });
                };
                if !name.starts_with('%') {
                    return Err(Error::Config {
                        message: format!("variable {} must start with %", name),
                        path: Some(path.to_path_buf()),
                    });
                }
                variables.insert(name, value);
            }
            variables
        }
        Some(_) => {
            return Err(Error::Config {
                message: "[variables] must be a table".to_string(),
                path: Some(path.to_path_buf()),
            });
        }
        None => BTreeMap::new(),
    };

    tracing::debug!("loaded config from {}", path.display());
    Ok(Config {
        version,
        lookup,
        variables,
    })
}

fn config_error(e: impl std::fmt::Display, path: &Path) -> Error {
    Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    }
}

/// Print warning for an unrecognized config key.
fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "pathmatch: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
