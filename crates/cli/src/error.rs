// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

/// Pathmatch error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Pattern text failed to compile.
    #[error("invalid pattern <{pattern}>: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Same pattern registered twice with no merger configured.
    #[error("duplicate pattern without merger: <{pattern}>; old: {old}; new: {new}")]
    DuplicatePattern {
        pattern: String,
        old: String,
        new: String,
    },

    /// Blank value text while empty values are disallowed.
    #[error("empty value for pattern <{pattern}> (allow_empty is off)")]
    EmptyValue { pattern: String },

    /// A `%name` reference survived variable substitution.
    #[error("unresolved variable {name} in pattern <{pattern}>")]
    UnresolvedVariable { name: String, pattern: String },

    /// Variable definition that does not follow the `%name` convention.
    #[error("invalid variable {0}: variables must start with %")]
    InvalidVariable(String),

    /// Variables that keep expanding into each other.
    #[error("variable expansion does not terminate for <{0}>")]
    RecursiveVariable(String),

    /// `$n` reference past the captured groups.
    #[error("replacing ${index} in <{template}>, but only {available} groups captured")]
    MissingCapture {
        template: String,
        index: usize,
        available: usize,
    },

    /// Prefix tree invariant broken (bug in insertion).
    #[error("tree invariant violated: {0}")]
    Invariant(String),

    /// Malformed rule line.
    #[error("{}:{line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Internal error (bug)
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// True for errors raised while registering patterns.
    pub fn is_registration(&self) -> bool {
        matches!(
            self,
            Error::InvalidPattern { .. }
                | Error::DuplicatePattern { .. }
                | Error::EmptyValue { .. }
                | Error::UnresolvedVariable { .. }
                | Error::InvalidVariable(_)
                | Error::RecursiveVariable(_)
        )
    }
}

/// Result type using pathmatch Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Every path resolved
    Success = 0,
    /// At least one path had no match
    NoMatch = 1,
    /// Configuration, rule or argument error
    ConfigError = 2,
    /// Internal error
    InternalError = 3,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config { .. } | Error::Argument(_) | Error::Parse { .. } => {
                ExitCode::ConfigError
            }
            e if e.is_registration() => ExitCode::ConfigError,
            Error::MissingCapture { .. } => ExitCode::ConfigError,
            Error::Io { .. } | Error::Invariant(_) | Error::Internal(_) => {
                ExitCode::InternalError
            }
            _ => ExitCode::InternalError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
