//! Test helpers for the black-box CLI tests.
//!
//! Provides a small DSL for testing pathmatch CLI behavior.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

pub use assert_cmd::Command;
pub use predicates;
pub use predicates::prelude::PredicateBooleanExt;
use std::path::Path;

/// Returns a Command configured to run the pathmatch binary
pub fn pathmatch_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pathmatch"));
    cmd.env_remove("PATHMATCH_CONFIG")
        .env_remove("PATHMATCH_LOG")
        .env_remove("COLOR")
        .env("NO_COLOR", "1");
    cmd
}

/// Project holding the rules used by most specs:
///
/// ```text
/// ^a/b/c$       ; X
/// ^a/b/(.*)$    ; Y-$1
/// ^a/(.*)$      ; Z
/// ^x/1$         ; one
/// ```
pub fn default_project() -> Project {
    let temp = Project::empty();
    temp.rules(
        "rules.txt",
        "# nested\n^a/b/c$ ; X\n^a/b/(.*)$ ; Y-$1\n^a/(.*)$ ; Z\n^x/1$ ; one\n",
    );
    temp
}

// =============================================================================
// Project
// =============================================================================

/// Temporary project directory with a `.git` marker so config
/// discovery stops inside it.
///
/// # Examples
///
/// ```ignore
/// let temp = Project::empty();
/// temp.config("[lookup]\nstrategy = \"star\"");
/// temp.rules("rules.txt", "^a$ ; 1\n");
/// temp.lookup(&["a"]).assert().success();
/// ```
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    /// Create an empty project with no files
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        Self { dir }
    }

    /// Get the project path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write pathmatch.toml (auto-prefixes with `version = 1` if not present)
    pub fn config(&self, content: &str) {
        let content = if content.contains("version") {
            content.to_string()
        } else {
            format!("version = 1\n{}", content)
        };
        self.file("pathmatch.toml", &content);
    }

    /// Write a rule file
    pub fn rules(&self, name: &str, content: &str) {
        self.file(name, content);
    }

    /// Write a file, creating parent directories
    pub fn file(&self, path: &str, content: &str) {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, content).unwrap();
    }

    /// `pathmatch <subcommand> -r rules.txt` run inside the project
    pub fn cmd(&self, subcommand: &str) -> Command {
        let mut cmd = pathmatch_cmd();
        cmd.current_dir(self.path())
            .args([subcommand, "-r", "rules.txt"]);
        cmd
    }

    /// `pathmatch lookup -r rules.txt <paths>`
    pub fn lookup(&self, paths: &[&str]) -> Command {
        let mut cmd = self.cmd("lookup");
        cmd.args(paths);
        cmd
    }
}

/// Stdout of a finished command as a string
pub fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stdout of a finished command parsed as JSON
pub fn json_of(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}
