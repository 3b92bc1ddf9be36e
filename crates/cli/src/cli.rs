// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::store::Strategy;

/// Resolve path-like strings against regex rule files
#[derive(Parser)]
#[command(name = "pathmatch")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "PATHMATCH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve paths to the values of matching rules
    Lookup(LookupArgs),
    /// List rules that none of the given paths match
    Unmatched(UnmatchedArgs),
    /// Print the internal structure of the rule store
    Tree(TreeArgs),
    /// Load and validate rule files
    Check(CheckArgs),
}

/// Rule sources shared by every subcommand.
#[derive(clap::Args)]
pub struct RuleArgs {
    /// Rule file (`pattern ; value` per line); repeat to load several
    #[arg(short, long = "rules", value_name = "FILE", required = true)]
    pub rules: Vec<PathBuf>,

    /// Storage strategy (overrides the config file)
    #[arg(long, value_name = "STRATEGY")]
    pub strategy: Option<Strategy>,
}

#[derive(clap::Args)]
pub struct LookupArgs {
    #[command(flatten)]
    pub rules: RuleArgs,

    /// Paths to resolve (read from stdin, one per line, when omitted)
    #[arg(value_name = "PATH")]
    pub paths: Vec<String>,

    /// Print every matching rule in rank order
    #[arg(long)]
    pub all: bool,

    /// Show where each rule stops matching when a path has no match
    #[arg(long)]
    pub explain: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Force color output
    #[arg(long)]
    pub color: bool,

    /// Disable color output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(clap::Args)]
pub struct UnmatchedArgs {
    #[command(flatten)]
    pub rules: RuleArgs,

    /// Paths to resolve (read from stdin, one per line, when omitted)
    #[arg(value_name = "PATH")]
    pub paths: Vec<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct TreeArgs {
    #[command(flatten)]
    pub rules: RuleArgs,
}

#[derive(clap::Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub rules: RuleArgs,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
