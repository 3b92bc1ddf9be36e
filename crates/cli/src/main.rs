// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pathmatch CLI entry point.

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt};

use pathmatch::cli::{Cli, Command};
use pathmatch::error::ExitCode;

mod cmd_check;
mod cmd_lookup;
mod cmd_tree;
mod cmd_unmatched;

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("PATHMATCH_LOG").unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("pathmatch: {}", e);
            match e.downcast_ref::<pathmatch::Error>() {
                Some(err) => ExitCode::from(err),
                None => ExitCode::InternalError,
            }
        }
    };

    std::process::exit(exit_code as i32);
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            // Show help for bare invocation
            Cli::command().print_help()?;
            println!();
            Ok(ExitCode::Success)
        }
        Some(Command::Lookup(args)) => cmd_lookup::run(&cli, args),
        Some(Command::Unmatched(args)) => cmd_unmatched::run(&cli, args),
        Some(Command::Tree(args)) => cmd_tree::run(&cli, args),
        Some(Command::Check(args)) => cmd_check::run(&cli, args),
    }
}
