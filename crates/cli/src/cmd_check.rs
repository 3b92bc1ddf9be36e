// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check command implementation.

use pathmatch::cli::{CheckArgs, Cli, OutputFormat};
use pathmatch::error::ExitCode;
use pathmatch::loader;
use pathmatch::output::json::{CheckOutput, JsonFormatter};

/// Run the check command.
///
/// Rule errors surface through the returned error and map to
/// [`ExitCode::ConfigError`].
pub fn run(cli: &Cli, args: &CheckArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let lookup = loader::load_lookup(
        cli.config.as_deref(),
        &cwd,
        &args.rules.rules,
        args.rules.strategy,
    )?;

    match args.output {
        OutputFormat::Text => {
            println!(
                "{} pattern{} loaded ({} strategy)",
                lookup.len(),
                if lookup.len() == 1 { "" } else { "s" },
                lookup.strategy()
            );
        }
        OutputFormat::Json => {
            JsonFormatter::new(std::io::stdout()).write_check(&CheckOutput {
                strategy: lookup.strategy().to_string(),
                patterns: lookup.len(),
                variables: lookup.variables().len(),
            })?;
        }
    }
    Ok(ExitCode::Success)
}
