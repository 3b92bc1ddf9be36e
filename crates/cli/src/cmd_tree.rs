// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tree command implementation.

use pathmatch::cli::{Cli, TreeArgs};
use pathmatch::color::resolve_color;
use pathmatch::error::ExitCode;
use pathmatch::loader;
use pathmatch::output::text::TextFormatter;

/// Run the tree command.
pub fn run(cli: &Cli, args: &TreeArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let lookup = loader::load_lookup(
        cli.config.as_deref(),
        &cwd,
        &args.rules.rules,
        args.rules.strategy,
    )?;
    TextFormatter::stdout(resolve_color(false, false)).write_raw(&lookup.dump())?;
    Ok(ExitCode::Success)
}
