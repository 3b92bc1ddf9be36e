// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Unmatched command implementation.

use std::collections::HashSet;

use rayon::prelude::*;

use pathmatch::cli::{Cli, OutputFormat, UnmatchedArgs};
use pathmatch::color::resolve_color;
use pathmatch::error::ExitCode;
use pathmatch::loader;
use pathmatch::output::json::JsonFormatter;
use pathmatch::output::text::TextFormatter;
use pathmatch::resolution::UnmatchedRecord;

/// Run the unmatched command.
pub fn run(cli: &Cli, args: &UnmatchedArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let lookup = loader::load_lookup(
        cli.config.as_deref(),
        &cwd,
        &args.rules.rules,
        args.rules.strategy,
    )?;
    let queries = loader::read_queries(&args.paths, std::io::stdin().lock())?;

    let matched: HashSet<String> = queries
        .par_iter()
        .flat_map_iter(|query| {
            lookup
                .get_all(query, None)
                .into_iter()
                .map(|hit| hit.finder.pattern().to_string())
                .collect::<Vec<_>>()
        })
        .collect();

    let records: Vec<UnmatchedRecord> = lookup
        .unmatched_patterns(&matched)
        .iter()
        .map(Into::into)
        .collect();

    match args.output {
        OutputFormat::Text => {
            TextFormatter::stdout(resolve_color(false, false))
                .write_unmatched(&records, lookup.len())?;
        }
        OutputFormat::Json => {
            JsonFormatter::new(std::io::stdout()).write_unmatched(&records, lookup.len())?;
        }
    }

    Ok(ExitCode::Success)
}
