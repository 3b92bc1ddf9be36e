// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Lookup command implementation.

use rayon::prelude::*;

use pathmatch::cli::{Cli, LookupArgs, OutputFormat};
use pathmatch::color::resolve_color;
use pathmatch::error::ExitCode;
use pathmatch::loader;
use pathmatch::output::Summary;
use pathmatch::output::json::JsonFormatter;
use pathmatch::output::text::TextFormatter;
use pathmatch::resolution::{self, Resolution, ResolveOptions};

/// Run the lookup command.
pub fn run(cli: &Cli, args: &LookupArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let lookup = loader::load_lookup(
        cli.config.as_deref(),
        &cwd,
        &args.rules.rules,
        args.rules.strategy,
    )?;
    let queries = loader::read_queries(&args.paths, std::io::stdin().lock())?;

    let options = ResolveOptions {
        all: args.all,
        explain: args.explain,
    };
    let results = queries
        .par_iter()
        .map(|query| resolution::resolve(&lookup, query, options))
        .collect::<pathmatch::Result<Vec<Resolution>>>()?;
    let summary = Summary::from_resolutions(&results);
    tracing::debug!(matched = summary.matched, missed = summary.missed, "lookup done");

    match args.output {
        OutputFormat::Text => {
            let mut formatter = TextFormatter::stdout(resolve_color(args.color, args.no_color));
            for result in &results {
                formatter.write_resolution(result, args.all)?;
            }
            formatter.write_summary(&summary)?;
        }
        OutputFormat::Json => {
            JsonFormatter::new(std::io::stdout()).write_lookup(&results)?;
        }
    }

    Ok(if summary.missed == 0 {
        ExitCode::Success
    } else {
        ExitCode::NoMatch
    })
}
