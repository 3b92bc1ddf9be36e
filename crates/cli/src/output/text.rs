// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text output formatter.
//!
//! ```text
//! <path>\t<value>
//! <path>\tno match
//!   <path with ☹ at the fail point>\t<pattern>
//! ```
//!
//! With `--all` every match is listed under its path as
//! `  <rank>\t<value>\t<pattern>`.


use termcolor::{ColorChoice, StandardStream, WriteColor};

use super::Summary;
use crate::color::scheme;
use crate::finder::Mismatch;
use crate::resolution::{Resolution, UnmatchedRecord};

/// Text output formatter with color support.
pub struct TextFormatter<W: WriteColor> {
    out: W,
}

impl TextFormatter<StandardStream> {
    /// Formatter writing to stdout.
    pub fn stdout(color_choice: ColorChoice) -> Self {
        Self::new(StandardStream::stdout(color_choice))
    }
}

impl<W: WriteColor> TextFormatter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write one resolved path (streaming).
    pub fn write_resolution(&mut self, r: &Resolution, all: bool) -> std::io::Result<()> {
        self.out.set_color(&scheme::path())?;
        write!(self.out, "{}", r.path)?;
        self.out.reset()?;

        if !r.is_match() {
            write!(self.out, "\t")?;
            self.out.set_color(&scheme::miss())?;
            write!(self.out, "no match")?;
            self.out.reset()?;
            writeln!(self.out)?;
            for m in &r.mismatches {
                self.write_mismatch(m)?;
            }
            return Ok(());
        }

        if !all {
            write!(self.out, "\t")?;
            self.out.set_color(&scheme::value())?;
            write!(self.out, "{}", r.matches[0].value)?;
            self.out.reset()?;
            return writeln!(self.out);
        }

        writeln!(self.out)?;
        for m in &r.matches {
            self.out.set_color(&scheme::pattern())?;
            write!(self.out, "  {}\t", m.rank)?;
            self.out.reset()?;
            self.out.set_color(&scheme::value())?;
            write!(self.out, "{}", m.value)?;
            self.out.reset()?;
            self.out.set_color(&scheme::pattern())?;
            write!(self.out, "\t{}", m.pattern)?;
            self.out.reset()?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn write_mismatch(&mut self, m: &Mismatch) -> std::io::Result<()> {
        write!(self.out, "  ")?;
        match m.offset {
            Some(offset) => {
                let (head, tail) = m.marked.split_at(offset);
                write!(self.out, "{}", head)?;
                self.out.set_color(&scheme::marker())?;
                write!(self.out, "☹")?;
                self.out.reset()?;
                write!(self.out, "{}", &tail['☹'.len_utf8()..])?;
            }
            None => write!(self.out, "{}", m.marked)?,
        }
        self.out.set_color(&scheme::pattern())?;
        write!(self.out, "\t{}", m.pattern)?;
        self.out.reset()?;
        writeln!(self.out)
    }

    /// Write the miss summary. Silent when every path matched.
    pub fn write_summary(&mut self, summary: &Summary) -> std::io::Result<()> {
        if summary.missed == 0 {
            return Ok(());
        }
        writeln!(
            self.out,
            "{} of {} path{} had no match",
            summary.missed,
            summary.total(),
            if summary.total() == 1 { "" } else { "s" }
        )
    }

    /// Write patterns that no query matched.
    pub fn write_unmatched(&mut self, records: &[UnmatchedRecord], total: usize) -> std::io::Result<()> {
        for r in records {
            write!(self.out, "{}", r.pattern)?;
            self.out.set_color(&scheme::pattern())?;
            write!(self.out, "\t{}", r.value)?;
            self.out.reset()?;
            writeln!(self.out)?;
        }
        writeln!(
            self.out,
            "{} of {} pattern{} unmatched",
            records.len(),
            total,
            if total == 1 { "" } else { "s" }
        )
    }

    /// Write raw text, such as a store dump.
    pub fn write_raw(&mut self, text: &str) -> std::io::Result<()> {
        write!(self.out, "{}", text)?;
        self.out.flush()
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
