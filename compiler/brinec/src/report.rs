//! Error rendering with source snippets.
//!
//! Positions are tracked per line only, so every label spans the whole
//! offending line.

use crate::RunError;
use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use brine_parse::SyntaxError;
use std::io::{self, Write};
use std::ops::Range;

/// Byte range of 1-based `line`, excluding its line break.
fn line_span(source: &str, line: u32) -> Range<usize> {
    let mut start = 0;
    for (number, text) in (1..).zip(source.split('\n')) {
        let end = start + text.trim_end_matches('\r').len();
        if number == line {
            return start..end;
        }
        start += text.len() + 1;
    }
    source.len()..source.len()
}

/// Message of a syntax error without its line suffix.
pub fn syntax_message(err: &SyntaxError) -> String {
    match err {
        SyntaxError::Lex(err) => err.kind.to_string(),
        SyntaxError::Parse(err) => err.kind.to_string(),
    }
}

/// Write `err` for the script at `path` whose text is `source`.
pub fn render_error(
    err: &RunError,
    path: &str,
    source: &str,
    color: bool,
    out: &mut impl Write,
) -> io::Result<()> {
    let (title, message, line, note) = match err {
        RunError::Read { .. } => return writeln!(out, "error: {err}"),
        RunError::Syntax(err) => ("syntax error", syntax_message(err), Some(err.line()), None),
        RunError::Runtime(err) => (
            "runtime error",
            err.message.clone(),
            err.line,
            err.backtrace
                .as_ref()
                .filter(|trace| !trace.is_empty())
                .map(|trace| trace.to_string().trim_end().to_string()),
        ),
    };

    let span = line.map_or(0..0, |line| line_span(source, line));
    let mut report = Report::build(ReportKind::Error, path, span.start)
        .with_config(Config::default().with_color(color))
        .with_message(title)
        .with_label(
            Label::new((path, span))
                .with_message(message)
                .with_color(Color::Red),
        );
    if let Some(note) = note {
        report = report.with_note(note);
    }
    report.finish().write((path, Source::from(source)), out)
}
