//! Writing results as text tables or JSON.

use crate::cli::OutputFormat;
use costar_core::{Error, Result};
use serde::Serialize;
use std::io::Write;

/// A result that can be shown as plain text or serialized as JSON.
pub trait Render: Serialize {
    /// Plain-text rendering, newline terminated.
    fn render_text(&self) -> String;
}

/// Write a result in the requested format.
pub fn emit<W: Write, R: Render>(out: &mut W, format: OutputFormat, value: &R) -> Result<()> {
    match format {
        OutputFormat::Text => write_str(out, &value.render_text()),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value)?;
            write_line(out, &json)
        }
    }
}

/// Write a string followed by a newline.
pub fn write_line<W: Write>(out: &mut W, line: &str) -> Result<()> {
    writeln!(out, "{line}").map_err(|e| Error::io_with_path(e, "<stdout>"))
}

fn write_str<W: Write>(out: &mut W, text: &str) -> Result<()> {
    out.write_all(text.as_bytes())
        .map_err(|e| Error::io_with_path(e, "<stdout>"))
}

/// Column alignment in [`table`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    /// Pad on the right.
    Left,
    /// Pad on the left.
    Right,
}

/// Render rows as an aligned table with a header and rule line.
pub fn table(headers: &[(&str, Align)], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|(h, _)| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: Vec<&str>| -> String {
        let line: Vec<String> = cells
            .iter()
            .zip(headers)
            .zip(&widths)
            .map(|((cell, (_, align)), &width)| match align {
                Align::Left => format!("{cell:<width$}"),
                Align::Right => format!("{cell:>width$}"),
            })
            .collect();
        format!("{}\n", line.join("  ").trim_end())
    };

    let mut text = format_row(headers.iter().map(|(h, _)| *h).collect());
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    text.push_str(&format!("{}\n", rule.join("  ")));
    for row in rows {
        text.push_str(&format_row(row.iter().map(String::as_str).collect()));
    }
    text
}
