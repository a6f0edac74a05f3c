//! Text renderings of student listings.

use std::fmt::Write as _;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::record::{Field, Student};

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// One record per line, fields separated by ` | `
    Plain,
    /// Aligned table with column headings
    #[default]
    Table,
    /// JSON array of records
    Json,
}

/// Render rows in the requested format.
///
/// `max_width` caps table cells; longer values are cut and end in `~`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_rows(rows: &[Student], format: OutputFormat, max_width: usize) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(render_plain(rows)),
        OutputFormat::Table => Ok(render_table(rows, max_width)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
    }
}

fn render_plain(rows: &[Student]) -> String {
    let mut out = String::new();
    for row in rows {
        let cells: Vec<&str> = Field::ALL.iter().map(|f| row.get(*f)).collect();
        out.push_str(&cells.join(" | "));
        out.push('\n');
    }
    out
}

fn render_table(rows: &[Student], max_width: usize) -> String {
    let widths: Vec<usize> = Field::ALL
        .iter()
        .map(|field| {
            rows.iter()
                .map(|row| row.get(*field).chars().count())
                .chain(std::iter::once(field.heading().chars().count()))
                .max()
                .unwrap_or(0)
                .min(max_width)
        })
        .collect();

    let mut out = String::new();
    let headings: Vec<&str> = Field::ALL.iter().map(|f| f.heading()).collect();
    push_line(&mut out, &headings, &widths);

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
    push_line(&mut out, &rule, &widths);

    for row in rows {
        let cells: Vec<&str> = Field::ALL.iter().map(|f| row.get(*f)).collect();
        push_line(&mut out, &cells, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[&str], widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let _ = write!(line, "{:<width$}", fit(cell, *width), width = *width);
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Cut `cell` to `width` characters, marking the cut with `~`.
fn fit(cell: &str, width: usize) -> String {
    if cell.chars().count() <= width {
        return cell.to_string();
    }
    let mut cut: String = cell.chars().take(width.saturating_sub(1)).collect();
    cut.push('~');
    cut
}

/// Render one record as labelled lines, as the editor form shows it.
#[must_use]
pub fn render_record(record: &Student) -> String {
    let label_width = Field::ALL
        .iter()
        .map(|f| f.heading().len())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for field in Field::ALL {
        let _ = writeln!(
            out,
            "{:<label_width$}  {}",
            field.heading(),
            record.get(field),
            label_width = label_width
        );
    }
    out
}
