//! Plain-text table previews.

use std::fmt::Write;

use crate::models::table::Table;

const MAX_CELL_WIDTH: usize = 40;

/// Render at most `max_rows` rows as an aligned text table.
///
/// A footer line is added when rows were left out.
pub fn render_preview(table: &Table, max_rows: usize) -> String {
    let shown = table.head(max_rows);

    let cells: Vec<Vec<String>> = shown
        .rows()
        .iter()
        .map(|row| row.values().iter().map(|v| clip(&v.to_string())).collect())
        .collect();

    let mut widths: Vec<usize> = table.columns().iter().map(|c| clip(c).chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = table.columns().iter().map(|c| clip(c)).collect();
    push_line(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &cells {
        push_line(&mut out, row, &widths);
    }

    if table.len() > shown.len() {
        let _ = writeln!(out, "... showing {} of {} rows", shown.len(), table.len());
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    let _ = writeln!(out, "{}", line.join(" | ").trim_end());
}

fn clip(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_WIDTH {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(MAX_CELL_WIDTH - 1).collect();
    clipped.push('…');
    clipped
}
