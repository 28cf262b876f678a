//! Plain-text rendering for the terminal.

use std::fmt::Write;

use super::{NO_DATA, PageDocument, Table};

fn width(text: &str) -> usize {
    text.chars().count()
}

fn pad(text: &str, to: usize) -> String {
    let mut out = text.to_string();
    out.extend(std::iter::repeat_n(' ', to.saturating_sub(width(text))));
    out
}

/// Column-aligned table with a title and a header rule.
pub fn table(table: &Table) -> String {
    let mut widths: Vec<usize> = table.columns.iter().map(|c| width(c)).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(width(cell));
            }
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| pad(cell, *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", table.title);
    let _ = writeln!(out, "{}", line(&table.columns));
    let rule: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    let _ = writeln!(out, "{}", "-".repeat(rule));
    if table.is_empty() {
        let _ = writeln!(out, "{NO_DATA}");
    }
    for row in &table.rows {
        let _ = writeln!(out, "{}", line(row));
    }
    out
}

/// Title, status or tables, and a one-line summary per chart.
pub fn document(page: &PageDocument) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", page.title);

    if let Some(status) = &page.status {
        let _ = writeln!(out, "{status}");
        return out;
    }

    if let Some(filter) = &page.filter {
        let show = |v: &str| if v.is_empty() { "All".to_string() } else { v.to_string() };
        let _ = writeln!(
            out,
            "Filter: category = {}, verdict = {}",
            show(&filter.selection.category),
            show(&filter.selection.verdict)
        );
    }

    for t in &page.tables {
        let _ = writeln!(out);
        out.push_str(&table(t));
    }
    for chart in &page.charts {
        let _ = writeln!(out);
        let _ = writeln!(out, "[chart] {} ({} marks)", chart.title, chart.mark_count());
    }
    out
}
