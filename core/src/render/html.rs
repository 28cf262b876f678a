//! Self-contained HTML pages.
//!
//! Each page carries its own stylesheet and inline SVG charts, so an
//! exported file opens offline with nothing else next to it.

use super::{FilterControls, NO_DATA, PageDocument, Table, escape, svg};

/// Render a full HTML document for one page.
pub fn document(page: &PageDocument) -> String {
    let body = match &page.status {
        Some(status) => format!(r#"<p class="status">{}</p>"#, escape(status)),
        None => render_content(page),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        <h1>{title}</h1>
        {body}
    </div>
</body>
</html>
"#,
        title = escape(&page.title),
        css = inline_css(),
        body = body,
    )
}

fn render_content(page: &PageDocument) -> String {
    let mut sections = Vec::new();
    if let Some(filter) = &page.filter {
        sections.push(render_filter(filter));
    }
    sections.extend(page.tables.iter().map(render_table));
    sections.extend(page.charts.iter().map(|chart| {
        format!(
            r#"<section class="chart">
    <h2>{title}</h2>
    <div class="chart-frame">{svg}</div>
</section>"#,
            title = escape(&chart.title),
            svg = svg::chart(chart),
        )
    }));
    sections.join("\n")
}

/// Render a table, with a single placeholder row when it has no rows.
pub fn render_table(table: &Table) -> String {
    let head: String = table
        .columns
        .iter()
        .map(|c| format!("<th>{}</th>", escape(c)))
        .collect();

    let rows: String = if table.is_empty() {
        format!(
            r#"<tr><td class="empty" colspan="{}">{NO_DATA}</td></tr>"#,
            table.columns.len().max(1)
        )
    } else {
        table
            .rows
            .iter()
            .map(|row| {
                let cells: String = row
                    .iter()
                    .map(|cell| format!("<td>{}</td>", escape(cell)))
                    .collect();
                format!("<tr>{cells}</tr>\n")
            })
            .collect()
    };

    format!(
        r#"<section class="table">
    <h2>{title}</h2>
    <table>
        <thead><tr>{head}</tr></thead>
        <tbody>
{rows}
        </tbody>
    </table>
</section>"#,
        title = escape(&table.title),
    )
}

/// Category and verdict selectors, with the current selection marked.
pub fn render_filter(filter: &FilterControls) -> String {
    format!(
        r#"<form class="filters">
    <div class="filter-group">
        <label for="category-filter">{category_label}</label>
        <select id="category-filter" name="category">{categories}</select>
    </div>
    <div class="filter-group">
        <label for="verdict-filter">Verdict</label>
        <select id="verdict-filter" name="verdict">{verdicts}</select>
    </div>
</form>"#,
        category_label = escape(&filter.category_label),
        categories = render_options(&filter.options.categories, &filter.selection.category),
        verdicts = render_options(&filter.options.verdicts, &filter.selection.verdict),
    )
}

fn render_options(values: &[String], selected: &str) -> String {
    let mut html = option_tag("", "All", selected.is_empty());
    for value in values {
        html.push_str(&option_tag(value, value, value == selected));
    }
    html
}

fn option_tag(value: &str, label: &str, selected: bool) -> String {
    format!(
        r#"<option value="{}"{}>{}</option>"#,
        escape(value),
        if selected { " selected" } else { "" },
        escape(label)
    )
}

fn inline_css() -> &'static str {
    r#"
body { margin: 0; background: #111827; color: #e5e7eb; font-family: system-ui, sans-serif; }
.container { max-width: 1200px; margin: 0 auto; padding: 24px; overflow-x: auto; }
h1 { text-align: center; font-size: 2rem; margin-bottom: 32px; }
h2 { text-align: center; font-size: 1.5rem; margin: 32px 0 16px; }
.status { text-align: center; color: #9ca3af; }
.filters { display: flex; gap: 16px; justify-content: center; margin-bottom: 16px; }
.filter-group { display: flex; flex-direction: column; gap: 4px; }
select { background: #1f2937; color: #e5e7eb; border: 1px solid #4b5563; padding: 4px 8px; }
table { width: 100%; border-collapse: collapse; background: #1f2937; }
th, td { border: 1px solid #4b5563; padding: 6px 10px; text-align: left; }
th { background: #374151; }
td.empty { text-align: center; color: #9ca3af; }
.chart-frame { display: flex; justify-content: center; padding: 16px; background: #374151; border: 1px solid #4b5563; border-radius: 8px; color: #e5e7eb; }
"#
}
