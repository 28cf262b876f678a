//! SVG output for chart layouts.

use std::fmt::{self, Write};

use casualty_types::{ChartFrame, css_color};

use super::{Chart, ChartBody, NO_DATA, PieChart, escape};
use crate::layout::{BarLayout, TextAnchor, Tick, TimeChartLayout};

const AXIS_COLOR: &str = "currentColor";
const INSIDE_LABEL_SIZE: u32 = 10;
const OUTSIDE_LABEL_SIZE: u32 = 14;
const LEGEND_SWATCH: f64 = 18.0;

/// Render any chart body. Empty charts become a small placeholder.
pub fn chart(chart: &Chart) -> String {
    match &chart.body {
        ChartBody::Pie(pie) => pie_chart(pie),
        ChartBody::Bar(bar) => bar_chart(bar),
        ChartBody::Timeline(timeline) => time_chart(timeline),
        ChartBody::Empty => placeholder(),
    }
}

pub fn pie_chart(pie: &PieChart) -> String {
    let mut out = String::new();
    let _ = write_pie(&mut out, pie);
    out
}

pub fn bar_chart(bar: &BarLayout) -> String {
    let mut out = String::new();
    let _ = write_bar(&mut out, bar);
    out
}

pub fn time_chart(timeline: &TimeChartLayout) -> String {
    let mut out = String::new();
    let _ = write_time(&mut out, timeline);
    out
}

fn placeholder() -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="300" height="40"><text x="150" y="24" text-anchor="middle" fill="{AXIS_COLOR}">{NO_DATA}</text></svg>"#
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Pie
// ─────────────────────────────────────────────────────────────────────────────

fn write_pie(out: &mut String, pie: &PieChart) -> fmt::Result {
    let layout = &pie.layout;
    open_svg(out, layout.width, layout.height)?;
    writeln!(
        out,
        r#"  <g transform="translate({},{})">"#,
        num(layout.center.x),
        num(layout.center.y)
    )?;

    for (slice, fill) in layout.slices.iter().zip(&pie.fills) {
        let d = slice.path(layout.radius);
        if d.is_empty() {
            continue;
        }
        writeln!(
            out,
            r#"    <path d="{}" fill="{}"><title>{}</title></path>"#,
            d,
            css_color(*fill),
            escape(&slice.label)
        )?;
    }

    let outside = layout.labels.iter().any(|l| l.leader.is_some());
    let (size, weight, fill) = if outside {
        (OUTSIDE_LABEL_SIZE, "bold", AXIS_COLOR)
    } else {
        (INSIDE_LABEL_SIZE, "normal", "black")
    };

    for label in &layout.labels {
        if let Some([a, b, c]) = &label.leader {
            writeln!(
                out,
                r#"    <polyline points="{a} {b} {c}" fill="none" stroke="{}" stroke-width="1"/>"#,
                css_color(pie.leader_color)
            )?;
        }
        writeln!(
            out,
            r#"    <text transform="translate({})" dy="0.35em" text-anchor="{}" font-size="{size}" font-weight="{weight}" fill="{fill}">{}</text>"#,
            label.anchor,
            label.text_anchor.as_str(),
            escape(&label.text)
        )?;
    }

    writeln!(out, "  </g>")?;
    close_svg(out)
}

// ─────────────────────────────────────────────────────────────────────────────
// Bars
// ─────────────────────────────────────────────────────────────────────────────

fn write_bar(out: &mut String, bar: &BarLayout) -> fmt::Result {
    let frame = &bar.frame;
    open_svg(out, frame.width, frame.height)?;
    bottom_axis(out, frame, bar.baseline, &bar.x_ticks, true)?;
    left_axis(out, frame, &bar.y_ticks)?;

    for b in &bar.bars {
        writeln!(
            out,
            r#"  <rect class="bar" x="{}" y="{}" width="{}" height="{}" fill="{}"><title>{}: {}</title></rect>"#,
            num(b.x),
            num(b.y),
            num(b.width),
            num(b.height),
            css_color(b.color),
            escape(&b.label),
            b.value
        )?;
    }
    close_svg(out)
}

// ─────────────────────────────────────────────────────────────────────────────
// Grouped time bars
// ─────────────────────────────────────────────────────────────────────────────

fn write_time(out: &mut String, chart: &TimeChartLayout) -> fmt::Result {
    let frame = &chart.frame;
    open_svg(out, frame.width, frame.height)?;
    bottom_axis(out, frame, chart.baseline, &chart.x_ticks, false)?;
    left_axis(out, frame, &chart.y_ticks)?;

    for b in &chart.bars {
        writeln!(
            out,
            r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}"><title>{}</title></rect>"#,
            num(b.x),
            num(b.y),
            num(b.width),
            num(b.height),
            css_color(b.color),
            escape(&b.tooltip)
        )?;
    }

    for entry in &chart.legend {
        writeln!(
            out,
            r#"  <g class="legend" transform="translate(0,{})"><rect x="{}" width="{LEGEND_SWATCH}" height="{LEGEND_SWATCH}" fill="{}"/><text x="{}" y="9" dy="0.35em" text-anchor="end" fill="white">{}</text></g>"#,
            num(entry.y),
            num(frame.width - LEGEND_SWATCH),
            css_color(entry.color),
            num(frame.width - 24.0),
            escape(&entry.category)
        )?;
    }
    close_svg(out)
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared pieces
// ─────────────────────────────────────────────────────────────────────────────

/// Fixed three-decimal coordinates with trailing zeros dropped
fn num(value: f64) -> String {
    let formatted = format!("{:.3}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

fn open_svg(out: &mut String, width: f64, height: f64) -> fmt::Result {
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
        w = num(width),
        h = num(height)
    )
}

fn close_svg(out: &mut String) -> fmt::Result {
    writeln!(out, "</svg>")
}

fn bottom_axis(
    out: &mut String,
    frame: &ChartFrame,
    y: f64,
    ticks: &[Tick],
    rotate: bool,
) -> fmt::Result {
    let m = frame.margin;
    writeln!(out, r#"  <g class="x-axis" transform="translate(0,{})" font-size="10">"#, num(y))?;
    writeln!(
        out,
        r#"    <line x1="{}" x2="{}" stroke="{AXIS_COLOR}"/>"#,
        num(m.left),
        num(frame.width - m.right)
    )?;
    for tick in ticks {
        let anchor = if rotate { TextAnchor::End } else { TextAnchor::Middle };
        let transform = if rotate { r#" transform="rotate(-45)""# } else { "" };
        let tick_len = if rotate { 0.0 } else { 6.0 };
        writeln!(
            out,
            r#"    <g transform="translate({},0)"><line y2="{}" stroke="{AXIS_COLOR}"/><text y="{}" dy="0.71em" text-anchor="{}" fill="{AXIS_COLOR}"{transform}>{}</text></g>"#,
            num(tick.position),
            num(tick_len),
            num(tick_len + 3.0),
            anchor.as_str(),
            escape(&tick.label)
        )?;
    }
    writeln!(out, "  </g>")
}

fn left_axis(out: &mut String, frame: &ChartFrame, ticks: &[Tick]) -> fmt::Result {
    let m = frame.margin;
    writeln!(out, r#"  <g class="y-axis" transform="translate({},0)" font-size="10">"#, num(m.left))?;
    writeln!(
        out,
        r#"    <line y1="{}" y2="{}" stroke="{AXIS_COLOR}"/>"#,
        num(m.top),
        num(frame.height - m.bottom)
    )?;
    for tick in ticks {
        writeln!(
            out,
            r#"    <g transform="translate(0,{})"><line x2="-6" stroke="{AXIS_COLOR}"/><text x="-9" dy="0.32em" text-anchor="end" fill="{AXIS_COLOR}">{}</text></g>"#,
            num(tick.position),
            escape(&tick.label)
        )?;
    }
    writeln!(out, "  </g>")
}
