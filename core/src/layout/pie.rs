//! Pie slices and their labels.
//!
//! Angles are in radians, measured clockwise from 12 o'clock. Points are
//! relative to the pie centre with y growing downward.

use std::f64::consts::{PI, TAU};
use std::fmt::Write;

use casualty_types::ChartFrame;

use super::Point;

// ─────────────────────────────────────────────────────────────────────────────
// Slices
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl PieSlice {
    pub fn mid_angle(&self) -> f64 {
        self.start_angle + (self.end_angle - self.start_angle) / 2.0
    }

    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Centre of the annulus section between `inner` and `outer` radii
    pub fn centroid(&self, inner: f64, outer: f64) -> Point {
        point_at(self.mid_angle(), (inner + outer) / 2.0)
    }

    /// SVG path data for the slice as a wedge of the given radius.
    /// Empty slices produce an empty string.
    pub fn path(&self, radius: f64) -> String {
        let span = self.span();
        if span <= 0.0 || radius <= 0.0 {
            return String::new();
        }

        let mut d = String::new();
        if span >= TAU - 1e-9 {
            // Full circle: two half arcs
            let _ = write!(
                d,
                "M0,{top:.3}A{r:.3},{r:.3},0,1,1,0,{bottom:.3}A{r:.3},{r:.3},0,1,1,0,{top:.3}Z",
                r = radius,
                top = -radius,
                bottom = radius,
            );
            return d;
        }

        let from = point_at(self.start_angle, radius);
        let to = point_at(self.end_angle, radius);
        let large_arc = u8::from(span > PI);
        let _ = write!(
            d,
            "M{:.3},{:.3}A{r:.3},{r:.3},0,{},1,{:.3},{:.3}L0,0Z",
            from.x,
            from.y,
            large_arc,
            to.x,
            to.y,
            r = radius,
        );
        d
    }
}

/// Point on a circle of radius `r` at `angle`
pub fn point_at(angle: f64, r: f64) -> Point {
    Point::new(r * angle.sin(), -r * angle.cos())
}

/// Cumulative slices in input order. Each spans 2π·value/Σ; a zero total
/// leaves every slice empty at angle 0.
pub fn pie_slices<S: AsRef<str>>(entries: &[(S, u64)]) -> Vec<PieSlice> {
    let total: u64 = entries.iter().map(|(_, v)| v).sum();
    let scale = if total == 0 { 0.0 } else { TAU / total as f64 };

    let mut angle = 0.0;
    entries
        .iter()
        .map(|(label, value)| {
            let start_angle = angle;
            angle += *value as f64 * scale;
            PieSlice {
                label: label.as_ref().to_string(),
                value: *value,
                start_angle,
                end_angle: angle,
            }
        })
        .collect()
}

/// Share of `total`, in percent rounded to one decimal.
pub fn percent(value: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (value as f64 / total as f64 * 1000.0).round() / 10.0
}

/// "Hamas: 40.0% (12)"
pub fn slice_label(label: &str, value: u64, total: u64) -> String {
    format!("{}: {:.1}% ({})", label, percent(value, total), value)
}

// ─────────────────────────────────────────────────────────────────────────────
// Labels
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Where a slice label is drawn and, for outside labels, the leader line
/// connecting it to its slice.
#[derive(Debug, Clone, PartialEq)]
pub struct PieLabel {
    pub text: String,
    pub anchor: Point,
    pub text_anchor: TextAnchor,
    pub leader: Option<[Point; 3]>,
}

fn slices_total(slices: &[PieSlice]) -> u64 {
    slices.iter().map(|s| s.value).sum()
}

/// Labels centred on each slice at half the radius.
pub fn inside_labels(slices: &[PieSlice], radius: f64) -> Vec<PieLabel> {
    let total = slices_total(slices);
    slices
        .iter()
        .map(|s| PieLabel {
            text: slice_label(&s.label, s.value, total),
            anchor: s.centroid(0.0, radius),
            text_anchor: TextAnchor::Middle,
            leader: None,
        })
        .collect()
}

/// Push each y down until it sits at least `spacing` below its
/// predecessor. Order is never changed.
pub fn resolve_overlaps(ys: &mut [f64], spacing: f64) {
    for i in 1..ys.len() {
        if ys[i] - ys[i - 1] < spacing {
            ys[i] = ys[i - 1] + spacing;
        }
    }
}

/// Labels beside the pie, stacked by slice order and joined to their
/// slices by leader lines.
pub fn outside_labels(slices: &[PieSlice], radius: f64, spacing: f64) -> Vec<PieLabel> {
    let total = slices_total(slices);
    let label_radius = radius * 0.8;
    let n = slices.len() as f64;

    let mut ys: Vec<f64> = slices
        .iter()
        .enumerate()
        .map(|(i, s)| s.centroid(label_radius, label_radius).y + i as f64 * spacing - n * spacing / 2.0)
        .collect();
    resolve_overlaps(&mut ys, spacing);

    slices
        .iter()
        .zip(ys)
        .map(|(s, y)| {
            let right = s.mid_angle() < PI;
            let x = radius * 1.1 * if right { 1.0 } else { -1.0 };
            let anchor = Point::new(x, y);
            PieLabel {
                text: slice_label(&s.label, s.value, total),
                anchor,
                text_anchor: if right { TextAnchor::Start } else { TextAnchor::End },
                leader: Some([
                    s.centroid(0.0, radius),
                    s.centroid(label_radius, label_radius),
                    anchor,
                ]),
            }
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Layout
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LabelPlacement {
    Inside,
    Outside { spacing: f64 },
}

/// A complete pie: slices, labels and placement within its frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PieLayout {
    pub width: f64,
    pub height: f64,
    pub center: Point,
    pub radius: f64,
    pub slices: Vec<PieSlice>,
    pub labels: Vec<PieLabel>,
}

impl PieLayout {
    pub fn total(&self) -> u64 {
        slices_total(&self.slices)
    }
}

pub fn pie_layout<S: AsRef<str>>(
    entries: &[(S, u64)],
    frame: &ChartFrame,
    placement: LabelPlacement,
) -> PieLayout {
    let radius = frame.pie_radius();
    let slices = pie_slices(entries);
    let labels = match placement {
        LabelPlacement::Inside => inside_labels(&slices, radius),
        LabelPlacement::Outside { spacing } => outside_labels(&slices, radius, spacing),
    };
    PieLayout {
        width: frame.width,
        height: frame.height,
        center: Point::new(frame.width / 2.0, frame.height / 2.0),
        radius,
        slices,
        labels,
    }
}
