//! Tests for scales, pie geometry, bars and the grouped time chart

use std::f64::consts::{PI, TAU};

use casualty_types::{CategoryCount, ChartFrame, DashboardConfig, Margin, TimeBucket, palette};
use chrono::NaiveDate;

use super::*;

// ═══════════════════════════════════════════════════════════════════════════
// Test Helpers
// ═══════════════════════════════════════════════════════════════════════════

const EPS: f64 = 1e-9;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn bucket(date: NaiveDate, counts: &[(&str, u64)]) -> TimeBucket {
    TimeBucket {
        date,
        counts: counts
            .iter()
            .map(|(c, n)| CategoryCount {
                category: c.to_string(),
                count: *n,
            })
            .collect(),
    }
}

fn labels(domain: &[&str]) -> Vec<String> {
    domain.iter().map(|s| s.to_string()).collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// Scales
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_band_scale_is_centred_with_equal_bands() {
    let x = BandScale::new(labels(&["a", "b", "c"]), (0.0, 100.0), 0.1);
    let step = 100.0 / 3.1;
    assert!(close(x.step(), step));
    assert!(close(x.bandwidth(), step * 0.9));

    let first = x.position("a").unwrap();
    let last = x.position("c").unwrap() + x.bandwidth();
    assert!(close(first, 100.0 - last), "outer gaps are equal");
    assert!(close(x.position("b").unwrap() - first, step));
    assert_eq!(x.position("missing"), None);
}

#[test]
fn test_band_scale_ticks_at_band_centres() {
    let x = BandScale::new(labels(&["Fatah", "Hamas"]), (40.0, 770.0), 0.1);
    let ticks = x.ticks();
    assert_eq!(ticks.len(), 2);
    assert_eq!(ticks[1].label, "Hamas");
    assert!(close(ticks[1].position, x.position("Hamas").unwrap() + x.bandwidth() / 2.0));
}

#[test]
fn test_nice_rounds_domain_outward() {
    let y = LinearScale::new((0.0, 97.0), (360.0, 20.0)).nice(10);
    assert_eq!(y.domain(), (0.0, 100.0));

    let small = LinearScale::new((0.0, 0.97), (1.0, 0.0)).nice(10);
    assert!(close(small.domain().1, 1.0));

    let odd = LinearScale::new((0.0, 27.0), (1.0, 0.0)).nice(10);
    assert_eq!(odd.domain(), (0.0, 28.0));

    let already = LinearScale::new((0.0, 13.0), (1.0, 0.0)).nice(10);
    assert_eq!(already.domain(), (0.0, 13.0));
}

#[test]
fn test_tick_increment_and_ticks() {
    assert_eq!(tick_increment(0.0, 100.0, 10), 10.0);
    assert_eq!(tick_increment(0.0, 20.0, 10), 2.0);
    assert_eq!(tick_increment(0.0, 4.0, 10), -2.0);
    assert_eq!(tick_increment(0.0, 1.0, 10), -10.0);

    let values = ticks(0.0, 100.0, 10);
    assert_eq!(values.len(), 11);
    assert_eq!(values[0], 0.0);
    assert_eq!(values[10], 100.0);
    assert_eq!(ticks(3.0, 3.0, 10), vec![3.0]);
}

#[test]
fn test_linear_ticks_are_formatted_for_their_step() {
    let y = LinearScale::new((0.0, 1.0), (100.0, 0.0));
    let ticks = y.ticks(10);
    assert_eq!(ticks[1].label, "0.1");
    assert!(close(ticks[1].position, 90.0));

    let whole = LinearScale::new((0.0, 20.0), (100.0, 0.0)).ticks(10);
    assert_eq!(whole.last().unwrap().label, "20");
}

#[test]
fn test_degenerate_domains_map_to_midpoint() {
    let y = LinearScale::new((5.0, 5.0), (0.0, 100.0));
    assert_eq!(y.map(5.0), 50.0);

    let t = TimeScale::new(date(2009, 1, 1), date(2009, 1, 1), (50.0, 150.0));
    assert_eq!(t.map(date(2009, 1, 1)), 100.0);
}

#[test]
fn test_zero_max_gets_unit_domain() {
    let y = LinearScale::from_max(0.0, (360.0, 20.0));
    assert_eq!(y.domain(), (0.0, 1.0));
    assert_eq!(y.map(0.0), 360.0);
}

#[test]
fn test_time_scale_maps_days_and_labels_months() {
    let t = TimeScale::new(date(2008, 12, 27), date(2009, 2, 5), (0.0, 400.0));
    assert_eq!(t.map(date(2008, 12, 27)), 0.0);
    assert_eq!(t.map(date(2009, 2, 5)), 400.0);
    assert!(close(t.map(date(2009, 1, 6)), 100.0));

    let months: Vec<String> = t.month_ticks().into_iter().map(|t| t.label).collect();
    assert_eq!(months, vec!["Jan 2009", "Feb 2009"]);

    let from_first = TimeScale::new(date(2009, 1, 1), date(2009, 1, 10), (0.0, 1.0));
    assert_eq!(from_first.month_starts(), vec![date(2009, 1, 1)]);
}

#[test]
fn test_time_scale_from_empty_dates_is_none() {
    assert!(TimeScale::from_dates(Vec::new(), (0.0, 1.0)).is_none());
}

// ═══════════════════════════════════════════════════════════════════════════
// Pie
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_pie_slices_keep_input_order_and_cover_circle() {
    let slices = pie_slices(&[("small", 1), ("large", 3)]);
    assert_eq!(slices[0].label, "small");
    assert_eq!(slices[0].start_angle, 0.0);
    assert!(close(slices[0].end_angle, TAU / 4.0));
    assert!(close(slices[1].start_angle, slices[0].end_angle));
    assert!(close(slices[1].end_angle, TAU));
}

#[test]
fn test_pie_with_zero_total_is_empty() {
    let slices = pie_slices(&[("a", 0), ("b", 0)]);
    assert!(slices.iter().all(|s| s.span() == 0.0));
    assert!(slices[0].path(100.0).is_empty());
    assert_eq!(slice_label("a", 0, 0), "a: 0.0% (0)");
}

#[test]
fn test_percentages_sum_to_hundred() {
    let entries = [("a", 1), ("b", 1), ("c", 1), ("d", 7), ("e", 13)];
    let total: u64 = entries.iter().map(|(_, v)| v).sum();
    let sum: f64 = entries.iter().map(|(_, v)| percent(*v, total)).sum();
    assert!((sum - 100.0).abs() <= 0.1 * entries.len() as f64 + EPS);
    assert_eq!(slice_label("Hamas", 2, 5), "Hamas: 40.0% (2)");
    assert_eq!(slice_label("PIJ", 1, 3), "PIJ: 33.3% (1)");
}

#[test]
fn test_point_at_follows_clockwise_from_top() {
    let top = point_at(0.0, 10.0);
    assert!(close(top.x, 0.0) && close(top.y, -10.0));
    let right = point_at(PI / 2.0, 10.0);
    assert!(close(right.x, 10.0) && close(right.y, 0.0));
    let bottom = point_at(PI, 10.0);
    assert!(close(bottom.y, 10.0));
}

#[test]
fn test_slice_paths() {
    let slices = pie_slices(&[("all", 5)]);
    assert!(slices[0].path(100.0).starts_with("M0,-100.000A"));

    let halves = pie_slices(&[("a", 1), ("b", 1)]);
    let path = halves[0].path(100.0);
    assert!(path.starts_with("M0.000,-100.000A100.000,100.000,0,0,1,"));
    assert!(path.ends_with("L0,0Z"));
}

#[test]
fn test_inside_labels_sit_at_half_radius() {
    let slices = pie_slices(&[("Militia", 1), ("Civilian", 1)]);
    let labels = inside_labels(&slices, 200.0);
    assert!(close(labels[0].anchor.x, 100.0));
    assert!(close(labels[0].anchor.y, 0.0));
    assert_eq!(labels[0].text_anchor, TextAnchor::Middle);
    assert!(labels[0].leader.is_none());
    assert_eq!(labels[1].text, "Civilian: 50.0% (1)");
}

#[test]
fn test_resolve_overlaps_enforces_spacing_without_reordering() {
    let mut ys = vec![0.0, 5.0, 50.0, 52.0, 40.0];
    resolve_overlaps(&mut ys, 20.0);
    assert_eq!(ys, vec![0.0, 20.0, 50.0, 70.0, 90.0]);
}

#[test]
fn test_outside_labels_are_spaced_and_sided() {
    let slices = pie_slices(&[("a", 1), ("b", 1), ("c", 1), ("d", 1), ("e", 30), ("f", 1)]);
    let labels = outside_labels(&slices, 150.0, 20.0);

    for pair in labels.windows(2) {
        assert!(pair[1].anchor.y - pair[0].anchor.y >= 20.0 - EPS);
    }
    for (label, slice) in labels.iter().zip(&slices) {
        let right = slice.mid_angle() < PI;
        assert!(close(label.anchor.x, if right { 165.0 } else { -165.0 }));
        let expected = if right { TextAnchor::Start } else { TextAnchor::End };
        assert_eq!(label.text_anchor, expected);

        let leader = label.leader.unwrap();
        assert_eq!(leader[0], slice.centroid(0.0, 150.0));
        assert_eq!(leader[1], slice.centroid(120.0, 120.0));
        assert_eq!(leader[2], label.anchor);
    }
}

#[test]
fn test_pie_layout_centres_in_frame() {
    let frame = DashboardConfig::default().charts.pie;
    let layout = pie_layout(&[("a", 2), ("b", 2)], &frame, LabelPlacement::Outside { spacing: 20.0 });
    assert_eq!(layout.center, Point::new(400.0, 200.0));
    assert_eq!(layout.radius, 150.0);
    assert_eq!(layout.total(), 4);
    assert!(layout.labels.iter().all(|l| l.leader.is_some()));
}

// ═══════════════════════════════════════════════════════════════════════════
// Bars and colors
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_bar_heights_are_proportional() {
    let config = DashboardConfig::default();
    let colors = ColorMap::from_config(&config);
    let layout = bar_layout(
        &[("Hamas", 10), ("Police", 5)],
        &colors,
        &config.charts.bar,
        config.charts.band_padding,
    );

    assert_eq!(layout.baseline, 360.0);
    assert!(close(layout.bars[0].height, 2.0 * layout.bars[1].height));
    assert!(close(layout.bars[0].y, 20.0), "max value reaches the top margin");
    assert_eq!(layout.bars[0].color, palette::GREEN);
    assert_eq!(layout.bars[1].color, palette::GREY, "unknown labels use the fallback");
    assert_eq!(layout.x_ticks.len(), 2);
    assert_eq!(layout.y_ticks.first().unwrap().label, "0");
}

#[test]
fn test_ordinal_colors_cycle() {
    let domain: Vec<String> = (0..11).map(|i| format!("c{i}")).collect();
    let colors = OrdinalColors::new(domain);
    assert_eq!(colors.color("c0"), palette::CATEGORY10[0]);
    assert_eq!(colors.color("c10"), palette::CATEGORY10[0]);
    assert_eq!(colors.color("c3"), palette::CATEGORY10[3]);
    assert_eq!(colors.color("unknown"), palette::CATEGORY10[1]);
}

#[test]
fn test_split_colors() {
    let config = DashboardConfig::default();
    let colors = ColorMap::split(&config);
    assert_eq!(colors.color(SPLIT_MILITIA), palette::BLUE);
    assert_eq!(colors.color(SPLIT_CIVILIAN), palette::ORANGE);
}

// ═══════════════════════════════════════════════════════════════════════════
// Grouped time bars
// ═══════════════════════════════════════════════════════════════════════════

fn timeline_frame() -> ChartFrame {
    ChartFrame {
        width: 2000.0,
        height: 500.0,
        margin: Margin::new(20.0, 30.0, 50.0, 50.0),
    }
}

#[test]
fn test_grouped_time_bars_geometry() {
    let buckets = vec![
        bucket(date(2008, 12, 27), &[("Hamas", 4), ("PIJ", 2)]),
        bucket(date(2009, 1, 3), &[("Hamas", 1)]),
    ];
    let colors = OrdinalColors::new(labels(&["Hamas", "PIJ"]));
    let layout = grouped_time_bars(&buckets, &timeline_frame(), 4.0, &colors).unwrap();

    // (2000 - 50 - 30) / 2 buckets / 4
    assert!(close(layout.bar_width, 240.0));
    assert_eq!(layout.bars.len(), 3);

    let first = &layout.bars[0];
    let second = &layout.bars[1];
    assert!(close(first.x, 50.0 - 240.0), "group centred on its date");
    assert!(close(second.x, 50.0));
    assert!(close(first.height, 2.0 * second.height));
    assert!(close(first.y + first.height, layout.baseline));

    let last = &layout.bars[2];
    assert!(close(last.x, 1970.0 - 120.0));
    assert_eq!(last.tooltip, "Date: Jan 03, 2009\nClaim: Hamas\nDeaths: 1");
    assert_eq!(first.color, palette::CATEGORY10[0]);
    assert_eq!(second.color, palette::CATEGORY10[1]);
}

#[test]
fn test_grouped_time_bars_sorts_buckets_and_builds_legend() {
    let buckets = vec![
        bucket(date(2009, 1, 3), &[("PIJ", 1)]),
        bucket(date(2008, 12, 27), &[("Hamas", 1)]),
    ];
    let colors = OrdinalColors::new(labels(&["Hamas", "PIJ", "Fatah"]));
    let layout = grouped_time_bars(&buckets, &timeline_frame(), 4.0, &colors).unwrap();

    assert_eq!(layout.bars[0].date, date(2008, 12, 27));
    let legend: Vec<(&str, f64)> = layout
        .legend
        .iter()
        .map(|e| (e.category.as_str(), e.y))
        .collect();
    assert_eq!(legend, vec![("Hamas", 0.0), ("PIJ", 20.0), ("Fatah", 40.0)]);
    assert_eq!(layout.x_ticks[0].label, "Jan 2009");
}

#[test]
fn test_grouped_time_bars_without_buckets() {
    let colors = OrdinalColors::new(Vec::new());
    assert!(grouped_time_bars(&[], &timeline_frame(), 4.0, &colors).is_none());
}
