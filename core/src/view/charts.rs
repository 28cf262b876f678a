//! Charts shown by each page.

use casualty_types::{GroupSummary, SplitTotals, SummaryOrder};

use super::{Page, PageData};
use crate::aggregate::{FixedGroupOptions, arrange};
use crate::filter::distinct_values;
use crate::layout::{
    CategoryColors, ColorMap, LabelPlacement, OrdinalColors, SPLIT_CIVILIAN, SPLIT_MILITIA,
    bar_layout, grouped_time_bars, pie_layout,
};
use crate::render::{Chart, ChartBody, PieChart};

pub fn page_charts(page: Page, data: &PageData<'_>) -> Vec<Chart> {
    match page {
        Page::Records => Vec::new(),
        Page::Organizations => {
            let alphabetical = if data.summary.record_count > 0 {
                arrange(
                    &data.summary.losses,
                    &FixedGroupOptions::ordered(SummaryOrder::Alphabetical),
                )
            } else {
                Vec::new()
            };
            vec![
                deaths_by_affiliation(data, &alphabetical),
                militia_pie(data, "Militia Losses by Orient Affiliation", &alphabetical, LabelPlacement::Inside),
                split_pie(data, "Militant vs Civilian Casualties", data.summary.split()),
            ]
        }
        Page::AffiliationLosses => {
            let losses = if data.summary.record_count > 0 {
                data.summary
                    .chart_losses(data.aggregate, SummaryOrder::MilitiaAscending)
            } else {
                Vec::new()
            };
            let placement = LabelPlacement::Outside {
                spacing: data.config.charts.label_spacing,
            };
            vec![militia_pie(data, "Militia Losses by Orient Affiliation", &losses, placement)]
        }
        Page::CivilianLosses => vec![split_pie(
            data,
            "Militant vs Civilian Casualties",
            data.summary.open_split(),
        )],
        Page::Verdicts => vec![verdict_bars(data)],
        Page::Timeline => vec![timeline(data)],
    }
}

fn deaths_by_affiliation(data: &PageData<'_>, losses: &[GroupSummary]) -> Chart {
    let title = "Deaths by Orient Affiliation";
    if losses.is_empty() {
        return Chart::new(title, ChartBody::Empty);
    }
    let entries: Vec<(&str, u64)> = losses.iter().map(|s| (s.category.as_str(), s.total)).collect();
    let charts = &data.config.charts;
    let layout = bar_layout(
        &entries,
        &ColorMap::from_config(data.config),
        &charts.bar,
        charts.band_padding,
    );
    Chart::new(title, ChartBody::Bar(layout))
}

fn pie_chart(
    data: &PageData<'_>,
    title: &str,
    entries: &[(&str, u64)],
    colors: &impl CategoryColors,
    placement: LabelPlacement,
) -> Chart {
    let total: u64 = entries.iter().map(|(_, v)| v).sum();
    if total == 0 {
        return Chart::new(title, ChartBody::Empty);
    }
    let layout = pie_layout(entries, &data.config.charts.pie, placement);
    let fills = layout.slices.iter().map(|s| colors.color(&s.label)).collect();
    Chart::new(
        title,
        ChartBody::Pie(PieChart {
            layout,
            fills,
            leader_color: data.config.leader_line_color,
        }),
    )
}

fn militia_pie(
    data: &PageData<'_>,
    title: &str,
    losses: &[GroupSummary],
    placement: LabelPlacement,
) -> Chart {
    let entries: Vec<(&str, u64)> = losses
        .iter()
        .map(|s| (s.category.as_str(), s.militia_count))
        .collect();
    pie_chart(data, title, &entries, &ColorMap::from_config(data.config), placement)
}

fn split_pie(data: &PageData<'_>, title: &str, split: SplitTotals) -> Chart {
    let entries = [(SPLIT_MILITIA, split.militia), (SPLIT_CIVILIAN, split.civilian)];
    pie_chart(
        data,
        title,
        &entries,
        &ColorMap::split(data.config),
        LabelPlacement::Inside,
    )
}

fn verdict_bars(data: &PageData<'_>) -> Chart {
    let title = "Deaths by Verdict";
    let verdicts = &data.summary.verdicts;
    if verdicts.is_empty() {
        return Chart::new(title, ChartBody::Empty);
    }
    let entries: Vec<(&str, u64)> = verdicts.iter().map(|v| (v.verdict.as_str(), v.count)).collect();
    let colors = OrdinalColors::new(verdicts.iter().map(|v| v.verdict.clone()).collect());
    let charts = &data.config.charts;
    let layout = bar_layout(&entries, &colors, &charts.bar, charts.band_padding);
    Chart::new(title, ChartBody::Bar(layout))
}

fn timeline(data: &PageData<'_>) -> Chart {
    let title = "Deaths Timeline";
    let colors = OrdinalColors::new(distinct_values(
        data.records.iter().copied(),
        data.kind.category_field(),
    ));
    let charts = &data.config.charts;
    match grouped_time_bars(
        &data.summary.timeline,
        &charts.timeline,
        charts.time_bar_divisor,
        &colors,
    ) {
        Some(layout) => Chart::new(title, ChartBody::Timeline(layout)),
        None => Chart::new(title, ChartBody::Empty),
    }
}
