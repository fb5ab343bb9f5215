//! Chart widgets: bar, scatter and pie renderings of extracted chart data.

use crate::present::ChartData;
use ratatui::{
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Chart, Dataset, GraphType},
};

/// Series colors, cycled per category.
const SERIES_COLORS: [Color; 8] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Red,
    Color::Blue,
    Color::LightCyan,
    Color::LightGreen,
];

/// Compact berry amount for bar value labels, e.g. `4.5B`.
pub fn short_amount(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.0}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("{:.0}K", value / 1e3)
    } else {
        format!("{value:.0}")
    }
}

/// Builds a bar chart from the extracted points.
pub fn bar_chart(data: &ChartData) -> BarChart<'static> {
    let bars: Vec<Bar> = data
        .points
        .iter()
        .map(|point| {
            Bar::default()
                .value(point.y.max(0.0) as u64)
                .text_value(short_amount(point.y))
                .label(Line::from(truncate_label(&point.label, 12)))
        })
        .collect();

    BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(13)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
}

/// Scatter series grouped by category, with axis bounds.
///
/// The `Chart` widget borrows its point slices, so the series live here and
/// the widget is built against them.
pub struct ScatterSeries {
    series: Vec<(String, Vec<(f64, f64)>)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

/// Groups the extracted points into per-category series.
pub fn scatter_series(data: &ChartData) -> ScatterSeries {
    let mut series: Vec<(String, Vec<(f64, f64)>)> = Vec::new();
    let mut x_bounds = [f64::INFINITY, f64::NEG_INFINITY];
    let mut y_bounds = [f64::INFINITY, f64::NEG_INFINITY];

    for point in &data.points {
        let key = point.category.clone().unwrap_or_default();
        let entry = match series.iter_mut().find(|(name, _)| *name == key) {
            Some(entry) => entry,
            None => {
                series.push((key, Vec::new()));
                series.last_mut().expect("just pushed")
            }
        };
        entry.1.push((point.x, point.y));

        x_bounds[0] = x_bounds[0].min(point.x);
        x_bounds[1] = x_bounds[1].max(point.x);
        y_bounds[0] = y_bounds[0].min(point.y);
        y_bounds[1] = y_bounds[1].max(point.y);
    }

    if series.is_empty() {
        x_bounds = [0.0, 1.0];
        y_bounds = [0.0, 1.0];
    }

    ScatterSeries {
        series,
        x_bounds,
        y_bounds,
    }
}

/// Builds a scatter chart over prepared series.
pub fn scatter_chart(series: &ScatterSeries) -> Chart<'_> {
    let datasets: Vec<Dataset> = series
        .series
        .iter()
        .enumerate()
        .map(|(i, (name, points))| {
            Dataset::default()
                .name(name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(SERIES_COLORS[i % SERIES_COLORS.len()]))
                .data(points)
        })
        .collect();

    let x_labels = vec![
        Span::from(short_amount(series.x_bounds[0])),
        Span::from(short_amount(series.x_bounds[1])),
    ];
    let y_labels = vec![
        Span::from(short_amount(series.y_bounds[0])),
        Span::from(short_amount(series.y_bounds[1])),
    ];

    Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds(pad_bounds(series.x_bounds))
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds(pad_bounds(series.y_bounds))
                .labels(y_labels),
        )
}

/// Renders pie-style slices as percentage lines.
pub fn pie_lines(data: &ChartData) -> Vec<Line<'static>> {
    let total = data.y_total();
    if total <= 0.0 {
        return vec![Line::from(Span::styled(
            "(sem dados)",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    data.points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let share = point.y / total;
            let filled = (share * 24.0).round() as usize;
            let color = SERIES_COLORS[i % SERIES_COLORS.len()];

            Line::from(vec![
                Span::styled(
                    format!("{:<14}", truncate_label(&point.label, 14)),
                    Style::default().fg(color),
                ),
                Span::styled("█".repeat(filled), Style::default().fg(color)),
                Span::from(format!(" {:.1}% ({})", share * 100.0, point.y as i64)),
            ])
        })
        .collect()
}

/// Widens axis bounds slightly so edge points stay visible.
fn pad_bounds(bounds: [f64; 2]) -> [f64; 2] {
    let span = (bounds[1] - bounds[0]).abs().max(1.0);
    [bounds[0] - span * 0.05, bounds[1] + span * 0.05]
}

fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        label.to_string()
    } else {
        label.chars().take(max_chars.saturating_sub(1)).collect::<String>() + "…"
    }
}
