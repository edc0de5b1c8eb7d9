//! Sales-over-time line chart with the fixed price-increase annotation.
//!
//! All series points, bounds and labels are computed outside the render
//! call ([`build_chart_data`]), which keeps the render functions focused on
//! drawing and makes the data prep testable on its own.

use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use morsel_core::formatting;
use morsel_core::models::{price_increase_date, DailySales, RegionFilter};
use morsel_data::aggregator::SalesAggregator;

use crate::themes::Theme;

// ── ChartViewData ─────────────────────────────────────────────────────────────

/// Everything the chart render needs, precomputed.
#[derive(Debug, Clone)]
pub struct ChartViewData {
    /// `(day number, sales)` points for the line series.
    pub series: Vec<(f64, f64)>,
    /// The vertical event marker, bottom to top, at the event date.
    pub marker: [(f64, f64); 2],
    /// X bounds in day numbers; always include the event date.
    pub x_bounds: [f64; 2],
    /// Y bounds; `[0, ~1.1 * peak]`, or `[0, 1]` for an empty series.
    pub y_bounds: [f64; 2],
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
    /// Annotation text for the event marker.
    pub event_label: String,
    /// Peak sales of the displayed series (`0` when empty); the value the
    /// annotation is anchored at.
    pub event_y: f64,
    pub region_label: String,
    pub total: f64,
    pub days: usize,
}

/// Prepare chart data for a daily aggregate under the given region filter.
pub fn build_chart_data(series: &[DailySales], filter: &RegionFilter) -> ChartViewData {
    let event_date = price_increase_date();
    let event_x = day_number(event_date);

    let points: Vec<(f64, f64)> = series
        .iter()
        .map(|d| (day_number(d.date), d.sales))
        .collect();

    let peak = SalesAggregator::peak_sales(series);
    let total = SalesAggregator::total_sales(series);

    // The marker is always shown, so the x range must cover the event date
    // even when the data lies entirely on one side of it (or is absent).
    let mut x_min = event_x;
    let mut x_max = event_x;
    if let (Some(first), Some(last)) = (series.first(), series.last()) {
        x_min = x_min.min(day_number(first.date));
        x_max = x_max.max(day_number(last.date));
    }
    if x_max - x_min < 2.0 {
        x_min -= 1.0;
        x_max += 1.0;
    }

    let y_max = if peak > 0.0 { peak * 1.1 } else { 1.0 };

    let x_labels = vec![
        date_label(x_min),
        date_label((x_min + x_max) / 2.0),
        date_label(x_max),
    ];
    let y_labels = vec![
        formatting::format_number(0.0, 0),
        formatting::format_number(y_max / 2.0, 0),
        formatting::format_number(y_max, 0),
    ];

    ChartViewData {
        series: points,
        marker: [(event_x, 0.0), (event_x, y_max)],
        x_bounds: [x_min, x_max],
        y_bounds: [0.0, y_max],
        x_labels,
        y_labels,
        event_label: format!("Price increase {}", event_date),
        event_y: peak,
        region_label: filter.label().to_string(),
        total,
        days: series.len(),
    }
}

// ── Render ────────────────────────────────────────────────────────────────────

/// Render the line chart plus the annotation / summary footer into `area`.
pub fn render_chart_view(frame: &mut Frame, area: Rect, data: &ChartViewData, theme: &Theme) {
    let [chart_area, footer_area] =
        Layout::vertical([Constraint::Min(8), Constraint::Length(2)]).areas(area);

    let datasets = vec![
        Dataset::default()
            .name(format!("sales ({})", data.region_label))
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.chart_line)
            .data(&data.series),
        Dataset::default()
            .name("price increase")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.event_marker)
            .data(&data.marker),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Pink Morsel Sales Over Time "),
        )
        .x_axis(
            Axis::default()
                .title("Date")
                .style(theme.chart_axis)
                .bounds(data.x_bounds)
                .labels(data.x_labels.clone()),
        )
        .y_axis(
            Axis::default()
                .title("Sales ($)")
                .style(theme.chart_axis)
                .bounds(data.y_bounds)
                .labels(data.y_labels.clone()),
        )
        .style(theme.text);

    frame.render_widget(chart, chart_area);

    let footer = vec![
        Line::from(Span::styled(
            format!(
                "▲ {} (at {})",
                data.event_label,
                formatting::format_currency(data.event_y)
            ),
            theme.event_marker,
        )),
        Line::from(vec![
            Span::styled(
                format!(
                    "Total {} across {} days",
                    formatting::format_currency(data.total),
                    data.days
                ),
                theme.value,
            ),
            Span::styled(
                format!("  ·  region: {}", data.region_label),
                theme.label,
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(footer), footer_area);
}

/// Render a placeholder when the artifact cannot be shown at all.
pub fn render_no_data(frame: &mut Frame, area: Rect, message: &str, hint: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme.error)),
        Line::from(""),
        Line::from(Span::styled(hint.to_string(), theme.warning)),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Pink Morsel Sales Visualiser "),
        ),
        area,
    );
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Continuous x coordinate for a calendar date.
fn day_number(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// Axis label for an x coordinate produced by [`day_number`].
fn date_label(day: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(day.round() as i32)
        .map(|d| d.to_string())
        .unwrap_or_default()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
