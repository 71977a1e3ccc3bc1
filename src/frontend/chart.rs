//! Widget construction for one frame
//!
//! Widgets are rebuilt from the [`RenderFrame`] on every draw, so the Y axis
//! always fits the samples currently on screen.

use crate::pipeline::{bounds, RenderFrame};
use crate::types::ChartMode;
use ratatui::{prelude::*, widgets::*};

/// Title of the side list panel
pub const LIST_TITLE: &str = "Data";

/// Draw the chart and list panels for `frame`
pub fn draw_frame(f: &mut Frame, frame: &RenderFrame) {
    let columns = Layout::horizontal([
        Constraint::Length(frame.layout.chart_width),
        Constraint::Min(0),
    ])
    .split(f.area());

    draw_chart(f, columns[0], frame);
    draw_list(f, columns[1], frame);
}

fn marker(mode: ChartMode) -> symbols::Marker {
    match mode {
        ChartMode::Braille => symbols::Marker::Braille,
        ChartMode::Dot => symbols::Marker::Dot,
    }
}

/// Y bounds for a series, widened when every value is equal
///
/// The padded bounds stay finite even for values near `f64::MAX`.
fn y_bounds(series: &[f64]) -> [f64; 2] {
    match bounds(series) {
        None => [0.0, 1.0],
        Some((lo, hi)) if lo == hi => {
            let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.1 };
            [(lo - pad).max(f64::MIN), (hi + pad).min(f64::MAX)]
        }
        Some((lo, hi)) => [lo, hi],
    }
}

fn format_value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{:.3}", v)
    }
}

fn draw_chart(f: &mut Frame, area: Rect, frame: &RenderFrame) {
    let points: Vec<(f64, f64)> = frame
        .chart
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect();

    let [y_min, y_max] = y_bounds(&frame.chart);
    let x_max = (points.len().saturating_sub(1)).max(1) as f64;

    let datasets = if points.is_empty() {
        Vec::new()
    } else {
        vec![Dataset::default()
            .marker(marker(frame.mode))
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .data(&points)]
    };

    let chart = Chart::new(datasets)
        .block(Block::bordered().title(format!(" {} ", frame.label)))
        .x_axis(Axis::default().bounds([0.0, x_max]))
        .y_axis(
            Axis::default()
                .bounds([y_min, y_max])
                .style(Style::default().fg(Color::DarkGray))
                .labels([format_value(y_min), format_value(y_max)]),
        );
    f.render_widget(chart, area);
}

fn draw_list(f: &mut Frame, area: Rect, frame: &RenderFrame) {
    let items: Vec<ListItem> = frame
        .recent
        .iter()
        .map(|&v| ListItem::new(v.to_string()))
        .collect();
    let list = List::new(items).block(Block::bordered().title(LIST_TITLE));
    f.render_widget(list, area);
}
