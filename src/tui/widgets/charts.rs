//! Terminal drawing of the chart render models.
//!
//! Terminals have no alpha channel and no sub-cell point radius: scatter
//! fills are composited over the theme background and every point is one
//! braille dot.

use super::truncate_str;
use crate::render::{BarChartModel, DonutChartModel, LegendPosition, Rgb, ScatterChartModel};
use crate::tui::theme::colors;
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Points},
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
    },
};
use std::f64::consts::TAU;

/// Inner radius of the donut ring, as a fraction of the outer radius.
const DONUT_HOLE: f64 = 0.55;

/// Color to composite translucent fills over.
#[must_use]
pub fn backdrop(background: Color) -> Rgb {
    match background {
        Color::Rgb(r, g, b) => Rgb::new(r, g, b),
        Color::White => Rgb::new(0xff, 0xff, 0xff),
        _ => Rgb::new(0x0f, 0x17, 0x2a),
    }
}

fn chart_block(title: &str) -> Block<'static> {
    let scheme = colors();
    Block::default()
        .title(format!(" {title} "))
        .title_style(Style::default().fg(scheme.brand).bold())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(scheme.border))
}

// ============================================================================
// Bar chart
// ============================================================================

/// Vertical bars with a count axis on the left.
pub fn render_bar_chart(frame: &mut Frame, area: Rect, title: &str, model: &BarChartModel) {
    let block = chart_block(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width < 8 || inner.height < 3 || model.bars.is_empty() {
        return;
    }

    let ticks = model
        .y_axis
        .ticks(model.max_value(), usize::from(inner.height / 2).max(2));
    let top = ticks.last().copied().unwrap_or(0).max(1);
    let axis_width = ticks
        .iter()
        .map(|t| t.to_string().len())
        .max()
        .unwrap_or(1) as u16
        + 1;

    let [axis_area, bars_area] =
        Layout::horizontal([Constraint::Length(axis_width), Constraint::Min(1)]).areas(inner);

    // Bars leave one row for labels at the bottom.
    let plot_height = bars_area.height.saturating_sub(1).max(1);
    let last_row = f64::from(plot_height - 1);
    let axis_lines: Vec<Line> = (0..plot_height)
        .map(|row| {
            let label = ticks
                .iter()
                .find(|&&t| ((top - t) as f64 / top as f64 * last_row).round() as u16 == row)
                .map(ToString::to_string)
                .unwrap_or_default();
            Line::from(Span::styled(
                format!("{label:>width$}", width = usize::from(axis_width - 1)),
                Style::default().fg(colors().text_muted),
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(axis_lines), axis_area);

    let count = model.bars.len() as u16;
    let gap = 1;
    let bar_width = (bars_area.width.saturating_sub(gap * count.saturating_sub(1)) / count).max(1);
    let bars: Vec<Bar> = model
        .bars
        .iter()
        .map(|bar| {
            Bar::default()
                .value(bar.value)
                .text_value(bar.value.to_string())
                .label(Line::from(truncate_str(&bar.label, usize::from(bar_width))))
                .style(Style::default().fg(Color::from(bar.color)))
                .value_style(
                    Style::default()
                        .fg(colors().on_badge)
                        .bg(Color::from(bar.color)),
                )
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(gap)
        .max(top);
    frame.render_widget(chart, bars_area);
}

// ============================================================================
// Donut chart
// ============================================================================

/// Braille ring divided into slices, legend underneath.
pub fn render_donut_chart(frame: &mut Frame, area: Rect, title: &str, model: &DonutChartModel) {
    let block = chart_block(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width < 4 || inner.height < 3 {
        return;
    }

    let total = model.total();
    if total == 0 {
        frame.render_widget(
            Paragraph::new("No records")
                .style(Style::default().fg(colors().text_muted))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let legend_rows = match model.legend {
        LegendPosition::Bottom => model.slices.len().min(usize::from(inner.height / 2)) as u16,
        LegendPosition::Hidden => 0,
    };
    let [ring_area, legend_area] =
        Layout::vertical([Constraint::Min(2), Constraint::Length(legend_rows)]).areas(inner);

    // Braille dots are roughly square: 2 per cell across, 4 down.
    let dots_x = f64::from(ring_area.width) * 2.0;
    let dots_y = f64::from(ring_area.height) * 4.0;
    let x_extent = 1.1 * (dots_x / dots_y).max(1.0);
    let y_extent = 1.1 * (dots_y / dots_x).max(1.0);
    let slices: Vec<(Color, Vec<(f64, f64)>)> = {
        let mut start = 0.0;
        model
            .slices
            .iter()
            .zip(model.shares())
            .map(|(slice, share)| {
                let sweep = share * TAU;
                let points = ring_points(start, start + sweep, dots_x.max(dots_y));
                start += sweep;
                (Color::from(slice.color), points)
            })
            .collect()
    };

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-x_extent, x_extent])
        .y_bounds([-y_extent, y_extent])
        .paint(|ctx| {
            for (color, coords) in &slices {
                ctx.draw(&Points {
                    coords: coords.as_slice(),
                    color: *color,
                });
            }
        });
    frame.render_widget(canvas, ring_area);

    if legend_rows > 0 {
        let lines: Vec<Line> = model
            .slices
            .iter()
            .zip(model.shares())
            .take(usize::from(legend_rows))
            .map(|(slice, share)| {
                Line::from(vec![
                    Span::styled("■ ", Style::default().fg(Color::from(slice.color))),
                    Span::styled(slice.label.clone(), Style::default().fg(colors().text)),
                    Span::styled(
                        format!(" {} ({:.0}%)", slice.value, share * 100.0),
                        Style::default().fg(colors().text_muted),
                    ),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), legend_area);
    }
}

/// Sample points filling the ring sector between two angles, clockwise
/// from twelve o'clock.
fn ring_points(from: f64, to: f64, resolution: f64) -> Vec<(f64, f64)> {
    let radial_steps = (resolution * 0.25).ceil().max(2.0) as usize;
    let step = 1.0 / resolution.max(1.0);
    let mut points = Vec::new();
    let mut angle = from;
    while angle < to {
        let (sin, cos) = angle.sin_cos();
        for r in 0..=radial_steps {
            let radius = DONUT_HOLE + (1.0 - DONUT_HOLE) * r as f64 / radial_steps as f64;
            points.push((radius * sin, radius * cos));
        }
        angle += step;
    }
    points
}

// ============================================================================
// Scatter chart
// ============================================================================

/// One dataset per series plus an emphasized point for the cursor.
pub fn render_scatter_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    model: &ScatterChartModel,
    cursor: Option<(f64, f64)>,
) {
    let scheme = colors();
    let background = backdrop(scheme.background);
    let (x_bounds, y_bounds) = model.bounds();
    let cursor_data: Vec<(f64, f64)> = cursor.into_iter().collect();

    let mut datasets: Vec<Dataset> = model
        .series
        .iter()
        .map(|series| {
            Dataset::default()
                .name(series.label.clone())
                .marker(Marker::Braille)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::from(series.fill.over(background))))
                .data(&series.coords)
        })
        .collect();
    if !cursor_data.is_empty() {
        datasets.push(
            Dataset::default()
                .marker(Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(scheme.highlight))
                .data(&cursor_data),
        );
    }

    let axis = |name: &str, bounds: [f64; 2]| {
        Axis::default()
            .title(Span::styled(name.to_string(), Style::default().fg(scheme.text_muted)))
            .style(Style::default().fg(scheme.border))
            .bounds(bounds)
            .labels([
                format!("{:.1}", bounds[0]),
                format!("{:.1}", (bounds[0] + bounds[1]) / 2.0),
                format!("{:.1}", bounds[1]),
            ])
    };

    let legend = match model.legend {
        LegendPosition::Bottom => Some(ratatui::widgets::LegendPosition::Bottom),
        LegendPosition::Hidden => None,
    };

    let chart = Chart::new(datasets)
        .block(chart_block(title))
        .x_axis(axis(&model.x_title, x_bounds))
        .y_axis(axis(&model.y_title, y_bounds))
        .legend_position(legend)
        .hidden_legend_constraints((Constraint::Percentage(100), Constraint::Percentage(100)));
    frame.render_widget(chart, area);
}
