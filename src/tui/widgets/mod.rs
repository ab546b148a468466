//! Custom widgets for the TUI.

mod charts;

pub use charts::{backdrop, render_bar_chart, render_donut_chart, render_scatter_chart};

use crate::model::{ClassificationResult, Severity};
use crate::render::severity_color;
use crate::tui::theme::colors;
use ratatui::{
    layout::Flex,
    prelude::*,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

/// Render an empty state placeholder.
pub fn render_empty_state(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let scheme = colors();
    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::styled(message.to_string(), Style::default().fg(scheme.text_muted)),
    ])
    .block(
        Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(scheme.border)),
    )
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Draw `content` in a bordered box sized to fit it, centered over `area`.
///
/// Content wider or taller than `area` is wrapped and clipped.
pub fn render_overlay(frame: &mut Frame, area: Rect, title: &str, content: Vec<Line<'static>>) {
    let scheme = colors();
    let inner_width = content
        .iter()
        .map(Line::width)
        .chain([title.chars().count() + 2])
        .max()
        .unwrap_or(0);
    // Two border cells plus one cell of padding on each side.
    let width = u16::try_from(inner_width + 4).unwrap_or(u16::MAX);
    let height = u16::try_from(content.len() + 2).unwrap_or(u16::MAX);
    let overlay = centered_area(area, width, height);
    frame.render_widget(Clear, overlay);

    let block = Block::bordered()
        .title(format!(" {title} "))
        .title_style(Style::default().fg(scheme.border_focused).bold())
        .border_style(Style::default().fg(scheme.border_focused))
        .padding(Padding::horizontal(1));
    frame.render_widget(
        Paragraph::new(content)
            .block(block)
            .wrap(Wrap { trim: false }),
        overlay,
    );
}

/// A `width` by `height` rectangle centered in `area`, shrunk to fit it.
pub fn centered_area(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// Truncate a string with ellipsis, using Unicode display width for accuracy.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut width = 0;
    let mut out: String = s
        .chars()
        .take_while(|ch| {
            width += UnicodeWidthChar::width(*ch).unwrap_or(0);
            width < max_width
        })
        .collect();
    out.push('…');
    out
}

/// Badge span for a classification's severity.
///
/// Unrecognized severities keep their text but get the `low` colors.
pub fn severity_badge(result: &ClassificationResult) -> Span<'static> {
    let severity = result.severity().unwrap_or(Severity::Low);
    let mut style = Style::default()
        .fg(colors().on_badge)
        .bg(Color::from(severity_color(severity.as_str())));
    if severity >= Severity::High {
        style = style.bold();
    }
    Span::styled(format!(" {} ", result.severity_label()), style)
}

// ============================================================================
// Terminal size
// ============================================================================

pub const MIN_WIDTH: u16 = 80;
pub const MIN_HEIGHT: u16 = 24;

/// Whether the full dashboard layout fits.
pub const fn fits_terminal(width: u16, height: u16) -> bool {
    width >= MIN_WIDTH && height >= MIN_HEIGHT
}

/// Shown in place of the dashboard when the terminal is too small.
pub fn render_size_warning(frame: &mut Frame, area: Rect) {
    let scheme = colors();
    let lines = vec![
        Line::styled(
            "Terminal too small for the dashboard",
            Style::default().fg(scheme.warning).bold(),
        ),
        Line::styled(
            format!(
                "{}x{} now, {MIN_WIDTH}x{MIN_HEIGHT} needed",
                area.width, area.height
            ),
            Style::default().fg(scheme.text_muted),
        ),
    ];
    let [middle] = Layout::vertical([Constraint::Length(4)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        middle,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("billing issue", 8), "billing…");
        assert_eq!(truncate_str("abc", 0), "");
    }

    #[test]
    fn test_fits_terminal() {
        assert!(fits_terminal(120, 40));
        assert!(fits_terminal(MIN_WIDTH, MIN_HEIGHT));
        assert!(!fits_terminal(60, 40));
        assert!(!fits_terminal(120, MIN_HEIGHT - 1));
    }

    #[test]
    fn test_centered_area() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_area(area, 20, 10), Rect::new(40, 15, 20, 10));
        assert_eq!(centered_area(area, 300, 90), area);
    }

    #[test]
    fn test_overlay_fits_its_content() {
        let mut terminal = Terminal::new(ratatui::backend::TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|frame| {
                let lines = vec![Line::from("first line"), Line::from("second")];
                render_overlay(frame, frame.area(), "Note", lines);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let rows: Vec<String> = buffer
            .content()
            .chunks(60)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect();
        let drawn: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.trim().is_empty())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(drawn.len(), 4, "{rows:#?}");
        assert!(rows[drawn[0]].contains(" Note "));
        assert!(rows[drawn[1]].contains("│ first line"));
    }

    #[test]
    fn test_unknown_severity_badge_uses_low_colors() {
        let result = ClassificationResult {
            category: "other".to_string(),
            severity_text: "urgent".to_string(),
            cluster_id: None,
        };
        let badge = severity_badge(&result);
        assert_eq!(badge.content, " urgent ");
        assert_eq!(badge.style.bg, Some(Color::from(severity_color("low"))));
    }
}
