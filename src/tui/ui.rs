//! Main UI rendering and the terminal loop.

use super::app::TuiApp;
use super::events::{Event, EventHandler, Focus};
use super::theme::{colors, render_footer_hints, FooterHints, Styles};
use super::widgets::{
    fits_terminal, render_bar_chart, render_donut_chart, render_empty_state, render_overlay,
    render_scatter_chart, render_size_warning, severity_badge, truncate_str,
};
use crate::panels::{
    AggregateChart, AggregateRendering, ConnectionState, DirectoryList, RequesterView,
};
use crate::render::severity_color;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io::{self, stdout};
use std::time::Duration;

const CLUSTER_TITLE: &str = "Complaint clusters";
const INPUT_PLACEHOLDER: &str = "Describe the complaint…";
const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Run the TUI application until the operator quits.
///
/// Must be awaited on a tokio runtime: request tasks are spawned onto it and
/// make progress while the loop waits for input.
pub async fn run_tui(app: &mut TuiApp, tick_rate: Duration) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.start();
    let result = event_loop(&mut terminal, app, tick_rate).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    result
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut TuiApp,
    tick_rate: Duration,
) -> io::Result<()> {
    let events = EventHandler::new(tick_rate);

    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next().await? {
            Event::Key(key) => app.handle_key(key),
            Event::Paste(text) => app.handle_paste(text),
            Event::Resize(_, _) => {}
            Event::Tick => app.on_tick(),
        }

        if app.should_quit() {
            tracing::info!("quitting");
            return Ok(());
        }
    }
}

/// Main render function
pub fn render(frame: &mut Frame, app: &TuiApp) {
    let area = frame.area();

    if !fits_terminal(area.width, area.height) {
        render_size_warning(frame, area);
        return;
    }

    let [header, metrics, charts, lower, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Percentage(45),
        Constraint::Min(8),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header, app);
    render_metrics(frame, metrics, app);

    let [bars, donut, directory] = Layout::horizontal([
        Constraint::Percentage(45),
        Constraint::Percentage(27),
        Constraint::Percentage(28),
    ])
    .areas(charts);
    render_aggregate(frame, bars, app.dashboard().category_chart());
    render_aggregate(frame, donut, app.dashboard().severity_chart());
    render_directory(frame, directory, app);

    let [clusters, analyze] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(lower);
    render_clusters(frame, clusters, app);
    render_analyze(frame, analyze, app);

    render_footer(frame, footer, app);

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &TuiApp) {
    let dashboard = app.dashboard();
    let state = dashboard.connectivity().state();
    let dot_color = match state {
        ConnectionState::Connected => colors().success,
        ConnectionState::Error => colors().warning,
        ConnectionState::Offline => colors().error,
        ConnectionState::Pending => colors().muted,
    };

    let mut spans = vec![
        Span::styled("saarthi-dash", Styles::header_title()),
        Span::styled(" │ ", Style::default().fg(colors().muted)),
        Span::styled("● ", Style::default().fg(dot_color)),
        Span::styled(state.label(), Styles::text()),
        Span::styled(" │ ", Style::default().fg(colors().muted)),
        Span::styled(dashboard.base_url().to_string(), Styles::text_muted()),
    ];
    if let Some(at) = dashboard.last_refresh() {
        spans.push(Span::styled(" │ ", Style::default().fg(colors().muted)));
        spans.push(Span::styled(
            format!("refreshed {}", at.format("%H:%M:%S")),
            Styles::text_muted(),
        ));
    }
    if dashboard.in_flight() > 0 {
        spans.push(Span::styled(
            format!(
                " {} {}",
                SPINNER[(app.tick % SPINNER.len() as u64) as usize],
                dashboard.in_flight()
            ),
            Styles::highlight(),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_metrics(frame: &mut Frame, area: Rect, app: &TuiApp) {
    let display = app.dashboard().metrics().display();
    let mut spans = Vec::new();
    for (i, (label, value)) in display.rows().into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("   ", Style::default()));
        }
        spans.push(Span::styled(format!("{label}: "), Styles::label()));
        spans.push(Span::styled(value.to_string(), Styles::value()));
    }

    let panel = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(" Model performance ")
            .title_style(Styles::section_title())
            .borders(Borders::ALL)
            .border_style(Styles::border()),
    );
    frame.render_widget(panel, area);
}

fn render_aggregate(frame: &mut Frame, area: Rect, chart: &AggregateChart) {
    let title = chart.kind().title();
    match chart.current() {
        Some(AggregateRendering::Bar(model)) => render_bar_chart(frame, area, title, model),
        Some(AggregateRendering::Donut(model)) => render_donut_chart(frame, area, title, model),
        None => {
            let message = chart
                .last_error()
                .map_or_else(|| "Loading…".to_string(), |e| format!("Could not load trends: {e}"));
            render_empty_state(frame, area, title, &message);
        }
    }
}

fn directory_lines(
    list: &DirectoryList,
    entries: Vec<String>,
    severity: bool,
) -> Vec<Line<'static>> {
    match list {
        DirectoryList::Loading => vec![Line::styled("Loading…", Styles::text_muted())],
        DirectoryList::Failed => entries
            .into_iter()
            .map(|message| Line::styled(message, Styles::error()))
            .collect(),
        DirectoryList::Loaded(_) if entries.is_empty() => {
            vec![Line::styled("(none)", Styles::text_muted())]
        }
        DirectoryList::Loaded(_) => entries
            .into_iter()
            .map(|entry| {
                let bullet_color = if severity {
                    Color::from(severity_color(&entry))
                } else {
                    colors().accent
                };
                Line::from(vec![
                    Span::styled("• ", Style::default().fg(bullet_color)),
                    Span::styled(entry, Styles::text()),
                ])
            })
            .collect(),
    }
}

fn render_directory(frame: &mut Frame, area: Rect, app: &TuiApp) {
    let directory = app.dashboard().directory();

    let mut lines = vec![Line::styled("Categories", Styles::section_title())];
    lines.extend(directory_lines(
        directory.categories(),
        directory.category_entries(),
        false,
    ));
    lines.push(Line::from(""));
    lines.push(Line::styled("Severity levels", Styles::section_title()));
    lines.extend(directory_lines(
        directory.severity_levels(),
        directory.severity_entries(),
        true,
    ));

    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Taxonomy ")
                .title_style(Styles::section_title())
                .borders(Borders::ALL)
                .border_style(Styles::border()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(panel, area);
}

fn render_clusters(frame: &mut Frame, area: Rect, app: &TuiApp) {
    let clusters = app.dashboard().clusters();
    let Some(chart) = clusters.chart() else {
        let message = clusters.placeholder().unwrap_or("Loading…");
        render_empty_state(frame, area, CLUSTER_TITLE, message);
        return;
    };

    let [plot, tooltip] =
        Layout::vertical([Constraint::Min(4), Constraint::Length(1)]).areas(area);
    render_scatter_chart(frame, plot, CLUSTER_TITLE, chart, clusters.cursor_coords());

    let line = match clusters.inspected() {
        Some(excerpt) => Line::from(vec![
            Span::styled("▸ ", Styles::highlight()),
            Span::styled(
                truncate_str(&excerpt, usize::from(tooltip.width.saturating_sub(2))),
                Styles::text(),
            ),
        ]),
        None => Line::styled(
            format!("{} points · ←→ to inspect", chart.point_count()),
            Styles::text_muted(),
        ),
    };
    frame.render_widget(Paragraph::new(line), tooltip);
}

fn render_analyze(frame: &mut Frame, area: Rect, app: &TuiApp) {
    let requester = app.dashboard().requester();
    let focused = app.focus() == Focus::Input;

    let input_line = if requester.input().is_empty() && !focused {
        Line::styled(INPUT_PLACEHOLDER, Styles::text_muted())
    } else {
        let mut spans = vec![Span::styled(requester.input().to_string(), Styles::text())];
        if focused {
            spans.push(Span::styled("▏", Styles::highlight()));
        }
        Line::from(spans)
    };

    let mut lines = vec![input_line, Line::from("")];
    if requester.is_busy() {
        lines.push(Line::styled("Analyzing…", Styles::highlight()));
    }
    match requester.view() {
        RequesterView::Idle => {}
        RequesterView::Result(result) => {
            lines.push(Line::from(vec![
                Span::styled("Category: ", Styles::label()),
                Span::styled(result.category_label(), Styles::value()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Severity: ", Styles::label()),
                severity_badge(result),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Cluster:  ", Styles::label()),
                Span::styled(result.cluster_label(), Styles::value()),
            ]));
        }
        RequesterView::Error(message) => {
            lines.push(Line::styled(message.clone(), Styles::error()));
        }
    }

    let border = if focused {
        Styles::border_focused()
    } else {
        Styles::border()
    };
    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Analyze complaint ")
                .title_style(Styles::section_title())
                .borders(Borders::ALL)
                .border_style(border),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(panel, area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &TuiApp) {
    let line = if let Some(message) = app.status_message() {
        Line::styled(format!(" {message}"), Styles::status_bar())
    } else {
        let hints = match app.focus() {
            Focus::Dashboard => FooterHints::dashboard(),
            Focus::Input => FooterHints::input(),
        };
        Line::from(render_footer_hints(&hints))
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {k:<12}"), Style::default().fg(colors().accent)),
            Span::styled(desc, Styles::text()),
        ])
    };

    let help_text = vec![
        Line::styled(
            "━━━ Keyboard Shortcuts ━━━",
            Style::default().fg(colors().accent).bold(),
        ),
        Line::from(""),
        Line::styled("Dashboard", Styles::section_title()),
        key("r / F5", "Refresh every panel"),
        key("← → / h l", "Inspect previous / next cluster point"),
        key("Tab / i", "Type a complaint"),
        key("Enter", "Analyze the complaint"),
        key("c", "Clear input and result"),
        key("t", "Cycle theme"),
        key("? / F1", "Toggle this help"),
        key("q / Ctrl+C", "Quit"),
        Line::from(""),
        Line::styled("Complaint input", Styles::section_title()),
        key("Enter", "Analyze"),
        key("Ctrl+W", "Delete previous word"),
        key("Ctrl+L", "Clear input and result"),
        key("Esc / Tab", "Back to dashboard shortcuts"),
    ];

    render_overlay(frame, area, "Help", help_text);
}
