//! Common UI components shared across views.
//!
//! This module contains the header bar, summary cards, tab bar, status bar,
//! loading and error panels, and the help overlay.

use aqwatch_types::classify;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::{App, LoadState, View};
use crate::error::DashboardError;

/// Braille spinner frames for the loading panel.
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Placeholder for a statistic that cannot be computed.
const NO_VALUE: &str = "—";

/// Render the header bar with the overall status.
///
/// Displays: worst-band indicator, title, source, band of the highest reading.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();

    let worst = app.data.as_ref().and_then(|d| d.stats.as_ref()).map(|s| s.worst_severity());
    match worst {
        Some(band) => spans.push(Span::styled(" ● ", app.theme.severity_style(band))),
        None => spans.push(Span::styled(" ○ ", Style::default().add_modifier(Modifier::DIM))),
    }

    spans.push(Span::styled(
        "AIR QUALITY ",
        Style::default().add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::raw("│ "));
    spans.push(Span::raw(app.source_description().to_string()));

    match app.load_state() {
        LoadState::Loading => spans.push(Span::raw(" │ Loading...")),
        LoadState::Failed(_) => spans.push(Span::styled(
            " │ unavailable",
            Style::default().fg(app.theme.error),
        )),
        LoadState::Loaded(data) => {
            spans.push(Span::raw(format!(" │ {} cities", data.len())));
            if let Some(band) = worst {
                spans.push(Span::raw(" │ worst: "));
                spans.push(Span::styled(band.label(), app.theme.severity_style(band)));
            }
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the four summary cards: city count, average, highest, lowest.
pub fn render_stat_cards(frame: &mut Frame, app: &App, area: Rect) {
    let cards = Layout::horizontal([Constraint::Fill(1); 4]).split(area);

    let stats = app.data.as_ref().and_then(|d| d.stats.as_ref());
    let missing = match app.load_state() {
        LoadState::Loading => "loading",
        _ => "no data",
    };

    let count = app.data.as_ref().map(|d| d.len());
    let count_value = match count {
        Some(n) => Span::styled(n.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        None => Span::raw(NO_VALUE),
    };
    render_card(frame, app, cards[0], "Cities Monitored", count_value, String::new());

    match stats {
        Some(stats) => {
            let aqi_span = |aqi: u32| {
                Span::styled(
                    aqi.to_string(),
                    app.theme.severity_style(classify(aqi)).add_modifier(Modifier::BOLD),
                )
            };
            render_card(
                frame,
                app,
                cards[1],
                "Average AQI",
                aqi_span(stats.mean_aqi),
                classify(stats.mean_aqi).label().to_string(),
            );
            render_card(
                frame,
                app,
                cards[2],
                "Highest AQI",
                aqi_span(stats.max_aqi),
                stats.max_city.clone(),
            );
            render_card(
                frame,
                app,
                cards[3],
                "Lowest AQI",
                aqi_span(stats.min_aqi),
                stats.min_city.clone(),
            );
        }
        None => {
            for (card, label) in cards[1..].iter().zip(["Average AQI", "Highest AQI", "Lowest AQI"])
            {
                render_card(frame, app, *card, label, Span::raw(NO_VALUE), missing.to_string());
            }
        }
    }
}

fn render_card(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    label: &str,
    value: Span<'_>,
    detail: String,
) {
    let block = Block::default()
        .title(format!(" {} ", label))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let lines = vec![
        Line::from(value),
        Line::from(Span::styled(detail, Style::default().add_modifier(Modifier::DIM))),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!(" {}:{} ", i + 1, view.label())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.current_view.index())
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: current view, time since last update, available controls.
/// Also displays temporary status messages and reload errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let dim = Style::default().add_modifier(Modifier::DIM);
    let line = match app.load_state() {
        LoadState::Loaded(data) => {
            let controls = match app.current_view {
                View::Table if app.filter_active => "Type to search | Enter:apply Esc:cancel",
                View::Table => "/:search s:sort S:reverse Tab:switch e:export ?:help q:quit",
                View::Map | View::Chart => "Tab:switch r:reload e:export ?:help q:quit",
            };
            let mut spans = vec![Span::styled(
                format!(
                    " {} | Updated {:.1}s ago | {}",
                    app.current_view.label(),
                    data.last_updated.elapsed().as_secs_f64(),
                    controls,
                ),
                dim,
            )];
            if let Some(ref err) = app.load_error {
                spans.push(Span::styled(
                    format!(" | ⚠ {}", err),
                    Style::default().fg(app.theme.error),
                ));
            }
            Line::from(spans)
        }
        LoadState::Failed(err) => Line::from(vec![
            Span::styled(format!(" Error: {}", err), Style::default().fg(app.theme.error)),
            Span::styled(" | r:retry q:quit", dim),
        ]),
        LoadState::Loading => Line::from(Span::styled(" Loading... | q:quit", dim)),
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the spinner shown until the first snapshot arrives.
pub fn render_loading(frame: &mut Frame, app: &App, area: Rect) {
    let spinner = SPINNER[app.spinner_tick % SPINNER.len()];
    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(spinner, Style::default().fg(app.theme.highlight)),
            Span::raw(" Loading air-quality readings"),
        ]),
        Line::from(Span::styled(
            app.source_description().to_string(),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).block(block),
        area,
    );
}

/// Render the panel shown when the first load failed.
pub fn render_failure(frame: &mut Frame, app: &App, err: &DashboardError, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            err.to_string(),
            Style::default().fg(app.theme.error).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("source: {}", app.source_description()),
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::from(Span::styled(
            "r: retry   q: quit",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Data unavailable ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.error));

    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(" Navigation", bold)]),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  1/2/3       Map / Chart / Table"),
        Line::from("  ↑/↓ j/k     Move table cursor"),
        Line::from("  PgUp/PgDn   Jump 10 rows"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Esc         Back to map"),
        Line::from(""),
        Line::from(vec![Span::styled(" Table", bold)]),
        Line::from("  /         Filter by city"),
        Line::from("  c         Clear filter"),
        Line::from("  s         Cycle sort column"),
        Line::from("  S         Toggle sort direction"),
        Line::from(""),
        Line::from(vec![Span::styled(" General", bold)]),
        Line::from("  r         Reload data"),
        Line::from("  e         Export to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 24u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
