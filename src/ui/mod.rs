//! Terminal rendering.
//!
//! Screen layout, top to bottom: header bar, summary cards, tab bar, the
//! current view, status bar. The help overlay is drawn last.

pub mod chart;
pub mod common;
pub mod map;
pub mod table;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, LoadState, View};

/// Minimum terminal size for a usable display.
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 16;

const HEADER_HEIGHT: u16 = 1;
const CARDS_HEIGHT: u16 = 4;
const TABS_HEIGHT: u16 = 1;

/// Screen row of the tab bar.
pub const TABS_ROW: u16 = HEADER_HEIGHT + CARDS_HEIGHT;

/// Screen row of the first table body line (below the table border and
/// column header).
pub const TABLE_FIRST_ROW: u16 = TABS_ROW + TABS_HEIGHT + 2;

/// Draw one frame of the dashboard.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        let y = (area.height / 2).saturating_sub(2);
        let centered = Rect::new(0, y, area.width, 5.min(area.height - y));
        frame.render_widget(paragraph, centered);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Length(CARDS_HEIGHT),
        Constraint::Length(TABS_HEIGHT),
        Constraint::Min(8),    // Content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    common::render_header(frame, app, chunks[0]);
    common::render_stat_cards(frame, app, chunks[1]);
    common::render_tabs(frame, app, chunks[2]);

    match app.load_state() {
        LoadState::Loading => common::render_loading(frame, app, chunks[3]),
        LoadState::Failed(err) => common::render_failure(frame, app, err, chunks[3]),
        LoadState::Loaded(data) => match app.current_view {
            View::Map => map::render(frame, app, data, chunks[3]),
            View::Chart => chart::render(frame, app, data, chunks[3]),
            View::Table => table::render(frame, app, chunks[3]),
        },
    }

    common::render_status_bar(frame, app, chunks[4]);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}
