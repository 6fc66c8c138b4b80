//! Map view rendering.
//!
//! Places each city with known coordinates on a world map, marker colored by
//! severity band. Cities missing from the coordinate table are listed in the
//! side panel instead.

use aqwatch_types::Severity;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Map, MapResolution},
        Block, Borders, Paragraph,
    },
    Frame,
};

use crate::app::App;
use crate::data::DashboardData;

/// Width of the legend panel beside the map.
const PANEL_WIDTH: u16 = 34;

/// Render the Map view.
pub fn render(frame: &mut Frame, app: &App, data: &DashboardData, area: Rect) {
    let [map_area, panel_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(PANEL_WIDTH)]).areas(area);

    render_map(frame, app, data, map_area);
    render_panel(frame, app, data, panel_area);
}

fn render_map(frame: &mut Frame, app: &App, data: &DashboardData, area: Rect) {
    let viewport = data.viewport();
    let selected = app.selected_row().map(|r| r.index);

    let markers: Vec<(f64, f64, Line<'static>)> = data
        .placed()
        .map(|(row, point)| {
            let marker_style = app.theme.severity_style(row.severity);
            let label_style = if selected == Some(row.index) {
                Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
            } else {
                Style::default()
            };
            let line = Line::from(vec![
                Span::styled("●", marker_style),
                Span::styled(format!(" {} {}", row.city(), row.aqi()), label_style),
            ]);
            (point.lon, point.lat, line)
        })
        .collect();

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(format!(" Map ({} placed) ", markers.len()))
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .marker(Marker::Braille)
        .x_bounds(viewport.lon)
        .y_bounds(viewport.lat)
        .paint(|ctx| {
            ctx.draw(&Map {
                color: app.theme.map_land,
                resolution: MapResolution::High,
            });
            ctx.layer();
            for (x, y, line) in &markers {
                ctx.print(*x, *y, line.clone());
            }
        });

    frame.render_widget(canvas, area);
}

fn render_panel(frame: &mut Frame, app: &App, data: &DashboardData, area: Rect) {
    let mut lines = vec![Line::from(Span::styled("Bands", app.theme.header))];
    for (band, count) in data.band_counts() {
        lines.push(band_line(app, band, count));
    }

    let unplaced = data.unplaced();
    if !unplaced.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Not on map", app.theme.header)));
        for row in unplaced {
            lines.push(Line::from(vec![
                Span::styled("● ", app.theme.severity_style(row.severity)),
                Span::raw(format!("{} {}", row.city(), row.aqi())),
            ]));
        }
    }

    if data.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "no data",
            Style::default().add_modifier(Modifier::DIM),
        )));
    }

    let block = Block::default()
        .title(" Legend ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn band_line(app: &App, band: Severity, count: usize) -> Line<'static> {
    let range = match band.upper_bound() {
        Some(upper) => format!("≤{}", upper),
        None => "301+".to_string(),
    };
    let count_style = if count == 0 {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    Line::from(vec![
        Span::styled("■ ", Style::default().fg(app.theme.severity_color(band))),
        Span::raw(format!("{:<6} {:<6}", band.short_label(), range)),
        Span::styled(count.to_string(), count_style),
    ])
}
