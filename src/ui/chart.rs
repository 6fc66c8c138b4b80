//! Chart view rendering.
//!
//! Grouped bars per city: AQI, PM2.5 and PM10 side by side, in snapshot
//! order. A legend under the chart maps the series colors.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::{CityRow, DashboardData};

/// Series names in bar order.
const SERIES: [&str; 3] = ["AQI", "PM2.5", "PM10"];

/// Gap between one city's bars and the next city's.
const GROUP_GAP: u16 = 2;

/// Render the Chart view.
pub fn render(frame: &mut Frame, app: &App, data: &DashboardData, area: Rect) {
    let block = Block::default()
        .title(" AQI and particulates by city ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if data.is_empty() {
        let text = Paragraph::new(Line::from(Span::styled(
            "no data",
            Style::default().add_modifier(Modifier::DIM),
        )))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(text, area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [chart_area, legend_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let selected = app.selected_row().map(|r| r.index);
    let mut chart = BarChart::default()
        .bar_width(bar_width(chart_area.width, data.len()))
        .bar_gap(0)
        .group_gap(GROUP_GAP);
    for row in &data.rows {
        chart = chart.data(city_group(app, row, selected == Some(row.index)));
    }

    frame.render_widget(chart, chart_area);
    frame.render_widget(legend(app), legend_area);
}

fn city_group<'a>(app: &App, row: &'a CityRow, selected: bool) -> BarGroup<'a> {
    let r = &row.record;
    let values = [u64::from(r.aqi), r.pm25.round() as u64, r.pm10.round() as u64];

    let bars: Vec<Bar> = values
        .iter()
        .zip(app.theme.series)
        .map(|(&value, color)| {
            Bar::default()
                .value(value)
                .text_value(value.to_string())
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(app.theme.badge_text).bg(color))
        })
        .collect();

    let label_style = if selected {
        app.theme.severity_style(row.severity).add_modifier(Modifier::REVERSED)
    } else {
        app.theme.severity_style(row.severity)
    };

    BarGroup::default()
        .label(Line::from(Span::styled(row.city(), label_style)).alignment(Alignment::Center))
        .bars(&bars)
}

/// Width of each bar so every group fits, between 1 and 7 cells.
fn bar_width(width: u16, groups: usize) -> u16 {
    let groups = groups.max(1) as u16;
    let per_group = (width / groups).saturating_sub(GROUP_GAP);
    (per_group / SERIES.len() as u16).clamp(1, 7)
}

fn legend(app: &App) -> Paragraph<'static> {
    let mut spans = Vec::new();
    for (name, color) in SERIES.iter().zip(app.theme.series) {
        spans.push(Span::styled("■ ", Style::default().fg(color)));
        spans.push(Span::raw(format!("{}   ", name)));
    }
    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_width_fits_groups() {
        // 5 groups in 80 columns: 16 per group, 14 after the gap, 4 per bar
        assert_eq!(bar_width(80, 5), 4);
        assert_eq!(bar_width(300, 2), 7);
        assert_eq!(bar_width(10, 20), 1);
        assert_eq!(bar_width(40, 0), 7);
    }
}
