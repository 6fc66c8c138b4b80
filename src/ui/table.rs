//! Table view rendering.
//!
//! Lists every field of every reading in a sortable, filterable table.

use std::cmp::Ordering;

use chrono::Local;
use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::CityRow;

/// Column to sort by in the Table view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    /// Order the producer supplied.
    #[default]
    Snapshot,
    /// Sort by city name alphabetically.
    City,
    /// Sort by AQI (and therefore by band).
    Aqi,
    Pm25,
    Pm10,
    /// Sort by observation time.
    Updated,
}

impl SortColumn {
    /// Cycle to the next sort column.
    pub fn next(self) -> Self {
        match self {
            SortColumn::Snapshot => SortColumn::City,
            SortColumn::City => SortColumn::Aqi,
            SortColumn::Aqi => SortColumn::Pm25,
            SortColumn::Pm25 => SortColumn::Pm10,
            SortColumn::Pm10 => SortColumn::Updated,
            SortColumn::Updated => SortColumn::Snapshot,
        }
    }

    /// Short name shown in the table title.
    pub fn label(&self) -> &'static str {
        match self {
            SortColumn::Snapshot => "order",
            SortColumn::City => "city",
            SortColumn::Aqi => "aqi",
            SortColumn::Pm25 => "pm2.5",
            SortColumn::Pm10 => "pm10",
            SortColumn::Updated => "updated",
        }
    }
}

/// Render the Table view showing all readings.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        return;
    };

    let rows = app.visible_rows();

    let header = Row::new(vec![
        Cell::from(format_header("City", Some(SortColumn::City), app)),
        Cell::from(format_header("AQI", Some(SortColumn::Aqi), app)),
        Cell::from(format_header("Band", None, app)),
        Cell::from(format_header("PM2.5", Some(SortColumn::Pm25), app)),
        Cell::from(format_header("PM10", Some(SortColumn::Pm10), app)),
        Cell::from(format_header("NO2", None, app)),
        Cell::from(format_header("SO2", None, app)),
        Cell::from(format_header("CO", None, app)),
        Cell::from(format_header("Last Updated", Some(SortColumn::Updated), app)),
    ])
    .height(1)
    .style(app.theme.header);

    let body: Vec<Row> = rows
        .iter()
        .map(|row| {
            let r = &row.record;
            Row::new(vec![
                Cell::from(r.city.clone()),
                Cell::from(format!(" {:>3} ", r.aqi)).style(app.theme.severity_badge(row.severity)),
                Cell::from(row.severity.short_label()).style(app.theme.severity_style(row.severity)),
                Cell::from(r.pm25.to_string()),
                Cell::from(r.pm10.to_string()),
                Cell::from(r.no2.to_string()),
                Cell::from(r.so2.to_string()),
                Cell::from(r.co.to_string()),
                Cell::from(format_observed(row)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(3), // City
        Constraint::Min(6),  // AQI badge
        Constraint::Min(7),  // Band
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Min(19), // Last Updated
    ];

    let selected = app.selected_index.min(rows.len().saturating_sub(1));
    let sort_dir = if app.sort_ascending { "↑" } else { "↓" };

    let filter_info = if app.filter_active {
        format!(" /{}_", app.filter_text)
    } else if !app.filter_text.is_empty() {
        format!(" /{}/ [c:clear]", app.filter_text)
    } else {
        String::new()
    };

    let position_info = if !rows.is_empty() {
        format!(" [{}/{}]", selected + 1, rows.len())
    } else {
        String::new()
    };

    let title = format!(
        " Cities ({}/{}) [s:sort {}{}]{}{} ",
        rows.len(),
        data.len(),
        app.sort_column.label(),
        sort_dir,
        filter_info,
        position_info
    );

    let table = Table::new(body, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if !rows.is_empty() {
        state.select(Some(selected));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

fn format_header(name: &str, col: Option<SortColumn>, app: &App) -> Span<'static> {
    if col == Some(app.sort_column) {
        let arrow = if app.sort_ascending { "↑" } else { "↓" };
        Span::raw(format!("{}{}", name, arrow))
    } else {
        Span::raw(name.to_string())
    }
}

/// Observation time in the local zone, date included.
fn format_observed(row: &CityRow) -> String {
    row.observed_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Sort rows by the given column and direction.
///
/// Equal keys keep snapshot order regardless of direction.
pub fn sort_rows_by(rows: &mut [&CityRow], column: SortColumn, ascending: bool) {
    rows.sort_by(|a, b| {
        let primary = match column {
            SortColumn::Snapshot => a.index.cmp(&b.index),
            SortColumn::City => a.city().to_lowercase().cmp(&b.city().to_lowercase()),
            SortColumn::Aqi => a.aqi().cmp(&b.aqi()),
            SortColumn::Pm25 => a.record.pm25.total_cmp(&b.record.pm25),
            SortColumn::Pm10 => a.record.pm10.total_cmp(&b.record.pm10),
            SortColumn::Updated => a.observed_at.cmp(&b.observed_at),
        };

        let primary = if ascending {
            primary
        } else {
            primary.reverse()
        };

        if primary == Ordering::Equal {
            a.index.cmp(&b.index)
        } else {
            primary
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DashboardData;
    use aqwatch_types::Snapshot;

    fn data() -> DashboardData {
        let snapshot = Snapshot::builder()
            .record("Pune", |r| r.aqi(90).pm25(40.0).timestamp("2024-11-05T09:00:00Z"))
            .record("agra", |r| r.aqi(160).pm25(75.0).timestamp("2024-11-05T08:00:00Z"))
            .record("Jaipur", |r| r.aqi(90).pm25(42.0).timestamp("2024-11-05T10:00:00Z"))
            .build()
            .unwrap();
        DashboardData::from_snapshot(snapshot).unwrap()
    }

    fn sorted(data: &DashboardData, column: SortColumn, ascending: bool) -> Vec<&str> {
        let mut rows: Vec<&CityRow> = data.rows.iter().collect();
        sort_rows_by(&mut rows, column, ascending);
        rows.iter().map(|r| r.city()).collect()
    }

    #[test]
    fn test_observed_time_includes_local_date() {
        let data = data();
        let expected = data.rows[0].observed_at.with_timezone(&Local);
        let text = format_observed(&data.rows[0]);
        assert!(text.starts_with(&expected.format("%Y-%m-%d").to_string()));
        assert_eq!(text.len(), "2024-11-05 09:00:00".len());
    }

    #[test]
    fn test_sort_column_cycle_returns_to_start() {
        let mut col = SortColumn::default();
        for _ in 0..6 {
            col = col.next();
        }
        assert_eq!(col, SortColumn::Snapshot);
    }

    #[test]
    fn test_city_sort_ignores_case() {
        let data = data();
        assert_eq!(sorted(&data, SortColumn::City, true), ["agra", "Jaipur", "Pune"]);
    }

    #[test]
    fn test_equal_aqi_keeps_snapshot_order() {
        let data = data();
        assert_eq!(sorted(&data, SortColumn::Aqi, true), ["Pune", "Jaipur", "agra"]);
        assert_eq!(sorted(&data, SortColumn::Aqi, false), ["agra", "Pune", "Jaipur"]);
    }

    #[test]
    fn test_sort_by_concentration_and_time() {
        let data = data();
        assert_eq!(sorted(&data, SortColumn::Pm25, false), ["agra", "Jaipur", "Pune"]);
        assert_eq!(sorted(&data, SortColumn::Updated, true), ["agra", "Pune", "Jaipur"]);
    }
}
