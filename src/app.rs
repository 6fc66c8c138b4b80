//! Application state and navigation logic.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{info, warn};

use crate::data::{export, CityRow, DashboardData};
use crate::error::DashboardError;
use crate::source::DataSource;
use crate::ui::table::{sort_rows_by, SortColumn};
use crate::ui::Theme;

/// How long a status message stays in the status bar.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Cities placed on a map, colored by severity band.
    Map,
    /// Grouped AQI / PM2.5 / PM10 bars per city.
    Chart,
    /// Every field of every reading.
    Table,
}

impl View {
    /// Every view in tab order.
    pub const ALL: [View; 3] = [View::Map, View::Chart, View::Table];

    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Map => View::Chart,
            View::Chart => View::Table,
            View::Table => View::Map,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Map => View::Table,
            View::Chart => View::Map,
            View::Table => View::Chart,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Map => "Map",
            View::Chart => "Chart",
            View::Table => "Table",
        }
    }

    /// Position in tab order.
    pub fn index(&self) -> usize {
        match self {
            View::Map => 0,
            View::Chart => 1,
            View::Table => 2,
        }
    }
}

/// What the dashboard can show right now.
#[derive(Debug, Clone, Copy)]
pub enum LoadState<'a> {
    /// Nothing has arrived from the source yet.
    Loading,
    /// A snapshot is loaded (it may be empty).
    Loaded(&'a DashboardData),
    /// The first load failed and there is nothing to show.
    Failed(&'a DashboardError),
}

/// Main application state.
///
/// Owns its data source; nothing here is global, so tests build an `App`
/// around a fixture source.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    // Data source
    source: Box<dyn DataSource>,
    pub data: Option<DashboardData>,
    pub load_error: Option<DashboardError>,

    // Table navigation (visual index into the filtered, sorted rows)
    pub selected_index: usize,
    pub sort_column: SortColumn,
    pub sort_ascending: bool,

    // Search/filter
    pub filter_text: String,
    pub filter_active: bool,

    // UI
    pub theme: Theme,
    pub spinner_tick: usize,
    pub export_path: PathBuf,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App around the given data source.
    pub fn new(source: Box<dyn DataSource>, theme: Theme) -> Self {
        Self {
            running: true,
            current_view: View::Map,
            show_help: false,
            source,
            data: None,
            load_error: None,
            selected_index: 0,
            sort_column: SortColumn::default(),
            sort_ascending: true,
            filter_text: String::new(),
            filter_active: false,
            theme,
            spinner_tick: 0,
            export_path: PathBuf::from("aqi_export.json"),
            status_message: None,
        }
    }

    /// Set where the in-app export writes its report.
    pub fn with_export_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.export_path = path.into();
        self
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Current load state. Data from an earlier load stays visible after a
    /// failed reload; the failure is reported separately in `load_error`.
    pub fn load_state(&self) -> LoadState<'_> {
        match (&self.data, &self.load_error) {
            (Some(data), _) => LoadState::Loaded(data),
            (None, Some(err)) => LoadState::Failed(err),
            (None, None) => LoadState::Loading,
        }
    }

    /// Advance the loading spinner.
    pub fn tick(&mut self) {
        self.spinner_tick = self.spinner_tick.wrapping_add(1);
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < STATUS_MESSAGE_TTL => Some(msg),
            _ => None,
        }
    }

    /// Poll the data source for new data.
    ///
    /// Returns `Ok(true)` if a new snapshot was loaded and `Ok(false)` if
    /// nothing changed. On failure the error is kept in `load_error` for the
    /// UI and also returned.
    pub fn reload_data(&mut self) -> Result<bool, DashboardError> {
        let loaded = self
            .source
            .poll()
            .and_then(|snapshot| snapshot.map(DashboardData::from_snapshot).transpose());

        match loaded {
            Ok(Some(data)) => {
                info!(
                    source = self.source.description(),
                    cities = data.len(),
                    "loaded snapshot"
                );
                if data.is_empty() {
                    warn!(source = self.source.description(), "snapshot has no cities");
                }
                self.data = Some(data);
                self.load_error = None;
                self.clamp_selection();
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(err) => {
                warn!(source = self.source.description(), error = %err, "load failed");
                self.load_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Rows after applying the filter and the current sort, in the order the
    /// table shows them.
    pub fn visible_rows(&self) -> Vec<&CityRow> {
        let Some(ref data) = self.data else {
            return Vec::new();
        };
        let mut rows: Vec<&CityRow> =
            data.rows.iter().filter(|r| self.matches_filter(r.city())).collect();
        sort_rows_by(&mut rows, self.sort_column, self.sort_ascending);
        rows
    }

    /// The row under the table cursor.
    pub fn selected_row(&self) -> Option<&CityRow> {
        self.visible_rows().get(self.selected_index).copied()
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.visible_rows().len().saturating_sub(1);
        self.selected_index = (self.selected_index + n).min(max);
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_index = self.selected_index.saturating_sub(n);
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        self.selected_index = self.visible_rows().len().saturating_sub(1);
    }

    /// Select a visual row if it exists.
    pub fn select_row(&mut self, index: usize) {
        if index < self.visible_rows().len() {
            self.selected_index = index;
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_rows().len();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
    }

    /// Go back: leave filter input, then return to the map view.
    pub fn go_back(&mut self) {
        if self.filter_active {
            self.cancel_filter();
        } else if self.current_view != View::Map {
            self.current_view = View::Map;
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Cycle to the next sort column.
    pub fn cycle_sort(&mut self) {
        self.sort_column = self.sort_column.next();
        self.clamp_selection();
    }

    /// Toggle sort direction between ascending and descending.
    pub fn toggle_sort_direction(&mut self) {
        self.sort_ascending = !self.sort_ascending;
    }

    /// Enter filter input mode (starts capturing keystrokes for search).
    pub fn start_filter(&mut self) {
        self.filter_active = true;
    }

    /// Exit filter input mode without clearing the filter text.
    pub fn cancel_filter(&mut self) {
        self.filter_active = false;
    }

    /// Clear the filter text and exit filter mode.
    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.filter_active = false;
    }

    /// Append a character to the filter text.
    pub fn filter_push(&mut self, c: char) {
        self.filter_text.push(c);
        self.selected_index = 0;
    }

    /// Remove the last character from the filter text.
    pub fn filter_pop(&mut self) {
        self.filter_text.pop();
        self.clamp_selection();
    }

    /// Check if a city name matches the current filter.
    pub fn matches_filter(&self, name: &str) -> bool {
        if self.filter_text.is_empty() {
            return true;
        }
        name.to_lowercase().contains(&self.filter_text.to_lowercase())
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export current state to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let Some(ref data) = self.data else {
            anyhow::bail!("No data to export");
        };
        export::write_report(data, path)
    }

    /// Export to the configured path and report the outcome in the status bar.
    pub fn export_to_configured_path(&mut self) {
        let path = self.export_path.clone();
        match self.export_state(&path) {
            Ok(()) => {
                info!(path = %path.display(), "exported dashboard");
                self.set_status_message(format!("Exported to {}", path.display()));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "export failed");
                self.set_status_message(format!("Export failed: {}", e));
            }
        }
    }
}
