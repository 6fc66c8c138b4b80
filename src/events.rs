use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};
use crate::ui::{TABLE_FIRST_ROW, TABS_ROW};

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.filter_active {
        handle_filter_input(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Char('1') => app.set_view(View::Map),
        KeyCode::Char('2') => app.set_view(View::Chart),
        KeyCode::Char('3') => app.set_view(View::Table),

        // Navigation (up/down for rows, left/right for tabs)
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        KeyCode::Char('r') => match app.reload_data() {
            Ok(true) => app.set_status_message("Reloaded".to_string()),
            Ok(false) => app.set_status_message("No new data".to_string()),
            Err(e) => app.set_status_message(format!("Reload failed: {}", e)),
        },

        KeyCode::Char('?') => app.toggle_help(),

        // Sorting and filtering apply to the table
        KeyCode::Char('s') if app.current_view == View::Table => app.cycle_sort(),
        KeyCode::Char('S') if app.current_view == View::Table => app.toggle_sort_direction(),
        KeyCode::Char('/') => {
            app.set_view(View::Table);
            app.start_filter();
        }
        KeyCode::Char('c') => {
            if !app.filter_text.is_empty() {
                app.clear_filter();
            }
        }

        KeyCode::Char('e') => app.export_to_configured_path(),

        _ => {}
    }
}

/// Handle key input while filter is active
fn handle_filter_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Confirm filter
        KeyCode::Enter => {
            app.filter_active = false;
        }

        // Cancel filter (keep text but exit input mode)
        KeyCode::Esc => {
            app.cancel_filter();
        }

        // Clear and exit
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_filter();
        }

        KeyCode::Backspace => {
            app.filter_pop();
            if app.filter_text.is_empty() {
                app.filter_active = false;
            }
        }

        KeyCode::Char(c) => {
            app.filter_push(c);
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        MouseEventKind::Down(MouseButton::Left) => {
            if mouse.row == TABS_ROW {
                if let Some(view) = tab_at(mouse.column) {
                    app.set_view(view);
                }
            } else if app.current_view == View::Table && mouse.row >= TABLE_FIRST_ROW {
                app.select_row(usize::from(mouse.row - TABLE_FIRST_ROW));
            }
        }

        // Right-click goes back
        MouseEventKind::Down(MouseButton::Right) => app.go_back(),

        _ => {}
    }
}

/// The tab under a column of the tab bar.
///
/// Each tab is drawn as one padding cell, its title, one padding cell, then a
/// one-cell divider.
fn tab_at(column: u16) -> Option<View> {
    let mut start = 0u16;
    for (i, view) in View::ALL.iter().enumerate() {
        let title_width = format!(" {}:{} ", i + 1, view.label()).chars().count() as u16;
        let end = start + title_width + 2;
        if column < start {
            // Divider before this tab
            return None;
        }
        if column < end {
            return Some(*view);
        }
        start = end + 1;
    }
    None
}
