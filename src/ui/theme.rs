//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use aqwatch_types::Severity;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::config::ThemeChoice;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for error messages.
    pub error: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Color of coastlines on the map.
    pub map_land: Color,
    /// Text drawn on top of a severity-colored background.
    pub badge_text: Color,
    /// Bar colors for AQI, PM2.5 and PM10 in the chart.
    pub series: [Color; 3],
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            error: Color::Red,
            border: Color::Gray,
            map_land: Color::DarkGray,
            badge_text: Color::Black,
            series: [
                Color::Rgb(0x88, 0x84, 0xd8),
                Color::Rgb(0x82, 0xca, 0x9d),
                Color::Rgb(0xff, 0xc6, 0x58),
            ],
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            error: Color::Red,
            border: Color::DarkGray,
            map_land: Color::Gray,
            badge_text: Color::White,
            series: [
                Color::Rgb(0x5b, 0x57, 0xb0),
                Color::Rgb(0x3f, 0x9a, 0x62),
                Color::Rgb(0xc9, 0x8a, 0x10),
            ],
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Theme for a configured choice.
    pub fn from_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Auto => Self::auto_detect(),
            ThemeChoice::Dark => Self::dark(),
            ThemeChoice::Light => Self::light(),
        }
    }

    /// The single display color of a severity band.
    pub fn severity_color(&self, severity: Severity) -> Color {
        let (r, g, b) = severity.rgb();
        Color::Rgb(r, g, b)
    }

    /// Foreground style for text about a band.
    pub fn severity_style(&self, severity: Severity) -> Style {
        let style = Style::default().fg(self.severity_color(severity));
        if severity >= Severity::VeryUnhealthy {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    /// Filled badge style, used for the AQI cell.
    pub fn severity_badge(&self, severity: Severity) -> Style {
        Style::default()
            .bg(self.severity_color(severity))
            .fg(self.badge_text)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_colors_follow_bands() {
        let theme = Theme::dark();
        assert_eq!(theme.severity_color(Severity::Good), Color::Rgb(0x22, 0xc5, 0x5e));
        assert_eq!(theme.severity_color(Severity::Hazardous), Color::Rgb(0x7f, 0x1d, 0x1d));
    }

    #[test]
    fn test_badge_uses_band_background() {
        let theme = Theme::light();
        let badge = theme.severity_badge(Severity::Moderate);
        assert_eq!(badge.bg, Some(theme.severity_color(Severity::Moderate)));
    }
}
