//! End-to-end checks: source → app state → rendered frame → export.

use std::io::Write;

use aqwatch::source::sample_snapshot_at;
use aqwatch::ui::{self, Theme};
use aqwatch::{App, ChannelSource, DataSource, FileSource, LoadState, SampleSource, View};
use aqwatch_types::Snapshot;
use ratatui::{backend::TestBackend, Terminal};

const TS: &str = "2024-11-05T08:30:00.000Z";

const SAMPLE_JSON: &str = r#"[
  {"city":"Delhi","aqi":185,"pm25":85,"pm10":120,"no2":45,"so2":30,"co":2.5,"timestamp":"2024-11-05T08:30:00.000Z"},
  {"city":"Mumbai","aqi":125,"pm25":55,"pm10":90,"no2":35,"so2":25,"co":1.8,"timestamp":"2024-11-05T08:30:00.000Z"},
  {"city":"Bangalore","aqi":95,"pm25":45,"pm10":70,"no2":25,"so2":20,"co":1.5,"timestamp":"2024-11-05T08:30:00.000Z"},
  {"city":"Chennai","aqi":110,"pm25":50,"pm10":80,"no2":30,"so2":22,"co":1.7,"timestamp":"2024-11-05T08:30:00.000Z"},
  {"city":"Kolkata","aqi":155,"pm25":70,"pm10":100,"no2":40,"so2":28,"co":2.2,"timestamp":"2024-11-05T08:30:00.000Z"}
]"#;

/// Render one frame and return the screen as text, one line per row.
fn draw(app: &App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| ui::render(frame, app)).unwrap();

    let buffer = terminal.backend().buffer();
    let mut screen = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            screen.push_str(buffer[(x, y)].symbol());
        }
        screen.push('\n');
    }
    screen
}

fn app_with(snapshot: Snapshot) -> App {
    let (_tx, source) = ChannelSource::with_initial(snapshot, "fixture");
    let mut app = App::new(Box::new(source), Theme::dark());
    app.reload_data().unwrap();
    app
}

#[test]
fn test_summary_cards_show_aggregates() {
    let app = app_with(sample_snapshot_at(Some(TS)).unwrap());
    let screen = draw(&app, 120, 32);

    assert!(screen.contains("Cities Monitored"));
    assert!(screen.contains("Average AQI"));
    assert!(screen.contains("134"));
    assert!(screen.contains("185"));
    assert!(screen.contains("Delhi"));
    assert!(screen.contains("Bangalore"));
    assert!(screen.contains("worst: Unhealthy"));
}

#[test]
fn test_table_view_lists_every_city() {
    let mut app = app_with(sample_snapshot_at(Some(TS)).unwrap());
    app.set_view(View::Table);
    let screen = draw(&app, 120, 32);

    assert!(screen.contains("PM2.5"));
    assert!(screen.contains("Last Updated"));
    for city in ["Delhi", "Mumbai", "Bangalore", "Chennai", "Kolkata"] {
        assert!(screen.contains(city), "missing {city}");
    }
    assert!(screen.contains("Cities (5/5)"));
}

#[test]
fn test_table_shows_exact_concentrations_and_date() {
    let snapshot = Snapshot::builder()
        .record("Pune", |r| {
            r.aqi(42)
                .pm25(12.5)
                .pm10(30.25)
                .no2(8.7)
                .so2(0.4)
                .co(0.66)
                .timestamp("2024-11-05T12:00:00Z")
        })
        .build()
        .unwrap();
    let mut app = app_with(snapshot);
    app.set_view(View::Table);
    let screen = draw(&app, 120, 32);

    let row = screen.lines().find(|l| l.contains("Pune") && l.contains("GOOD")).unwrap();
    for value in ["12.5", "30.25", "8.7", "0.4", "0.66"] {
        assert!(row.contains(value), "missing {value} in {row:?}");
    }
    // Noon UTC falls on the same calendar day in every common zone
    assert!(row.contains("2024-11-05"), "missing date in {row:?}");
}

#[test]
fn test_chart_view_has_legend() {
    let mut app = app_with(sample_snapshot_at(Some(TS)).unwrap());
    app.set_view(View::Chart);
    let screen = draw(&app, 120, 32);

    assert!(screen.contains("PM10"));
    assert!(screen.contains("AQI and particulates by city"));
}

#[test]
fn test_empty_snapshot_shows_no_data() {
    let app = app_with(Snapshot::default());
    assert!(matches!(app.load_state(), LoadState::Loaded(d) if d.is_empty()));

    let screen = draw(&app, 120, 32);
    assert!(screen.contains("no data"));
    assert!(screen.contains("—"));
}

#[test]
fn test_failed_source_shows_error_panel() {
    let (tx, source) = ChannelSource::create("sensor feed");
    drop(tx);
    let mut app = App::new(Box::new(source), Theme::dark());
    assert!(app.reload_data().is_err());

    let screen = draw(&app, 120, 32);
    assert!(screen.contains("Data unavailable"));
    assert!(screen.contains("closed"));
}

#[test]
fn test_loading_before_first_snapshot() {
    let (_tx, source) = ChannelSource::create("sensor feed");
    let app = App::new(Box::new(source), Theme::dark());

    let screen = draw(&app, 120, 32);
    assert!(screen.contains("Loading air-quality readings"));
}

#[test]
fn test_small_terminal_message() {
    let mut app = App::new(Box::new(SampleSource::new()), Theme::dark());
    app.reload_data().unwrap();

    let screen = draw(&app, 40, 10);
    assert!(screen.contains("Terminal too small"));
}

#[test]
fn test_file_source_to_export() {
    let mut input = tempfile::NamedTempFile::new().unwrap();
    input.write_all(SAMPLE_JSON.as_bytes()).unwrap();
    input.flush().unwrap();

    let mut source = FileSource::new(input.path());
    assert!(source.poll().unwrap().is_some());

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("report.json");
    let mut app = App::new(Box::new(FileSource::new(input.path())), Theme::light());
    assert_eq!(app.reload_data(), Ok(true));
    app.export_state(&out).unwrap();

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(report["summary"]["mean_aqi"], 134);
    assert_eq!(report["summary"]["max_city"], "Delhi");
    assert_eq!(report["summary"]["min_city"], "Bangalore");
    assert_eq!(report["cities"][0]["severity"], "Unhealthy");
    assert_eq!(report["cities"][2]["color"], "#eab308");
    assert_eq!(report["cities"].as_array().map(|c| c.len()), Some(5));
}

#[test]
fn test_invalid_file_reports_unavailable() {
    let mut input = tempfile::NamedTempFile::new().unwrap();
    input.write_all(b"{ not json").unwrap();
    input.flush().unwrap();

    let mut app = App::new(Box::new(FileSource::new(input.path())), Theme::dark());
    assert!(app.reload_data().is_err());
    assert!(matches!(app.load_state(), LoadState::Failed(_)));
}
