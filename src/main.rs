use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use aqwatch::data::{export, DashboardData};
use aqwatch::source::sample_snapshot;
use aqwatch::ui::{self, Theme};
use aqwatch::{events, logging, App, DataSource, FileSource, SampleSource, Settings, ThemeChoice};

#[derive(Parser, Debug)]
#[command(name = "aqwatch")]
#[command(about = "Terminal dashboard for city air-quality readings")]
#[command(version)]
struct Args {
    /// JSON snapshot file to watch (built-in sample data when omitted)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Settings file (defaults to ./aqwatch.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Refresh interval in seconds
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Color theme
    #[arg(short, long, value_enum)]
    theme: Option<ThemeChoice>,

    /// Write logs to this file (filter with AQWATCH_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Export current state to JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

impl Args {
    /// Apply command-line flags on top of the layered settings.
    fn apply(self, mut settings: Settings) -> (Settings, Option<PathBuf>) {
        if self.file.is_some() {
            settings.file = self.file;
        }
        if let Some(refresh) = self.refresh {
            settings.refresh_secs = refresh;
        }
        if let Some(theme) = self.theme {
            settings.theme = theme;
        }
        if self.log_file.is_some() {
            settings.log_file = self.log_file;
        }
        (settings, self.export)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = Settings::load(args.config.as_deref())?;
    let (settings, export) = args.apply(settings);

    logging::init(settings.log_file.as_deref())?;
    info!(?settings, "starting");

    // Handle export mode (non-interactive)
    if let Some(export_path) = export {
        return export_to_file(settings.file.as_deref(), &export_path);
    }

    let source: Box<dyn DataSource> = match settings.file {
        Some(ref path) => Box::new(FileSource::new(path)),
        None => Box::new(SampleSource::new()),
    };

    let app = App::new(source, Theme::from_choice(settings.theme))
        .with_export_path(settings.export_path.clone());

    run_tui(app, Duration::from_secs(settings.refresh_secs.max(1)))
}

/// Load the current snapshot and write the report without starting the TUI.
fn export_to_file(file: Option<&Path>, export_path: &Path) -> Result<()> {
    let data = match file {
        Some(path) => DashboardData::load(path)?,
        None => DashboardData::from_snapshot(sample_snapshot()?)?,
    };
    export::write_report(&data, export_path)?;
    info!(path = %export_path.display(), cities = data.len(), "exported dashboard");
    println!("Exported {} cities to {}", data.len(), export_path.display());
    Ok(())
}

/// Run the TUI until the user quits
fn run_tui(mut app: App, refresh_interval: Duration) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, &mut app, refresh_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    // Forces a poll on the first iteration, after the loading frame is drawn
    let mut last_refresh: Option<Instant> = None;

    while app.running {
        terminal.draw(|frame| ui::render(frame, app)).context("failed to draw frame")?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                // Terminal will redraw on next iteration
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if last_refresh.is_none_or(|t| t.elapsed() >= refresh_interval) {
            if let Err(e) = app.reload_data() {
                warn!(error = %e, "refresh failed");
            }
            last_refresh = Some(Instant::now());
        }

        app.tick();
    }

    Ok(())
}
