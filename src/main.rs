mod app;
mod clipboard;
mod clock;
mod domain;
mod error;
mod idle;
mod input;
mod logging;
mod notifications;
mod persistence;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::Parser;
use clipboard::SystemClipboard;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use domain::{TrackingState, WorkedTimeStore};
use notifications::DesktopNotifier;
use persistence::{load_settings, load_tracking_state, save_settings, DataDir, WorkedTimesFile};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use tracing::level_filters::LevelFilter;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "wlr")]
#[command(about = "Record the time you work, per task and client", long_about = None)]
struct Cli {
    /// Directory holding state.json, worked_times.json and settings.json
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace). Defaults to RUST_LOG, then info
    #[arg(long)]
    log_level: Option<LevelFilter>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = match cli.data_dir {
        Some(path) => DataDir::new(path),
        None => DataDir::platform_default()?,
    };
    data_dir.ensure()?;
    logging::enable_logging(&data_dir.logs_dir(), cli.log_level).context("Failed to set up logging")?;
    info!("Using data directory {}", data_dir.root().display());

    let mut app = load_app(&data_dir)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Save on exit; an open session stays open for the next run
    if let Err(e) = app.save() {
        error!("Error saving on exit: {:#}", e);
        eprintln!("Error saving: {:#}", e);
    }

    // Print any errors
    if let Err(err) = result {
        error!("Exited with error: {:#}", err);
        eprintln!("Error: {}", err);
    }

    Ok(())
}

/// Restore the tracking session and worked times from `data_dir`
fn load_app(data_dir: &DataDir) -> Result<AppState> {
    let settings_file = data_dir.settings_file();
    let settings = match load_settings(&settings_file) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Ignoring unreadable settings: {}", e);
            Default::default()
        }
    };
    // Write the defaults out once so there is a file to edit
    if !settings_file.exists() {
        if let Err(e) = save_settings(&settings_file, &settings) {
            warn!("Failed to write default settings: {}", e);
        }
    }

    let tracking = match load_tracking_state(data_dir.state_file()) {
        Ok(tracking) => tracking,
        Err(e) => {
            warn!("Tracking state unreadable, starting fresh: {}", e);
            TrackingState::new()
        }
    };

    let store = WorkedTimeStore::open(Box::new(WorkedTimesFile::new(data_dir.worked_times_file())))
        .with_context(|| format!("Failed to load {}", data_dir.worked_times_file().display()))?;
    info!(
        "Loaded {} worked intervals, tracking: {}",
        store.len(),
        tracking.is_tracking()
    );

    Ok(AppState::new(tracking, store, settings)
        .with_state_file(data_dir.state_file())
        .with_idle_probe(idle::platform_probe())
        .with_notifier(Box::new(DesktopNotifier))
        .with_clipboard(Box::new(SystemClipboard::default())))
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let mut needs_draw = true;
    let mut title = String::new();

    loop {
        if needs_draw {
            terminal.draw(|f| ui::render(f, app))?;
            needs_draw = false;
        }

        // The window title carries the tracking status, like a tray tooltip
        let status = format!("wlr: {}", app.tracking.status_text().replace('\n', ", "));
        if status != title {
            execute!(terminal.backend_mut(), SetTitle(&status))?;
            title = status;
        }

        // Wait for input, but no longer than the next elapsed-time tick
        let timeout = app.ticker.timeout(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                // Only process key press events (ignore key release)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if input::handle_key(app, key)? {
                        return Ok(());
                    }
                    needs_draw = true;
                }
                Event::Resize(_, _) => needs_draw = true,
                _ => {}
            }
        }

        if app.tick() {
            needs_draw = true;
        }
    }
}
