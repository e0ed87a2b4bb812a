// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod data;
mod events;
mod source;
mod ui;

use app::{App, Variant, View};
use data::Thresholds;
use self::config::Settings;
use source::{DataSource, FileSource, HttpSource};

#[derive(Parser, Debug)]
#[command(name = "farmwatch")]
#[command(about = "Terminal dashboard for monitoring smart-farm sensor history")]
struct Args {
    /// Base URL of the farm backend
    #[arg(long)]
    base_url: Option<String>,

    /// Days of history to request (1-30)
    #[arg(short, long)]
    days: Option<u32>,

    /// Show the raw /farm-data document instead of the history dashboard
    #[arg(long)]
    raw: bool,

    /// Replay a saved response document from a file instead of fetching
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Re-request interval in seconds (0 fetches once)
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Crop health score below which a day is flagged
    #[arg(long)]
    poor_health: Option<f64>,

    /// Pest probability above which a day is flagged
    #[arg(long)]
    high_pest: Option<f64>,

    /// Path to a TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Diagnostics go to stderr; the alternate screen hides them until exit
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    settings.apply_overrides(
        args.base_url,
        args.days,
        args.refresh,
        args.poor_health,
        args.high_pest,
    );

    let thresholds = Thresholds {
        poor_health: settings.poor_health,
        high_pest: settings.high_pest,
    };

    let variant = if args.raw {
        Variant::Document
    } else {
        Variant::History {
            days: settings.clamped_days(),
        }
    };

    let refresh = Duration::from_secs(settings.refresh);

    if let Some(ref path) = args.file {
        return run_with_file(path, variant, thresholds, refresh);
    }

    run_with_http(&settings.base_url, variant, thresholds, refresh)
}

/// Run with a file-based data source
fn run_with_file(
    path: &PathBuf,
    variant: Variant,
    thresholds: Thresholds,
    refresh: Duration,
) -> Result<()> {
    let source = Box::new(FileSource::new(path));
    run_tui(source, variant, thresholds, refresh)
}

/// Run with an HTTP data source against the configured backend
fn run_with_http(
    base_url: &str,
    variant: Variant,
    thresholds: Thresholds,
    refresh: Duration,
) -> Result<()> {
    // The runtime stays alive for the duration of the TUI so the fetch
    // task keeps running on its worker threads.
    let rt = tokio::runtime::Runtime::new()?;

    let url = variant.endpoint(base_url);
    let source = rt.block_on(async { Box::new(HttpSource::spawn(&url)) as Box<dyn DataSource> });

    run_tui(source, variant, thresholds, refresh)
}

/// Run the TUI with the given data source
fn run_tui(
    source: Box<dyn DataSource>,
    variant: Variant,
    thresholds: Thresholds,
    refresh: Duration,
) -> Result<()> {
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
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Create app and poll once so a file source shows data immediately
    let mut app = App::new(source, variant, thresholds);
    let _ = app.poll_source();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, refresh);

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
    refresh: Duration,
) -> Result<()> {
    let mut last_request = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered =
                    ratatui::layout::Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5)
                        .intersection(area);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            // Render header with the condition summary
            ui::common::render_header(frame, app, chunks[0]);

            // Render tabs
            ui::common::render_tabs(frame, app, chunks[1]);

            // Render current view
            match app.current_view {
                View::Overview => ui::overview::render(frame, app, chunks[2]),
                View::Trends => ui::chart::render(frame, app, chunks[2]),
                View::History => ui::history::render(frame, app, chunks[2]),
                View::Raw => ui::raw::render(frame, app, chunks[2]),
            }

            // Render status bar
            ui::common::render_status_bar(frame, app, chunks[3]);

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Drain the source every tick; this never blocks
        let _ = app.poll_source();

        // Periodic re-request, disabled when the interval is zero
        if !refresh.is_zero() && last_request.elapsed() >= refresh {
            app.request_refresh();
            last_request = Instant::now();
        }
    }

    Ok(())
}
