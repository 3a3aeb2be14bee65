//! showreel - High Vision Showcase
//!
//! A terminal rendition of the High Vision site's interactive sections: the
//! offers carousel with autoplay, hover-to-pause and page indicators, the
//! "how we work" animation, the company story and toast notifications.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use showreel::application::App;
use showreel::infrastructure::{ConfigRepository, ShowcaseConfig};
use showreel::presentation::{render_ui, InputHandler};

/// Longest the loop sleeps when no timer is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Entry point for the showreel terminal showcase.
///
/// Loads the optional config file given as first argument, sets up logging
/// and the terminal, and runs the event loop until the user quits.
///
/// # Errors
///
/// Returns an error if the config file is invalid, if terminal setup fails
/// or if there are issues with the terminal interface during runtime.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let config = match std::env::args().nth(1) {
        Some(path) => ConfigRepository::load_config(Path::new(&path))?,
        None => ShowcaseConfig::default(),
    };
    let mut app = App::new(config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    app.mount(size.width, size.height);
    let res = run_app(&mut terminal, &mut app, Instant::now());
    app.shutdown();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    info!("showreel exited");
    Ok(())
}

/// Sends tracing output to `showreel.log`; the terminal belongs to the UI.
fn init_tracing() -> io::Result<()> {
    let file = File::create("showreel.log")?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "showreel=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

/// Main application event loop.
///
/// Runs due timers, redraws, then waits for input no longer than the next
/// timer allows. Continues until the user presses 'q' in normal mode.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, started: Instant) -> io::Result<()> {
    loop {
        let now = elapsed_ms(started);
        app.advance_to(now);
        terminal.draw(|f| render_ui(f, app))?;

        let timeout = app
            .next_due()
            .map_or(IDLE_POLL, |due| Duration::from_millis(due.saturating_sub(now)).min(IDLE_POLL));
        if !event::poll(timeout)? {
            continue;
        }

        let event = event::read()?;
        if !InputHandler::handle_event(app, event, elapsed_ms(started)) {
            return Ok(());
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
