//! Holocron: a terminal browser for the Star Wars reference API.
//!
//! Lists characters, films, starships and vehicles with search, pagination and
//! favorites, and opens detail screens that link to related records.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line-oriented interface suitable for scripts:
//!
//! ```bash
//! printf '#search skywalker\n#person 1\n' | cargo run -p holocron -- --headless
//! ```

mod app;
mod cli;
mod events;
mod headless;
mod loader;
mod logging;
mod ui;

use std::io::{self, stdout};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use holocron_core::Browser;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::Instant;

use app::App;
use cli::Args;
use events::{handle_event, EventResult};
use loader::{Loaded, Loader};
use ui::render::render;

/// Longest wait for input before redrawing.
const TICK: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    logging::init(args.headless, args.log_file.as_deref())?;
    let config = args.browser_config();

    if args.headless {
        return headless::run_headless(config).await.map_err(|e| e.into());
    }

    // Open the session before touching the terminal so errors print normally
    let browser = Browser::open(config).await?;
    let (loader, loads) = Loader::channel(browser.client().clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, App::new(browser, loader), loads).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    mut loads: UnboundedReceiver<Loaded>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, &app))?;

        // Process any pending save operation
        if app.pending_save {
            app.pending_save = false;
            let report = std::mem::take(&mut app.report_save);
            match app.browser.save_favorites().await {
                Ok(true) => {
                    if app.quit_after_save {
                        return Ok(());
                    }
                    if report {
                        app.set_status("Favorites saved");
                    }
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::error!(error = %e, "saving favorites failed");
                    app.set_status(format!("Save failed: {e}"));
                    // Don't quit on save failure, let user see the error
                    app.quit_after_save = false;
                }
            }
        }

        // Apply finished fetches
        while let Ok(loaded) = loads.try_recv() {
            app.apply_loaded(loaded);
        }

        // Wake up in time for a pending search
        let timeout = app
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()).min(TICK))
            .unwrap_or(TICK);

        if event::poll(timeout)? {
            let ev = event::read()?;
            if handle_event(&mut app, ev) == EventResult::Quit {
                return Ok(());
            }
        }

        app.tick(Instant::now());

        if app.should_quit {
            return Ok(());
        }
    }
}
