//! Math2Visual - Terminal Client
//!
//! Sends a math word problem to the generation service, shows the returned
//! visual language and SVG renderings, and lets the user edit and resubmit
//! the visual language or save either SVG to disk.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{error, info};

use math2visual::application::App;
use math2visual::infrastructure::{init_logging, Config, FileDownloads, HttpGenerationService};
use math2visual::presentation::{render_ui, InputHandler};

/// How long the event loop waits for a key before checking for completions.
const TICK: Duration = Duration::from_millis(100);

/// Entry point for the Math2Visual terminal client.
///
/// Loads configuration before touching the terminal so that configuration
/// errors are printed normally.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the HTTP client cannot be
/// built, or terminal setup fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    init_logging(&config);

    let service = HttpGenerationService::new(config.endpoint.clone())?;
    let downloads = FileDownloads::new(config.export_dir.clone());
    let mut app = App::new(Arc::new(service), Box::new(downloads));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = %err, "terminal loop failed");
        println!("{err:?}");
    }
    info!("exiting");

    Ok(())
}

/// Main application event loop.
///
/// Draws, handles at most one key press per tick, then applies any request
/// completion that arrived in the meantime.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    InputHandler::handle_key_event(app, key.code, key.modifiers);
                }
            }
        }

        app.poll_completions();

        if app.should_quit {
            return Ok(());
        }
    }
}
