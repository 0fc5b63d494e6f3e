//! livescroll-news — a live-updating news aggregator for the terminal.
//!
//! ```text
//! ┌─────────────┐  watch   ┌──────────┐  draw()  ┌──────────┐
//! │ FeedService │ ───────► │  app.rs  │ ───────► │  ui.rs   │
//! │   (tasks)   │  (state) │ (view)   │          │ (render) │
//! └─────────────┘          └──────────┘          └──────────┘
//!        ▲ discover() / refresh()  ▲
//!        └──── Request ────────────┤ handle_key_event()
//!                             ┌──────────┐
//!                             │ input.rs │
//!                             └──────────┘
//! ```
//!
//! * **`app`** — view state: the latest feed snapshot and scroll position.
//! * **`ui`** — pure rendering: reads `App` state and draws widgets.
//! * **`input`** — maps key events to `App` mutations.
//! * **`main`** — wires everything together: load config, start the service,
//!   set up the terminal, and run the event loop.

mod app;
mod input;
mod ui;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use app::{App, Request};
use livescroll_news::config::DEFAULT_CONFIG_PATH;
use livescroll_news::{defaults, Config, FeedLinkDiscovery, FeedService, FeedState, RssFetcher};

const LOG_FILE: &str = "livescroll-news.log";

// ---------------------------------------------------------------------------
// RAII terminal guard — idiomatic cleanup even on panic
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
///
/// Constructing this struct enters raw mode + alternate screen.  When the
/// value is dropped (normally or during stack unwinding) it restores the
/// terminal.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Install a panic hook that restores the terminal before printing the
/// panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

/// Log to a file; the terminal belongs to the UI.  `RUST_LOG` overrides the
/// default filter.
fn init_logging() -> Result<()> {
    let log_file = std::fs::File::create(LOG_FILE)
        .with_context(|| format!("Failed to create log file: {LOG_FILE}"))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("livescroll_news=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(log_file)
        .with_ansi(false)
        .init();
    Ok(())
}

fn build_service(config: &Config) -> Result<FeedService> {
    let client = config.http.client()?;
    let fetcher = Arc::new(RssFetcher::new(client.clone()));
    let discovery = Arc::new(FeedLinkDiscovery::new(client, config.discovery.seed_pages.clone()));

    let placeholder = if config.refresh.placeholder {
        defaults::placeholder_items()
    } else {
        Vec::new()
    };
    let initial = FeedState::new(placeholder, config.initial_sources());

    Ok(FeedService::new(fetcher, discovery, initial, config.refresh.interval()))
}

/// Hand a user request to the service without blocking the UI.
fn dispatch(service: &FeedService, request: Request) {
    let service = service.clone();
    tokio::spawn(async move {
        match request {
            Request::Discover => {
                let outcome = service.discover().await;
                tracing::debug!(?outcome, "discovery requested from UI");
            }
            Request::Refresh => {
                let outcome = service.refresh().await;
                tracing::debug!(?outcome, "refresh requested from UI");
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    install_panic_hook();
    init_logging()?;

    // -- configuration -------------------------------------------------------
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = Config::load_or_default(&config_path)?;

    // -- start the feed service ----------------------------------------------
    let service = build_service(&config)?;
    let mut state_rx = service.subscribe();
    service.start();

    // -- terminal setup (RAII — Drop restores on exit or panic) --------------
    let mut guard = TerminalGuard::new()?;
    let mut app = App::new(state_rx.borrow_and_update().clone());

    // -- main event loop -----------------------------------------------------
    // Runs at ~10 fps (100 ms tick).  Each iteration:
    //   1. Pick up the latest published state.
    //   2. Render the UI.
    //   3. Poll for keyboard input (non-blocking, up to tick_rate).
    //   4. Forward any requested work to the service.
    let tick_rate = Duration::from_millis(100);

    loop {
        // 1. Sync state
        if state_rx.has_changed().unwrap_or(false) {
            app.sync(state_rx.borrow_and_update().clone());
        }

        // 2. Render
        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        // 3. Handle input
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(&mut app, key);
            }
        }

        // 4. Dispatch
        if let Some(request) = app.take_request() {
            dispatch(&service, request);
        }

        if app.quit {
            break;
        }
    }

    service.stop();
    // `guard` is dropped here, restoring the terminal.
    Ok(())
}
