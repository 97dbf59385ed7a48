//! Seller console - terminal back office for a seller marketplace
//!
//! A Ratatui-based TUI for inviting providers through the onboarding
//! wizard and deciding on return orders, backed by the seller REST API.
//!
//! An optional first argument selects the start page, e.g.
//! `seller-console /application/returns`.

mod api;
mod app;
mod config;
mod platform;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::App;
use config::ConsoleConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use state::onboarding::ValidationRules;
use state::Route;
use std::io;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seller_console=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = ConsoleConfig::load().context("failed to read config file")?;
    let rules = match config.phone_pattern.as_deref() {
        Some(pattern) => ValidationRules::with_phone_pattern(pattern)
            .with_context(|| format!("invalid phone_pattern {pattern:?}"))?,
        None => ValidationRules::default(),
    };
    let start = std::env::args().nth(1).map(|path| {
        Route::parse(&path).with_context(|| format!("unknown page {path:?}"))
    });
    let start = start.transpose()?;

    let mut app = App::new(config, rules)?;
    if let Some(route) = start {
        app.navigate(route).await;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw the UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    // Global quit: Ctrl+C
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }

                    app.handle_key(key).await?;
                }
                Event::Resize(_width, _height) => {
                    // Layout is recalculated on next draw
                }
                _ => {}
            }
        }

        // Check if app wants to quit
        if app.should_quit() {
            return Ok(());
        }
    }
}
