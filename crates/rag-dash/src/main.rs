//! RAG-DASH: Terminal dashboard for a RAG backend.
//!
//! ## Usage
//!
//! ```bash
//! # Open the dashboard against localhost:8000/api (default)
//! rag-dash
//!
//! # Backend served at root on another host
//! rag-dash --endpoint http://rag.internal:8000 --base-path ""
//!
//! # One-shot commands
//! rag-dash health
//! rag-dash search "borrow checker" -k 5
//! rag-dash ask "What is ownership?" -k 3
//! rag-dash docs --kind raw --limit 10
//! rag-dash reload-index
//! ```

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use rag_api::{RagApiClient, RagBackend};
use rag_dash::cli::{run_command, Args};
use rag_dash::config::DashboardConfig;
use rag_dash::domain::App;
use rag_dash::telemetry::{init_logging, LogTarget};
use rag_dash::ui;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = DashboardConfig::from_env().context("invalid environment configuration")?;
    args.apply(&mut config);
    config.validate().context("invalid configuration")?;

    let client = RagApiClient::new(config.client_config()).context("failed to create API client")?;

    if let Some(command) = &args.command {
        let _log_guard = init_logging(&config.log_level, LogTarget::Stderr)?;
        let mut stdout = io::stdout().lock();
        return run_command(command, &client, &mut stdout).await;
    }

    // Held until exit so buffered log lines reach the file.
    let _log_guard = init_logging(&config.log_level, LogTarget::File(&config.log_file))?;
    tracing::info!(base_url = client.base_url(), "starting dashboard");

    // Setup terminal with panic hook for cleanup
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let backend: Arc<dyn RagBackend> = Arc::new(client);
    let mut app = App::mount(backend, &config);

    let result = run_app(&mut terminal, &mut app);
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = %err, "dashboard exited with error");
    }
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        let view = app.view();
        terminal.draw(|frame| ui::render(frame, &view))?;

        // Poll with a short timeout so background updates are redrawn
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
