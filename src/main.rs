mod alert;
mod app;
mod config;
mod error;
mod globals;
mod logging;
mod query;
mod render;
mod search;
mod ui;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use reqwest::Client;
use std::io;
use std::time::{Duration, Instant};
use dotenvy::dotenv;
use tokio::sync::mpsc;

use app::{App, AppMessage, Focus, SearchRequest};
use config::Config;
use ui::draw_ui;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env().context("Invalid configuration")?;
    let _log_guard = logging::init_logging(&config.log_dir)?;
    let client = globals::init_http_client(config.request_timeout)?;

    tracing::info!(endpoint = %config.endpoint, "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config);

    // Create channel for background tasks
    let (tx, mut rx) = mpsc::unbounded_channel();

    // Run the app
    let res = run_app(&mut terminal, &mut app, &config, client, tx, &mut rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        let detail = format!("{err:#}");
        tracing::error!(error = %detail, "exited with error");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Spawn the request in the background; the outcome comes back tagged with its token
fn spawn_search(
    client: &'static Client,
    endpoint: String,
    request: SearchRequest,
    tx: mpsc::UnboundedSender<AppMessage>,
) {
    tokio::spawn(async move {
        let outcome = search::reddit_search(client, &endpoint, &request.query).await;
        let _ = tx.send(AppMessage::SearchFinished {
            token: request.token,
            outcome,
        });
    });
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    config: &Config,
    client: &'static Client,
    tx: mpsc::UnboundedSender<AppMessage>,
    rx: &mut mpsc::UnboundedReceiver<AppMessage>,
) -> Result<()> {
    loop {
        // Check for messages from background tasks (non-blocking)
        while let Ok(msg) = rx.try_recv() {
            match msg {
                AppMessage::SearchFinished { token, outcome } => {
                    app.apply_outcome(token, outcome, Instant::now());
                }
            }
        }

        app.tick(Instant::now());

        // Draw UI
        terminal.draw(|f| draw_ui(f, app))?;

        // Handle input with timeout - only read ONE event per loop iteration
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        // Only handle key press events, ignore release and repeat
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('q') if ctrl => return Ok(()),
            KeyCode::Char('b') if ctrl => app.open_selected(Instant::now()),
            KeyCode::Char('s') if ctrl => {
                let result = render::export_html(&app.export_path, &app.results).await;
                app.finish_export(result, Instant::now());
            }
            KeyCode::Char('j') if ctrl => app.next_card(),
            KeyCode::Char('k') if ctrl => app.previous_card(),
            KeyCode::Down => app.next_card(),
            KeyCode::Up => app.previous_card(),
            KeyCode::Tab => app.form.cycle_focus(),
            KeyCode::Right => app.form.next_option(),
            KeyCode::Left => app.form.previous_option(),
            KeyCode::Enter => {
                if let Some(request) = app.submit(Instant::now()) {
                    spawn_search(client, config.endpoint.clone(), request, tx.clone());
                }
            }
            KeyCode::Char(c) if app.form.focus == Focus::Term && !ctrl => {
                app.form.term.push(c);
            }
            KeyCode::Backspace if app.form.focus == Focus::Term => {
                app.form.term.pop();
            }
            KeyCode::Esc => {
                app.form.term.clear();
            }
            _ => {}
        }
    }
}
