mod app;
mod config;
mod ui;


use anyhow::Result;
use app::{App, FetchOutcome};
use config::DashboardConfig;
use dataguard_client::RunsClient;
use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::crossterm::ExecutableCommand;
use ratatui::Terminal;
use std::io::{stdout, Stdout};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

enum InputEvent {
    Refresh,
    Quit,
    Redraw,
}

/// Terminal input runs on a dedicated blocking thread; the event loop only
/// ever sees already-classified events over the channel.
fn spawn_input_listener(tx: mpsc::Sender<InputEvent>) {
    std::thread::spawn(move || loop {
        let event = match event::read() {
            Ok(event) => event,
            Err(_) => break,
        };
        let msg = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => InputEvent::Quit,
                KeyCode::Char('r') => InputEvent::Refresh,
                _ => continue,
            },
            Event::Resize(_, _) => InputEvent::Redraw,
            _ => continue,
        };
        if tx.blocking_send(msg).is_err() {
            break;
        }
    });
}

/// Enter the loading state and spawn one fetch, reporting back over the
/// channel tagged with the load token. No filter: the dashboard always
/// shows the server's default recent-runs scope.
fn spawn_load(app: &mut App, client: &RunsClient, tx: &mpsc::Sender<FetchOutcome>) {
    let token = app.begin_load();
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let runs = client.fetch_recent_runs(None).await;
        let _ = tx.send(FetchOutcome { token, runs }).await;
    });
}

async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, client: &RunsClient) -> Result<()> {
    let (input_tx, mut input_rx) = mpsc::channel(16);
    let (fetch_tx, mut fetch_rx) = mpsc::channel(4);
    spawn_input_listener(input_tx);

    let mut app = App::new();
    spawn_load(&mut app, client, &fetch_tx);

    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        tokio::select! {
            Some(input) = input_rx.recv() => match input {
                InputEvent::Quit => {
                    tracing::info!("Shutting down");
                    break;
                }
                InputEvent::Refresh => spawn_load(&mut app, client, &fetch_tx),
                InputEvent::Redraw => {}
            },
            Some(outcome) = fetch_rx.recv() => {
                if app.apply_fetch(outcome.token, outcome.runs) {
                    tracing::debug!(count = app.results.len(), "Run set updated");
                }
            }
            else => break,
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/dashboard.toml".to_string());
    let config = if std::path::Path::new(&config_path).exists() {
        DashboardConfig::load(&config_path)?
    } else {
        DashboardConfig::default()
    };

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("dataguard_dashboard=info".parse()?)
                .add_directive("dataguard_client=info".parse()?),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    tracing::info!(api = %config.api_base_url, "dataguard-dashboard starting");
    let client = RunsClient::new(&config.api_base_url);

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run(&mut terminal, &client).await;

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    result
}
