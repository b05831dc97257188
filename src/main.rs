mod api;
mod app;
mod config;
mod convert;
mod format;
mod gate;
mod sanitize;
mod theme;
mod types;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use api::RateClient;
use app::App;
use config::Config;

#[derive(Parser)]
#[command(name = "satseur", about = "Live sats \u{21c4} EUR converter for the terminal")]
struct Args {
    /// Seconds between rate refreshes (overrides the config file)
    #[arg(long)]
    refresh: Option<u64>,
    /// Theme name (overrides the config file)
    #[arg(long)]
    theme: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load()?;
    if let Some(refresh) = args.refresh {
        config.refresh_interval_secs = refresh.max(30);
    }
    if let Some(name) = args.theme {
        config.theme = name;
    }

    let mut app = App::new(config);

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

    if let Err(ref e) = result {
        let msg = format!("Fatal: {}", e);
        app::log_error(&msg);
        eprintln!("Error: {}", e);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let client = Arc::new(RateClient::new());
    let (tx, mut rx) = mpsc::unbounded_channel();

    // First fetch completes before the recurring refresh timer starts.
    app.refresh_rate(&client).await;

    let tick_rate = Duration::from_millis(50);

    loop {
        terminal.draw(|f| ui::draw(f, &mut *app))?;

        app.poll_pending();

        // Completed background fetches, in arrival order. Overlapping
        // fetches are neither cancelled nor reordered.
        while let Ok(result) = rx.try_recv() {
            app.apply_fetch(result);
        }

        // Auto-refresh: fire-and-forget so typing stays live while the
        // request is in flight.
        let refresh_dur = Duration::from_secs(app.config.refresh_interval_secs);
        if app.last_fetch.is_none_or(|t| t.elapsed() >= refresh_dur) {
            app.begin_fetch();
            let client = client.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let _ = tx.send(client.fetch_eur_rate().await);
            });
        }

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(&key);
            }
        }

        if app.quit {
            break;
        }
    }

    Ok(())
}
