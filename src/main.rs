mod action;
mod api;
mod app;
mod config;
mod error;
mod event;
mod page;
mod pager;
mod tui;
mod types;
mod ui;

use std::panic;
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::action::Action;
use crate::api::ApiClient;
use crate::app::App;
use crate::config::Config;
use crate::event::Event;
use crate::tui::EventHandler;

#[derive(Parser, Debug)]
#[command(
    name = "tudu",
    version,
    about = "A TUI for managing named to-do lists against a remote REST backend"
)]
struct Cli {
    /// Base URL of the list service (overrides the config file)
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load();
    let base_url = cli.base_url.unwrap_or(config.api.base_url);
    let api = ApiClient::new(&base_url);

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let result = run(api).await;

    // Restore terminal
    tui::restore()?;

    result
}

async fn run(api: ApiClient) -> Result<(), Box<dyn std::error::Error>> {
    let mut terminal = tui::init()?;

    // Create action channel
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    // Create app state
    let mut app = App::new(api, action_tx.clone());

    // Create event handler
    let tick_rate = Duration::from_millis(250);
    let render_rate = Duration::from_millis(16); // ~60fps
    let mut events = EventHandler::new(tick_rate, render_rate);

    // Main loop
    loop {
        tokio::select! {
            Some(event) = events.next() => {
                if event.is_quit() {
                    break;
                }

                match event {
                    Event::Render => {
                        terminal.draw(|frame| ui::render(frame, &app))?;
                    }
                    _ => {
                        let action = app.handle_event(event);
                        if !matches!(action, Action::None) {
                            action_tx.send(action)?;
                        }
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                if let Action::SuspendForPager(content) = action {
                    // Leave the TUI, hand the terminal to the pager, then
                    // come back and repaint from scratch.
                    tui::restore()?;
                    let pager_cmd = pager::detect_pager();
                    if let Err(e) = pager::open_pager(&content, &pager_cmd) {
                        tracing::warn!("pager failed: {e}");
                    }
                    terminal = tui::init()?;
                    tui::drain_events();
                    terminal.clear()?;
                } else {
                    app.update(action);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
