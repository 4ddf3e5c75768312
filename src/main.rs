//! Terminal client entry point.
mod app;
mod cli;
mod input;
mod logging;
mod terminal;
mod theme;
mod ui;

use anyhow::Result;
use app::App;
use carlosweeper_client::GameSession;
use clap::Parser;
use cli::Cli;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _log_guard = logging::setup_logging(cli.log_dir.as_deref())?;

    let config = cli.client_config();
    let session = GameSession::connect(&config)?;
    info!("🚀 Starting Carlosweeper client");

    let mut tui = terminal::init()?;
    let _restore = terminal::TerminalGuard;

    App::new(session).await.run(&mut tui, cli.difficulty).await
}
