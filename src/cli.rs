use std::path::PathBuf;

use carlosweeper_client::{ClientConfig, Difficulty};
use clap::Parser;

/// Play minesweeper in the terminal against a Carlosweeper server.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Game server base URL [default: http://localhost:5000]
    #[arg(long, env = "CARLOSWEEPER_SERVER_URL")]
    pub server: Option<String>,

    /// Difficulty to switch to on start-up (beginner, intermediate, expert)
    #[arg(long)]
    pub difficulty: Option<Difficulty>,

    /// Directory for the log file
    #[arg(long, env = "CARLOSWEEPER_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// Environment configuration with command-line overrides applied.
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::from_env();
        match &self.server {
            Some(server) => config.with_server_url(server.clone()),
            None => config,
        }
    }
}
