//! Carlosweeper Client Library
//!
//! This library provides a Rust client for the Carlosweeper game server. The
//! server owns the whole game; the client mirrors the state it reports and
//! turns that state into tile visuals and status text.
//!
//! ## Usage
//!
//! ### Session (Recommended)
//!
//! `GameSession` sends player intents, keeps the last reported state and
//! drops responses that were overtaken by a newer request of the same kind:
//!
//! ```rust,no_run
//! use carlosweeper_client::{ClientConfig, GameSession, InfoPanel, Pos, StatusBanner, render};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let session = GameSession::connect(&ClientConfig::from_env())?;
//!
//!     session.load().await?;
//!     session.reveal(Pos::new(0, 0)).await?;
//!     session.flag(Pos::new(1, 1)).await?;
//!
//!     let state = session.state().await;
//!     let grid = render(&state);
//!     let info = InfoPanel::from_state(&state);
//!     println!(
//!         "{} tiles, {} revealed, {} mines. {}",
//!         grid.tiles().len(),
//!         info.revealed_count,
//!         info.mine_count,
//!         StatusBanner::from_state(&state).message()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ### Low-Level Interface
//!
//! `GameClient` performs single round trips without keeping any state:
//!
//! ```rust,no_run
//! use carlosweeper_client::{GameClient, Transport};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let client = GameClient::new("http://localhost:5000")?;
//!     let state = client.set_difficulty("expert").await?;
//!     println!("{}x{} with {} mines", state.grid_size, state.grid_size, state.mine_count);
//!     Ok(())
//! }
//! ```

mod config;
mod error;
pub mod mirror;
pub mod render;
mod session;
pub mod status;
mod transport;

pub use config::{ClientConfig, DEFAULT_SERVER_URL};
pub use error::ClientError;
pub use mirror::{Applied, RequestKind, StateMirror, Ticket};
pub use render::{CellSize, GridLayout, GridView, TileView, TileVisual, render};
pub use session::{GameSession, Intent, SessionEvent};
pub use status::{InfoPanel, StatusBanner};
pub use transport::{GameClient, Transport};

// Re-export common types for convenience
pub use carlosweeper_common::{models::*, protocol::*};

pub type Result<T> = std::result::Result<T, ClientError>;
