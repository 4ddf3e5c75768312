use async_trait::async_trait;
use carlosweeper_common::{
    models::{GameStateView, Pos},
    protocol::{ApiResponse, DifficultyRequest, TileRequest},
};
use reqwest::{Client, Response, header::CONTENT_TYPE};
use serde::Serialize;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::{ClientConfig, ClientError, Result};

/// The five round trips the game server offers.
///
/// Every call resolves to the full state the server reports afterwards.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn fetch_state(&self) -> Result<GameStateView>;
    async fn set_difficulty(&self, difficulty: &str) -> Result<GameStateView>;
    async fn reveal_tile(&self, pos: Pos) -> Result<GameStateView>;
    async fn flag_tile(&self, pos: Pos) -> Result<GameStateView>;
    async fn reset_game(&self) -> Result<GameStateView>;
}

/// HTTP client for the game server API
pub struct GameClient {
    client: Client,
    base_url: Url,
}

impl GameClient {
    /// Create a new client connecting to the specified server URL
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        let client = Client::new();

        Ok(Self { client, base_url })
    }

    /// Create a client from a [`ClientConfig`], applying its timeout if any
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.server_url)?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get(&self, path: &str) -> Result<GameStateView> {
        let url = self.base_url.join(path)?;
        let response = self.client.get(url).send().await?;
        read_state(path, response).await
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: Option<&B>) -> Result<GameStateView> {
        let url = self.base_url.join(path)?;

        let request = self.client.post(url);
        let request = match body {
            Some(body) => request.json(body),
            None => request.header(CONTENT_TYPE, "application/json"),
        };

        let response = request.send().await?;
        read_state(path, response).await
    }
}

/// Unwrap the `{success, game_state}` envelope.
///
/// Non-OK statuses are reported without reading the body.
async fn read_state(path: &str, response: Response) -> Result<GameStateView> {
    let status = response.status();
    if !status.is_success() {
        warn!("{} answered with status {}", path, status);
        return Err(ClientError::Status(status));
    }

    let envelope: ApiResponse = response.json().await?;
    if !envelope.success {
        debug!("{} rejected: {:?}", path, envelope.error);
        return Err(ClientError::Rejected {
            error: envelope.error,
        });
    }

    envelope.game_state.ok_or(ClientError::MissingState)
}

#[async_trait]
impl Transport for GameClient {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_state(&self) -> Result<GameStateView> {
        self.get("/game_state").await
    }

    #[instrument(level = "debug", skip(self))]
    async fn set_difficulty(&self, difficulty: &str) -> Result<GameStateView> {
        let body = DifficultyRequest {
            difficulty: difficulty.to_string(),
        };
        self.post("/set_difficulty", Some(&body)).await
    }

    #[instrument(level = "debug", skip(self), fields(row = pos.row, col = pos.col))]
    async fn reveal_tile(&self, pos: Pos) -> Result<GameStateView> {
        self.post("/click_tile", Some(&TileRequest::from(pos))).await
    }

    #[instrument(level = "debug", skip(self), fields(row = pos.row, col = pos.col))]
    async fn flag_tile(&self, pos: Pos) -> Result<GameStateView> {
        self.post("/flag_tile", Some(&TileRequest::from(pos))).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn reset_game(&self) -> Result<GameStateView> {
        self.post::<()>("/reset_game", None).await
    }
}
