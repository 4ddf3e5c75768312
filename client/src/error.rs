use reqwest::StatusCode;
use thiserror::Error;

/// Why a round trip to the server produced no new state.
///
/// None of these are shown to the player; the session logs them and keeps
/// the last good state.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url: {0}")]
    Url(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered with status {0}")]
    Status(StatusCode),

    #[error("server rejected request: {}", .error.as_deref().unwrap_or("no reason given"))]
    Rejected { error: Option<String> },

    #[error("server reported success without a game state")]
    MissingState,
}

impl ClientError {
    /// Transport-level failures, as opposed to answers the server chose to give.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Http(_))
    }
}
