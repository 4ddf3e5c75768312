use serde::{Deserialize, Serialize};

use crate::models::{GameStateView, Pos};

/// Body of `/click_tile` and `/flag_tile`.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct TileRequest {
    pub row: usize,
    pub col: usize,
}

impl From<Pos> for TileRequest {
    fn from(pos: Pos) -> Self {
        Self {
            row: pos.row,
            col: pos.col,
        }
    }
}

/// Body of `/set_difficulty`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DifficultyRequest {
    pub difficulty: String,
}

/// Envelope every endpoint answers with.
///
/// `success` is an application-level flag, independent from the HTTP status.
/// A missing flag counts as failure.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub game_state: Option<GameStateView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}
