use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A tile coordinate. Sent by the server as a `[row, col]` pair.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Pos {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl From<Pos> for (usize, usize) {
    fn from(pos: Pos) -> Self {
        (pos.row, pos.col)
    }
}

/// Snapshot of the game as reported by the server.
///
/// The client never builds or edits one of these beyond the load-time
/// default; every field is taken verbatim from the last successful response.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct GameStateView {
    /// Adjacency counts indexed `[row][col]`; mines are stored as `-1`.
    pub board: Vec<Vec<i32>>,
    pub revealed: Vec<Pos>,
    pub flagged: Vec<Pos>,
    pub mines: Vec<Pos>,
    pub game_over: bool,
    pub win: bool,
    pub grid_size: usize,
    pub mine_count: usize,
}

impl Default for GameStateView {
    fn default() -> Self {
        let beginner = Difficulty::Beginner;
        Self {
            board: Vec::new(),
            revealed: Vec::new(),
            flagged: Vec::new(),
            mines: Vec::new(),
            game_over: false,
            win: false,
            grid_size: beginner.grid_size(),
            mine_count: beginner.mine_count(),
        }
    }
}

impl GameStateView {
    pub fn is_revealed(&self, pos: Pos) -> bool {
        self.revealed.contains(&pos)
    }

    pub fn is_flagged(&self, pos: Pos) -> bool {
        self.flagged.contains(&pos)
    }

    pub fn is_mine(&self, pos: Pos) -> bool {
        self.mines.contains(&pos)
    }

    /// Board value at `pos`, or `0` when the board has no such cell
    /// (the server sends an empty board before the first reveal on some paths).
    pub fn value_at(&self, pos: Pos) -> i32 {
        self.board
            .get(pos.row)
            .and_then(|row| row.get(pos.col))
            .copied()
            .unwrap_or(0)
    }
}

/// Difficulty presets understood by the server.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Expert => "expert",
        }
    }

    pub fn grid_size(&self) -> usize {
        match self {
            Difficulty::Beginner => 9,
            Difficulty::Intermediate | Difficulty::Expert => 16,
        }
    }

    pub fn mine_count(&self) -> usize {
        match self {
            Difficulty::Beginner => 10,
            Difficulty::Intermediate => 40,
            Difficulty::Expert => 99,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty: {0}")]
pub struct UnknownDifficulty(pub String);

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|difficulty| difficulty.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownDifficulty(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_server_payload_with_pair_coordinates() {
        let json = r#"{
            "board": [[0, 1], [1, -1]],
            "revealed": [[0, 0], [0, 1]],
            "flagged": [[1, 0]],
            "mines": [[1, 1]],
            "game_over": false,
            "win": false,
            "grid_size": 2,
            "mine_count": 1
        }"#;

        let state: GameStateView = serde_json::from_str(json).unwrap();

        assert_eq!(state.grid_size, 2);
        assert!(state.is_revealed(Pos::new(0, 1)));
        assert!(!state.is_revealed(Pos::new(1, 0)));
        assert!(state.is_flagged(Pos::new(1, 0)));
        assert!(state.is_mine(Pos::new(1, 1)));
        assert_eq!(state.value_at(Pos::new(1, 1)), -1);
    }

    #[test]
    fn pos_serializes_as_row_col_pair() {
        let json = serde_json::to_string(&Pos::new(2, 3)).unwrap();
        assert_eq!(json, "[2,3]");
    }

    #[test]
    fn value_at_falls_back_to_zero_outside_board() {
        let state = GameStateView::default();
        assert_eq!(state.value_at(Pos::new(4, 4)), 0);
    }

    #[test]
    fn default_state_is_beginner_sized() {
        let state = GameStateView::default();
        assert_eq!(state.grid_size, 9);
        assert_eq!(state.mine_count, 10);
        assert!(state.revealed.is_empty());
        assert!(!state.game_over);
    }

    #[test]
    fn difficulty_names_round_trip_through_from_str() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.as_str().parse::<Difficulty>(), Ok(difficulty));
        }
        assert_eq!(" Expert ".parse::<Difficulty>(), Ok(Difficulty::Expert));
        assert!("nightmare".parse::<Difficulty>().is_err());
    }

    #[test]
    fn unknown_difficulty_names_the_input() {
        let err = "nightmare".parse::<Difficulty>().unwrap_err();
        assert_eq!(err, UnknownDifficulty("nightmare".into()));
        assert_eq!(err.to_string(), "unknown difficulty: nightmare");
    }

    #[test]
    fn difficulty_serializes_as_lowercase_name() {
        assert_eq!(
            serde_json::to_string(&Difficulty::Intermediate).unwrap(),
            r#""intermediate""#
        );
        assert_eq!(
            serde_json::from_str::<Difficulty>(r#""expert""#).unwrap(),
            Difficulty::Expert
        );
    }
}
