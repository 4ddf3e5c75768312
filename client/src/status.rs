use carlosweeper_common::models::GameStateView;

pub const WIN_MESSAGE: &str = "YAYYYYY Congratulations! You won!";
pub const LOSS_MESSAGE: &str = "NOOOOO Game Over! You hit a mine!";

/// Counters shown next to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoPanel {
    pub revealed_count: usize,
    pub mine_count: usize,
}

impl InfoPanel {
    pub fn from_state(state: &GameStateView) -> Self {
        Self {
            revealed_count: state.revealed.len(),
            mine_count: state.mine_count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBanner {
    None,
    Won,
    Lost,
}

impl StatusBanner {
    pub fn from_state(state: &GameStateView) -> Self {
        match (state.game_over, state.win) {
            (false, _) => StatusBanner::None,
            (true, true) => StatusBanner::Won,
            (true, false) => StatusBanner::Lost,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            StatusBanner::None => "",
            StatusBanner::Won => WIN_MESSAGE,
            StatusBanner::Lost => LOSS_MESSAGE,
        }
    }
}
