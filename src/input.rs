//! Maps terminal input to player commands.
use carlosweeper_client::{Difficulty, GridLayout, Intent};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::ui::{Target, target_at};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send a request to the server
    Dispatch(Intent),
    /// Move the keyboard cursor
    Move { rows: isize, cols: isize },
    RevealCursor,
    FlagCursor,
    Quit,
    None,
}

pub fn command_for_key(key: KeyEvent) -> Command {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Command::Quit;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        KeyCode::Up | KeyCode::Char('k') => Command::Move { rows: -1, cols: 0 },
        KeyCode::Down | KeyCode::Char('j') => Command::Move { rows: 1, cols: 0 },
        KeyCode::Left | KeyCode::Char('h') => Command::Move { rows: 0, cols: -1 },
        KeyCode::Right | KeyCode::Char('l') => Command::Move { rows: 0, cols: 1 },
        KeyCode::Char(' ') | KeyCode::Enter => Command::RevealCursor,
        KeyCode::Char('f') => Command::FlagCursor,
        KeyCode::Char('1') => Command::Dispatch(Difficulty::Beginner.into()),
        KeyCode::Char('2') => Command::Dispatch(Difficulty::Intermediate.into()),
        KeyCode::Char('3') => Command::Dispatch(Difficulty::Expert.into()),
        KeyCode::Char('r') => Command::Dispatch(Intent::Reset),
        _ => Command::None,
    }
}

/// Left click reveals, right click flags. Buttons react to the left button only.
pub fn command_for_mouse(mouse: MouseEvent, area: Rect, layout: &GridLayout) -> Command {
    let button = match mouse.kind {
        MouseEventKind::Down(button) => button,
        _ => return Command::None,
    };

    match (target_at(area, layout, mouse.column, mouse.row), button) {
        (Some(Target::Tile(pos)), MouseButton::Left) => Command::Dispatch(Intent::Reveal(pos)),
        (Some(Target::Tile(pos)), MouseButton::Right) => Command::Dispatch(Intent::Flag(pos)),
        (Some(Target::Difficulty(difficulty)), MouseButton::Left) => {
            Command::Dispatch(difficulty.into())
        }
        (Some(Target::Reset), MouseButton::Left) => Command::Dispatch(Intent::Reset),
        _ => Command::None,
    }
}
