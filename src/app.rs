//! Pumps session events, user input, and rendering.
use anyhow::Result;
use carlosweeper_client::{
    Difficulty, GameClient, GameSession, GameStateView, GridLayout, Intent, Pos, SessionEvent,
};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;
use ratatui::layout::Rect;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    input::{self, Command},
    terminal::Tui,
    ui::{self, ViewModel},
};

pub struct App {
    session: GameSession<GameClient>,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    state: GameStateView,
    active: Option<Difficulty>,
    layout: GridLayout,
    cursor: Pos,
    screen: Rect,
}

impl App {
    pub async fn new(session: GameSession<GameClient>) -> Self {
        let events = session.subscribe_to_events().await;
        let state = session.state().await;
        let layout = ui::grid_layout(state.grid_size);

        Self {
            session,
            events,
            state,
            active: None,
            layout,
            cursor: Pos::new(0, 0),
            screen: Rect::default(),
        }
    }

    pub async fn run(mut self, terminal: &mut Tui, difficulty: Option<Difficulty>) -> Result<()> {
        self.session.spawn(Intent::startup(difficulty));
        self.draw(terminal)?;

        let mut input = EventStream::new();

        loop {
            tokio::select! {
                Some(event) = self.events.recv() => {
                    self.on_session_event(event).await;
                    self.draw(terminal)?;
                }
                maybe_event = input.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            if self.on_input(event, terminal)? {
                                break;
                            }
                        }
                        Some(Err(e)) => return Err(e.into()),
                        None => break,
                    }
                }
            }
        }

        info!("Quitting");
        Ok(())
    }

    async fn on_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::StateReplaced { kind, resized } => {
                debug!("Redrawing after {} response", kind.as_str());
                self.state = self.session.state().await;
                self.active = self
                    .session
                    .active_difficulty()
                    .await
                    .and_then(|name| name.parse().ok());
                if resized {
                    self.layout = ui::grid_layout(self.state.grid_size);
                    self.cursor = clamp(self.cursor, self.state.grid_size);
                }
            }
            SessionEvent::RequestFailed { kind } => {
                // already logged by the session; the previous state stays on screen
                debug!("{} request failed, keeping previous state", kind.as_str());
            }
        }
    }

    /// Returns `true` when the app should exit.
    fn on_input(&mut self, event: Event, terminal: &mut Tui) -> Result<bool> {
        let command = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => input::command_for_key(key),
            Event::Mouse(mouse) => input::command_for_mouse(mouse, self.screen, &self.layout),
            Event::Resize(_, _) => {
                self.draw(terminal)?;
                return Ok(false);
            }
            _ => return Ok(false),
        };

        match command {
            Command::Quit => return Ok(true),
            Command::Dispatch(intent) => {
                self.session.spawn(intent);
            }
            Command::RevealCursor => {
                self.session.spawn(Intent::Reveal(self.cursor));
            }
            Command::FlagCursor => {
                self.session.spawn(Intent::Flag(self.cursor));
            }
            Command::Move { rows, cols } => {
                self.cursor = step(self.cursor, rows, cols, self.state.grid_size);
                self.draw(terminal)?;
            }
            Command::None => {}
        }

        Ok(false)
    }

    fn draw(&mut self, terminal: &mut Tui) -> Result<()> {
        let model = ViewModel::new(&self.state, self.layout, self.active, self.cursor);
        let completed = terminal.draw(|frame| ui::draw(frame, &model));
        match completed {
            Ok(frame) => {
                self.screen = frame.area;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to draw frame: {}", e);
                Err(e.into())
            }
        }
    }
}

fn clamp(pos: Pos, grid_size: usize) -> Pos {
    let max = grid_size.saturating_sub(1);
    Pos::new(pos.row.min(max), pos.col.min(max))
}

fn step(pos: Pos, rows: isize, cols: isize, grid_size: usize) -> Pos {
    let max = grid_size.saturating_sub(1);
    Pos::new(
        pos.row.saturating_add_signed(rows).min(max),
        pos.col.saturating_add_signed(cols).min(max),
    )
}
