use std::sync::Arc;

use carlosweeper_common::models::{Difficulty, GameStateView, Pos};
use tokio::sync::{RwLock, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::{
    ClientConfig, GameClient, Result,
    mirror::{Applied, RequestKind, StateMirror},
    transport::Transport,
};

/// A player intent, one per server round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Fetch the current state, as on start-up
    Load,
    /// Switch difficulty by name; any name the server knows is accepted
    SetDifficulty(String),
    /// Primary action on a tile
    Reveal(Pos),
    /// Secondary action on a tile
    Flag(Pos),
    Reset,
}

impl Intent {
    /// The single request that opens a session.
    ///
    /// A difficulty response already carries a full board, so no separate
    /// load is sent when one is given; a load racing it could land last and
    /// put the old board back.
    pub fn startup(difficulty: Option<Difficulty>) -> Self {
        difficulty.map_or(Intent::Load, Intent::from)
    }

    pub fn kind(&self) -> RequestKind {
        match self {
            Intent::Load => RequestKind::Load,
            Intent::SetDifficulty(_) => RequestKind::Difficulty,
            Intent::Reveal(_) => RequestKind::Reveal,
            Intent::Flag(_) => RequestKind::Flag,
            Intent::Reset => RequestKind::Reset,
        }
    }
}

impl From<Difficulty> for Intent {
    fn from(difficulty: Difficulty) -> Self {
        Intent::SetDifficulty(difficulty.as_str().to_string())
    }
}

/// Events emitted by the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The mirrored state was replaced; redraw everything
    StateReplaced {
        kind: RequestKind,
        /// The grid size changed, so the tile layout must be recomputed first
        resized: bool,
    },
    /// A request produced no new state. The previous state is still shown.
    RequestFailed { kind: RequestKind },
}

/// Drives the server on behalf of the player and mirrors what it reports.
///
/// Cloning is cheap; clones share the transport, the mirror and the event
/// subscriber.
pub struct GameSession<T: Transport> {
    transport: Arc<T>,
    mirror: Arc<RwLock<StateMirror>>,
    event_sender: Arc<RwLock<Option<mpsc::UnboundedSender<SessionEvent>>>>,
}

impl<T: Transport> Clone for GameSession<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            mirror: self.mirror.clone(),
            event_sender: self.event_sender.clone(),
        }
    }
}

impl GameSession<GameClient> {
    /// Create a session talking HTTP to the configured server
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let client = GameClient::from_config(config)?;
        info!("Using game server at {}", client.base_url());
        Ok(Self::new(client))
    }
}

impl<T: Transport> GameSession<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            mirror: Arc::new(RwLock::new(StateMirror::new())),
            event_sender: Arc::new(RwLock::new(None)),
        }
    }

    /// Subscribe to session events. Returns a receiver for session events.
    pub async fn subscribe_to_events(&self) -> mpsc::UnboundedReceiver<SessionEvent> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut event_sender = self.event_sender.write().await;
        *event_sender = Some(sender);
        receiver
    }

    /// Get the mirrored game state
    pub async fn state(&self) -> GameStateView {
        self.mirror.read().await.state().clone()
    }

    /// Get the last difficulty the server confirmed
    pub async fn active_difficulty(&self) -> Option<String> {
        self.mirror
            .read()
            .await
            .active_difficulty()
            .map(str::to_string)
    }

    /// Run one round trip for `intent` and apply its result.
    ///
    /// Failures are logged and returned; the mirror keeps its previous state.
    pub async fn dispatch(&self, intent: Intent) -> Result<Applied> {
        let kind = intent.kind();
        let ticket = self.mirror.write().await.issue(kind);
        debug!("Dispatching {:?} (seq {})", intent, ticket.seq());

        let outcome = match &intent {
            Intent::Load => self.transport.fetch_state().await,
            Intent::SetDifficulty(difficulty) => self.transport.set_difficulty(difficulty).await,
            Intent::Reveal(pos) => self.transport.reveal_tile(*pos).await,
            Intent::Flag(pos) => self.transport.flag_tile(*pos).await,
            Intent::Reset => self.transport.reset_game().await,
        };

        let state = match outcome {
            Ok(state) => state,
            Err(e) => {
                if e.is_transport() {
                    error!("Error sending {} request: {}", kind.as_str(), e);
                } else {
                    warn!("{} request produced no state: {}", kind.as_str(), e);
                }
                self.emit(SessionEvent::RequestFailed { kind }).await;
                return Err(e);
            }
        };

        let applied = {
            let mut mirror = self.mirror.write().await;
            match &intent {
                Intent::SetDifficulty(difficulty) => {
                    mirror.apply_difficulty(ticket, difficulty, state)
                }
                _ => mirror.apply(ticket, state),
            }
        };

        match applied {
            Applied::Replaced { resized } => {
                if resized {
                    info!("Grid resized by {} response", kind.as_str());
                }
                self.emit(SessionEvent::StateReplaced { kind, resized })
                    .await;
            }
            Applied::Stale => {
                debug!(
                    "Discarding stale {} response (seq {})",
                    kind.as_str(),
                    ticket.seq()
                );
            }
        }

        Ok(applied)
    }

    /// Run [`dispatch`](Self::dispatch) in the background.
    ///
    /// Requests are not serialized; several may be in flight at once.
    pub fn spawn(&self, intent: Intent) -> JoinHandle<()> {
        let session = self.clone();
        tokio::spawn(async move {
            let _ = session.dispatch(intent).await;
        })
    }

    /// Fetch the current state from the server
    pub async fn load(&self) -> Result<Applied> {
        self.dispatch(Intent::Load).await
    }

    /// Switch difficulty; the server answers with a fresh board
    pub async fn set_difficulty(&self, difficulty: impl Into<String>) -> Result<Applied> {
        let difficulty = difficulty.into();
        info!("Setting difficulty to {}", difficulty);
        self.dispatch(Intent::SetDifficulty(difficulty)).await
    }

    /// Reveal the tile at the specified position
    pub async fn reveal(&self, pos: Pos) -> Result<Applied> {
        debug!("Revealing tile at ({}, {})", pos.row, pos.col);
        self.dispatch(Intent::Reveal(pos)).await
    }

    /// Flag/unflag the tile at the specified position
    pub async fn flag(&self, pos: Pos) -> Result<Applied> {
        debug!("Flagging tile at ({}, {})", pos.row, pos.col);
        self.dispatch(Intent::Flag(pos)).await
    }

    /// Start over with the current difficulty
    pub async fn reset(&self) -> Result<Applied> {
        info!("Resetting game");
        self.dispatch(Intent::Reset).await
    }

    async fn emit(&self, event: SessionEvent) {
        if let Some(ref sender) = *self.event_sender.read().await {
            let _ = sender.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use reqwest::StatusCode;
    use tokio::sync::oneshot;

    use super::*;
    use crate::{
        ClientError,
        render::{CellSize, GridLayout, TileVisual, render},
        status::{InfoPanel, LOSS_MESSAGE, StatusBanner},
    };

    enum Reply {
        Now(Result<GameStateView>),
        Later(oneshot::Receiver<GameStateView>),
    }

    /// Answers requests from a queue and records what was asked.
    struct ScriptedTransport {
        replies: Mutex<VecDeque<Reply>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedTransport {
        fn with(replies: impl IntoIterator<Item = Reply>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().collect()),
                calls: Mutex::new(Vec::new()),
            }
        }

        async fn answer(&self, call: String) -> Result<GameStateView> {
            self.calls.lock().unwrap().push(call);
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("no scripted reply left");
            match reply {
                Reply::Now(result) => result,
                Reply::Later(receiver) => Ok(receiver.await.expect("reply sender dropped")),
            }
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn fetch_state(&self) -> Result<GameStateView> {
            self.answer("fetch".into()).await
        }

        async fn set_difficulty(&self, difficulty: &str) -> Result<GameStateView> {
            self.answer(format!("difficulty {}", difficulty)).await
        }

        async fn reveal_tile(&self, pos: Pos) -> Result<GameStateView> {
            self.answer(format!("reveal {} {}", pos.row, pos.col)).await
        }

        async fn flag_tile(&self, pos: Pos) -> Result<GameStateView> {
            self.answer(format!("flag {} {}", pos.row, pos.col)).await
        }

        async fn reset_game(&self) -> Result<GameStateView> {
            self.answer("reset".into()).await
        }
    }

    fn board(grid_size: usize, mine_count: usize) -> GameStateView {
        GameStateView {
            board: vec![vec![0; grid_size]; grid_size],
            grid_size,
            mine_count,
            ..GameStateView::default()
        }
    }

    fn with_revealed(mut state: GameStateView, revealed: &[(usize, usize)]) -> GameStateView {
        state.revealed = revealed.iter().copied().map(Pos::from).collect();
        state
    }

    #[tokio::test]
    async fn initial_load_renders_blank_grid() {
        let session = GameSession::new(ScriptedTransport::with([Reply::Now(Ok(board(9, 10)))]));

        let applied = session.load().await.unwrap();
        let state = session.state().await;
        let view = render(&state);
        let info = InfoPanel::from_state(&state);

        assert_eq!(applied, Applied::Replaced { resized: false });
        assert_eq!(view.tiles().len(), 81);
        assert!(view.tiles().iter().all(|t| t.visual == TileVisual::Hidden));
        assert_eq!((info.revealed_count, info.mine_count), (0, 10));
    }

    #[tokio::test]
    async fn reveal_replaces_state_and_notifies() {
        let revealed = with_revealed(board(9, 10), &[(0, 0), (0, 1), (1, 0)]);
        let transport = ScriptedTransport::with([Reply::Now(Ok(revealed.clone()))]);
        let session = GameSession::new(transport);
        let mut events = session.subscribe_to_events().await;

        session.reveal(Pos::new(0, 0)).await.unwrap();

        assert_eq!(session.state().await, revealed);
        assert_eq!(InfoPanel::from_state(&session.state().await).revealed_count, 3);
        assert_eq!(
            events.recv().await,
            Some(SessionEvent::StateReplaced {
                kind: RequestKind::Reveal,
                resized: false
            })
        );
        assert_eq!(
            *session.transport.calls.lock().unwrap(),
            vec!["reveal 0 0".to_string()]
        );
    }

    #[tokio::test]
    async fn losing_reveal_shows_mine_and_banner() {
        let mut lost = with_revealed(board(9, 10), &[(2, 3)]);
        lost.board[2][3] = -1;
        lost.mines = vec![Pos::new(2, 3)];
        lost.game_over = true;
        let session = GameSession::new(ScriptedTransport::with([Reply::Now(Ok(lost))]));

        session.reveal(Pos::new(2, 3)).await.unwrap();
        let state = session.state().await;

        assert_eq!(
            render(&state).tile(Pos::new(2, 3)).unwrap().visual,
            TileVisual::Mine
        );
        assert_eq!(StatusBanner::from_state(&state).message(), LOSS_MESSAGE);
    }

    #[tokio::test]
    async fn failures_leave_state_untouched() {
        let start = with_revealed(board(9, 10), &[(4, 4)]);
        let transport = ScriptedTransport::with([
            Reply::Now(Ok(start.clone())),
            Reply::Now(Err(ClientError::Rejected {
                error: Some("Missing row or col parameter".into()),
            })),
            Reply::Now(Err(ClientError::Status(StatusCode::BAD_REQUEST))),
            Reply::Now(Err(ClientError::MissingState)),
        ]);
        let session = GameSession::new(transport);
        session.load().await.unwrap();
        let before = render(&session.state().await);
        let mut events = session.subscribe_to_events().await;

        assert!(session.reveal(Pos::new(0, 0)).await.is_err());
        assert!(session.set_difficulty("nightmare").await.is_err());
        assert!(session.reset().await.is_err());

        let state = session.state().await;
        assert_eq!(state, start);
        assert_eq!(render(&state), before);
        assert_eq!(session.active_difficulty().await, None);
        for kind in [RequestKind::Reveal, RequestKind::Difficulty, RequestKind::Reset] {
            assert_eq!(
                events.recv().await,
                Some(SessionEvent::RequestFailed { kind })
            );
        }
    }

    #[tokio::test]
    async fn harder_difficulty_resizes_grid() {
        let session = GameSession::new(ScriptedTransport::with([
            Reply::Now(Ok(board(9, 10))),
            Reply::Now(Ok(board(16, 40))),
        ]));
        session.load().await.unwrap();
        let mut events = session.subscribe_to_events().await;

        session.dispatch(Difficulty::Intermediate.into()).await.unwrap();

        assert_eq!(
            events.recv().await,
            Some(SessionEvent::StateReplaced {
                kind: RequestKind::Difficulty,
                resized: true
            })
        );
        let state = session.state().await;
        let layout = GridLayout::for_size(state.grid_size, CellSize::PIXELS);
        assert_eq!((layout.columns, layout.rows), (16, 16));
        assert_eq!(render(&state).tiles().len(), 256);
        assert_eq!(session.active_difficulty().await.as_deref(), Some("intermediate"));
    }

    #[tokio::test]
    async fn flag_shows_flag_regardless_of_reveal() {
        let mut flagged = with_revealed(board(9, 10), &[(1, 1)]);
        flagged.board[1][1] = 2;
        flagged.flagged = vec![Pos::new(1, 1)];
        let session = GameSession::new(ScriptedTransport::with([Reply::Now(Ok(flagged))]));

        session.flag(Pos::new(1, 1)).await.unwrap();

        assert_eq!(
            render(&session.state().await)
                .tile(Pos::new(1, 1))
                .unwrap()
                .visual,
            TileVisual::Flagged
        );
    }

    #[tokio::test]
    async fn late_response_to_older_reveal_is_discarded() {
        let (older_tx, older_rx) = oneshot::channel();
        let (newer_tx, newer_rx) = oneshot::channel();
        let session = GameSession::new(ScriptedTransport::with([
            Reply::Later(older_rx),
            Reply::Later(newer_rx),
        ]));

        let older_state = with_revealed(board(9, 10), &[(0, 0)]);
        let newer_state = with_revealed(board(9, 10), &[(0, 0), (5, 5)]);

        let driver = async {
            newer_tx.send(newer_state.clone()).unwrap();
            tokio::task::yield_now().await;
            tokio::task::yield_now().await;
            older_tx.send(older_state).unwrap();
        };

        let (older, newer, _) = tokio::join!(
            session.reveal(Pos::new(0, 0)),
            session.reveal(Pos::new(5, 5)),
            driver
        );

        assert_eq!(older.unwrap(), Applied::Stale);
        assert_eq!(newer.unwrap(), Applied::Replaced { resized: false });
        assert_eq!(session.state().await, newer_state);
    }

    #[tokio::test]
    async fn older_reveal_still_lands_when_newer_one_fails() {
        let (older_tx, older_rx) = oneshot::channel();
        let session = GameSession::new(ScriptedTransport::with([
            Reply::Later(older_rx),
            Reply::Now(Err(ClientError::Rejected { error: None })),
        ]));
        let revealed = with_revealed(board(9, 10), &[(0, 0)]);

        let driver = async {
            tokio::task::yield_now().await;
            tokio::task::yield_now().await;
            older_tx.send(revealed.clone()).unwrap();
        };

        let (older, newer, _) = tokio::join!(
            session.reveal(Pos::new(0, 0)),
            session.reveal(Pos::new(5, 5)),
            driver
        );

        assert!(newer.is_err());
        assert_eq!(older.unwrap(), Applied::Replaced { resized: false });
        assert_eq!(session.state().await.revealed, vec![Pos::new(0, 0)]);
    }

    #[tokio::test]
    async fn startup_with_difficulty_sends_only_that_request() {
        let session = GameSession::new(ScriptedTransport::with([Reply::Now(Ok(board(16, 99)))]));

        let applied = session
            .dispatch(Intent::startup(Some(Difficulty::Expert)))
            .await
            .unwrap();

        assert_eq!(applied, Applied::Replaced { resized: true });
        assert_eq!(
            *session.transport.calls.lock().unwrap(),
            vec!["difficulty expert".to_string()]
        );
        let state = session.state().await;
        assert_eq!((state.grid_size, state.mine_count), (16, 99));
        assert_eq!(session.active_difficulty().await.as_deref(), Some("expert"));
    }

    #[tokio::test]
    async fn load_and_difficulty_are_sequenced_independently() {
        let (load_tx, load_rx) = oneshot::channel();
        let (difficulty_tx, difficulty_rx) = oneshot::channel();
        let session = GameSession::new(ScriptedTransport::with([
            Reply::Later(load_rx),
            Reply::Later(difficulty_rx),
        ]));

        let driver = async {
            difficulty_tx.send(board(16, 99)).unwrap();
            tokio::task::yield_now().await;
            tokio::task::yield_now().await;
            load_tx.send(board(9, 10)).unwrap();
        };
        let _ = tokio::join!(
            session.load(),
            session.dispatch(Difficulty::Expert.into()),
            driver
        );

        // different kinds are sequenced independently, so the late load wins
        assert_eq!(session.state().await.grid_size, 9);
        assert_eq!(Intent::startup(None), Intent::Load);
        assert_eq!(
            Intent::startup(Some(Difficulty::Expert)),
            Intent::SetDifficulty("expert".into())
        );
    }

    #[tokio::test]
    async fn spawned_requests_run_in_background() {
        let session = GameSession::new(ScriptedTransport::with([Reply::Now(Ok(board(16, 99)))]));
        let mut events = session.subscribe_to_events().await;

        session.spawn(Intent::Reset).await.unwrap();

        assert_eq!(
            events.recv().await,
            Some(SessionEvent::StateReplaced {
                kind: RequestKind::Reset,
                resized: true
            })
        );
        assert_eq!(session.state().await.mine_count, 99);
    }

    #[test]
    fn intents_map_to_request_kinds() {
        assert_eq!(Intent::Load.kind(), RequestKind::Load);
        assert_eq!(Intent::Flag(Pos::new(0, 0)).kind(), RequestKind::Flag);
        assert_eq!(
            Intent::from(Difficulty::Expert),
            Intent::SetDifficulty("expert".into())
        );
    }
}
