use carlosweeper_common::models::GameStateView;

/// Request categories that are sequenced independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Load,
    Difficulty,
    Reveal,
    Flag,
    Reset,
}

impl RequestKind {
    const COUNT: usize = 5;

    fn index(self) -> usize {
        match self {
            RequestKind::Load => 0,
            RequestKind::Difficulty => 1,
            RequestKind::Reveal => 2,
            RequestKind::Flag => 3,
            RequestKind::Reset => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Load => "load",
            RequestKind::Difficulty => "difficulty",
            RequestKind::Reveal => "reveal",
            RequestKind::Flag => "flag",
            RequestKind::Reset => "reset",
        }
    }
}

/// Handed out when a request is issued, presented again when its response lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    kind: RequestKind,
    seq: u64,
}

impl Ticket {
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Outcome of offering a server state to the mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The mirror now holds the new state. `resized` is set when the grid
    /// size changed and the tile layout must be recomputed.
    Replaced { resized: bool },
    /// A newer request of the same kind was already applied; the state was dropped.
    Stale,
}

/// Local copy of the last state the server reported.
///
/// The state is only ever replaced as a whole, through [`StateMirror::apply`].
#[derive(Debug, Default)]
pub struct StateMirror {
    state: GameStateView,
    active_difficulty: Option<String>,
    issued: [u64; RequestKind::COUNT],
    applied: [u64; RequestKind::COUNT],
}

impl StateMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GameStateView {
        &self.state
    }

    /// The last difficulty the server confirmed, if any was chosen this session.
    pub fn active_difficulty(&self) -> Option<&str> {
        self.active_difficulty.as_deref()
    }

    /// Register a new outgoing request of `kind`.
    pub fn issue(&mut self, kind: RequestKind) -> Ticket {
        let slot = &mut self.issued[kind.index()];
        *slot += 1;
        Ticket { kind, seq: *slot }
    }

    /// Whether a response for `ticket` may still be applied: no newer
    /// request of its kind has had its response applied yet.
    ///
    /// A newer request that failed does not count, so the server state it
    /// never replaced can still land.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.seq > self.applied[ticket.kind.index()]
    }

    /// Replace the mirrored state with `state` unless `ticket` went stale.
    pub fn apply(&mut self, ticket: Ticket, state: GameStateView) -> Applied {
        if !self.is_current(ticket) {
            return Applied::Stale;
        }

        self.applied[ticket.kind.index()] = ticket.seq;
        let resized = self.state.grid_size != state.grid_size;
        self.state = state;
        Applied::Replaced { resized }
    }

    /// [`apply`](Self::apply) for a difficulty change, remembering the confirmed name.
    pub fn apply_difficulty(
        &mut self,
        ticket: Ticket,
        difficulty: &str,
        state: GameStateView,
    ) -> Applied {
        let applied = self.apply(ticket, state);
        if let Applied::Replaced { .. } = applied {
            self.active_difficulty = Some(difficulty.to_string());
        }
        applied
    }
}
