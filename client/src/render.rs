//! Projection of a [`GameStateView`] onto tile visuals.
//!
//! [`render`] rebuilds every tile from scratch on each call. There is no
//! diffing against a previous view: the same state always yields the same
//! [`GridView`].

use carlosweeper_common::models::{GameStateView, Pos};

pub const FLAG_GLYPH: &str = "🚩";
pub const MINE_GLYPH: &str = "💣";

/// What a single tile shows, in display priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileVisual {
    /// Flag glyph; wins over any revealed content.
    Flagged,
    /// Revealed tile that holds a mine.
    Mine,
    /// Revealed tile with a positive adjacency count.
    Number(u8),
    /// Revealed tile with no adjacent mines.
    Empty,
    /// Not revealed yet.
    Hidden,
}

impl TileVisual {
    /// Style classes, as the web page applied them to the tile element.
    pub fn classes(&self) -> &'static [&'static str] {
        match self {
            TileVisual::Flagged | TileVisual::Hidden => &["tile"],
            TileVisual::Mine => &["tile", "revealed", "mine"],
            TileVisual::Number(_) => &["tile", "revealed"],
            TileVisual::Empty => &["tile", "revealed", "empty"],
        }
    }

    pub fn is_revealed(&self) -> bool {
        matches!(
            self,
            TileVisual::Mine | TileVisual::Number(_) | TileVisual::Empty
        )
    }

    /// Text content of the tile; blank for hidden and empty tiles.
    pub fn glyph(&self) -> String {
        match self {
            TileVisual::Flagged => FLAG_GLYPH.to_string(),
            TileVisual::Mine => MINE_GLYPH.to_string(),
            TileVisual::Number(n) => n.to_string(),
            TileVisual::Empty | TileVisual::Hidden => String::new(),
        }
    }
}

/// Glyph image for an adjacency count. Counts without an image fall back to text.
pub fn number_asset(n: u8) -> Option<&'static str> {
    match n {
        1 => Some("one.png"),
        2 => Some("two.png"),
        3 => Some("three.png"),
        4 => Some("four.png"),
        5 => Some("five.png"),
        6 => Some("six.png"),
        7 => Some("seven.png"),
        8 => Some("eight.png"),
        9 => Some("nine.png"),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileView {
    pub pos: Pos,
    pub visual: TileVisual,
}

/// Every tile of a square grid in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    size: usize,
    tiles: Vec<TileView>,
}

impl GridView {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[TileView] {
        &self.tiles
    }

    pub fn tile(&self, pos: Pos) -> Option<&TileView> {
        if pos.row < self.size && pos.col < self.size {
            self.tiles.get(pos.row * self.size + pos.col)
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[TileView]> {
        // chunks(0) panics
        self.tiles.chunks(self.size.max(1))
    }
}

/// Decide what the tile at `pos` shows.
pub fn tile_visual(state: &GameStateView, pos: Pos) -> TileVisual {
    if state.is_flagged(pos) {
        return TileVisual::Flagged;
    }
    if !state.is_revealed(pos) {
        return TileVisual::Hidden;
    }
    if state.is_mine(pos) {
        return TileVisual::Mine;
    }

    match state.value_at(pos) {
        value if value > 0 => TileVisual::Number(u8::try_from(value).unwrap_or(u8::MAX)),
        _ => TileVisual::Empty,
    }
}

/// Build the full tile view for `state`.
pub fn render(state: &GameStateView) -> GridView {
    let size = state.grid_size;
    let mut tiles = Vec::with_capacity(size * size);

    for row in 0..size {
        for col in 0..size {
            let pos = Pos::new(row, col);
            tiles.push(TileView {
                pos,
                visual: tile_visual(state, pos),
            });
        }
    }

    GridView { size, tiles }
}

/// Dimensions of one tile in the target's units (pixels on a page,
/// character cells in a terminal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub width: u16,
    pub height: u16,
}

impl CellSize {
    /// The page used fixed 30px tiles.
    pub const PIXELS: CellSize = CellSize {
        width: 30,
        height: 30,
    };
    pub const TERMINAL: CellSize = CellSize {
        width: 3,
        height: 1,
    };
}

/// Size of the grid container for a given board size.
///
/// Must be recomputed whenever the server reports a new `grid_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: usize,
    pub rows: usize,
    pub cell: CellSize,
}

/// `count` cells of `cell` units each, saturating instead of wrapping.
fn span(count: usize, cell: u16) -> u32 {
    u32::try_from(count)
        .unwrap_or(u32::MAX)
        .saturating_mul(u32::from(cell))
}

impl GridLayout {
    pub fn for_size(grid_size: usize, cell: CellSize) -> Self {
        Self {
            columns: grid_size,
            rows: grid_size,
            cell,
        }
    }

    pub fn width(&self) -> u32 {
        span(self.columns, self.cell.width)
    }

    pub fn height(&self) -> u32 {
        span(self.rows, self.cell.height)
    }

    /// Top-left corner of the tile at `pos`, relative to the container.
    pub fn origin(&self, pos: Pos) -> (u32, u32) {
        (span(pos.col, self.cell.width), span(pos.row, self.cell.height))
    }

    /// Tile under the point `(x, y)`, relative to the container.
    pub fn hit(&self, x: u32, y: u32) -> Option<Pos> {
        if self.cell.width == 0 || self.cell.height == 0 {
            return None;
        }

        let col = usize::try_from(x / u32::from(self.cell.width)).unwrap_or(usize::MAX);
        let row = usize::try_from(y / u32::from(self.cell.height)).unwrap_or(usize::MAX);
        (row < self.rows && col < self.columns).then_some(Pos::new(row, col))
    }
}
