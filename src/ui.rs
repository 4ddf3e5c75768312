//! Screen composition and hit testing.
//!
//! Everything on screen is derived from a [`ViewModel`], which is itself
//! rebuilt from the mirrored game state on every update.
use carlosweeper_client::{
    CellSize, Difficulty, GameStateView, GridLayout, GridView, InfoPanel, Pos, StatusBanner,
    render,
};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::theme;

const RESET_LABEL: &str = " Reset ";
const HELP: &str = "click: reveal | right click: flag | arrows/space/f | 1-3: difficulty | r: reset | q: quit";

/// Everything one frame shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub grid: GridView,
    pub layout: GridLayout,
    pub info: InfoPanel,
    pub banner: StatusBanner,
    pub active: Option<Difficulty>,
    pub cursor: Pos,
}

impl ViewModel {
    pub fn new(
        state: &GameStateView,
        layout: GridLayout,
        active: Option<Difficulty>,
        cursor: Pos,
    ) -> Self {
        Self {
            grid: render(state),
            layout,
            info: InfoPanel::from_state(state),
            banner: StatusBanner::from_state(state),
            active,
            cursor,
        }
    }
}

pub fn grid_layout(grid_size: usize) -> GridLayout {
    GridLayout::for_size(grid_size, CellSize::TERMINAL)
}

/// Clickable things outside the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Tile(Pos),
    Difficulty(Difficulty),
    Reset,
}

struct Areas {
    header: Rect,
    grid: Rect,
    info: Rect,
    status: Rect,
    footer: Rect,
}

fn areas(area: Rect, layout: &GridLayout) -> Areas {
    let grid_height = u16::try_from(layout.height())
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    let grid_width = u16::try_from(layout.width())
        .unwrap_or(u16::MAX)
        .saturating_add(2);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),           // Difficulty buttons
            Constraint::Length(grid_height), // Grid
            Constraint::Length(1),           // Info
            Constraint::Length(1),           // Status banner
            Constraint::Min(0),              // Footer
        ])
        .split(area);

    let grid = Rect {
        width: grid_width.min(chunks[1].width),
        ..chunks[1]
    };

    Areas {
        header: chunks[0],
        grid,
        info: chunks[2],
        status: chunks[3],
        footer: chunks[4],
    }
}

fn bordered() -> Block<'static> {
    Block::default().borders(Borders::ALL)
}

fn button_row(areas: &Areas) -> Rect {
    bordered().inner(areas.header)
}

fn button_label(difficulty: Difficulty) -> String {
    match difficulty {
        Difficulty::Beginner => " Beginner ".to_string(),
        Difficulty::Intermediate => " Intermediate ".to_string(),
        Difficulty::Expert => " Expert ".to_string(),
    }
}

/// Button row: the three difficulty presets followed by reset, one column apart.
fn button_rects(row: Rect) -> Vec<(Target, Rect)> {
    let targets = Difficulty::ALL
        .into_iter()
        .map(|d| (Target::Difficulty(d), button_label(d)))
        .chain(std::iter::once((Target::Reset, RESET_LABEL.to_string())));

    let mut x = row.x;
    let mut rects = Vec::new();
    for (target, label) in targets {
        let width = label.len() as u16;
        if x.saturating_add(width) > row.x.saturating_add(row.width) {
            break;
        }
        rects.push((
            target,
            Rect {
                x,
                y: row.y,
                width,
                height: row.height.min(1),
            },
        ));
        x = x.saturating_add(width + 1);
    }
    rects
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// What sits under the terminal cell `(column, row)`.
pub fn target_at(area: Rect, layout: &GridLayout, column: u16, row: u16) -> Option<Target> {
    let areas = areas(area, layout);

    let grid = bordered().inner(areas.grid);
    if contains(grid, column, row) {
        return layout
            .hit(u32::from(column - grid.x), u32::from(row - grid.y))
            .map(Target::Tile);
    }

    button_rects(button_row(&areas))
        .into_iter()
        .find(|(_, rect)| contains(*rect, column, row))
        .map(|(target, _)| target)
}

pub fn draw(frame: &mut Frame, model: &ViewModel) {
    let areas = areas(frame.area(), &model.layout);

    frame.render_widget(bordered().title(" Carlosweeper "), areas.header);
    for (target, rect) in button_rects(button_row(&areas)) {
        let (label, active) = match target {
            Target::Difficulty(d) => (button_label(d), model.active == Some(d)),
            _ => (RESET_LABEL.to_string(), false),
        };
        frame.render_widget(
            Paragraph::new(Span::styled(label, theme::button_style(active))),
            rect,
        );
    }

    let rows: Vec<Line> = model
        .grid
        .rows()
        .map(|tiles| {
            Line::from(
                tiles
                    .iter()
                    .map(|tile| {
                        let mut style = theme::tile_style(tile.visual);
                        if tile.pos == model.cursor {
                            style = theme::cursor_style(style);
                        }
                        Span::styled(theme::tile_text(tile.visual), style)
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    frame.render_widget(Paragraph::new(rows).block(bordered()), areas.grid);

    let info = Line::from(vec![
        Span::raw(" Revealed: "),
        Span::raw(model.info.revealed_count.to_string()),
        Span::raw("  Mines: "),
        Span::raw(model.info.mine_count.to_string()),
    ]);
    frame.render_widget(Paragraph::new(info), areas.info);

    let banner = Span::styled(
        format!(" {}", model.banner.message()),
        theme::banner_style(model.banner == StatusBanner::Won),
    );
    frame.render_widget(Paragraph::new(banner), areas.status);

    frame.render_widget(Paragraph::new(format!(" {}", HELP)), areas.footer);
}
