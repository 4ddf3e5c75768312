//! Terminal look of tiles and buttons.
use carlosweeper_client::{TileVisual, render::number_asset};
use ratatui::style::{Color, Modifier, Style};

/// Tile text, always three terminal columns wide.
pub fn tile_text(visual: TileVisual) -> String {
    match visual {
        // both glyphs are double width
        TileVisual::Flagged | TileVisual::Mine => format!("{} ", visual.glyph()),
        TileVisual::Number(n) if n < 10 => format!(" {} ", n),
        TileVisual::Number(n) => format!("{:>3}", n),
        TileVisual::Empty | TileVisual::Hidden => "   ".to_string(),
    }
}

fn class_style(class: &str) -> Style {
    match class {
        "revealed" => Style::default().bg(Color::White),
        "mine" => Style::default().bg(Color::Red),
        "empty" => Style::default().bg(Color::DarkGray),
        _ => Style::default().bg(Color::Gray),
    }
}

/// Later classes override earlier ones, so `tile revealed mine` ends up red.
pub fn tile_style(visual: TileVisual) -> Style {
    let style = visual
        .classes()
        .iter()
        .fold(Style::default(), |style, class| style.patch(class_style(class)));

    match visual {
        // counts with a glyph image get its colour; anything else is plain text
        TileVisual::Number(n) if number_asset(n).is_some() => style
            .fg(number_color(n))
            .add_modifier(Modifier::BOLD),
        _ => style,
    }
}

pub fn cursor_style(base: Style) -> Style {
    base.add_modifier(Modifier::REVERSED)
}

fn number_color(n: u8) -> Color {
    match n {
        1 => Color::Blue,
        2 => Color::Green,
        3 => Color::Red,
        4 => Color::Magenta,
        5 => Color::LightRed,
        6 => Color::Cyan,
        7 => Color::Black,
        _ => Color::DarkGray,
    }
}

pub fn button_style(active: bool) -> Style {
    if active {
        Style::default()
            .bg(Color::Yellow)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    }
}

pub fn banner_style(won: bool) -> Style {
    let color = if won { Color::LightGreen } else { Color::LightRed };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}
