use std::io::{self, Write};

use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use pacman_turns::{Game, Tile};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    /// Map glyphs, one column per cell.
    Ascii,
    /// Emoji, two columns per cell.
    Emoji,
}

impl Theme {
    const fn cell_width(self) -> usize {
        match self {
            Theme::Ascii => 1,
            Theme::Emoji => 2,
        }
    }
}

pub struct Renderer {
    theme: Theme,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn draw(&self, out: &mut impl Write, game: &Game) -> io::Result<()> {
        out.queue(Print('\n'))?;
        for row in game.grid().rows() {
            for &tile in row {
                out.queue(SetForegroundColor(color_for(tile)))?;
                out.queue(Print(self.cell_text(tile)))?;
            }
            out.queue(ResetColor)?;
            out.queue(Print('\n'))?;
        }
        out.queue(Print(format!(
            "Dots left to catch: {}\n",
            game.pellets_left()
        )))?;
        out.flush()
    }

    /// Glyph for `tile`, padded to the theme's cell width.
    fn cell_text(&self, tile: Tile) -> String {
        let mut text = match self.theme {
            Theme::Ascii => tile.glyph().to_string(),
            Theme::Emoji => match tile {
                Tile::Pacman => "😃",
                Tile::Ghost => "👻",
                Tile::Wall => "██",
                Tile::Pellet => "·",
                Tile::Empty => "",
            }
            .to_string(),
        };
        let width = UnicodeWidthStr::width(text.as_str());
        for _ in width..self.theme.cell_width() {
            text.push(' ');
        }
        text
    }
}

fn color_for(tile: Tile) -> Color {
    match tile {
        Tile::Pacman => Color::Yellow,
        Tile::Ghost => Color::Red,
        Tile::Wall => Color::Blue,
        Tile::Pellet => Color::White,
        Tile::Empty => Color::Reset,
    }
}
