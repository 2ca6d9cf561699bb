//! Map loading: turns a text board into a validated [`Grid`].
//!
//! Symbols are `#` wall, `.` pellet, space for an empty cell, `G` for the
//! Pacman start and `X` for a ghost start. A board must be rectangular,
//! hold exactly one `G` and exactly [`GHOST_COUNT`] `X` cells.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{MapError, Result};
use crate::ghost::GHOST_COUNT;
use crate::grid::Grid;
use crate::movement::Pos;
use crate::tile::Tile;

#[derive(Clone, Debug)]
pub struct ParsedMap {
    pub grid: Grid,
    pub pacman: Pos,
    /// Ghost starts in row-major order; index decides each ghost's strategy.
    pub ghosts: [Pos; GHOST_COUNT],
}

pub fn load_map(path: impl AsRef<Path>) -> Result<ParsedMap> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    debug!("read map from {}", path.display());
    parse_map(&text)
}

pub fn parse_map(text: &str) -> Result<ParsedMap> {
    let mut lines: Vec<&str> = text
        .lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    if lines.is_empty() {
        return Err(MapError::Empty);
    }

    let mut rows = Vec::with_capacity(lines.len());
    for (row, line) in lines.iter().enumerate() {
        let tiles = line
            .chars()
            .enumerate()
            .map(|(col, symbol)| {
                Tile::from_glyph(symbol).ok_or(MapError::UnknownSymbol { symbol, row, col })
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push(tiles);
    }

    let expected = rows[0].len();
    if expected == 0 {
        return Err(MapError::Empty);
    }
    if let Some((row, tiles)) = rows
        .iter()
        .enumerate()
        .find(|(_, tiles)| tiles.len() != expected)
    {
        return Err(MapError::Ragged {
            row,
            expected,
            found: tiles.len(),
        });
    }

    let mut grid = Grid::from_rows(rows);

    let pacmen = grid.count(Tile::Pacman);
    if pacmen > 1 {
        return Err(MapError::MultiplePacmen(pacmen));
    }
    let pacman = grid.find_pacman().ok_or(MapError::MissingPacman)?;

    let found = grid.find_ghosts();
    let ghosts: [Pos; GHOST_COUNT] = found
        .as_slice()
        .try_into()
        .map_err(|_| MapError::GhostCount(found.len()))?;

    grid.mark_visited(pacman);
    debug!(
        "parsed {}x{} map, {} pellets",
        grid.width(),
        grid.height(),
        grid.count_pellets()
    );

    Ok(ParsedMap {
        grid,
        pacman,
        ghosts,
    })
}
