use crate::movement::Pos;
use crate::tile::Tile;

/// Board tiles plus the overlay of cells Pacman has stood on.
///
/// Dimensions are fixed at construction. Positions handed to the accessors
/// come from legality-checked moves, so indexing outside the board panics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    tiles: Vec<Vec<Tile>>,
    visited: Vec<Vec<bool>>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Builds a grid from rectangular rows. Shape is validated by the map loader.
    pub(crate) fn from_rows(tiles: Vec<Vec<Tile>>) -> Self {
        let height = tiles.len();
        let width = tiles.first().map_or(0, Vec::len);
        debug_assert!(tiles.iter().all(|row| row.len() == width));
        Self {
            visited: vec![vec![false; width]; height],
            tiles,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_at(&self, pos: Pos) -> Tile {
        self.tiles[pos.row][pos.col]
    }

    pub fn set_tile(&mut self, pos: Pos, tile: Tile) {
        self.tiles[pos.row][pos.col] = tile;
    }

    pub fn is_visited(&self, pos: Pos) -> bool {
        self.visited[pos.row][pos.col]
    }

    /// Records that Pacman has occupied `pos`. Never cleared.
    pub fn mark_visited(&mut self, pos: Pos) {
        self.visited[pos.row][pos.col] = true;
    }

    pub fn count_pellets(&self) -> usize {
        self.count(Tile::Pellet)
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&t| t == tile)
            .count()
    }

    /// First Pacman cell in row-major order.
    pub fn find_pacman(&self) -> Option<Pos> {
        self.positions_of(Tile::Pacman).next()
    }

    /// Ghost cells in row-major order.
    pub fn find_ghosts(&self) -> Vec<Pos> {
        self.positions_of(Tile::Ghost).collect()
    }

    fn positions_of(&self, tile: Tile) -> impl Iterator<Item = Pos> + '_ {
        self.tiles.iter().enumerate().flat_map(move |(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(move |(_, &t)| t == tile)
                .map(move |(col, _)| Pos { row, col })
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.iter().map(Vec::as_slice)
    }

    /// Display form of the board, one string per row.
    pub fn render(&self) -> Vec<String> {
        self.tiles
            .iter()
            .map(|row| row.iter().map(|tile| tile.glyph()).collect())
            .collect()
    }
}
