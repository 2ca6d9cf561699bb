use crate::grid::Grid;

/// Board coordinates, 0-indexed from the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Straight-line distance to `other`, used by the chasing ghost.
    pub fn distance(self, other: Pos) -> f64 {
        let dr = self.row as f64 - other.row as f64;
        let dc = self.col as f64 - other.col as f64;
        (dr * dr + dc * dc).sqrt()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    /// Evaluation order shared by every ghost strategy.
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    /// `(row, col)` offset of one step.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
            Dir::Right => (0, 1),
        }
    }
}

/// Cell one step away from `pos`, or `None` when the step would leave the board.
pub fn neighbor(grid: &Grid, pos: Pos, dir: Dir) -> Option<Pos> {
    let (dr, dc) = dir.delta();
    let row = pos.row.checked_add_signed(dr)?;
    let col = pos.col.checked_add_signed(dc)?;
    if row >= grid.height() || col >= grid.width() {
        return None;
    }
    Some(Pos { row, col })
}

/// Neighbouring cell in `dir` when it is on the board and not a wall.
pub fn open_neighbor(grid: &Grid, pos: Pos, dir: Dir) -> Option<Pos> {
    neighbor(grid, pos, dir).filter(|&next| !grid.tile_at(next).is_wall())
}

pub fn can_move(grid: &Grid, pos: Pos, dir: Dir) -> bool {
    open_neighbor(grid, pos, dir).is_some()
}

/// Destination of a one-step move. A blocked move leaves the actor where it is.
pub fn propose_move(grid: &Grid, pos: Pos, dir: Dir) -> Pos {
    open_neighbor(grid, pos, dir).unwrap_or(pos)
}
