use thiserror::Error;

/// Reasons a map is refused before any round is played.
#[derive(Error, Debug)]
pub enum MapError {
    #[error("failed to read map: {0}")]
    Io(#[from] std::io::Error),
    #[error("map is empty")]
    Empty,
    #[error("row {row} is {found} cells wide, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol { symbol: char, row: usize, col: usize },
    #[error("map has no Pacman start ('G')")]
    MissingPacman,
    #[error("map has {0} Pacman starts, expected exactly one")]
    MultiplePacmen(usize),
    #[error("map has {0} ghosts, expected exactly {expected}", expected = crate::ghost::GHOST_COUNT)]
    GhostCount(usize),
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T, E = MapError> = core::result::Result<T, E>;
