//! Turn-based Pacman: one player against three ghosts on a fixed board.
//!
//! The crate holds the turn engine. Loading a map, drawing the board and
//! reading keys live in the `pacman` binary.

pub mod error;
pub mod game;
pub mod ghost;
pub mod grid;
pub mod map;
pub mod movement;
pub mod tile;

pub use error::{GameError, MapError, Result};
pub use game::{Game, GameState, RoundReport};
pub use ghost::{Alternation, Ghost, GhostKind, GHOST_COUNT};
pub use grid::Grid;
pub use map::{load_map, parse_map, ParsedMap};
pub use movement::{propose_move, Dir, Pos};
pub use tile::Tile;
