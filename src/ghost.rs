//! Ghost state and the three movement strategies.
//!
//! Every strategy is local and memoryless: it looks at the four neighbouring
//! cells of the ghost and, for the chaser, at Pacman's position. None of them
//! searches for a path. The maze is assumed open: every cell a ghost can
//! reach has at least one non-wall neighbour.

use log::{trace, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::Grid;
use crate::movement::{open_neighbor, Dir, Pos};
use crate::tile::Tile;

/// Ghost behaviour is assigned per index, so maps must supply exactly this many.
pub const GHOST_COUNT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GhostKind {
    /// Random walk.
    Wanderer,
    /// Greedy step towards Pacman.
    Chaser,
    /// Switches between the other two every round.
    Alternator,
}

impl GhostKind {
    /// Strategy of the ghost at `index` in row-major start order.
    pub const fn for_index(index: usize) -> GhostKind {
        match index {
            0 => GhostKind::Wanderer,
            1 => GhostKind::Chaser,
            _ => GhostKind::Alternator,
        }
    }
}

/// Which strategy the alternating ghost uses this round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alternation {
    #[default]
    Wander,
    Chase,
}

impl Alternation {
    pub const fn flipped(self) -> Alternation {
        match self {
            Alternation::Wander => Alternation::Chase,
            Alternation::Chase => Alternation::Wander,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ghost {
    pub kind: GhostKind,
    pub pos: Pos,
    /// Tile hidden by the ghost, recorded when it stepped onto its cell.
    pub beneath: Tile,
}

impl Ghost {
    pub fn new(kind: GhostKind, pos: Pos) -> Self {
        Self {
            kind,
            pos,
            beneath: Tile::Empty,
        }
    }

    /// Whether the ghost is hiding a pellet Pacman has not eaten.
    pub fn holds_pellet(&self, grid: &Grid) -> bool {
        self.beneath == Tile::Pellet && !grid.is_visited(self.pos)
    }

    pub fn next_pos(
        &self,
        grid: &Grid,
        pacman: Pos,
        alternation: Alternation,
        rng: &mut impl Rng,
    ) -> Pos {
        let next = match (self.kind, alternation) {
            (GhostKind::Wanderer, _) | (GhostKind::Alternator, Alternation::Wander) => {
                wander(grid, self.pos, rng)
            }
            (GhostKind::Chaser, _) | (GhostKind::Alternator, Alternation::Chase) => {
                chase(grid, self.pos, pacman)
            }
        };
        trace!("{:?} ghost {:?} -> {:?}", self.kind, self.pos, next);
        next
    }
}

/// Samples directions uniformly until one is not blocked.
pub fn wander(grid: &Grid, pos: Pos, rng: &mut impl Rng) -> Pos {
    if Dir::ALL
        .iter()
        .all(|&dir| open_neighbor(grid, pos, dir).is_none())
    {
        warn!("ghost at {:?} is walled in", pos);
        return pos;
    }
    loop {
        let dir = *Dir::ALL.choose(rng).unwrap_or(&Dir::Up);
        if let Some(next) = open_neighbor(grid, pos, dir) {
            return next;
        }
    }
}

/// Best step towards `target` by straight-line distance of the next cell.
///
/// Blocked directions are never taken; ties keep the first direction in
/// [`Dir::ALL`] order.
fn chase_step(grid: &Grid, pos: Pos, target: Pos) -> Option<(Dir, Pos)> {
    let mut best: Option<(Dir, Pos, f64)> = None;
    for dir in Dir::ALL {
        let Some(next) = open_neighbor(grid, pos, dir) else {
            continue;
        };
        let distance = next.distance(target);
        if best.map_or(true, |(_, _, d)| distance < d) {
            best = Some((dir, next, distance));
        }
    }
    best.map(|(dir, next, _)| (dir, next))
}

pub fn chase_dir(grid: &Grid, pos: Pos, target: Pos) -> Option<Dir> {
    chase_step(grid, pos, target).map(|(dir, _)| dir)
}

pub fn chase(grid: &Grid, pos: Pos, target: Pos) -> Pos {
    match chase_step(grid, pos, target) {
        Some((_, next)) => next,
        None => {
            warn!("ghost at {:?} is walled in", pos);
            pos
        }
    }
}

/// Tile to restore at the cell `ghosts[index]` is leaving, read from the
/// board before any ghost moves.
///
/// A cell some ghost ends the round on stays covered and comes back empty;
/// a pellet hidden there passes to that ghost. Otherwise a pellet hidden by
/// any ghost on the cell reappears, unless Pacman has already been there.
pub fn revealed_tile(grid: &Grid, ghosts: &[Ghost], targets: &[Pos], index: usize) -> Tile {
    let pos = ghosts[index].pos;
    if targets.contains(&pos) {
        return Tile::Empty;
    }
    if ghosts
        .iter()
        .any(|ghost| ghost.pos == pos && ghost.holds_pellet(grid))
    {
        Tile::Pellet
    } else {
        Tile::Empty
    }
}

/// What a ghost arriving at `pos` will hide, read after the departing
/// ghosts' reveals are on the board.
pub fn hidden_tile(grid: &Grid, pos: Pos) -> Tile {
    match grid.tile_at(pos) {
        Tile::Pellet if !grid.is_visited(pos) => Tile::Pellet,
        _ => Tile::Empty,
    }
}
