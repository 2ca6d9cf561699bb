//! Round engine and the game state machine.
//!
//! A round is strictly sequential: Pacman moves, the board is checked, the
//! three ghosts pick their moves against the same snapshot, all ghost moves
//! are applied together and the board is checked again.

use std::array;

use log::{debug, info};
use rand::Rng;

use crate::error::GameError;
use crate::ghost::{hidden_tile, revealed_tile, Alternation, Ghost, GhostKind, GHOST_COUNT};
use crate::grid::Grid;
use crate::map::ParsedMap;
use crate::movement::{propose_move, Dir, Pos};
use crate::tile::Tile;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum GameState {
    #[default]
    Running,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// What happened during one call to [`Game::play_round`].
#[derive(Clone, Debug, PartialEq)]
pub struct RoundReport {
    pub round: u32,
    pub pacman: Pos,
    pub ate_pellet: bool,
    /// New ghost cells, `None` when the round ended before the ghosts moved.
    pub ghosts: Option<[Pos; GHOST_COUNT]>,
    /// Strategy the alternating ghost was set to use this round.
    pub alternation: Alternation,
    pub state: GameState,
}

#[derive(Clone, Debug)]
pub struct Game {
    grid: Grid,
    pacman: Pos,
    ghosts: [Ghost; GHOST_COUNT],
    pellets_left: usize,
    alternation: Alternation,
    state: GameState,
    round: u32,
}

impl Game {
    pub fn new(map: ParsedMap) -> Self {
        let ParsedMap {
            grid,
            pacman,
            ghosts,
        } = map;
        let pellets_left = grid.count_pellets();
        let ghosts = array::from_fn(|i| Ghost::new(GhostKind::for_index(i), ghosts[i]));
        Self {
            grid,
            pacman,
            ghosts,
            pellets_left,
            alternation: Alternation::default(),
            state: GameState::default(),
            round: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pacman(&self) -> Pos {
        self.pacman
    }

    pub fn ghosts(&self) -> &[Ghost; GHOST_COUNT] {
        &self.ghosts
    }

    pub fn ghost_positions(&self) -> [Pos; GHOST_COUNT] {
        self.ghosts.map(|ghost| ghost.pos)
    }

    pub fn pellets_left(&self) -> usize {
        self.pellets_left
    }

    pub fn alternation(&self) -> Alternation {
        self.alternation
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Number of rounds played so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Plays one full round with Pacman heading `dir`.
    pub fn play_round(
        &mut self,
        dir: Dir,
        rng: &mut impl Rng,
    ) -> Result<RoundReport, GameError> {
        if self.state.is_finished() {
            return Err(GameError::AlreadyEnded);
        }
        self.round += 1;
        let alternation = self.alternation;

        let from = self.pacman;
        let to = propose_move(&self.grid, from, dir);
        let ate_pellet = self.move_pacman(from, to);
        debug!(
            "round {}: pacman {:?} -> {:?}, {} pellets left",
            self.round, from, to, self.pellets_left
        );

        let mut report = RoundReport {
            round: self.round,
            pacman: to,
            ate_pellet,
            ghosts: None,
            alternation,
            state: GameState::Running,
        };

        self.state = self.check(to, &self.ghost_positions());
        if self.state.is_finished() {
            return Ok(self.end_round(report));
        }

        let targets: [Pos; GHOST_COUNT] =
            array::from_fn(|i| self.ghosts[i].next_pos(&self.grid, to, alternation, rng));
        self.move_ghosts(targets);
        debug!("round {}: ghosts -> {:?}", self.round, targets);
        report.ghosts = Some(targets);

        self.state = self.check(to, &targets);
        if !self.state.is_finished() {
            // Pacman is re-read from the board; ghosts carry their own positions.
            self.pacman = self.grid.find_pacman().unwrap_or(to);
        }
        Ok(self.end_round(report))
    }

    /// Drives rounds until the game ends. `next_move` is asked for Pacman's
    /// direction before every round and sees the board as it stands.
    pub fn play<E>(
        &mut self,
        mut next_move: impl FnMut(&Game) -> Result<Dir, E>,
        rng: &mut impl Rng,
    ) -> Result<GameState, E> {
        while !self.is_finished() {
            let dir = next_move(self)?;
            // The loop condition rules out `AlreadyEnded`.
            if let Err(err) = self.play_round(dir, rng) {
                unreachable!("{err} while the game is running");
            }
        }
        Ok(self.state)
    }

    /// Returns whether a pellet was eaten.
    fn move_pacman(&mut self, from: Pos, to: Pos) -> bool {
        let ate_pellet = self.grid.tile_at(to) == Tile::Pellet;
        self.grid.set_tile(from, Tile::Empty);
        self.grid.set_tile(to, Tile::Pacman);
        self.grid.mark_visited(to);
        if ate_pellet {
            self.pellets_left = self.pellets_left.saturating_sub(1);
        }
        ate_pellet
    }

    /// Reveals are read from the board before any ghost moves, so one ghost's
    /// move cannot change what another ghost leaves behind. What each ghost
    /// hides is read after the reveals are written. A pellet under a cell that
    /// stays covered passes to the ghost ending the round there.
    fn move_ghosts(&mut self, targets: [Pos; GHOST_COUNT]) {
        let held: Vec<Pos> = self
            .ghosts
            .iter()
            .filter(|ghost| ghost.holds_pellet(&self.grid))
            .map(|ghost| ghost.pos)
            .collect();
        let reveals: [Tile; GHOST_COUNT] =
            array::from_fn(|i| revealed_tile(&self.grid, &self.ghosts, &targets, i));
        for (ghost, tile) in self.ghosts.iter().zip(reveals) {
            self.grid.set_tile(ghost.pos, tile);
        }

        // Ghosts landing together on a pellet: only the first one hides it.
        let hidden: [Tile; GHOST_COUNT] = array::from_fn(|i| {
            if targets[..i].contains(&targets[i]) {
                Tile::Empty
            } else if held.contains(&targets[i]) {
                Tile::Pellet
            } else {
                hidden_tile(&self.grid, targets[i])
            }
        });
        for ((ghost, pos), beneath) in self.ghosts.iter_mut().zip(targets).zip(hidden) {
            ghost.pos = pos;
            ghost.beneath = beneath;
            self.grid.set_tile(pos, Tile::Ghost);
        }
    }

    fn check(&self, pacman: Pos, ghosts: &[Pos]) -> GameState {
        if self.pellets_left == 0 {
            GameState::Won
        } else if ghosts.contains(&pacman) {
            GameState::Lost
        } else {
            GameState::Running
        }
    }

    fn end_round(&mut self, mut report: RoundReport) -> RoundReport {
        self.alternation = self.alternation.flipped();
        report.state = self.state;
        match self.state {
            GameState::Won => info!("pacman wins after {} rounds", self.round),
            GameState::Lost => info!("ghosts win after {} rounds", self.round),
            GameState::Running => {}
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::parse_map;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn game(text: &str) -> Game {
        Game::new(parse_map(text).unwrap())
    }

    #[test]
    fn new_game_counts_pellets_and_assigns_strategies() {
        let game = game("#######\n#G..X #\n#.#X#.#\n#X   .#\n#######");
        assert_eq!(game.pellets_left(), 5);
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.round(), 0);
        let kinds: Vec<_> = game.ghosts().iter().map(|g| g.kind).collect();
        assert_eq!(
            kinds,
            vec![GhostKind::Wanderer, GhostKind::Chaser, GhostKind::Alternator]
        );
    }

    #[test]
    fn eating_a_pellet_updates_board_and_count() {
        let mut game = game("#######\n#G..  #\n#.#X#.#\n#X  X.#\n#######");
        let mut rng = StdRng::seed_from_u64(0);
        let report = game.play_round(Dir::Right, &mut rng).unwrap();
        assert!(report.ate_pellet);
        assert_eq!(report.pacman, Pos::new(1, 2));
        assert_eq!(game.pellets_left(), 4);
        assert_eq!(game.grid().tile_at(Pos::new(1, 1)), Tile::Empty);
        assert_eq!(game.grid().tile_at(Pos::new(1, 2)), Tile::Pacman);
        assert!(game.grid().is_visited(Pos::new(1, 2)));
    }

    #[test]
    fn bumping_a_wall_keeps_pacman_in_place() {
        let mut game = game("#######\n#G..  #\n#.#X#.#\n#X  X.#\n#######");
        let mut rng = StdRng::seed_from_u64(0);
        let report = game.play_round(Dir::Up, &mut rng).unwrap();
        assert!(!report.ate_pellet);
        assert_eq!(report.pacman, Pos::new(1, 1));
        assert_eq!(game.pacman(), Pos::new(1, 1));
        assert_eq!(game.grid().tile_at(Pos::new(1, 1)), Tile::Pacman);
        assert_eq!(game.pellets_left(), 5);
    }

    #[test]
    fn ghost_restores_the_pellet_it_walked_over() {
        // Ghosts are sealed off in the bottom corridor.
        let mut game = game("########\n#G    ##\n########\n#X.. XX#\n########");
        let mut rng = StdRng::seed_from_u64(5);
        let pellets = game.pellets_left();

        game.play_round(Dir::Right, &mut rng).unwrap();
        // Ghost 0 at (3,1) can only step right onto the pellet at (3,2).
        assert_eq!(game.ghosts()[0].pos, Pos::new(3, 2));
        assert_eq!(game.ghosts()[0].beneath, Tile::Pellet);
        assert_eq!(game.grid().tile_at(Pos::new(3, 1)), Tile::Empty);

        game.play_round(Dir::Right, &mut rng).unwrap();
        let ghost = game.ghosts()[0].pos;
        assert_ne!(ghost, Pos::new(3, 2));
        assert_eq!(game.grid().tile_at(Pos::new(3, 2)), Tile::Pellet);
        assert_eq!(game.pellets_left(), pellets);
        assert_eq!(game.grid().count_pellets() + hidden_pellets(&game), pellets);
    }

    fn hidden_pellets(game: &Game) -> usize {
        game.ghosts()
            .iter()
            .filter(|g| g.beneath == Tile::Pellet)
            .count()
    }

    #[test]
    fn pellet_passes_to_the_ghost_stepping_into_a_vacated_cell() {
        // Pacman is boxed in on the top row; the first two ghosts swap cells.
        let mut game = game("#######\n#G  . #\n#######\n#XX#X #\n#######");
        game.ghosts[0].beneath = Tile::Pellet;
        game.pellets_left += 1;
        let mut rng = StdRng::seed_from_u64(0);

        let report = game.play_round(Dir::Left, &mut rng).unwrap();

        assert_eq!(report.state, GameState::Running);
        assert_eq!(game.ghosts()[0].pos, Pos::new(3, 2));
        assert_eq!(game.ghosts()[1].pos, Pos::new(3, 1));
        assert_eq!(game.ghosts()[1].beneath, Tile::Pellet);
        assert_eq!(game.pellets_left(), 2);
        assert_eq!(game.grid().count_pellets() + hidden_pellets(&game), 2);
    }

    #[test]
    fn ghosts_sharing_a_pellet_leave_it_behind() {
        let board = "#######\n#G  . #\n#######\n#X.X#X#\n#######";
        for seed in 0..16 {
            let mut game = game(board);
            let mut rng = StdRng::seed_from_u64(seed);

            game.play_round(Dir::Left, &mut rng).unwrap();
            assert_eq!(game.ghosts()[0].pos, Pos::new(3, 2));
            assert_eq!(game.ghosts()[1].pos, Pos::new(3, 2));

            game.play_round(Dir::Left, &mut rng).unwrap();
            assert_eq!(game.ghosts()[1].pos, Pos::new(3, 1));
            assert_ne!(game.ghosts()[0].pos, Pos::new(3, 2));
            assert_eq!(game.grid().tile_at(Pos::new(3, 2)), Tile::Pellet);

            for _ in 0..8 {
                game.play_round(Dir::Left, &mut rng).unwrap();
                assert_eq!(game.state(), GameState::Running);
                assert_eq!(
                    game.grid().count_pellets() + hidden_pellets(&game),
                    game.pellets_left(),
                    "seed {seed} round {}",
                    game.round()
                );
            }
        }
    }

    #[test]
    fn alternation_flips_every_round() {
        let mut game = game("#########\n#G      #\n#       #\n#  X X X#\n#.      #\n#########");
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = Vec::new();
        for dir in [Dir::Right, Dir::Up, Dir::Left, Dir::Down] {
            if game.is_finished() {
                break;
            }
            seen.push(game.play_round(dir, &mut rng).unwrap().alternation);
        }
        for pair in seen.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
        assert_eq!(seen[0], Alternation::Wander);
    }

    #[test]
    fn finished_game_refuses_more_rounds() {
        let mut game = game("#####\n#.G #\n#XXX#\n#####");
        let mut rng = StdRng::seed_from_u64(0);
        let report = game.play_round(Dir::Left, &mut rng).unwrap();
        assert_eq!(report.state, GameState::Won);
        assert_eq!(report.ghosts, None);
        assert_eq!(
            game.play_round(Dir::Right, &mut rng),
            Err(GameError::AlreadyEnded)
        );
    }

    #[test]
    fn play_loop_stops_at_terminal_state() {
        let mut game = game("######\n#G...#\n#XXX #\n######");
        let mut rng = StdRng::seed_from_u64(2);
        let mut asked = 0;
        let state = game
            .play(
                |_| {
                    asked += 1;
                    Ok::<_, ()>(Dir::Right)
                },
                &mut rng,
            )
            .unwrap();
        assert!(state.is_finished());
        assert_eq!(asked, game.round());
    }
}
