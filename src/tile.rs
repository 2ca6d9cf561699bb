/// Symbol held by one cell of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    Empty,
    Wall,
    Pellet,
    Pacman,
    Ghost,
}

impl Tile {
    pub const fn from_glyph(c: char) -> Option<Tile> {
        match c {
            ' ' => Some(Tile::Empty),
            '#' => Some(Tile::Wall),
            '.' => Some(Tile::Pellet),
            'G' => Some(Tile::Pacman),
            'X' => Some(Tile::Ghost),
            _ => None,
        }
    }

    pub const fn glyph(self) -> char {
        match self {
            Tile::Empty => ' ',
            Tile::Wall => '#',
            Tile::Pellet => '.',
            Tile::Pacman => 'G',
            Tile::Ghost => 'X',
        }
    }

    pub const fn is_wall(self) -> bool {
        matches!(self, Tile::Wall)
    }
}
