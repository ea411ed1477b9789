//! Locations, directions, and moves.
//!
//! `Location` is a plain coordinate pair on the torus; it has no identity
//! beyond its coordinates. `Direction` carries the host wire encoding
//! (0 = STILL through 4 = WEST).

/// A coordinate pair on the toroidal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub x: u16,
    pub y: u16,
}

impl Location {
    pub const fn new(x: u16, y: u16) -> Location {
        Location { x, y }
    }
}

/// One of the five per-tile actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Still,
    North,
    East,
    South,
    West,
}

/// The four cardinal directions, in wire order.
pub const CARDINALS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

impl Direction {
    /// Returns the exact reverse of a cardinal direction; STILL maps to itself.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Still => Direction::Still,
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Returns the host wire encoding (0..=4).
    pub const fn wire(self) -> u8 {
        match self {
            Direction::Still => 0,
            Direction::North => 1,
            Direction::East => 2,
            Direction::South => 3,
            Direction::West => 4,
        }
    }

    /// Parses a direction from its host wire encoding.
    pub fn from_wire(code: u8) -> Option<Direction> {
        match code {
            0 => Some(Direction::Still),
            1 => Some(Direction::North),
            2 => Some(Direction::East),
            3 => Some(Direction::South),
            4 => Some(Direction::West),
            _ => None,
        }
    }
}

/// An intent to relocate all strength at `location` one step in `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub location: Location,
    pub direction: Direction,
}
