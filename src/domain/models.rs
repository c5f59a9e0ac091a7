use crate::domain::tile::TileId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a move. The discriminant is the number of counterclockwise
/// rotations that turn this direction into `Left`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left = 0,
    Up = 1,
    Right = 2,
    Down = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn rotations(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Direction {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Direction::Left),
            1 => Ok(Direction::Up),
            2 => Ok(Direction::Right),
            3 => Ok(Direction::Down),
            other => Err(other),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Left => "left",
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    InProgress,
    Won,
    Lost,
}

/// What a single `Board::apply_move` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct MoveOutcome {
    pub changed: bool,
    /// Sum of all merge products created by the move.
    pub points: u64,
    pub spawned: Option<TileId>,
}

/// How one tile travelled during the last move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TileMotion {
    pub id: TileId,
    pub value: u32,
    pub from: Option<Position>,
    pub to: Option<Position>,
    /// Set when this tile was consumed by a merge; `to` is then the survivor's cell.
    pub merged_into: Option<TileId>,
    pub is_new: bool,
    pub moved: bool,
}
