use crate::domain::board::Board;
use crate::domain::models::Direction;
use crate::domain::services::PlayerStrategy;

// Each free cell after a move is worth this many points when ranking moves.
const EMPTY_CELL_WEIGHT: u64 = 4;

// Tried in this order, so ties keep big tiles in the bottom-left corner.
const PREFERENCE: [Direction; 4] = [
    Direction::Down,
    Direction::Left,
    Direction::Right,
    Direction::Up,
];

/// One-ply lookahead: picks the legal direction with the best immediate
/// merge points plus free space.
#[derive(Default)]
pub struct GreedyBot;

impl GreedyBot {
    pub fn new() -> Self {
        Self
    }

    fn evaluate(board: &Board, direction: Direction) -> Option<u64> {
        let mut next = board.clone();
        let outcome = next.apply_move(direction);
        if !outcome.changed {
            return None;
        }
        let empty = next.empty_positions().count() as u64;
        Some(outcome.points + empty * EMPTY_CELL_WEIGHT)
    }
}

impl PlayerStrategy for GreedyBot {
    fn get_move(&mut self, board: &Board) -> Option<Direction> {
        let mut best: Option<(Direction, u64)> = None;
        for direction in PREFERENCE {
            if let Some(value) = Self::evaluate(board, direction) {
                if best.is_none_or(|(_, v)| value > v) {
                    best = Some((direction, value));
                }
            }
        }
        best.map(|(direction, _)| direction)
    }
}
