use crate::domain::board::Board;
use crate::domain::models::Direction;

/// Something that picks the next direction to play. `None` means the player gives up.
pub trait PlayerStrategy {
    fn get_move(&mut self, board: &Board) -> Option<Direction>;
}
