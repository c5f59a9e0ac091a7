use crate::domain::board::Board;
use crate::domain::models::{GameResult, Position};
use crate::domain::tile::TileId;
use serde::Serialize;

/// Everything a renderer needs to draw one frame and animate into it.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ViewState {
    pub score: u64,
    pub status: GameResult,
    pub won: bool,
    pub lost: bool,
    pub tiles: Vec<ViewTile>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ViewTile {
    pub id: TileId,
    pub value: u32,
    /// Current cell; absent for tiles merged away during the last move.
    pub position: Option<Position>,
    pub from: Option<Position>,
    pub to: Option<Position>,
    pub merged: bool,
    pub is_new: bool,
    pub moved: bool,
}

impl From<&Board> for ViewState {
    fn from(board: &Board) -> Self {
        let tiles = board
            .motions()
            .into_iter()
            .map(|m| ViewTile {
                id: m.id,
                value: m.value,
                position: if m.merged_into.is_some() { None } else { m.to },
                from: m.from,
                to: m.to,
                merged: m.merged_into.is_some(),
                is_new: m.is_new,
                moved: m.moved,
            })
            .collect();

        ViewState {
            score: board.score(),
            status: board.status(),
            won: board.has_won(),
            lost: board.has_lost(),
            tiles,
        }
    }
}
