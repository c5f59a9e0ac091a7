use crate::domain::board::Board;
use crate::domain::models::{GameResult, MoveOutcome};
use crate::domain::services::PlayerStrategy;
use log::{debug, warn};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("game is over")]
    GameOver,
    #[error("no move available")]
    NoMoveAvailable,
}

/// Final numbers of one finished (or abandoned) game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub score: u64,
    pub max_tile: u32,
    pub moves: usize,
    pub result: GameResult,
}

/// Drives a board with a single player.
pub struct GameService<'a> {
    board: Board,
    player: Box<dyn PlayerStrategy + 'a>,
    moves: usize,
}

impl<'a> GameService<'a> {
    pub fn new(board: Board, player: Box<dyn PlayerStrategy + 'a>) -> Self {
        GameService {
            board,
            player,
            moves: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of moves that changed the board.
    pub fn moves_played(&self) -> usize {
        self.moves
    }

    pub fn is_game_over(&self) -> Option<GameResult> {
        match self.board.status() {
            GameResult::InProgress => None,
            result => Some(result),
        }
    }

    /// Asks the player for a direction and replaces the board with the result.
    /// A direction that changes nothing is accepted and reported as unchanged.
    pub fn perform_next_move(&mut self) -> Result<MoveOutcome, GameError> {
        if self.is_game_over().is_some() {
            return Err(GameError::GameOver);
        }

        let direction = self
            .player
            .get_move(&self.board)
            .ok_or(GameError::NoMoveAvailable)?;

        let mut next = self.board.clone();
        let outcome = next.apply_move(direction);
        self.board = next;

        if outcome.changed {
            self.moves += 1;
        } else {
            debug!("move {} left the board unchanged", direction);
        }
        Ok(outcome)
    }

    /// Plays until the game ends, the player gives up, or the player repeats a
    /// direction that does nothing.
    pub fn play_to_end(&mut self) -> GameSummary {
        loop {
            match self.perform_next_move() {
                Ok(outcome) if !outcome.changed => {
                    warn!("player chose a move that does nothing, stopping");
                    break;
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
        let summary = self.summary();
        debug!(
            "game finished: {:?}, score {}, max tile {}, {} moves",
            summary.result, summary.score, summary.max_tile, summary.moves
        );
        summary
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            score: self.board.score(),
            max_tile: self.board.max_value(),
            moves: self.moves,
            result: self.board.status(),
        }
    }
}
