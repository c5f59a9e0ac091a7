use crate::application::game_service::{GameError, GameService};
use crate::domain::models::GameResult;
use crate::infrastructure::display::{render_board, render_status};
use crate::interface::models::ViewState;
use std::io::{self, Write};

pub struct ConsoleInterface;

impl ConsoleInterface {
    pub fn run(mut game_service: GameService) {
        println!("Starting Game...");
        println!("{}", render_board(game_service.board()));
        println!("{}", render_status(game_service.board()));

        loop {
            if let Some(result) = game_service.is_game_over() {
                match result {
                    GameResult::Won => println!("You reached 2048!"),
                    GameResult::Lost => println!("No moves left."),
                    GameResult::InProgress => {}
                }
                break;
            }

            match game_service.perform_next_move() {
                Ok(outcome) => {
                    if !outcome.changed {
                        println!("Nothing moves that way.");
                        continue;
                    }
                    println!("{}", render_board(game_service.board()));
                    println!("{}", render_status(game_service.board()));
                }
                Err(GameError::NoMoveAvailable) => break,
                Err(e) => {
                    println!("Error: {}", e);
                    break;
                }
            }
        }

        let summary = game_service.summary();
        println!(
            "Final score {} after {} moves (best tile {})",
            summary.score, summary.moves, summary.max_tile
        );
    }

    /// Streams one JSON `ViewState` per line: the starting board, then every move.
    pub fn run_json<W: Write>(mut game_service: GameService, mut out: W) -> io::Result<()> {
        Self::emit(&game_service, &mut out)?;
        loop {
            match game_service.perform_next_move() {
                Ok(_) => Self::emit(&game_service, &mut out)?,
                Err(_) => break,
            }
        }
        Ok(())
    }

    fn emit<W: Write>(game_service: &GameService, out: &mut W) -> io::Result<()> {
        let view = ViewState::from(game_service.board());
        serde_json::to_writer(&mut *out, &view)?;
        writeln!(out)?;
        out.flush()
    }
}
