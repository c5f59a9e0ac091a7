use crate::domain::board::Board;
use crate::domain::models::Direction;
use crate::domain::services::PlayerStrategy;
use std::io::{self, BufRead, Write};

/// Reads directions from a line-oriented input, one command per line.
pub struct HumanConsolePlayer<R = io::StdinLock<'static>> {
    input: R,
}

impl HumanConsolePlayer {
    pub fn new() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }
}

impl Default for HumanConsolePlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead> HumanConsolePlayer<R> {
    pub fn from_reader(input: R) -> Self {
        Self { input }
    }
}

/// Maps a typed command to a direction. `Ok(None)` means quit.
pub fn parse_command(input: &str) -> Result<Option<Direction>, String> {
    let command = input.trim();
    let direction = match command {
        "q" | "quit" | "exit" => return Ok(None),
        "a" | "h" | "left" | "\x1b[D" => Direction::Left,
        "w" | "k" | "up" | "\x1b[A" => Direction::Up,
        "d" | "l" | "right" | "\x1b[C" => Direction::Right,
        "s" | "j" | "down" | "\x1b[B" => Direction::Down,
        other => {
            let code = other
                .parse::<u8>()
                .map_err(|_| format!("Unknown command '{}'", other))?;
            Direction::try_from(code)
                .map_err(|code| format!("Direction code {} is not in 0..=3", code))?
        }
    };
    Ok(Some(direction))
}

impl<R: BufRead> PlayerStrategy for HumanConsolePlayer<R> {
    fn get_move(&mut self, _board: &Board) -> Option<Direction> {
        loop {
            eprintln!("Move with w/a/s/d (or h/j/k/l, 0-3), q to quit");
            eprint!("> ");
            if io::stderr().flush().is_err() {
                return None;
            }

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => return None,
                Ok(_) => {}
            }

            match parse_command(&line) {
                Ok(choice) => return choice,
                Err(e) => eprintln!("{}", e),
            }
        }
    }
}
