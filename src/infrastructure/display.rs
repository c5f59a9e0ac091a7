use crate::domain::board::Board;
use crate::domain::grid::SIZE;
use crate::domain::models::GameResult;
use std::fmt;

const COLOR_RESET: &str = "\x1b[0m";
const COLOR_DIM: &str = "\x1b[90m";
const COLOR_BOLD: &str = "\x1b[1m";

const CELL_WIDTH: usize = 6;

struct Canvas {
    width: usize,
    height: usize,
    buffer: Vec<String>,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Self {
        Canvas {
            width,
            height,
            buffer: vec![" ".to_string(); width * height],
        }
    }

    fn put(&mut self, x: usize, y: usize, s: &str) {
        if x < self.width && y < self.height {
            self.buffer[y * self.width + x] = s.to_string();
        }
    }

    fn hline(&mut self, y: usize) {
        for x in 0..self.width {
            let glyph = if x % (CELL_WIDTH + 1) == 0 { "+" } else { "-" };
            self.put(x, y, &format!("{}{}{}", COLOR_DIM, glyph, COLOR_RESET));
        }
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{}", self.buffer[y * self.width + x])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn tile_color(value: u32) -> &'static str {
    match value {
        2 | 4 => "\x1b[37m",
        8 | 16 => "\x1b[33m",
        32 | 64 => "\x1b[31m",
        128 | 256 => "\x1b[35m",
        512 | 1024 => "\x1b[36m",
        _ => "\x1b[32m",
    }
}

/// Draws the grid as a boxed table, one coloured number per cell.
pub fn render_board(board: &Board) -> String {
    let width = SIZE * (CELL_WIDTH + 1) + 1;
    let height = SIZE * 2 + 1;
    let mut canvas = Canvas::new(width, height);

    for (row, line) in board.values().iter().enumerate() {
        let y = row * 2 + 1;
        canvas.hline(y - 1);
        for (column, &value) in line.iter().enumerate() {
            let x = column * (CELL_WIDTH + 1);
            canvas.put(x, y, &format!("{}|{}", COLOR_DIM, COLOR_RESET));

            let label = if value == 0 {
                String::new()
            } else {
                value.to_string()
            };
            // Right-align the number inside the cell.
            let pad = CELL_WIDTH.saturating_sub(label.len() + 1);
            if !label.is_empty() {
                let s = format!("{}{}{}", tile_color(value), label, COLOR_RESET);
                canvas.put(x + 1 + pad, y, &s);
                for i in 1..label.len() {
                    canvas.put(x + 1 + pad + i, y, "");
                }
            }
        }
        canvas.put(width - 1, y, &format!("{}|{}", COLOR_DIM, COLOR_RESET));
    }
    canvas.hline(height - 1);

    canvas.to_string()
}

pub fn render_status(board: &Board) -> String {
    let state = match board.status() {
        GameResult::InProgress => "",
        GameResult::Won => " - You win!",
        GameResult::Lost => " - Game over",
    };
    format!(
        "{}Score: {}{}{}",
        COLOR_BOLD,
        board.score(),
        COLOR_RESET,
        state
    )
}
