use crate::domain::grid::{self, Grid, SIZE};
use crate::domain::models::{Direction, GameResult, MoveOutcome, Position, TileMotion};
use crate::domain::tile::{Tile, TileArena, TileId};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;
use std::fmt;

/// Tile value that wins the game.
pub const WINNING_VALUE: u32 = 2048;
pub const DEFAULT_FOUR_PROBABILITY: f64 = 0.1;

const NEIGHBOURS: [(isize, isize); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid direction code {0}, expected 0 (left), 1 (up), 2 (right) or 3 (down)")]
    InvalidDirection(u8),
    #[error("invalid tile value {value} at ({row}, {column})")]
    InvalidTileValue { value: u32, row: usize, column: usize },
    #[error("four-spawn probability {0} is outside [0, 1]")]
    InvalidProbability(f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardSettings {
    pub four_probability: f64,
    /// Seed for the spawn RNG. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            four_probability: DEFAULT_FOUR_PROBABILITY,
            seed: None,
        }
    }
}

impl BoardSettings {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), BoardError> {
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(BoardError::InvalidProbability(self.four_probability));
        }
        Ok(())
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// A 4×4 game of 2048.
///
/// Every cell always holds a tile; empty cells hold a tile of value 0. Tiles keep
/// their identity across moves, and tiles that leave the grid stay readable for
/// one more move so a renderer can animate them.
///
/// Boards are plain values. `make_move` derives the next state without touching
/// `self`; `apply_move` advances a board in place.
#[derive(Clone, Debug)]
pub struct Board {
    cells: Grid<TileId, SIZE>,
    tiles: TileArena,
    score: u64,
    won: bool,
    four_probability: f64,
    rng: StdRng,
}

impl Board {
    /// A fresh game with two random tiles, seeded from OS entropy.
    pub fn new() -> Self {
        let mut board = Self::empty(&BoardSettings::default());
        board.start();
        board
    }

    pub fn with_seed(seed: u64) -> Self {
        let mut board = Self::empty(&BoardSettings::seeded(seed));
        board.start();
        board
    }

    pub fn with_settings(settings: BoardSettings) -> Result<Self, BoardError> {
        settings.validate()?;
        let mut board = Self::empty(&settings);
        board.start();
        Ok(board)
    }

    /// Builds a board with the given layout and no random tiles. Values must be 0
    /// or a power of two no smaller than 2.
    pub fn from_values(
        values: Grid<u32, SIZE>,
        settings: BoardSettings,
    ) -> Result<Self, BoardError> {
        settings.validate()?;
        for (row, line) in values.iter().enumerate() {
            for (column, &value) in line.iter().enumerate() {
                if value != 0 && (value < 2 || !value.is_power_of_two()) {
                    return Err(BoardError::InvalidTileValue { value, row, column });
                }
            }
        }

        let mut tiles = TileArena::new();
        let cells = values.map(|line| line.map(|value| tiles.insert(value)));
        let won = values.iter().flatten().any(|&v| v == WINNING_VALUE);

        let mut board = Self {
            cells,
            tiles,
            score: 0,
            won,
            four_probability: settings.four_probability,
            rng: settings.rng(),
        };
        board.refresh_positions();
        Ok(board)
    }

    fn empty(settings: &BoardSettings) -> Self {
        let mut tiles = TileArena::new();
        let cells = [[0u32; SIZE]; SIZE].map(|line| line.map(|_| tiles.insert(0)));
        Self {
            cells,
            tiles,
            score: 0,
            won: false,
            four_probability: settings.four_probability,
            rng: settings.rng(),
        }
    }

    fn start(&mut self) {
        self.spawn_random_tile();
        self.spawn_random_tile();
        self.refresh_positions();
    }

    /// Returns the board that results from moving `direction`, leaving `self` as is.
    pub fn make_move(&self, direction: Direction) -> Board {
        let mut next = self.clone();
        next.apply_move(direction);
        next
    }

    /// Like [`Board::make_move`] for a raw direction code
    /// (0 left, 1 up, 2 right, 3 down).
    pub fn try_move(&self, code: u8) -> Result<Board, BoardError> {
        let direction = Direction::try_from(code).map_err(BoardError::InvalidDirection)?;
        Ok(self.make_move(direction))
    }

    /// Slides every tile towards `direction`, merging equal neighbours once, then
    /// spawns a tile if anything changed.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        let collected = self.tiles.collect_stale();

        let turns = direction.rotations();
        let mut rotated = grid::rotate_left_times(&self.cells, turns);
        let score_before = self.score;
        let mut changed = false;
        for row in rotated.iter_mut() {
            changed |= self.slide_row_left(row);
        }
        self.cells = grid::rotate_left_times(&rotated, (4 - turns) % 4);

        let spawned = if changed {
            self.spawn_random_tile()
        } else {
            None
        };
        self.refresh_positions();

        let points = self.score - score_before;
        debug!(
            "move {}: changed={} points={} spawned={:?} collected={}",
            direction, changed, points, spawned, collected
        );

        MoveOutcome {
            changed,
            points,
            spawned,
        }
    }

    // Compacts one row towards index 0. Each tile merges at most once per pass.
    fn slide_row_left(&mut self, row: &mut [TileId; SIZE]) -> bool {
        let before = (*row).map(|id| self.tiles.value_of(id));

        let mut queue: SmallVec<[TileId; SIZE]> = row
            .iter()
            .rev()
            .copied()
            .filter(|&id| self.tiles.value_of(id) != 0)
            .collect();

        let mut changed = false;
        for (target, slot) in row.iter_mut().enumerate() {
            let mut current = match queue.pop() {
                Some(id) => id,
                None => self.tiles.insert(0),
            };

            if let Some(&next) = queue.last() {
                if self.tiles.value_of(next) == self.tiles.value_of(current) {
                    queue.pop();
                    current = self.tiles.merge(current, next);
                    self.score += u64::from(self.tiles.value_of(current));
                }
            }

            let value = self.tiles.value_of(current);
            if value == WINNING_VALUE {
                self.won = true;
            }
            if value != before[target] {
                changed = true;
            }
            *slot = current;
        }
        changed
    }

    /// Places a 2 (or a 4, with the configured probability) on a random empty cell.
    /// Does nothing on a full grid.
    fn spawn_random_tile(&mut self) -> Option<TileId> {
        let empty: SmallVec<[Position; SIZE * SIZE]> = self.empty_positions().collect();
        if empty.is_empty() {
            return None;
        }

        let cell = empty[self.rng.gen_range(0..empty.len())];
        let value = if self.rng.gen_bool(self.four_probability) {
            4
        } else {
            2
        };
        let id = self.tiles.insert(value);
        self.cells[cell.row][cell.column] = id;
        Some(id)
    }

    fn refresh_positions(&mut self) {
        for (row, line) in self.cells.iter().enumerate() {
            for (column, &id) in line.iter().enumerate() {
                self.tiles.place(id, Position::new(row, column));
            }
        }
    }

    fn value_at(&self, row: usize, column: usize) -> u32 {
        self.tiles.value_of(self.cells[row][column])
    }

    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |column| Position::new(row, column)))
            .filter(|p| self.value_at(p.row, p.column) == 0)
    }

    pub fn has_won(&self) -> bool {
        self.won
    }

    /// True when the grid is full and no two orthogonal neighbours are equal.
    pub fn has_lost(&self) -> bool {
        for row in 0..SIZE {
            for column in 0..SIZE {
                let value = self.value_at(row, column);
                if value == 0 {
                    return false;
                }
                for (dr, dc) in NEIGHBOURS {
                    let (Some(r), Some(c)) =
                        (row.checked_add_signed(dr), column.checked_add_signed(dc))
                    else {
                        continue;
                    };
                    if r < SIZE && c < SIZE && self.value_at(r, c) == value {
                        return false;
                    }
                }
            }
        }
        true
    }

    pub fn status(&self) -> GameResult {
        if self.won {
            GameResult::Won
        } else if self.has_lost() {
            GameResult::Lost
        } else {
            GameResult::InProgress
        }
    }

    /// Whether moving `direction` would change the grid.
    pub fn can_move(&self, direction: Direction) -> bool {
        self.clone().apply_move(direction).changed
    }

    pub fn legal_directions(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.can_move(d))
            .collect()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn four_probability(&self) -> f64 {
        self.four_probability
    }

    pub fn cells(&self) -> &Grid<TileId, SIZE> {
        &self.cells
    }

    pub fn values(&self) -> Grid<u32, SIZE> {
        self.cells.map(|line| line.map(|id| self.tiles.value_of(id)))
    }

    pub fn max_value(&self) -> u32 {
        self.values().iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn tile_at(&self, position: Position) -> Option<&Tile> {
        self.cells
            .get(position.row)
            .and_then(|line| line.get(position.column))
            .and_then(|&id| self.tiles.get(id))
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id)
    }

    /// Every tile still held by the board, including tiles merged away or
    /// replaced during the last move.
    pub fn tiles(&self) -> &TileArena {
        &self.tiles
    }

    /// Per-tile movement of the last move, for every non-empty tile the board holds.
    pub fn motions(&self) -> Vec<TileMotion> {
        self.tiles
            .iter()
            .filter(|t| !t.is_empty())
            .map(|t| TileMotion {
                id: t.id(),
                value: t.value(),
                from: t.effective_from(),
                to: t.effective_to(&self.tiles),
                merged_into: t.merged_into(),
                is_new: t.is_new(),
                moved: t.has_moved(&self.tiles),
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.values() {
            for (i, value) in line.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                if *value == 0 {
                    write!(f, "{:>5}", ".")?;
                } else {
                    write!(f, "{:>5}", value)?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "score: {}", self.score)
    }
}
