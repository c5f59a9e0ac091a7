use crate::application::game_service::{GameService, GameSummary};
use crate::config::PlayerKind;
use crate::domain::board::{Board, BoardError, BoardSettings};
use crate::domain::models::GameResult;
use crate::domain::services::PlayerStrategy;
use crate::infrastructure::ai::{GreedyBot, RandomBot};
use log::info;
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("player '{0}' cannot play unattended")]
    UnsupportedPlayer(PlayerKind),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Debug, Clone, Copy)]
pub struct SimulationRequest {
    pub games: usize,
    pub concurrency: usize,
    pub player: PlayerKind,
    /// Game `i` uses seed `base + i` for both the board and the bot.
    pub settings: BoardSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub best_score: u64,
    pub mean_score: f64,
    pub best_tile: u32,
    pub total_moves: usize,
}

impl SimulationReport {
    fn from_summaries(summaries: &[GameSummary]) -> Self {
        let games = summaries.len();
        let total_score: u64 = summaries.iter().map(|s| s.score).sum();
        Self {
            games,
            wins: summaries
                .iter()
                .filter(|s| s.result == GameResult::Won)
                .count(),
            losses: summaries
                .iter()
                .filter(|s| s.result == GameResult::Lost)
                .count(),
            best_score: summaries.iter().map(|s| s.score).max().unwrap_or(0),
            mean_score: if games == 0 {
                0.0
            } else {
                total_score as f64 / games as f64
            },
            best_tile: summaries.iter().map(|s| s.max_tile).max().unwrap_or(0),
            total_moves: summaries.iter().map(|s| s.moves).sum(),
        }
    }
}

/// Builds an unattended player. Human players need a terminal and return `None`.
pub fn build_bot(kind: PlayerKind, seed: Option<u64>) -> Option<Box<dyn PlayerStrategy>> {
    match kind {
        PlayerKind::Human => None,
        PlayerKind::Random => Some(Box::new(match seed {
            Some(seed) => RandomBot::with_seed(seed),
            None => RandomBot::new(),
        })),
        PlayerKind::Greedy => Some(Box::new(GreedyBot::new())),
    }
}

fn play_one(
    index: usize,
    player: PlayerKind,
    settings: BoardSettings,
) -> Result<GameSummary, SimulationError> {
    let seed = settings.seed.map(|base| base.wrapping_add(index as u64));
    let board = Board::with_settings(BoardSettings { seed, ..settings })?;
    let bot = build_bot(player, seed).ok_or(SimulationError::UnsupportedPlayer(player))?;
    let mut game = GameService::new(board, bot);
    Ok(game.play_to_end())
}

/// Plays `request.games` independent games on a dedicated thread pool.
pub fn run_simulation(request: SimulationRequest) -> Result<SimulationReport, SimulationError> {
    if request.player == PlayerKind::Human {
        return Err(SimulationError::UnsupportedPlayer(request.player));
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(request.concurrency.max(1))
        .build()?;

    let start = Instant::now();
    let summaries: Vec<GameSummary> = pool.install(|| {
        (0..request.games)
            .into_par_iter()
            .map(|i| play_one(i, request.player, request.settings))
            .collect::<Result<Vec<_>, _>>()
    })?;

    let report = SimulationReport::from_summaries(&summaries);
    info!(
        "simulated {} games with {} threads in {:.2?}: {} wins, best score {}, best tile {}",
        report.games,
        request.concurrency,
        start.elapsed(),
        report.wins,
        report.best_score,
        report.best_tile
    );
    Ok(report)
}
