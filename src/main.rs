use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::io;
use std::path::PathBuf;
use twenty48::application::game_service::GameService;
use twenty48::application::simulation::{SimulationRequest, build_bot, run_simulation};
use twenty48::config::{AppConfig, PlayerKind};
use twenty48::domain::board::Board;
use twenty48::domain::services::PlayerStrategy;
use twenty48::infrastructure::console::HumanConsolePlayer;
use twenty48::interface::console::ConsoleInterface;

#[derive(Parser, Debug)]
#[command(name = "twenty48", version, about = "The 2048 sliding tile game in a terminal")]
struct Cli {
    /// Path to the config file (defaults to ./Config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play one game (human at the keyboard, or a bot)
    Play {
        #[arg(long)]
        player: Option<PlayerKind>,
        #[arg(long)]
        seed: Option<u64>,
        /// Print one JSON view state per line instead of drawing the board
        #[arg(long)]
        json: bool,
    },
    /// Play many bot games in parallel and print a summary
    Simulate {
        #[arg(long)]
        games: Option<usize>,
        #[arg(long)]
        player: Option<PlayerKind>,
        #[arg(long)]
        concurrency: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .context("failed to load configuration")?;

    match cli.command {
        Some(Command::Play { player, seed, json }) => play(&config, player, seed, json),
        None => play(&config, None, None, false),
        Some(Command::Simulate {
            games,
            player,
            concurrency,
            seed,
            json,
        }) => simulate(&config, games, player, concurrency, seed, json),
    }
}

fn play(config: &AppConfig, player: Option<PlayerKind>, seed: Option<u64>, json: bool) -> Result<()> {
    let mut settings = config.board_settings();
    if seed.is_some() {
        settings.seed = seed;
    }
    let kind = player.unwrap_or(config.player.kind);

    let player: Box<dyn PlayerStrategy> = match kind {
        PlayerKind::Human => Box::new(HumanConsolePlayer::new()),
        bot => match build_bot(bot, settings.seed) {
            Some(bot) => bot,
            None => bail!("player '{}' is not available", bot),
        },
    };

    let board = Board::with_settings(settings).context("invalid board settings")?;
    let game = GameService::new(board, player);

    if json {
        ConsoleInterface::run_json(game, io::stdout().lock()).context("failed to write view state")?;
    } else {
        ConsoleInterface::run(game);
    }
    Ok(())
}

fn simulate(
    config: &AppConfig,
    games: Option<usize>,
    player: Option<PlayerKind>,
    concurrency: Option<usize>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let mut settings = config.board_settings();
    if seed.is_some() {
        settings.seed = seed;
    }
    let player = match player.unwrap_or(config.player.kind) {
        PlayerKind::Human => PlayerKind::Greedy,
        kind => kind,
    };

    let request = SimulationRequest {
        games: games.unwrap_or(config.simulation.games),
        concurrency: concurrency.unwrap_or(config.simulation.concurrency),
        player,
        settings,
    };
    let report = run_simulation(request).context("simulation failed")?;

    if json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("Games:       {}", report.games);
        println!("Wins:        {}", report.wins);
        println!("Losses:      {}", report.losses);
        println!("Best score:  {}", report.best_score);
        println!("Mean score:  {:.1}", report.mean_score);
        println!("Best tile:   {}", report.best_tile);
        println!("Total moves: {}", report.total_moves);
    }
    Ok(())
}
