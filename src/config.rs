use crate::domain::board::{BoardSettings, DEFAULT_FOUR_PROBABILITY};
use log::{info, warn};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CONFIG_PATH: &str = "Config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub player: PlayerConfig,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GameConfig {
    pub four_probability: f64,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            four_probability: DEFAULT_FOUR_PROBABILITY,
            seed: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    #[default]
    Human,
    Random,
    Greedy,
}

impl FromStr for PlayerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "human" | "h" => Ok(PlayerKind::Human),
            "random" | "r" => Ok(PlayerKind::Random),
            "greedy" | "g" | "c" => Ok(PlayerKind::Greedy),
            other => Err(format!("unknown player '{}'", other)),
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayerKind::Human => "human",
            PlayerKind::Random => "random",
            PlayerKind::Greedy => "greedy",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct PlayerConfig {
    pub kind: PlayerKind,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SimulationConfig {
    pub games: usize,
    pub concurrency: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            games: 100,
            concurrency: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}

impl AppConfig {
    /// Reads `Config.toml` from the working directory if present, then applies
    /// `TWENTY48_*` environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_PATH))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml_str(&contents)?
        } else {
            info!("{} not found, using defaults", path.display());
            Self::default()
        };

        config.merge_env();
        config.validate()?;

        info!(
            "config: four_probability={} seed={:?} player={} simulation.games={} simulation.concurrency={}",
            config.game.four_probability,
            config.game.seed,
            config.player.kind,
            config.simulation.games,
            config.simulation.concurrency
        );

        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    fn merge_env(&mut self) {
        env_override("TWENTY48_FOUR_PROBABILITY", &mut self.game.four_probability);
        env_override("TWENTY48_PLAYER", &mut self.player.kind);
        env_override("TWENTY48_SIM_GAMES", &mut self.simulation.games);
        env_override("TWENTY48_SIM_CONCURRENCY", &mut self.simulation.concurrency);

        let mut seed = 0u64;
        if env_override("TWENTY48_SEED", &mut seed) {
            self.game.seed = Some(seed);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.game.four_probability) {
            return Err(ConfigError::Invalid(format!(
                "game.four_probability must be within [0, 1], got {}",
                self.game.four_probability
            )));
        }
        if self.simulation.concurrency == 0 {
            return Err(ConfigError::Invalid(
                "simulation.concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn board_settings(&self) -> BoardSettings {
        BoardSettings {
            four_probability: self.game.four_probability,
            seed: self.game.seed,
        }
    }
}

// Returns true when the variable was present and parsed.
fn env_override<T: FromStr>(key: &str, target: &mut T) -> bool {
    let Ok(val) = std::env::var(key) else {
        return false;
    };
    match val.parse() {
        Ok(parsed) => {
            *target = parsed;
            true
        }
        Err(_) => {
            warn!("ignoring {}={:?}: not a valid value", key, val);
            false
        }
    }
}
