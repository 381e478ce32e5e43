//! Session configuration read from the environment.
//!
//! | Variable      | Default | Meaning                              |
//! |---------------|---------|--------------------------------------|
//! | `GAME_SIZE`   | 4       | Board edge length                    |
//! | `GAME_TARGET` | 2048    | Tile value that wins the game        |
//! | `GAME_AGENT`  | human   | `human` (prompt) or `random`         |
//! | `GAME_SEED`   | unset   | Seed for reproducible spawns/moves   |

use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use twenty48_core::{Game, GameError, Tile};

const DEFAULT_SIZE: i64 = 4;
const DEFAULT_TARGET: i64 = 2048;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: i64 },

    #[error("{name} is not a valid number: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("unknown agent {0:?} (expected \"human\" or \"random\")")]
    UnknownAgent(String),
}

/// Who picks the moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgentKind {
    #[default]
    Human,
    Random,
}

impl FromStr for AgentKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(AgentKind::Human),
            "random" => Ok(AgentKind::Random),
            _ => Err(ConfigError::UnknownAgent(s.to_string())),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentKind::Human => write!(f, "human"),
            AgentKind::Random => write!(f, "random"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub size: usize,
    pub target: Tile,
    pub agent: AgentKind,
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; missing keys use the defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let size = positive(&lookup, "GAME_SIZE", DEFAULT_SIZE)?;
        let target = positive(&lookup, "GAME_TARGET", DEFAULT_TARGET)?;

        let agent = match lookup("GAME_AGENT") {
            Some(raw) => raw.parse()?,
            None => AgentKind::default(),
        };

        let seed = lookup("GAME_SEED")
            .map(|raw| {
                raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                    name: "GAME_SEED",
                    value: raw,
                })
            })
            .transpose()?;

        Ok(Self {
            size: usize::try_from(size).map_err(|_| ConfigError::Invalid {
                name: "GAME_SIZE",
                value: size.to_string(),
            })?,
            target,
            agent,
            seed,
        })
    }

    /// Create the game this config describes
    pub fn new_game(&self) -> Result<Game, GameError> {
        match self.seed {
            Some(seed) => Game::with_seed(self.size, self.target, seed),
            None => Game::new(self.size, self.target),
        }
    }
}

/// Read `name` as a signed integer so that negative values are reported as
/// out of range rather than as malformed.
fn positive<F>(lookup: &F, name: &'static str, default: i64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = match lookup(name) {
        Some(raw) => raw.trim().parse::<i64>().map_err(|_| ConfigError::Invalid {
            name,
            value: raw.clone(),
        })?,
        None => default,
    };

    if value <= 0 {
        return Err(ConfigError::NotPositive { name, value });
    }
    Ok(value as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(
            config,
            Config {
                size: 4,
                target: 2048,
                agent: AgentKind::Human,
                seed: None,
            }
        );
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("GAME_SIZE", "5"),
            ("GAME_TARGET", " 256 "),
            ("GAME_AGENT", "Random"),
            ("GAME_SEED", "42"),
        ])
        .unwrap();

        assert_eq!(config.size, 5);
        assert_eq!(config.target, 256);
        assert_eq!(config.agent, AgentKind::Random);
        assert_eq!(config.seed, Some(42));

        let game = config.new_game().unwrap();
        assert_eq!(game.size(), 5);
        assert_eq!(game.target(), 256);
    }

    #[test]
    fn test_rejects_non_positive() {
        assert_eq!(
            config(&[("GAME_SIZE", "0")]),
            Err(ConfigError::NotPositive {
                name: "GAME_SIZE",
                value: 0
            })
        );
        assert_eq!(
            config(&[("GAME_TARGET", "-1")]),
            Err(ConfigError::NotPositive {
                name: "GAME_TARGET",
                value: -1
            })
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            config(&[("GAME_SIZE", "four")]),
            Err(ConfigError::Invalid { name: "GAME_SIZE", .. })
        ));
        assert!(matches!(
            config(&[("GAME_SEED", "-3")]),
            Err(ConfigError::Invalid { name: "GAME_SEED", .. })
        ));
        assert_eq!(
            config(&[("GAME_AGENT", "expectimax")]),
            Err(ConfigError::UnknownAgent("expectimax".into()))
        );
    }

    #[test]
    fn test_seeded_games_repeat() {
        let config = config(&[("GAME_SEED", "7")]).unwrap();
        let a = config.new_game().unwrap();
        let b = config.new_game().unwrap();
        assert_eq!(a.board(), b.board());
    }
}
