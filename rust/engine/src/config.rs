use std::fs;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_SEATS: usize = 8;
pub const MIN_PLAYERS: usize = 2;

/// Upper bound on `history_limit`.
pub const MAX_HISTORY: usize = 1000;

pub const CONFIG_ENV: &str = "HOLDEM_CONFIG";
pub const SEED_ENV: &str = "HOLDEM_SEED";
pub const TIMEOUT_ENV: &str = "HOLDEM_TURN_TIMEOUT";

/// Table stakes and limits for one room.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RoomConfig {
    pub small_blind: u32,
    pub big_blind: u32,
    /// Buy-in for every new seat and the rebuy target.
    pub starting_chips: u32,
    pub max_players: usize,
    pub turn_timeout_secs: u64,
    /// Number of finished hands kept in the room history.
    pub history_limit: usize,
    /// Shuffle seed; a random one is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            small_blind: 10,
            big_blind: 20,
            starting_chips: 1000,
            max_players: MAX_SEATS,
            turn_timeout_secs: 30,
            history_limit: 20,
            seed: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSources {
    pub file: Option<ValueSource>,
    pub seed: ValueSource,
    pub turn_timeout_secs: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            file: None,
            seed: ValueSource::Default,
            turn_timeout_secs: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: RoomConfig,
    pub sources: ConfigSources,
}

impl RoomConfig {
    pub fn turn_timeout(&self) -> Duration {
        Duration::from_secs(self.turn_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.small_blind == 0 || self.big_blind == 0 {
            return Err(ConfigError::Invalid("blinds must be positive".into()));
        }
        if self.small_blind > self.big_blind {
            return Err(ConfigError::Invalid(
                "small_blind cannot exceed big_blind".into(),
            ));
        }
        if self.starting_chips < self.big_blind {
            return Err(ConfigError::Invalid(
                "starting_chips must cover the big blind".into(),
            ));
        }
        if !(MIN_PLAYERS..=MAX_SEATS).contains(&self.max_players) {
            return Err(ConfigError::Invalid(format!(
                "max_players must be between {MIN_PLAYERS} and {MAX_SEATS}"
            )));
        }
        if self.history_limit > MAX_HISTORY {
            return Err(ConfigError::Invalid(format!(
                "history_limit cannot exceed {MAX_HISTORY}"
            )));
        }
        if self.turn_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "turn_timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: RoomConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Defaults, then the TOML file named by `HOLDEM_CONFIG`, then the
    /// `HOLDEM_SEED` and `HOLDEM_TURN_TIMEOUT` overrides.
    pub fn load() -> Result<Self, ConfigError> {
        load_with_sources().map(|resolved| resolved.config)
    }
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = RoomConfig::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV) {
        let s = fs::read_to_string(path)?;
        cfg = toml::from_str(&s)?;
        sources.file = Some(ValueSource::File);
        if cfg.seed.is_some() {
            sources.seed = ValueSource::File;
        }
        if cfg.turn_timeout_secs != RoomConfig::default().turn_timeout_secs {
            sources.turn_timeout_secs = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var(SEED_ENV) {
        if !seed.is_empty() {
            let v: u64 = seed
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("{SEED_ENV} must be a u64")))?;
            cfg.seed = Some(v);
            sources.seed = ValueSource::Env;
        }
    }

    if let Ok(timeout) = std::env::var(TIMEOUT_ENV) {
        if !timeout.is_empty() {
            let v: u64 = timeout
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("{TIMEOUT_ENV} must be seconds")))?;
            cfg.turn_timeout_secs = v;
            sources.turn_timeout_secs = ValueSource::Env;
        }
    }

    cfg.validate()?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(RoomConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = RoomConfig::from_toml_str("big_blind = 50\nsmall_blind = 25\n").unwrap();
        assert_eq!(cfg.big_blind, 50);
        assert_eq!(cfg.small_blind, 25);
        assert_eq!(cfg.starting_chips, 1000);
        assert_eq!(cfg.max_players, MAX_SEATS);
    }

    #[test]
    fn rejects_inverted_blinds_and_bad_seats() {
        assert!(RoomConfig::from_toml_str("small_blind = 40\nbig_blind = 20\n").is_err());
        assert!(RoomConfig::from_toml_str("max_players = 9\n").is_err());
        assert!(RoomConfig::from_toml_str("turn_timeout_secs = 0\n").is_err());
        assert!(RoomConfig::from_toml_str("history_limit = 1000000000000\n").is_err());
        assert!(RoomConfig::from_toml_str("history_limit = 1000\n").is_ok());
    }
}
