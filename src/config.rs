//! Configuration loading.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. Project config (`.wordle/config.toml` in the working directory)
//! 3. User config (`~/.wordle/config.toml`)
//! 4. Defaults (lowest priority)
//!
//! All configuration is optional. The server runs with sensible defaults
//! when no config exists.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, WordleError};
use crate::util::read_to_string_limited;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Network listener settings.
    pub server: ServerConfig,
    /// Gameplay policy.
    pub game: GameConfig,
    /// Word list source.
    pub words: WordsConfig,
    /// Statistics persistence.
    pub stats: StatsConfig,
}

/// Network listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, and the address clients connect to.
    pub address: String,
    /// Seconds of client silence before a session is abandoned. 0 disables.
    pub idle_timeout_secs: u64,
}

impl ServerConfig {
    /// The idle timeout as a socket read timeout.
    pub fn idle_timeout(&self) -> Option<Duration> {
        match self.idle_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:7043".to_string(),
            idle_timeout_secs: 300,
        }
    }
}

/// Gameplay policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Whether a session abandoned mid-game counts as a non-winning play.
    pub count_abandoned: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            count_abandoned: true,
        }
    }
}

/// Word list source.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WordsConfig {
    /// JSON word list. The built-in list is used when unset.
    pub list_path: Option<PathBuf>,
}

/// Statistics persistence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StatsConfig {
    /// Record file, relative to the server's working directory unless absolute.
    pub path: PathBuf,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("gamestats.json"),
        }
    }
}

impl Config {
    /// Load configuration with full precedence chain.
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables
    /// 2. Project config (`.wordle/config.toml` in cwd)
    /// 3. User config (`~/.wordle/config.toml`)
    /// 4. Defaults
    pub fn load() -> Self {
        match env::current_dir() {
            Ok(cwd) => Self::load_from_cwd(&cwd),
            Err(_) => {
                let mut config = Config::default();
                if let Some(user_config) = Self::load_user_config() {
                    config = config.merge(user_config);
                }
                config.apply_env_overrides();
                config
            }
        }
    }

    /// Load configuration with a specific working directory.
    pub fn load_from_cwd(cwd: &Path) -> Self {
        let mut config = Config::default();

        if let Some(user_config) = Self::load_user_config() {
            config = config.merge(user_config);
        }

        if let Some(project_config) = Self::load_project_config(cwd) {
            config = config.merge(project_config);
        }

        config.apply_env_overrides();

        config
    }

    /// Load user config from `<wordle_home>/config.toml`.
    fn load_user_config() -> Option<Config> {
        let path = wordle_home()?.join("config.toml");
        Self::load_optional(&path)
    }

    /// Load project config from `.wordle/config.toml` in the given directory.
    fn load_project_config(cwd: &Path) -> Option<Config> {
        Self::load_optional(&project_config_path(cwd))
    }

    /// A missing file is silently skipped; a broken one is reported and skipped.
    fn load_optional(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        match Self::load_from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("Warning: Ignoring config file {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Load config from a specific file path.
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = read_to_string_limited(path)
            .map_err(|e| WordleError::config(format!("{}: {}", path.display(), e)))?;
        toml::from_str(&content).map_err(|e| WordleError::config(e.to_string()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // WORDLE_ADDRESS
        if let Ok(val) = env::var("WORDLE_ADDRESS") {
            if val.trim().is_empty() {
                eprintln!(
                    "Warning: Empty WORDLE_ADDRESS. Using default '{}'.",
                    self.server.address
                );
            } else {
                self.server.address = val.trim().to_string();
            }
        }

        // WORDLE_IDLE_TIMEOUT_SECS
        if let Ok(val) = env::var("WORDLE_IDLE_TIMEOUT_SECS") {
            match val.parse::<u64>() {
                Ok(n) => self.server.idle_timeout_secs = n,
                Err(_) => eprintln!(
                    "Warning: Invalid WORDLE_IDLE_TIMEOUT_SECS value '{}'. \
                    Expected a non-negative integer. Using default '{}'.",
                    val, self.server.idle_timeout_secs
                ),
            }
        }

        // WORDLE_COUNT_ABANDONED
        if let Ok(val) = env::var("WORDLE_COUNT_ABANDONED") {
            match val.as_str() {
                "true" | "1" => self.game.count_abandoned = true,
                "false" | "0" => self.game.count_abandoned = false,
                _ => eprintln!(
                    "Warning: Invalid WORDLE_COUNT_ABANDONED value '{}'. \
                    Expected true/false. Using default '{}'.",
                    val, self.game.count_abandoned
                ),
            }
        }

        // WORDLE_WORD_LIST
        if let Ok(val) = env::var("WORDLE_WORD_LIST") {
            if !val.is_empty() {
                self.words.list_path = Some(PathBuf::from(val));
            }
        }

        // WORDLE_STATS_PATH
        if let Ok(val) = env::var("WORDLE_STATS_PATH") {
            if val.is_empty() {
                eprintln!(
                    "Warning: Empty WORDLE_STATS_PATH. Using default '{}'.",
                    self.stats.path.display()
                );
            } else {
                self.stats.path = PathBuf::from(val);
            }
        }
    }

    /// Merge another config into this one.
    ///
    /// Values from `other` override values in `self` when they differ from
    /// the defaults. A layer that explicitly sets a default value therefore
    /// cannot undo a lower layer's customization.
    fn merge(mut self, other: Config) -> Self {
        let default_server = ServerConfig::default();
        if other.server.address != default_server.address {
            self.server.address = other.server.address;
        }
        if other.server.idle_timeout_secs != default_server.idle_timeout_secs {
            self.server.idle_timeout_secs = other.server.idle_timeout_secs;
        }

        if other.game.count_abandoned != GameConfig::default().count_abandoned {
            self.game.count_abandoned = other.game.count_abandoned;
        }

        if other.words.list_path.is_some() {
            self.words.list_path = other.words.list_path;
        }

        if other.stats.path != StatsConfig::default().path {
            self.stats.path = other.stats.path;
        }

        self
    }
}

/// Get the wordle home directory.
///
/// Returns `$WORDLE_HOME` if set and non-empty, otherwise `~/.wordle`.
/// `None` when neither is available.
pub fn wordle_home() -> Option<PathBuf> {
    if let Ok(home) = env::var("WORDLE_HOME") {
        if home.is_empty() {
            tracing::warn!("WORDLE_HOME is empty, using default");
        } else {
            return Some(PathBuf::from(home));
        }
    }

    dirs::home_dir().map(|home| home.join(".wordle"))
}

/// Project config location for a working directory.
pub fn project_config_path(cwd: &Path) -> PathBuf {
    cwd.join(".wordle").join("config.toml")
}
