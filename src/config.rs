#![warn(clippy::all, clippy::pedantic)]

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

use crate::components::GameInput;

// Global configuration instance with thread-safe access
pub static CONFIG: once_cell::sync::Lazy<Arc<RwLock<Config>>> =
    once_cell::sync::Lazy::new(|| Arc::new(RwLock::new(Config::default())));

// Fallback config file path when no user config directory exists
const CONFIG_FILE_PATH: &str = "config/blockdrop.toml";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub keys: KeyBindings,
}

/// Key bindings are the one knob the game exposes; board size, gravity and
/// scoring are fixed constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub move_left: String,
    pub move_right: String,
    pub soft_drop: String,
    pub rotate: String,
    pub quit: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: "Left".to_string(),
            move_right: "Right".to_string(),
            soft_drop: "Down".to_string(),
            rotate: "Up".to_string(),
            quit: "q".to_string(),
        }
    }
}

impl KeyBindings {
    #[must_use]
    pub fn action_for(&self, code: KeyCode) -> Option<GameInput> {
        if parse_key(&self.move_left) == Some(code) {
            Some(GameInput::MoveLeft)
        } else if parse_key(&self.move_right) == Some(code) {
            Some(GameInput::MoveRight)
        } else if parse_key(&self.soft_drop) == Some(code) {
            Some(GameInput::SoftDrop)
        } else if parse_key(&self.rotate) == Some(code) {
            Some(GameInput::Rotate)
        } else {
            None
        }
    }

    #[must_use]
    pub fn quits(&self, code: KeyCode) -> bool {
        parse_key(&self.quit) == Some(code)
    }
}

/// Map a binding name from the config file to a key code. Named keys are
/// matched case-insensitively; anything else must be a single character.
#[must_use]
pub fn parse_key(name: &str) -> Option<KeyCode> {
    match name.to_ascii_lowercase().as_str() {
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "space" => Some(KeyCode::Char(' ')),
        "enter" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}

// Load the configuration from the file system, writing a default config
// file on first run.
pub fn load_config_from_file() -> Result<Config, ConfigError> {
    let config_path = get_config_file_path();

    if let Some(parent) = config_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    if !config_path.exists() {
        let default_config = Config::default();
        save_config_to_file(&default_config)?;
        return Ok(default_config);
    }

    let contents = fs::read_to_string(&config_path)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

// Save the configuration to the file system
pub fn save_config_to_file(config: &Config) -> Result<(), ConfigError> {
    let config_path = get_config_file_path();

    if let Some(parent) = config_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let toml_string = toml::to_string_pretty(config)?;
    fs::write(&config_path, toml_string)?;

    Ok(())
}

// Get the path to the config file
fn get_config_file_path() -> PathBuf {
    // Check for environment variable override
    if let Ok(path) = std::env::var("BLOCKDROP_CONFIG") {
        return PathBuf::from(path);
    }

    // Otherwise use default path in user's config directory
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("blockdrop").join("config.toml")
    } else {
        // Fallback to local directory
        PathBuf::from(CONFIG_FILE_PATH)
    }
}

// Custom error type for configuration operations
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialize(err)
    }
}
