// Configuration loading

pub mod board_def;
pub mod error;
pub mod settings;

pub use board_def::BoardDefinition;
pub use error::ConfigError;
pub use settings::Settings;

use std::path::PathBuf;

/// ~/.config/rewardboard (or the platform equivalent)
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rewardboard")
}
