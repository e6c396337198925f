//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract: scripts rely on them.
//!
//! | Code | Meaning                                         |
//! |------|-------------------------------------------------|
//! | 0    | Success                                         |
//! | 1    | General error (unspecified)                     |
//! | 2    | Usage error (bad args, refusing to overwrite)   |
//! | 3    | Storage error (layout blob read/write/remove)   |
//! | 4    | Saved layout is not valid JSON                  |
//! | 5    | Board definition invalid                        |

use rewardboard_config::ConfigError;
use rewardboard_core::BoardError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Blob store failure (permissions, invalid key, disk full).
pub const EXIT_STORAGE: u8 = 3;

/// Saved layout could not be parsed.
pub const EXIT_LAYOUT: u8 = 4;

/// Board definition TOML rejected.
pub const EXIT_CONFIG: u8 = 5;

pub fn board_exit_code(err: &BoardError) -> u8 {
    match err {
        BoardError::Storage(_) => EXIT_STORAGE,
        BoardError::Layout(_) => EXIT_LAYOUT,
        BoardError::UnknownCategory(_)
        | BoardError::UnknownReward(_)
        | BoardError::NotPlaced { .. } => EXIT_USAGE,
    }
}

pub fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::Parse(_) | ConfigError::Validation(_) => EXIT_CONFIG,
        ConfigError::Io(_) => EXIT_ERROR,
    }
}
