//! Plain-text configuration for the hangman bot.
//!
//! Both the bot credentials and each gamemode live in simple
//! `key=value` files (`#` comments, blank lines ignored). Files are
//! validated eagerly into immutable structs at load time; raw strings
//! never reach game logic.

pub mod bot;
pub mod file;
pub mod gamemode;

pub use {
    bot::BotConfig,
    gamemode::{CloseThreadAction, GamemodeConfig, GamemodeKind, load_gamemodes},
};

use std::path::PathBuf;

/// Errors raised while loading a config file.
///
/// A bad bot-credential file is fatal at startup; a bad gamemode file
/// only disables that gamemode.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}: missing required key '{key}'")]
    MissingKey { file: String, key: &'static str },

    #[error("{file}: '{value}' is not a valid value for '{key}'")]
    InvalidValue {
        file: String,
        key: &'static str,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
