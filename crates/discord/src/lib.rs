//! Discord gateway adapter for the hangman bot.
//!
//! Connects to the Discord Gateway API via a persistent WebSocket using
//! the serenity library. Registers the `/play` and `/gamemodes` slash
//! commands, feeds channel messages into the session registry as
//! guesses, and posts the resulting game state back.

pub mod commands;
pub mod error;
pub mod format;
pub mod handler;
pub mod outbound;
pub mod state;

pub use {
    error::{Error, Result},
    handler::{Handler, required_intents},
    state::{BotState, Gamemode},
};
