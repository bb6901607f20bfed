//! Hangman game core.
//!
//! Word-list loading and filtering, the per-channel game session state
//! machine, and the session registry. This crate is gateway-agnostic:
//! nothing in it knows about Discord, so the whole game can be driven
//! (and tested) without a network in sight.

pub mod registry;
pub mod render;
pub mod session;
pub mod words;

pub use {
    registry::{GuessReport, SessionRegistry, SessionSettings},
    render::Render,
    session::{ChatContext, GameSession, Guess, GuessOutcome, GuesserPolicy, PlayerId, Status},
    words::{WordListSpec, WordSource},
};

use std::path::PathBuf;

/// Errors produced by the hangman core.
///
/// All of these are recoverable: a failing operation never leaves the
/// registry or a session partially mutated.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read word list '{path}': {source}")]
    WordList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no playable words left after applying blacklists")]
    EmptyVocabulary,

    #[error("a game is already running here")]
    SessionConflict,

    #[error("only the player who started this game may guess")]
    NotAuthorized,

    #[error("'{0}' is not a valid guess; guesses may only contain letters")]
    InvalidGuess(String),

    #[error("no game is running here")]
    NoActiveGame,
}

pub type Result<T> = std::result::Result<T, Error>;
