/// Errors specific to the Discord adapter.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("discord send: {0}")]
    Send(String),

    #[error(transparent)]
    Game(#[from] gallows_game::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
