use thiserror::Error;

/// Errors raised at the edges of the game: storage, console and configuration.
///
/// The round engine itself never fails; bad menu choices and rejected
/// credentials are handled by re-prompting and never surface here.
#[derive(Error, Debug)]
pub enum DuelError {
    #[error("There was a problem with the score database: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("The username '{0}' is already taken")]
    UsernameTaken(String),
    #[error("Input ended while waiting for a response")]
    InputClosed,
    #[error("A duel needs exactly 2 signed-in players, found {0}")]
    NotEnoughPlayers(usize),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    IO(#[from] std::io::Error),
}
