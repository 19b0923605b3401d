//! Everything that can go wrong when acting on the game.
//!
//! None of these errors ends the session: the player can always try again.

use thiserror::Error;

/// Mistakes caught locally, before anything is sent to the server.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum UserInputError {
    #[error("Select a destination city different from the origin.")]
    SameCity,
    #[error("There is no free route between {from} and {to}!")]
    NoFreeRoute { from: String, to: String },
    #[error("Create a game first!")]
    NoSession,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ClientError {
    #[error(transparent)]
    UserInput(#[from] UserInputError),
    /// The request did not complete, or its response could not be understood.
    #[error("Network error: {0}")]
    Network(String),
    /// The server answered, but refused the action.
    #[error("{0}")]
    ServerRejection(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        ClientError::Network(error.to_string())
    }
}
