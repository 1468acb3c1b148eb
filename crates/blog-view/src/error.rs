//! Failures seen by the front end when talking to the API.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Post not found")]
    NotFound,

    /// The server answered with an error body.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl From<chrono::ParseError> for ClientError {
    fn from(err: chrono::ParseError) -> Self {
        ClientError::Decode(err.to_string())
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}
