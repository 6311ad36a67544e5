use crate::session::SessionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Input rejected before any request was sent. The message is meant for
    /// the user.
    #[error("{0}")]
    Validation(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Server error {status}: {error}")]
    Server {
        status: u16,
        error: String,
        details: Option<String>,
    },

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}
