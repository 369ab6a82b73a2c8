//! Error taxonomy for the blog client.

use shared::{domain::BlogId, error::ApiError};
use thiserror::Error;

/// Text shown for any rejected login, whatever the underlying cause.
pub const WRONG_CREDENTIALS: &str = "wrong credentials";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("wrong credentials")]
    WrongCredentials,

    /// Rejected by the service; `message` is the text the service supplied.
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("blog {0} is not loaded")]
    UnknownBlog(BlogId),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    pub fn api(status: u16, error: ApiError) -> Self {
        Self::Api {
            status,
            message: error.message,
        }
    }

    /// The single line the notification banner shows for this failure.
    pub fn notification_text(&self) -> String {
        match self {
            Self::WrongCredentials => WRONG_CREDENTIALS.to_string(),
            Self::Api { message, .. } => message.clone(),
            Self::Transport(message) | Self::Decode(message) => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
