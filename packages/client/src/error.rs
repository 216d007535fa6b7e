//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The chosen display name was rejected locally
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// The message text was rejected locally
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// A name has already been chosen for this session
    #[error("You have already joined as '{0}'")]
    AlreadyJoined(String),

    /// A message was submitted before choosing a name
    #[error("Choose a name before sending messages")]
    NotJoined,

    /// The relay URL cannot be used
    #[error("Invalid relay URL: {0}")]
    InvalidUrl(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// An outgoing event could not be encoded
    #[error("Failed to encode event: {0}")]
    Encode(String),
}
