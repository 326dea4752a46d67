//! Error types for the API client.
//!
//! The variants keep transport failures, HTTP status failures, and
//! malformed payloads apart for logging. Users only ever see
//! [`ClientError::user_message`].

use rosterdash_core::CoreError;

/// Errors that can occur while talking to the roster API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Envelope `message`, or the raw body when there is none.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Client configuration is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// A local state transition was refused.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ClientError {
    /// Whether the request failed before any response arrived.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// HTTP status of a rejected request, if there was one.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The single message shown to the user for a failed `action`.
    ///
    /// Transport, status, and shape failures all read the same; the
    /// distinction only goes to the log.
    pub fn user_message(&self, action: &str) -> String {
        match self {
            Self::Core(CoreError::SubmissionInFlight) => {
                String::from("A save is already in progress")
            }
            Self::Config(_) | Self::Core(_) => format!("Cannot {action}: {self}"),
            Self::Transport(_) | Self::Status { .. } | Self::Malformed(_) => {
                format!("Failed to {action}")
            }
        }
    }
}
