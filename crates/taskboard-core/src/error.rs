use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskboardError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Remote error ({status}): {message}")]
    Remote { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TaskboardError {
    /// True for failures that came back from (or never reached) the remote
    /// service, as opposed to problems detected locally.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::Timeout(_) | Self::Unauthorized(_) | Self::Remote { .. }
        )
    }

    /// Text to show the user: the service's own message where there is
    /// one, the full error otherwise.
    pub fn user_message(&self) -> String {
        match self {
            Self::Remote { message, .. } | Self::Unauthorized(message) => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            Self::Unauthorized(_) => Some(401),
            _ => None,
        }
    }
}
