use refnet_types::DecodeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("decode: {0}")]
    Decode(#[from] DecodeError),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// The backend rejected the token; the session should be dropped.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
