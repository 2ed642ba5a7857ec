use shared::error::InvalidMessageId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server answered {status} for {path}")]
    Status { status: u16, path: String },
}

impl TransportError {
    /// HTTP status of a rejected response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request(err) => err.status().map(|status| status.as_u16()),
            Self::InvalidUrl(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum BinderError {
    #[error("page is missing required element {0}")]
    MissingElement(&'static str),
    #[error(transparent)]
    InvalidMessageId(#[from] InvalidMessageId),
    #[error(transparent)]
    Transport(#[from] TransportError),
}
