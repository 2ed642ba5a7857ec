use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid message id {raw:?}: expected an integer")]
pub struct InvalidMessageId {
    pub raw: String,
}

impl InvalidMessageId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }
}
