use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::InvalidMessageId,
    selectors::{LIKED_CLASS, UNLIKED_CLASS},
};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(MessageId);

/// Parses the `id` attribute of a like button.
impl FromStr for MessageId {
    type Err = InvalidMessageId;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        raw.parse::<i64>()
            .map(MessageId)
            .map_err(|_| InvalidMessageId::new(raw))
    }
}

/// Like state as mirrored by a button's visual class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LikeState {
    Liked,
    NotLiked,
}

impl LikeState {
    pub fn from_liked(liked: bool) -> Self {
        if liked {
            Self::Liked
        } else {
            Self::NotLiked
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Self::Liked => LIKED_CLASS,
            Self::NotLiked => UNLIKED_CLASS,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Liked => Self::NotLiked,
            Self::NotLiked => Self::Liked,
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
