//! Typed HTTP requests issued by the page behavior layer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::MessageId;

pub const NEW_MESSAGE_PATH: &str = "/messages/new";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// An `application/x-www-form-urlencoded` request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormBody(String);

impl FormBody {
    pub const CONTENT_TYPE: &'static str = "application/x-www-form-urlencoded";

    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<FormBody>,
}

impl HttpRequest {
    pub fn toggle_like(message_id: MessageId) -> Self {
        Self {
            method: Method::Post,
            path: format!("/messages/{message_id}/like"),
            body: None,
        }
    }

    pub fn new_message_form() -> Self {
        Self {
            method: Method::Get,
            path: NEW_MESSAGE_PATH.to_string(),
            body: None,
        }
    }

    pub fn create_message(body: FormBody) -> Self {
        Self {
            method: Method::Post,
            path: NEW_MESSAGE_PATH.to_string(),
            body: Some(body),
        }
    }
}

impl fmt::Display for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
