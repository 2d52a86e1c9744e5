//! Request payloads accepted when replacing a note.
//!
//! A replace body is either a JSON object or plain text. The choice is made
//! once from the declared content type, and the store only ever sees the
//! resulting text.

use serde_json::{Map, Value};
use thiserror::Error;

pub const APPLICATION_JSON: &str = "application/json";
pub const TEXT_PLAIN: &str = "text/plain";

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("unsupported media type: {0}; expected application/json or text/plain")]
    UnsupportedMediaType(String),

    #[error("malformed body: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Structured(Map<String, Value>),
    Text(String),
}

impl Payload {
    /// Resolves a request body against its declared content type.
    ///
    /// Parameters such as `charset` are ignored and the media type is
    /// matched case-insensitively. A missing content type is unsupported.
    pub fn from_body(content_type: Option<&str>, body: &[u8]) -> Result<Self, PayloadError> {
        let declared = content_type.unwrap_or_default();
        let essence = declared
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            APPLICATION_JSON => match serde_json::from_slice::<Value>(body) {
                Ok(Value::Object(map)) => Ok(Payload::Structured(map)),
                Ok(_) => Err(PayloadError::Malformed("expected a JSON object".into())),
                Err(e) => Err(PayloadError::Malformed(e.to_string())),
            },
            TEXT_PLAIN => String::from_utf8(body.to_vec())
                .map(Payload::Text)
                .map_err(|_| PayloadError::Malformed("body is not valid UTF-8".into())),
            "" => Err(PayloadError::UnsupportedMediaType("none".into())),
            _ => Err(PayloadError::UnsupportedMediaType(declared.to_owned())),
        }
    }

    /// Canonical text form written to the store.
    ///
    /// Objects serialize compactly with keys in sorted order; text is kept
    /// verbatim.
    pub fn into_text(self) -> String {
        match self {
            Payload::Structured(map) => Value::Object(map).to_string(),
            Payload::Text(text) => text,
        }
    }
}
