//! Relay wire protocol.
//!
//! The client sends one JSON text message right after the socket opens,
//! declaring what it wants relayed. After that the server pushes binary JPEG
//! frames, or a JSON `{ "error": "..." }` text message when it cannot serve
//! the source. In local-capture mode the client also pushes binary JPEG
//! frames upstream.
//!
//! Some relay deployments send frames as base64 text instead of binary; those
//! are accepted when the decoded payload carries a JPEG start-of-image marker.

#[cfg(test)]
#[path = "protocol_test.rs"]
mod protocol_test;

use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::RelayError;
use crate::camera::{CameraKind, CameraSource};

/// Prefix some servers put in front of base64 frames.
const DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// `type` field of the config message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigType {
    /// Relay a remote camera by URL.
    CameraUrl,
    /// The client will stream its own capture device.
    CameraLocal,
}

impl From<CameraKind> for ConfigType {
    fn from(kind: CameraKind) -> Self {
        match kind {
            CameraKind::Remote => Self::CameraUrl,
            CameraKind::Local => Self::CameraLocal,
        }
    }
}

/// Configuration message sent once per connection, immediately after open.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigMessage {
    #[serde(rename = "type")]
    pub kind: ConfigType,
    pub url: String,
    pub camera_name: String,
}

impl ConfigMessage {
    #[must_use]
    pub fn for_source(source: &CameraSource) -> Self {
        Self {
            kind: source.kind.into(),
            url: source.url.clone(),
            camera_name: source.display_name().to_owned(),
        }
    }

    /// Serialize to the JSON text sent on the socket.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Encode`] if serialization fails.
    pub fn to_json(&self) -> Result<String, RelayError> {
        serde_json::to_string(self).map_err(|e| RelayError::Encode(e.to_string()))
    }
}

/// Meaning of a text message received from the relay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inbound {
    /// A JPEG frame delivered as base64 text.
    Frame(Vec<u8>),
    /// The server reported an error for this source.
    ServerError(String),
    /// Anything else (acks, keepalives, unknown JSON).
    Ignored,
}

/// Classify a text message from the relay.
#[must_use]
pub fn classify_text(text: &str) -> Inbound {
    let trimmed = text.trim();
    if trimmed.starts_with('{') {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) else {
            return Inbound::Ignored;
        };
        return match value.get("error") {
            Some(serde_json::Value::String(message)) => Inbound::ServerError(message.clone()),
            Some(serde_json::Value::Null) | None => Inbound::Ignored,
            Some(other) => Inbound::ServerError(other.to_string()),
        };
    }

    let encoded = trimmed.strip_prefix(DATA_URL_PREFIX).unwrap_or(trimmed);
    match base64::engine::general_purpose::STANDARD.decode(encoded) {
        Ok(bytes) if looks_like_jpeg(&bytes) => Inbound::Frame(bytes),
        _ => Inbound::Ignored,
    }
}

/// True when `bytes` starts with the JPEG start-of-image marker.
#[must_use]
pub fn looks_like_jpeg(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && bytes[0] == 0xFF && bytes[1] == 0xD8
}
