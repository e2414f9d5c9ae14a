// Inbound /api/recommend request and response bodies
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};

/// Request mode. Anything other than `"photo"` is a chat request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Chat,
    Photo,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Chat => "chat",
            Mode::Photo => "photo",
        }
    }
}

impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Unknown or non-string modes fall back to chat rather than failing
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value.as_str() {
            Some("photo") => Mode::Photo,
            _ => Mode::Chat,
        })
    }
}

/// Body of `POST /api/recommend`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    #[serde(default)]
    pub mode: Mode,

    /// Conversation so far (chat mode).
    #[serde(default)]
    pub messages: Option<Vec<ChatMessage>>,

    /// Base64 image, optionally as a `data:` URL (photo mode).
    #[serde(default)]
    pub image_base64: Option<String>,

    #[serde(default)]
    pub image_mime: Option<String>,

    /// Overrides the default photo prompt.
    #[serde(default)]
    pub prompt: Option<String>,
}

/// A single chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessage {
    /// "user" or "assistant"; anything else is sent as a user turn.
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

/// Successful response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub result: String,
}
