//! Webhook payload types delivered by the LINE platform.
//!
//! Only the fields the reply pipeline reads are modelled; everything else in
//! the payload is ignored during decoding.

use serde::Deserialize;

/// Top-level webhook body: `{ "destination": "...", "events": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookBody {
    #[serde(default)]
    pub destination: Option<String>,
    pub events: Vec<InboundEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EventSource {
    #[serde(rename_all = "camelCase")]
    User { user_id: Option<String> },
    #[serde(rename_all = "camelCase")]
    Group {
        group_id: String,
        user_id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Room {
        room_id: String,
        user_id: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MessageContent {
    Text { id: String, text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InboundEvent {
    #[serde(rename_all = "camelCase")]
    Message {
        #[serde(default)]
        reply_token: Option<String>,
        #[serde(default)]
        source: Option<EventSource>,
        message: MessageContent,
    },
    #[serde(rename_all = "camelCase")]
    Follow {
        #[serde(default)]
        reply_token: Option<String>,
        #[serde(default)]
        source: Option<EventSource>,
    },
    #[serde(rename_all = "camelCase")]
    Join {
        #[serde(default)]
        reply_token: Option<String>,
        #[serde(default)]
        source: Option<EventSource>,
    },
    #[serde(other)]
    Other,
}

impl InboundEvent {
    /// Returns `(reply_token, text)` for text messages that can be answered
    /// and `None` for everything else. Pure: no I/O, same answer on every call.
    #[must_use]
    pub fn text_message(&self) -> Option<(&str, &str)> {
        match self {
            Self::Message {
                reply_token: Some(reply_token),
                message: MessageContent::Text { text, .. },
                ..
            } => Some((reply_token.as_str(), text.as_str())),
            _ => None,
        }
    }

    /// Short label for log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Message {
                message: MessageContent::Text { .. },
                ..
            } => "message.text",
            Self::Message { .. } => "message.other",
            Self::Follow { .. } => "follow",
            Self::Join { .. } => "join",
            Self::Other => "other",
        }
    }
}

/// Decodes a raw webhook body into its events.
///
/// # Errors
///
/// Returns `BotError::ParseError` when the body is not a webhook batch.
pub fn parse_webhook_body(body: &str) -> Result<WebhookBody, crate::errors::BotError> {
    Ok(serde_json::from_str(body)?)
}
