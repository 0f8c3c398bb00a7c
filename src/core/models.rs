use serde::{Deserialize, Serialize};

/// Completion text produced for one user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedReply {
    pub text: String,
}

/// One message accepted by the reply endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentMessage {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_token: Option<String>,
}

/// What the messaging platform reported back for a reply call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryResult {
    #[serde(default)]
    pub sent_messages: Vec<SentMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Per-event result of the reply pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchOutcome {
    Skipped,
    Replied { delivery: DeliveryResult },
    FailedWithFallback { delivery: DeliveryResult },
    DeliveryFailed { error: String },
}

impl DispatchOutcome {
    /// True when a reply (generated or fallback) reached the platform.
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Replied { .. } | Self::FailedWithFallback { .. })
    }
}

/// Acknowledgement for a whole webhook batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DispatchResponse {
    Success { results: Vec<DispatchOutcome> },
    Error,
}
