//! Reply Generator: one inbound event in, one outcome out.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::ai::TextGenerator;
use crate::core::models::DispatchOutcome;
use crate::line::{InboundEvent, ReplyTransport};
use crate::persona::{EMPTY_REPLY_PLACEHOLDER, UNAVAILABLE_REPLY};

/// Text chosen for delivery and whether it came from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplyText {
    Generated(String),
    Fallback,
}

impl ReplyText {
    fn as_str(&self) -> &str {
        match self {
            Self::Generated(text) => text,
            Self::Fallback => UNAVAILABLE_REPLY,
        }
    }
}

/// Runs the generate-then-reply pipeline for a single event. Cloning is
/// cheap; both collaborators are shared behind `Arc`.
#[derive(Clone)]
pub struct ReplyGenerator {
    backend: Arc<dyn TextGenerator>,
    transport: Arc<dyn ReplyTransport>,
}

impl ReplyGenerator {
    #[must_use]
    pub fn new(backend: Arc<dyn TextGenerator>, transport: Arc<dyn ReplyTransport>) -> Self {
        Self { backend, transport }
    }

    /// Processes one event. Every failure is contained here: backend errors
    /// become the fallback reply, delivery errors become `DeliveryFailed`.
    pub async fn generate(&self, event: &InboundEvent) -> DispatchOutcome {
        let Some((reply_token, text)) = event.text_message() else {
            info!(event_type = event.kind(), "Skipping event without reply obligation");
            return DispatchOutcome::Skipped;
        };

        let reply = self.reply_text_for(text).await;

        match self.transport.reply_text(reply_token, reply.as_str()).await {
            Ok(delivery) => match reply {
                ReplyText::Generated(_) => DispatchOutcome::Replied { delivery },
                ReplyText::Fallback => DispatchOutcome::FailedWithFallback { delivery },
            },
            Err(e) => {
                let fallback = matches!(reply, ReplyText::Fallback);
                error!(fallback, "Failed to deliver reply: {}", e);
                DispatchOutcome::DeliveryFailed {
                    error: e.to_string(),
                }
            }
        }
    }

    async fn reply_text_for(&self, prompt: &str) -> ReplyText {
        match self.backend.generate(prompt).await {
            Ok(generated) if generated.text.trim().is_empty() => {
                warn!("Backend returned empty text, using placeholder");
                ReplyText::Generated(EMPTY_REPLY_PLACEHOLDER.to_string())
            }
            Ok(generated) => ReplyText::Generated(generated.text),
            Err(e) => {
                error!("Failed to generate reply: {}", e);
                ReplyText::Fallback
            }
        }
    }
}
