//! All LINE-specific functionality

pub mod client;
pub mod events;

// Re-export main types for convenience
pub use client::{LineClient, ReplyTransport};
pub use events::{InboundEvent, MessageContent, WebhookBody, parse_webhook_body};
