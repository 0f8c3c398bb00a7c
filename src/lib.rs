//! linebot - a LINE chatbot that answers user messages with Gemini.
//!
//! Each Lambda invocation receives one webhook batch from the LINE platform,
//! asks Gemini for a reply to every text message in it, and sends the replies
//! back through the Messaging API.
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda (behind API Gateway) for serverless execution
//! - reqwest for the LINE Messaging API and the Gemini API
//! - Tokio for async runtime; one task per webhook event
//!
//! # Example
//!
//! ```no_run
//! use linebot::core::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     linebot::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let dispatcher = linebot::build_dispatcher(&config)?;
//!
//!     let body = r#"{"events":[{"type":"message","replyToken":"R1",
//!         "message":{"type":"text","id":"1","text":"hello"}}]}"#;
//!     let response = dispatcher.dispatch_body(body).await;
//!     println!("{}", serde_json::to_string(&response)?);
//!
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod ai;
pub mod api;
pub mod core;
pub mod dispatch;
pub mod errors;
pub mod line;
pub mod persona;

use std::sync::Arc;

use crate::ai::GeminiClient;
use crate::core::config::AppConfig;
use crate::dispatch::{Dispatcher, ReplyGenerator};
use crate::errors::BotError;
use crate::line::LineClient;
use crate::persona::PersonaConfig;

/// Builds the process-wide dispatcher from configuration.
///
/// Call once at startup; the returned value is immutable and shared by every
/// invocation the process serves.
///
/// # Errors
///
/// Returns an error if either HTTP client cannot be constructed.
pub fn build_dispatcher(config: &AppConfig) -> Result<Dispatcher, BotError> {
    let persona = PersonaConfig::from_override(config.system_instruction.as_deref());
    let backend = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        config.gemini_api_base_url.clone(),
        persona,
    )?;
    let transport = LineClient::new(
        config.channel_access_token.clone(),
        config.line_api_base_url.clone(),
    )?;

    Ok(Dispatcher::new(ReplyGenerator::new(
        Arc::new(backend),
        Arc::new(transport),
    )))
}

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// The level defaults to `info` and can be overridden with `RUST_LOG`.
/// Calling it more than once is harmless.
///
/// # Example
///
/// ```
/// linebot::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
