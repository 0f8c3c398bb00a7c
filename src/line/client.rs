//! LINE Messaging API client module
//!
//! Sends reply messages against a webhook event's reply token.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};

use crate::core::models::DeliveryResult;
use crate::errors::BotError;
use crate::persona::clamp_reply_text;

const REPLY_PATH: &str = "/v2/bot/message/reply";
const REQUEST_ID_HEADER: &str = "x-line-request-id";

/// Outbound side of the reply pipeline.
#[async_trait]
pub trait ReplyTransport: Send + Sync {
    /// Sends one text message in reply to `reply_token`.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform rejects the reply or the request fails.
    async fn reply_text(&self, reply_token: &str, text: &str)
    -> Result<DeliveryResult, BotError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    reply_token: &'a str,
    messages: Vec<TextMessage>,
}

#[derive(Debug, Serialize)]
struct TextMessage {
    r#type: &'static str,
    text: String,
}

/// Build the request body for `POST /v2/bot/message/reply`.
#[must_use]
fn build_reply_request<'a>(reply_token: &'a str, text: &str) -> ReplyRequest<'a> {
    ReplyRequest {
        reply_token,
        messages: vec![TextMessage {
            r#type: "text",
            text: clamp_reply_text(text),
        }],
    }
}

/// LINE Messaging API client
pub struct LineClient {
    http: Client,
    channel_access_token: String,
    base_url: String,
}

impl LineClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(channel_access_token: String, base_url: String) -> Result<Self, BotError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| BotError::HttpError(format!("Failed to build LINE HTTP client: {e}")))?;

        Ok(Self {
            http,
            channel_access_token,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ReplyTransport for LineClient {
    async fn reply_text(
        &self,
        reply_token: &str,
        text: &str,
    ) -> Result<DeliveryResult, BotError> {
        let url = format!("{}{REPLY_PATH}", self.base_url);
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.channel_access_token)
            .json(&build_reply_request(reply_token, text))
            .send()
            .await
            .map_err(|e| BotError::HttpError(format!("LINE reply request failed: {e}")))?;

        let status = response.status();
        let request_id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            warn!(
                status = %status,
                request_id = request_id.as_deref().unwrap_or(""),
                "LINE rejected reply"
            );
            return Err(BotError::LineApiError(format!(
                "reply failed (status {status}): {error_text}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| BotError::LineApiError(format!("Failed to read reply response: {e}")))?;

        // The endpoint answers `{}` on older API versions.
        let mut delivery: DeliveryResult = if body.trim().is_empty() {
            DeliveryResult::default()
        } else {
            serde_json::from_str(&body).map_err(|e| {
                BotError::LineApiError(format!("Failed to parse reply response: {e}"))
            })?
        };
        delivery.request_id = request_id;

        info!(
            request_id = delivery.request_id.as_deref().unwrap_or(""),
            sent = delivery.sent_messages.len(),
            "Reply delivered"
        );

        Ok(delivery)
    }
}
