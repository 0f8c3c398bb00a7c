//! LLM (Gemini) API client module
//!
//! Encapsulates the `generateContent` call used to answer user messages.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::core::models::GeneratedReply;
use crate::errors::BotError;
use crate::persona::PersonaConfig;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Language backend used by the reply pipeline.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Produces a completion for a single user message.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot produce a completion.
    async fn generate(&self, prompt: &str) -> Result<GeneratedReply, BotError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

fn build_request<'a>(prompt: &'a str, persona: &'a PersonaConfig) -> GenerateContentRequest<'a> {
    GenerateContentRequest {
        contents: vec![RequestContent {
            role: Some("user"),
            parts: vec![RequestPart { text: prompt }],
        }],
        system_instruction: persona.instruction().map(|text| RequestContent {
            role: None,
            parts: vec![RequestPart { text }],
        }),
    }
}

/// Joins the text parts of the first candidate. An answer with no text is
/// returned as an empty string; a blocked prompt is an error.
fn extract_text(response: GenerateContentResponse) -> Result<String, BotError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates returned".to_string());
        return Err(BotError::GeminiError(format!("Prompt not answered: {reason}")));
    };

    if let Some(reason) = candidate.finish_reason.as_deref() {
        debug!(finish_reason = %reason, "Gemini candidate finished");
    }

    let text = candidate
        .content
        .map(|c| {
            c.parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    Ok(text)
}

/// Gemini API client. Built once per process and shared read-only by every
/// concurrent reply; each call is an independent single-turn request.
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model_name: String,
    base_url: String,
    persona: PersonaConfig,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(
        api_key: String,
        model_name: String,
        base_url: String,
        persona: PersonaConfig,
    ) -> Result<Self, BotError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| {
                BotError::HttpError(format!("Failed to build Gemini HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            api_key,
            model_name,
            base_url: base_url.trim_end_matches('/').to_string(),
            persona,
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<GeneratedReply, BotError> {
        #[cfg(feature = "debug-logs")]
        info!("Using Gemini prompt:\n{}", prompt);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            model = %self.model_name,
            prompt_chars = prompt.chars().count(),
            "Generating reply"
        );

        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model_name
        );

        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&build_request(prompt, &self.persona))
            .send()
            .await
            .map_err(|e| BotError::HttpError(format!("Gemini API request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(BotError::GeminiError(format!(
                "Gemini API error (status {status}): {error_text}"
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| BotError::GeminiError(format!("Failed to parse Gemini response: {e}")))?;

        let text = extract_text(parsed)?;
        Ok(GeneratedReply { text })
    }
}
