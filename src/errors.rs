use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Missing or invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to parse webhook payload: {0}")]
    ParseError(String),

    #[error("Failed to access LINE Messaging API: {0}")]
    LineApiError(String),

    #[error("Failed to access Gemini API: {0}")]
    GeminiError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),
}

impl From<reqwest::Error> for BotError {
    fn from(error: reqwest::Error) -> Self {
        BotError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for BotError {
    fn from(error: serde_json::Error) -> Self {
        BotError::ParseError(error.to_string())
    }
}
