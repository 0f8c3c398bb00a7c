use std::env;

use url::Url;

use crate::errors::BotError;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_LINE_API_BASE_URL: &str = "https://api.line.me";
pub const DEFAULT_GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub channel_access_token: String,
    pub channel_secret: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    /// `None` keeps the bundled persona, `Some("")` disables it.
    pub system_instruction: Option<String>,
    pub line_api_base_url: String,
    pub gemini_api_base_url: String,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns `BotError::ConfigError` if a required variable is missing or empty,
    /// or if an endpoint override is not a valid URL.
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves the configuration against an arbitrary lookup.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| BotError::ConfigError(format!("{key} is not set")))
        };

        let base_url = |key: &str, default: &str| -> Result<String, BotError> {
            match lookup(key).filter(|v| !v.is_empty()) {
                Some(raw) => {
                    Url::parse(&raw).map_err(|e| BotError::ConfigError(format!("{key}: {e}")))?;
                    Ok(raw.trim_end_matches('/').to_string())
                }
                None => Ok(default.to_string()),
            }
        };

        Ok(Self {
            channel_access_token: required("CHANNEL_ACCESS_TOKEN")?,
            channel_secret: required("CHANNEL_SECRET")?,
            gemini_api_key: required("GEMINI_API_KEY")?,
            gemini_model: lookup("GEMINI_MODEL")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            system_instruction: lookup("SYSTEM_INSTRUCTION"),
            line_api_base_url: base_url("LINE_API_BASE_URL", DEFAULT_LINE_API_BASE_URL)?,
            gemini_api_base_url: base_url("GEMINI_API_BASE_URL", DEFAULT_GEMINI_API_BASE_URL)?,
        })
    }
}
