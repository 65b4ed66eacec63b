// src/config.rs
use crate::errors::{GradeError, Result};

/// Configuration for the OpenAI-compatible chat completion endpoint.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_base: String,
    pub api_key: String,
    pub model: String,
}

/// High-level application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai: OpenAIConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// The API key is the only required value; without it no grading request
    /// may ever be issued, so startup refuses to continue.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            GradeError::Config(
                "OpenAI API key not found. Please set OPENAI_API_KEY in your environment or .env file."
                    .to_string(),
            )
        })?;

        let api_base = std::env::var("OPENAI_API_BASE")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());

        Ok(AppConfig {
            openai: OpenAIConfig {
                api_base,
                api_key,
                model,
            },
        })
    }
}
