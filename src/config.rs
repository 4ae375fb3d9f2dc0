use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Application configuration loaded from environment variables.
///
/// `openai_api_key` and `country` stay optional here: when absent they are
/// collected interactively instead of failing startup.
#[derive(Debug, Clone)]
pub struct Config {
    // LLM
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub model_name: String,
    pub image_model_name: String,

    // Generation inputs
    pub country: Option<String>,
    pub prompts_dir: PathBuf,
    pub user_prompt_path: PathBuf,

    // Outputs
    pub output_dir: PathBuf,
    pub pictures_dir: String,

    // PDF export
    pub chrome_path: Option<String>,
    pub pdf_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // LLM
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openai_base_url: env_or_default("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            model_name: env_or_default("MODEL_NAME", "gpt-4.1"),
            image_model_name: env_or_default("IMAGE_MODEL_NAME", "gpt-image-1"),

            // Generation inputs
            country: optional_env("COUNTRY"),
            prompts_dir: PathBuf::from(env_or_default("PROMPTS_DIR", "./prompts")),
            user_prompt_path: PathBuf::from(env_or_default("USER_PROMPT_PATH", "./user_input.txt")),

            // Outputs
            output_dir: PathBuf::from(env_or_default("OUTPUT_DIR", "./output")),
            pictures_dir: env_or_default("PICTURES_DIR", "pictures"),

            // PDF export
            chrome_path: optional_env("CHROME_PATH"),
            pdf_timeout: Duration::from_secs(parse_env_u64("PDF_TIMEOUT_SECS", 30)?),
        })
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.openai_base_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "OPENAI_BASE_URL".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.model_name.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "MODEL_NAME".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.pdf_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "PDF_TIMEOUT_SECS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}
