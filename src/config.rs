// ABOUTME: Configuration module for the slideshow-agent application
// ABOUTME: Provides service endpoints, credentials and model settings from the environment

use crate::errors::{Result, SlideshowError};
use std::env;
use std::time::Duration;

pub const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "deepseek-r1-distill-llama-70b";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://api.unsplash.com";
pub const DEFAULT_PLACEHOLDER_BASE: &str = "https://picsum.photos/800/600";

/// Global configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: Option<String>,
    pub llm_base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub llm_timeout_secs: u64,
    pub unsplash_access_key: Option<String>,
    pub image_base_url: String,
    pub image_timeout_secs: u64,
    pub placeholder_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            groq_api_key: None,
            llm_base_url: DEFAULT_LLM_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 4000,
            llm_timeout_secs: 120, // 2 minutes
            unsplash_access_key: None,
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            image_timeout_secs: 10,
            placeholder_base: DEFAULT_PLACEHOLDER_BASE.to_string(),
        }
    }
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            groq_api_key: non_empty_var("GROQ_API_KEY"),
            llm_base_url: non_empty_var("GROQ_API_BASE").unwrap_or(defaults.llm_base_url),
            model: non_empty_var("GROQ_MODEL").unwrap_or(defaults.model),
            temperature: parsed_var("LLM_TEMPERATURE").unwrap_or(defaults.temperature),
            max_tokens: parsed_var("LLM_MAX_TOKENS").unwrap_or(defaults.max_tokens),
            llm_timeout_secs: parsed_var("LLM_TIMEOUT_SECS").unwrap_or(defaults.llm_timeout_secs),
            unsplash_access_key: non_empty_var("UNSPLASH_ACCESS_KEY"),
            image_base_url: non_empty_var("UNSPLASH_API_BASE").unwrap_or(defaults.image_base_url),
            image_timeout_secs: parsed_var("IMAGE_TIMEOUT_SECS")
                .unwrap_or(defaults.image_timeout_secs),
            placeholder_base: non_empty_var("PLACEHOLDER_IMAGE_BASE")
                .unwrap_or(defaults.placeholder_base),
        }
    }

    /// Apply command-line overrides on top of this configuration
    pub fn with_overrides(mut self, model: Option<String>, temperature: Option<f32>) -> Self {
        if let Some(model) = model {
            self.model = model;
        }
        if let Some(temperature) = temperature {
            self.temperature = temperature;
        }
        self
    }

    /// The LLM credential, which is mandatory for a generation run
    pub fn require_groq_api_key(&self) -> Result<&str> {
        self.groq_api_key.as_deref().ok_or_else(|| {
            SlideshowError::Config(
                "GROQ_API_KEY is not set. Get one from https://console.groq.com/".to_string(),
            )
        })
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_secs)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.trim().parse::<T>().ok())
}
