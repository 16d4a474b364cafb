// ABOUTME: Text-completion service used by the outline and content stages
// ABOUTME: Defines the CompletionService trait and a Groq chat-completions client

use crate::config::Config;
use crate::errors::{Result, SlideshowError};
use crate::extract::strip_reasoning;
use log::{debug, info};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

/// Anything that can turn a system instruction and a user prompt into text.
pub trait CompletionService {
    fn complete(&self, system: &str, prompt: &str) -> Result<String>;
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for Groq's OpenAI-compatible chat completions endpoint.
///
/// Each call is a single blocking attempt bounded by the configured timeout.
pub struct GroqClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GroqClient {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.require_groq_api_key()?.to_string();
        let client = Client::builder().timeout(config.llm_timeout()).build()?;
        let endpoint = format!("{}/chat/completions", config.llm_base_url.trim_end_matches('/'));
        url::Url::parse(&endpoint)?;

        Ok(Self {
            client,
            endpoint,
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

impl CompletionService for GroqClient {
    fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(SlideshowError::Service {
                service: "LLM",
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let body: ChatResponse = response.json()?;
        let raw = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(SlideshowError::EmptyCompletion)?;

        info!("Completion received: {} chars", raw.len());
        debug!("Raw response: {}...", preview(&raw, 500));

        let text = strip_reasoning(&raw);
        if text.is_empty() {
            return Err(SlideshowError::EmptyCompletion);
        }
        Ok(text)
    }
}

/// First `max_chars` characters of `text`, respecting char boundaries.
pub(crate) fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
