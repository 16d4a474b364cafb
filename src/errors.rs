// ABOUTME: Error types for the slideshow-agent application
// ABOUTME: Provides structured error handling for each stage of the pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlideshowError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{service} returned HTTP {status}: {body}")]
    Service {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("Model returned an empty completion")]
    EmptyCompletion,

    #[error("No JSON object could be extracted from the model response")]
    ExtractionFailed,

    #[error("Response is missing required field: {0}")]
    MissingField(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input validation error: {0}")]
    Validation(String),

    #[error("Pipeline error: {0}")]
    Pipeline(String),

    #[error("Preview server error: {0}")]
    Serve(String),
}

impl From<url::ParseError> for SlideshowError {
    fn from(err: url::ParseError) -> Self {
        SlideshowError::Config(format!("Invalid URL: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, SlideshowError>;
