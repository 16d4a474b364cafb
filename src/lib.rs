// ABOUTME: Library module for the slideshow-agent program.
// ABOUTME: Contains the outline, content, image and render stages and their service clients.

// Reexport modules
pub mod config;
pub mod content;
pub mod errors;
pub mod extract;
pub mod html;
pub mod images;
pub mod llm;
pub mod outline;
pub mod pipeline;
pub mod resolve;
pub mod resources;
pub mod serve;
pub mod state;
pub mod utils;

// Reexport common types and functions
pub use config::Config;
pub use content::{expand_content, expand_slide, fallback_content};
pub use errors::{Result, SlideshowError};
pub use extract::{extract_json_object, ExtractionStrategy};
pub use html::render;
pub use images::{ImageHit, ImageSearch, UnsplashClient};
pub use llm::{CompletionService, GroqClient};
pub use outline::{fallback_outline, generate_outline};
pub use pipeline::{SlideshowAgent, Stage};
pub use resolve::{placeholder_url, ImageResolver};
pub use state::{ImageRef, PipelineState, SlideContent, SlideOutline, SlideType, MAX_SLIDES};
pub use utils::{default_output_path, write_html_to_file};
