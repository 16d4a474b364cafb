// ABOUTME: Generation pipeline for the slideshow-agent application
// ABOUTME: Runs the outline, content, image and render stages in sequence over one state

use crate::config::Config;
use crate::content::expand_content;
use crate::errors::{Result, SlideshowError};
use crate::html::render;
use crate::images::{ImageSearch, UnsplashClient};
use crate::llm::{CompletionService, GroqClient};
use crate::outline::generate_outline;
use crate::resolve::ImageResolver;
use crate::state::PipelineState;
use log::{error, info};

/// The four stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Outline,
    Content,
    Images,
    Render,
}

impl Stage {
    pub const ORDER: [Stage; 4] = [Stage::Outline, Stage::Content, Stage::Images, Stage::Render];
}

/// Drives one slideshow generation at a time against the configured services.
pub struct SlideshowAgent {
    llm: Box<dyn CompletionService>,
    images: Option<Box<dyn ImageSearch>>,
    placeholder_base: String,
}

impl SlideshowAgent {
    pub fn new(
        llm: Box<dyn CompletionService>,
        images: Option<Box<dyn ImageSearch>>,
        placeholder_base: &str,
    ) -> Self {
        Self {
            llm,
            images,
            placeholder_base: placeholder_base.to_string(),
        }
    }

    /// Build an agent backed by Groq and, when a key is configured, Unsplash.
    pub fn from_config(config: &Config) -> Result<Self> {
        let llm = GroqClient::new(config)?;
        let images = UnsplashClient::from_config(config)?
            .map(|client| Box::new(client) as Box<dyn ImageSearch>);
        if images.is_none() {
            info!("No image-search key configured, using placeholder images");
        }
        Ok(Self::new(Box::new(llm), images, &config.placeholder_base))
    }

    /// Run every stage over `state`. Stages after a hard failure are skipped.
    pub fn run(&self, state: &mut PipelineState) {
        for stage in Stage::ORDER {
            if let Some(reason) = &state.error {
                info!("Skipping {:?} stage: {}", stage, reason);
                continue;
            }
            self.run_stage(stage, state);
        }
    }

    /// Execute a single stage against `state`.
    pub fn run_stage(&self, stage: Stage, state: &mut PipelineState) {
        match stage {
            Stage::Outline => {
                state.outline = generate_outline(self.llm.as_ref(), &state.topic, state.slide_count);
            }
            Stage::Content => {
                state.slides_content.clear();
                if let Err(e) =
                    expand_content(self.llm.as_ref(), &state.outline, &mut state.slides_content)
                {
                    error!("Error generating content: {}", e);
                    state.fail(format!("Error generating content: {}", e));
                } else if state.slides_content.is_empty() {
                    state.fail("No slides content available");
                }
            }
            Stage::Images => {
                let mut resolver = ImageResolver::new(self.images.as_deref(), &self.placeholder_base);
                state.images = resolver.resolve_all(&state.slides_content);
            }
            Stage::Render => {
                if state.slides_content.is_empty() {
                    state.fail("No slides content available");
                    return;
                }
                state.html_output = render(&state.topic, &state.slides_content, &state.image_index());
            }
        }
    }

    /// Run a full generation and return the finished state.
    ///
    /// Fails when the topic is blank, when any stage recorded a hard failure,
    /// or when no document was produced.
    pub fn generate_state(&self, topic: &str, slide_count: u32) -> Result<PipelineState> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(SlideshowError::Validation("Topic must not be empty".to_string()));
        }

        let mut state = PipelineState::new(topic, slide_count);
        info!(
            "Creating slideshow: '{}' with {} slides",
            state.topic, state.slide_count
        );

        self.run(&mut state);
        info!("Workflow completed");

        if let Some(reason) = state.error.take() {
            return Err(SlideshowError::Pipeline(reason));
        }
        if state.html_output.is_empty() {
            return Err(SlideshowError::Pipeline("No HTML output generated".to_string()));
        }
        Ok(state)
    }

    /// Generate a slideshow for `topic` and return the HTML document.
    pub fn generate(&self, topic: &str, slide_count: u32) -> Result<String> {
        self.generate_state(topic, slide_count)
            .map(|state| state.html_output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SlideOutline;

    struct Offline;

    impl CompletionService for Offline {
        fn complete(&self, _system: &str, _prompt: &str) -> Result<String> {
            Err(SlideshowError::EmptyCompletion)
        }
    }

    fn agent() -> SlideshowAgent {
        SlideshowAgent::new(Box::new(Offline), None, "https://picsum.photos/800/600")
    }

    #[test]
    fn test_error_short_circuits_later_stages() {
        let mut state = PipelineState::new("Rust", 3);
        state.fail("earlier failure");
        agent().run(&mut state);

        assert!(state.outline.is_empty());
        assert!(state.images.is_empty());
        assert!(state.html_output.is_empty());
        assert_eq!(state.error.as_deref(), Some("earlier failure"));
    }

    #[test]
    fn test_content_failure_stops_render() {
        let agent = agent();
        let mut state = PipelineState::new("Rust", 3);
        state.outline = Vec::<SlideOutline>::new();
        for stage in [Stage::Content, Stage::Images, Stage::Render] {
            if !state.is_failed() {
                agent.run_stage(stage, &mut state);
            }
        }
        assert!(state.is_failed());
        assert!(state.html_output.is_empty());
    }

    #[test]
    fn test_generate_rejects_blank_topic() {
        assert!(matches!(
            agent().generate("   ", 3),
            Err(SlideshowError::Validation(_))
        ));
    }

    #[test]
    fn test_generate_offline_succeeds_with_fallbacks() {
        let html = agent().generate("Rust", 2).unwrap();
        assert!(html.contains("Introduction to Rust"));
        assert!(html.contains("https://picsum.photos/800/600?random=2"));
    }
}
