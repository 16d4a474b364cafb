// ABOUTME: Pipeline state and slide data model for the slideshow-agent application
// ABOUTME: Defines the record threaded through the outline, content, image and render stages

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Largest slideshow a single request may ask for.
pub const MAX_SLIDES: u32 = 70;

/// Template a slide is laid out with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideType {
    Title,
    Content,
    Conclusion,
}

impl SlideType {
    /// Type implied by a slide's 1-based position in a deck of `count` slides.
    pub fn for_position(slide_number: u32, count: u32) -> Self {
        if slide_number == 1 {
            SlideType::Title
        } else if slide_number == count {
            SlideType::Conclusion
        } else {
            SlideType::Content
        }
    }
}

/// Skeletal plan for one slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideOutline {
    pub slide_number: u32,
    pub title: String,
    #[serde(rename = "type")]
    pub slide_type: SlideType,
    pub main_points: Vec<String>,
    pub image_description: String,
    pub speaker_notes: String,
}

/// Fully written content for one slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideContent {
    pub slide_number: u32,
    pub title: String,
    pub content: String,
    pub bullet_points: Vec<String>,
    pub supporting_info: String,
    pub image_description: String,
}

/// Image chosen for one slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub slide_number: u32,
    pub url: String,
    pub alt_text: String,
}

/// Mutable record threaded through every stage of a single generation run.
///
/// Once `error` is set the remaining stages are skipped and the run produces
/// no document.
#[derive(Debug, Clone, Default)]
pub struct PipelineState {
    pub topic: String,
    pub slide_count: u32,
    pub outline: Vec<SlideOutline>,
    pub slides_content: Vec<SlideContent>,
    pub images: Vec<ImageRef>,
    pub html_output: String,
    pub error: Option<String>,
}

impl PipelineState {
    /// Create a fresh state, clamping the slide count to `1..=MAX_SLIDES`.
    pub fn new(topic: &str, slide_count: u32) -> Self {
        Self {
            topic: topic.to_string(),
            slide_count: clamp_slide_count(slide_count),
            ..Self::default()
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Record a hard failure. The first failure wins.
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.error.is_none() {
            self.error = Some(message.into());
        }
    }

    /// Images keyed by slide number, as consumed by the renderer.
    pub fn image_index(&self) -> HashMap<u32, ImageRef> {
        self.images
            .iter()
            .map(|image| (image.slide_number, image.clone()))
            .collect()
    }
}

/// Clamp a requested slide count into the supported range.
pub fn clamp_slide_count(requested: u32) -> u32 {
    requested.clamp(1, MAX_SLIDES)
}
