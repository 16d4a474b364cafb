// ABOUTME: Content expansion stage for the slideshow-agent application
// ABOUTME: Expands each outline entry into full slide content with per-slide fallbacks

use crate::errors::{Result, SlideshowError};
use crate::extract::extract_json_object;
use crate::llm::CompletionService;
use crate::state::{SlideContent, SlideOutline};
use log::{info, warn};
use serde::Deserialize;

const CONTENT_SYSTEM_PROMPT: &str = "You are a content writer. \
Create engaging slide content. Respond ONLY with valid JSON.";

/// Loose shape of a slide as the model writes it.
#[derive(Deserialize, Default)]
#[serde(default)]
struct ContentEntry {
    title: String,
    content: String,
    bullet_points: Vec<String>,
    supporting_info: String,
    image_description: String,
}

fn content_prompt(outline: &SlideOutline) -> String {
    let main_points = serde_json::to_string(&outline.main_points).unwrap_or_default();
    let image_description = if outline.image_description.is_empty() {
        "relevant image"
    } else {
        &outline.image_description
    };

    format!(
        r#"Create content for slide {number}: "{title}"

Main points: {main_points}

Return ONLY this JSON:
{{
    "slide_number": {number},
    "title": "{title}",
    "content": "Detailed content about this topic. Keep it engaging and informative.",
    "bullet_points": ["Expanded point 1", "Expanded point 2", "Expanded point 3"],
    "supporting_info": "Additional context and supporting information",
    "image_description": "{image_description}"
}}"#,
        number = outline.slide_number,
        title = outline.title,
        main_points = main_points,
        image_description = image_description,
    )
}

/// Expand a single outline entry through the model.
///
/// The result always carries the outline's slide number; blank title or image
/// description fields inherit the outline's values. A reply with neither body
/// text nor bullet points is rejected with `MissingField`.
pub fn expand_slide(llm: &dyn CompletionService, outline: &SlideOutline) -> Result<SlideContent> {
    let response = llm.complete(CONTENT_SYSTEM_PROMPT, &content_prompt(outline))?;
    let object = extract_json_object(&response)?;
    let entry: ContentEntry = serde_json::from_value(object.into())?;
    if entry.content.trim().is_empty() && entry.bullet_points.is_empty() {
        return Err(SlideshowError::MissingField("content"));
    }

    Ok(SlideContent {
        slide_number: outline.slide_number,
        title: or_inherited(entry.title, &outline.title),
        content: entry.content,
        bullet_points: entry.bullet_points,
        supporting_info: entry.supporting_info,
        image_description: or_inherited(entry.image_description, &outline.image_description),
    })
}

fn or_inherited(value: String, inherited: &str) -> String {
    if value.trim().is_empty() {
        inherited.to_string()
    } else {
        value
    }
}

/// Content synthesized from the outline when expansion fails.
///
/// Unusable responses get a fuller body than outright service failures.
pub fn fallback_content(outline: &SlideOutline, cause: &SlideshowError) -> SlideContent {
    let unusable_response = matches!(
        cause,
        SlideshowError::ExtractionFailed | SlideshowError::Json(_) | SlideshowError::MissingField(_)
    );

    let (content, supporting_info) = if unusable_response {
        (
            format!(
                "This slide covers important aspects of {}. It provides comprehensive \
                 information and insights that are valuable for understanding the topic.",
                outline.title
            ),
            "Additional context and detailed information to support the main content.".to_string(),
        )
    } else {
        (
            format!("Content for {}", outline.title),
            "Supporting information".to_string(),
        )
    };

    let image_description = if outline.image_description.is_empty() {
        "relevant image".to_string()
    } else {
        outline.image_description.clone()
    };

    SlideContent {
        slide_number: outline.slide_number,
        title: outline.title.clone(),
        content,
        bullet_points: outline.main_points.clone(),
        supporting_info,
        image_description,
    }
}

/// Expand every outline entry, appending to `slides` as each one completes.
///
/// A slide whose expansion fails is replaced by [`fallback_content`] and the
/// batch continues. The batch itself fails only on structural problems with
/// the outline, leaving `slides` holding whatever was completed.
pub fn expand_content(
    llm: &dyn CompletionService,
    outline: &[SlideOutline],
    slides: &mut Vec<SlideContent>,
) -> Result<()> {
    if outline.is_empty() {
        return Err(SlideshowError::Pipeline(
            "No outline available to expand".to_string(),
        ));
    }

    info!("Generating content for {} slides", outline.len());

    for (index, entry) in outline.iter().enumerate() {
        let expected = index as u32 + 1;
        if entry.slide_number != expected {
            return Err(SlideshowError::Pipeline(format!(
                "Outline entry {} is numbered {}",
                expected, entry.slide_number
            )));
        }

        info!("Generating content for slide {}/{}", expected, outline.len());
        let slide = expand_slide(llm, entry).unwrap_or_else(|e| {
            warn!("Error generating content for slide {}: {}", expected, e);
            fallback_content(entry, &e)
        });
        slides.push(slide);
    }

    info!("Generated content for {} slides", slides.len());
    Ok(())
}
