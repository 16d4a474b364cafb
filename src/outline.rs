// ABOUTME: Outline generation stage for the slideshow-agent application
// ABOUTME: Asks the LLM for a slide plan and falls back to a synthesized outline

use crate::errors::{Result, SlideshowError};
use crate::extract::extract_json_object;
use crate::llm::CompletionService;
use crate::state::{SlideOutline, SlideType};
use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;

const OUTLINE_SYSTEM_PROMPT: &str = "You are an expert presentation designer. \
Create detailed slideshow outlines. Respond ONLY with valid JSON.";

/// Loose shape of one outline entry as the model writes it.
#[derive(Deserialize, Default)]
#[serde(default)]
struct OutlineEntry {
    title: String,
    main_points: Vec<String>,
    image_description: String,
    speaker_notes: String,
}

fn outline_prompt(topic: &str, slide_count: u32) -> String {
    format!(
        r#"Create an outline for a {count}-slide presentation about "{topic}".

Return ONLY this JSON format:
{{
    "slides": [
        {{
            "slide_number": 1,
            "title": "Introduction to {topic}",
            "type": "title",
            "main_points": ["Welcome", "Overview", "Goals"],
            "image_description": "professional presentation background",
            "speaker_notes": "Introduction slide"
        }},
        {{
            "slide_number": 2,
            "title": "Key Concepts",
            "type": "content",
            "main_points": ["Point 1", "Point 2", "Point 3"],
            "image_description": "relevant illustration",
            "speaker_notes": "Main content"
        }}
    ]
}}"#,
        count = slide_count,
        topic = topic
    )
}

/// Produce an outline of exactly `slide_count` slides.
///
/// Never fails: any service, extraction or shape problem yields
/// [`fallback_outline`].
pub fn generate_outline(
    llm: &dyn CompletionService,
    topic: &str,
    slide_count: u32,
) -> Vec<SlideOutline> {
    info!("Creating outline for: {} ({} slides)", topic, slide_count);

    match request_outline(llm, topic, slide_count) {
        Ok(outline) => {
            info!("Outline created with {} slides", outline.len());
            outline
        }
        Err(e) => {
            warn!("Outline generation failed ({}), creating fallback outline", e);
            fallback_outline(topic, slide_count)
        }
    }
}

fn request_outline(
    llm: &dyn CompletionService,
    topic: &str,
    slide_count: u32,
) -> Result<Vec<SlideOutline>> {
    let response = llm.complete(OUTLINE_SYSTEM_PROMPT, &outline_prompt(topic, slide_count))?;
    let object = extract_json_object(&response)?;
    let slides = object
        .get("slides")
        .cloned()
        .ok_or(SlideshowError::MissingField("slides"))?;
    let entries: Vec<Value> = serde_json::from_value(slides)?;
    if entries.is_empty() {
        return Err(SlideshowError::MissingField("slides"));
    }

    let entries = entries
        .into_iter()
        .map(serde_json::from_value::<OutlineEntry>)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(normalize_outline(entries, topic, slide_count))
}

/// Fit model-provided entries to `slide_count` positions.
///
/// Extra entries are dropped, missing ones come from the fallback outline, and
/// every slide is renumbered and retyped by position.
fn normalize_outline(entries: Vec<OutlineEntry>, topic: &str, slide_count: u32) -> Vec<SlideOutline> {
    let mut fallback = fallback_outline(topic, slide_count).into_iter();
    let mut entries = entries.into_iter();

    (1..=slide_count)
        .filter_map(|slide_number| {
            let synthesized = fallback.next()?;
            let outline = match entries.next() {
                Some(entry) => SlideOutline {
                    slide_number,
                    title: non_empty_or(entry.title, &synthesized.title),
                    slide_type: SlideType::for_position(slide_number, slide_count),
                    main_points: if entry.main_points.is_empty() {
                        synthesized.main_points
                    } else {
                        entry.main_points
                    },
                    image_description: non_empty_or(
                        entry.image_description,
                        &synthesized.image_description,
                    ),
                    speaker_notes: entry.speaker_notes,
                },
                None => synthesized,
            };
            Some(outline)
        })
        .collect()
}

fn non_empty_or(value: String, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value
    }
}

/// Deterministic outline used whenever the model cannot supply one.
pub fn fallback_outline(topic: &str, slide_count: u32) -> Vec<SlideOutline> {
    let mut slides = Vec::with_capacity(slide_count as usize);

    if slide_count == 0 {
        return slides;
    }

    slides.push(SlideOutline {
        slide_number: 1,
        title: format!("Introduction to {}", topic),
        slide_type: SlideType::Title,
        main_points: strings(&["Welcome", "Overview", "Agenda"]),
        image_description: "professional presentation background".to_string(),
        speaker_notes: "Introduction slide".to_string(),
    });

    for slide_number in 2..slide_count {
        slides.push(SlideOutline {
            slide_number,
            title: format!("{} - Part {}", topic, slide_number - 1),
            slide_type: SlideType::Content,
            main_points: (1..=3).map(|j| format!("Key point {}", j)).collect(),
            image_description: format!("illustration related to {}", topic),
            speaker_notes: format!("Content slide {}", slide_number),
        });
    }

    if slide_count > 1 {
        slides.push(SlideOutline {
            slide_number: slide_count,
            title: "Conclusion".to_string(),
            slide_type: SlideType::Conclusion,
            main_points: strings(&["Summary", "Key takeaways", "Thank you"]),
            image_description: "conclusion or thank you image".to_string(),
            speaker_notes: "Conclusion slide".to_string(),
        });
    }

    slides
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MAX_SLIDES;

    struct Reply(&'static str);

    impl CompletionService for Reply {
        fn complete(&self, _system: &str, _prompt: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct Down;

    impl CompletionService for Down {
        fn complete(&self, _system: &str, _prompt: &str) -> Result<String> {
            Err(SlideshowError::EmptyCompletion)
        }
    }

    #[test]
    fn test_fallback_numbering_and_types_for_every_count() {
        for count in 1..=MAX_SLIDES {
            let outline = fallback_outline("Rust", count);
            assert_eq!(outline.len(), count as usize);
            for (index, slide) in outline.iter().enumerate() {
                let number = index as u32 + 1;
                assert_eq!(slide.slide_number, number);
                assert_eq!(slide.slide_type, SlideType::for_position(number, count));
            }
            assert_eq!(outline[0].slide_type, SlideType::Title);
            if count > 1 {
                assert_eq!(outline[count as usize - 1].slide_type, SlideType::Conclusion);
            }
        }
    }

    #[test]
    fn test_fallback_titles() {
        let outline = fallback_outline("Testing", 4);
        assert_eq!(outline[0].title, "Introduction to Testing");
        assert_eq!(outline[1].title, "Testing - Part 1");
        assert_eq!(outline[2].title, "Testing - Part 2");
        assert_eq!(outline[3].title, "Conclusion");
        assert_eq!(outline[1].main_points.len(), 3);
    }

    #[test]
    fn test_service_failure_uses_fallback() {
        assert_eq!(generate_outline(&Down, "Go", 3), fallback_outline("Go", 3));
    }

    #[test]
    fn test_missing_slides_field_uses_fallback() {
        let llm = Reply(r#"{"outline": []}"#);
        assert_eq!(generate_outline(&llm, "Go", 2), fallback_outline("Go", 2));
    }

    #[test]
    fn test_model_outline_is_fitted_to_count() {
        let llm = Reply(
            r#"Here you go:
```json
{"slides": [
  {"slide_number": 7, "title": "Hello Go", "type": "content", "main_points": ["a", "b"]},
  {"slide_number": 9, "title": "Goroutines", "type": "title", "main_points": []}
]}
```"#,
        );
        let outline = generate_outline(&llm, "Go", 3);
        assert_eq!(outline.len(), 3);
        assert_eq!(outline[0].title, "Hello Go");
        assert_eq!(outline[0].slide_type, SlideType::Title);
        assert_eq!(outline[1].slide_number, 2);
        assert_eq!(outline[1].slide_type, SlideType::Content);
        assert_eq!(outline[1].main_points.len(), 3);
        assert_eq!(outline[2].title, "Conclusion");
        assert_eq!(outline[2].slide_type, SlideType::Conclusion);
    }
}
