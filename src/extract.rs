// ABOUTME: Tolerant extraction of JSON objects from free-form model output
// ABOUTME: Tries an ordered list of strategies and stops at the first successful parse

use crate::errors::{Result, SlideshowError};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

const THINK_STRIPPER: &str = r"<think>[\s\S]*</think>\s*";
const LABELED_FENCE: &str = r"```json\s*(\{[\s\S]*?\})\s*```";
const ANY_FENCE: &str = r"```\s*(\{[\s\S]*?\})\s*```";

static THINK_STRIPPER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(THINK_STRIPPER).expect("Failed to compile THINK_STRIPPER regex"));
static LABELED_FENCE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(LABELED_FENCE).expect("Failed to compile LABELED_FENCE regex"));
static ANY_FENCE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(ANY_FENCE).expect("Failed to compile ANY_FENCE regex"));

/// One way of locating a JSON object inside model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// Everything from the first `{` to the last `}`.
    BraceSpan,
    /// The interior of a ```` ```json ```` fenced block.
    LabeledFence,
    /// The interior of any fenced block.
    AnyFence,
    /// The whole trimmed text.
    WholeText,
}

impl ExtractionStrategy {
    /// Strategies in the order they are attempted.
    pub const ORDER: [ExtractionStrategy; 4] = [
        ExtractionStrategy::BraceSpan,
        ExtractionStrategy::LabeledFence,
        ExtractionStrategy::AnyFence,
        ExtractionStrategy::WholeText,
    ];

    /// Candidate substrings this strategy would hand to the JSON parser.
    fn candidates<'a>(&self, text: &'a str) -> Vec<&'a str> {
        match self {
            ExtractionStrategy::BraceSpan => match (text.find('{'), text.rfind('}')) {
                (Some(start), Some(end)) if start < end => vec![&text[start..=end]],
                _ => Vec::new(),
            },
            ExtractionStrategy::LabeledFence => fenced(&LABELED_FENCE_REGEX, text),
            ExtractionStrategy::AnyFence => fenced(&ANY_FENCE_REGEX, text),
            ExtractionStrategy::WholeText => vec![text],
        }
    }

    /// Apply this strategy, returning the first candidate that parses to an object.
    pub fn apply(&self, text: &str) -> Option<Map<String, Value>> {
        self.candidates(text)
            .into_iter()
            .find_map(|candidate| match serde_json::from_str::<Value>(candidate) {
                Ok(Value::Object(object)) => Some(object),
                Ok(_) => None,
                Err(e) => {
                    debug!("{:?} candidate rejected: {}", self, e);
                    None
                }
            })
    }
}

fn fenced<'a>(regex: &Regex, text: &'a str) -> Vec<&'a str> {
    regex
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Remove `<think>...</think>` reasoning preambles emitted by reasoning models.
pub fn strip_reasoning(text: &str) -> String {
    THINK_STRIPPER_REGEX.replace_all(text, "").trim().to_string()
}

/// Extract a JSON object from raw model output.
///
/// Handles bare JSON wrapped in prose and JSON inside labeled or unlabeled
/// fenced code blocks. Never panics; returns `ExtractionFailed` when no
/// strategy yields an object.
pub fn extract_json_object(text: &str) -> Result<Map<String, Value>> {
    let text = text.trim();
    ExtractionStrategy::ORDER
        .iter()
        .find_map(|strategy| strategy.apply(text))
        .ok_or(SlideshowError::ExtractionFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn slides_only() -> Map<String, Value> {
        match json!({"slides": []}) {
            Value::Object(object) => object,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_plain_and_fenced_inputs_agree() {
        let inputs = [
            "{\"slides\": []}",
            "```json\n{\"slides\": []}\n```",
            "```\n{\"slides\": []}\n```",
        ];
        for input in inputs {
            assert_eq!(extract_json_object(input).unwrap(), slides_only(), "{}", input);
        }
    }

    #[test]
    fn test_json_surrounded_by_prose() {
        let text = "Sure! Here is your outline:\n{\"slides\": []}\nLet me know if you need more.";
        assert_eq!(extract_json_object(text).unwrap(), slides_only());
    }

    #[test]
    fn test_prose_without_braces_fails() {
        let result = extract_json_object("I could not produce an outline for that topic.");
        assert!(matches!(result, Err(SlideshowError::ExtractionFailed)));
    }

    #[test]
    fn test_fence_used_when_brace_span_is_broken() {
        // The brace span swallows the trailing "{oops}" and fails to parse,
        // so the labeled fence is used instead.
        let text = "```json\n{\"title\": \"A\"}\n```\nignore {oops}";
        assert_eq!(ExtractionStrategy::BraceSpan.apply(text), None);
        let object = extract_json_object(text).unwrap();
        assert_eq!(object.get("title"), Some(&json!("A")));
    }

    #[test]
    fn test_non_object_json_is_rejected() {
        assert!(extract_json_object("[1, 2, 3]").is_err());
        assert!(extract_json_object("42").is_err());
    }

    #[test]
    fn test_strip_reasoning() {
        let text = "<think>maybe {\"slides\": 1}?</think>\n{\"slides\": []}";
        let stripped = strip_reasoning(text);
        assert_eq!(stripped, "{\"slides\": []}");
        assert_eq!(extract_json_object(&stripped).unwrap(), slides_only());
    }
}
