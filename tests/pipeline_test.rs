use slideshow_agent::{
    fallback_outline, placeholder_url, render, Config, ImageHit, ImageSearch, PipelineState,
    Result, SlideType, SlideshowAgent, SlideshowError,
};
use std::collections::HashMap;
use std::net::TcpListener;

/// Base URL on which nothing is listening.
fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Failed to read probe address");
    drop(listener);
    format!("http://{}", addr)
}

struct FixedImage;

impl ImageSearch for FixedImage {
    fn search(&self, query: &str) -> Result<Vec<ImageHit>> {
        Ok(vec![ImageHit {
            url: format!("https://images.example.com/{}.jpg", query.replace(' ', "-")),
            description: None,
        }])
    }
}

struct NeverCalled;

impl slideshow_agent::CompletionService for NeverCalled {
    fn complete(&self, _system: &str, _prompt: &str) -> Result<String> {
        Err(SlideshowError::Pipeline("model must not be called".to_string()))
    }
}

#[test]
fn test_unreachable_llm_falls_back_end_to_end() {
    let _ = env_logger::builder().is_test(true).try_init();

    let config = Config {
        groq_api_key: Some("test-key".to_string()),
        llm_base_url: closed_endpoint(),
        llm_timeout_secs: 5,
        ..Config::default()
    };
    let agent = SlideshowAgent::from_config(&config).expect("agent should build");

    let html = agent.generate("Testing", 3).expect("fallbacks should produce a document");

    assert_eq!(html.matches("data-slide=\"").count(), 3);
    assert!(html.contains("Introduction to Testing"));
    assert!(html.contains("<h2>Conclusion</h2>"));
    for n in 1..=3 {
        assert!(html.contains(&placeholder_url(&config.placeholder_base, n)));
    }
}

#[test]
fn test_search_images_flow_into_document() {
    let agent = SlideshowAgent::new(
        Box::new(NeverCalled),
        Some(Box::new(FixedImage)),
        "https://picsum.photos/800/600",
    );

    let html = agent.generate("Ocean Life", 3).unwrap();

    // Fallback outline image descriptions become search queries.
    assert!(html.contains("https://images.example.com/professional-presentation-background.jpg"));
    assert!(html.contains("https://images.example.com/illustration-related-to-Ocean-Life.jpg"));
    assert!(html.contains("alt=\"conclusion or thank you image\""));
    assert!(!html.contains("picsum.photos/800/600?random="));
}

#[test]
fn test_manual_stage_run_matches_invariants() {
    let agent = SlideshowAgent::new(Box::new(NeverCalled), None, "https://picsum.photos/800/600");
    let mut state = PipelineState::new("Invariants", 5);
    agent.run(&mut state);

    assert!(state.error.is_none());
    assert_eq!(state.outline.len(), 5);
    assert_eq!(state.slides_content.len(), 5);
    assert_eq!(state.images.len(), 5);
    for (index, slide) in state.slides_content.iter().enumerate() {
        assert_eq!(slide.slide_number, index as u32 + 1);
        assert_eq!(state.images[index].slide_number, slide.slide_number);
    }
    assert_eq!(state.outline[0].slide_type, SlideType::Title);
    assert_eq!(state.outline[4].slide_type, SlideType::Conclusion);
    assert!(state.outline[1..4]
        .iter()
        .all(|slide| slide.slide_type == SlideType::Content));
}

#[test]
fn test_render_is_pure() {
    let outline = fallback_outline("Pure", 2);
    let slides: Vec<_> = outline
        .iter()
        .map(|entry| slideshow_agent::fallback_content(entry, &SlideshowError::ExtractionFailed))
        .collect();
    let images = HashMap::new();

    assert_eq!(render("Pure", &slides, &images), render("Pure", &slides, &images));
}
