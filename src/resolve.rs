// ABOUTME: Image resolution stage for the slideshow-agent application
// ABOUTME: Picks one image per slide from search results or a stable placeholder

use crate::images::{ImageHit, ImageSearch};
use crate::state::{ImageRef, SlideContent};
use log::{info, warn};
use std::collections::HashMap;

const DEFAULT_QUERY: &str = "business presentation";
const DEFAULT_ALT_TEXT: &str = "Slide image";

/// Placeholder image for a slide. The same slide number always yields the same URL.
pub fn placeholder_url(base: &str, slide_number: u32) -> String {
    format!("{}?random={}", base, slide_number)
}

/// Resolves images for a run, issuing at most one search per distinct query.
pub struct ImageResolver<'a> {
    search: Option<&'a dyn ImageSearch>,
    placeholder_base: String,
    cache: HashMap<String, Option<ImageHit>>,
}

impl<'a> ImageResolver<'a> {
    pub fn new(search: Option<&'a dyn ImageSearch>, placeholder_base: &str) -> Self {
        Self {
            search,
            placeholder_base: placeholder_base.to_string(),
            cache: HashMap::new(),
        }
    }

    /// Resolve exactly one image for every slide, in order.
    pub fn resolve_all(&mut self, slides: &[SlideContent]) -> Vec<ImageRef> {
        info!("Fetching images for {} slides", slides.len());
        let images: Vec<ImageRef> = slides.iter().map(|slide| self.resolve_one(slide)).collect();
        info!(
            "Fetched {} images ({} distinct searches)",
            images.len(),
            self.cache.len()
        );
        images
    }

    /// Resolve the image for one slide. Never fails.
    pub fn resolve_one(&mut self, slide: &SlideContent) -> ImageRef {
        let description = slide.image_description.trim();

        let hit = match self.search {
            Some(search) => {
                let query = if description.is_empty() {
                    DEFAULT_QUERY
                } else {
                    description
                };
                self.cached_search(search, query, slide.slide_number)
                    .map(|hit| (hit, query))
            }
            None => None,
        };

        match hit {
            Some((hit, query)) => ImageRef {
                slide_number: slide.slide_number,
                url: hit.url,
                alt_text: hit.description.unwrap_or_else(|| query.to_string()),
            },
            None => ImageRef {
                slide_number: slide.slide_number,
                url: placeholder_url(&self.placeholder_base, slide.slide_number),
                alt_text: if description.is_empty() {
                    DEFAULT_ALT_TEXT.to_string()
                } else {
                    description.to_string()
                },
            },
        }
    }

    fn cached_search(
        &mut self,
        search: &dyn ImageSearch,
        query: &str,
        slide_number: u32,
    ) -> Option<ImageHit> {
        if let Some(cached) = self.cache.get(query) {
            return cached.clone();
        }

        let outcome = match search.search(query) {
            Ok(hits) => {
                let hit = hits
                    .into_iter()
                    .find(|hit| url::Url::parse(&hit.url).is_ok());
                if hit.is_none() {
                    warn!("No usable image found for slide {}, using placeholder", slide_number);
                }
                hit
            }
            Err(e) => {
                warn!("Error fetching image for slide {}: {}", slide_number, e);
                None
            }
        };

        self.cache.insert(query.to_string(), outcome.clone());
        outcome
    }
}
