// ABOUTME: Image-search service used by the image resolver stage
// ABOUTME: Defines the ImageSearch trait and an Unsplash photo-search client

use crate::config::Config;
use crate::errors::{Result, SlideshowError};
use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;

/// One image returned by a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHit {
    pub url: String,
    pub description: Option<String>,
}

/// Anything that can look up images for a text query.
pub trait ImageSearch {
    fn search(&self, query: &str) -> Result<Vec<ImageHit>>;
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct SearchResult {
    urls: SearchResultUrls,
    #[serde(default)]
    alt_description: Option<String>,
}

#[derive(Deserialize)]
struct SearchResultUrls {
    regular: String,
}

/// Client for the Unsplash photo search API.
///
/// Always asks for a single landscape result.
pub struct UnsplashClient {
    client: Client,
    endpoint: String,
    access_key: String,
}

impl UnsplashClient {
    pub fn new(config: &Config, access_key: &str) -> Result<Self> {
        let client = Client::builder().timeout(config.image_timeout()).build()?;
        let endpoint = format!("{}/search/photos", config.image_base_url.trim_end_matches('/'));
        url::Url::parse(&endpoint)?;

        Ok(Self {
            client,
            endpoint,
            access_key: access_key.to_string(),
        })
    }

    /// Build a client when an access key is configured
    pub fn from_config(config: &Config) -> Result<Option<Self>> {
        config
            .unsplash_access_key
            .as_deref()
            .map(|key| Self::new(config, key))
            .transpose()
    }
}

impl ImageSearch for UnsplashClient {
    fn search(&self, query: &str) -> Result<Vec<ImageHit>> {
        debug!("Searching images for {:?}", query);

        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("Client-ID {}", self.access_key))
            .query(&[("query", query), ("per_page", "1"), ("orientation", "landscape")])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(SlideshowError::Service {
                service: "Image search",
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let body: SearchResponse = response.json()?;
        Ok(body
            .results
            .into_iter()
            .map(|result| ImageHit {
                url: result.urls.regular,
                description: result.alt_description.filter(|d| !d.trim().is_empty()),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_without_key_is_none() {
        let config = Config::new();
        assert!(UnsplashClient::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn test_search_response_tolerates_missing_description() {
        let body = r#"{"results": [{"urls": {"regular": "https://img/1.jpg"}}]}"#;
        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.results.len(), 1);
        assert!(parsed.results[0].alt_description.is_none());
    }
}
