//! Unsplash photo search provider.
//!
//! Calls `GET /search/photos` and validates each photo record before it
//! becomes a `ResultItem`. Records without an id or a small thumbnail are
//! dropped; nullable text fields collapse to empty strings.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::core::state::ResultItem;
use crate::search::{PageRequest, ProviderError, ResultPage, SearchProvider};

pub const DEFAULT_UNSPLASH_BASE_URL: &str = "https://api.unsplash.com";

// ============================================================================
// Unsplash API Types
// ============================================================================

#[derive(Deserialize, Debug)]
struct SearchResponse {
    #[serde(default)]
    total: u64,
    #[serde(default)]
    results: Vec<RawPhoto>,
}

#[derive(Deserialize, Debug)]
struct RawPhoto {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    alt_description: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    urls: Option<PhotoUrls>,
    #[serde(default)]
    likes: Option<u64>,
}

#[derive(Deserialize, Debug)]
struct PhotoUrls {
    #[serde(default)]
    small: Option<String>,
}

// ============================================================================
// Translation Layer
// ============================================================================

/// Converts a raw photo into a `ResultItem`, or `None` if it is unusable.
fn photo_to_item(photo: RawPhoto) -> Option<ResultItem> {
    let id = photo.id.filter(|id| !id.trim().is_empty())?;
    let Some(thumbnail_url) = photo
        .urls
        .and_then(|urls| urls.small)
        .filter(|url| !url.is_empty())
    else {
        warn!("Dropping photo {}: no small thumbnail url", id);
        return None;
    };
    Some(ResultItem {
        id,
        alt_description: photo.alt_description.unwrap_or_default(),
        description: photo.description.unwrap_or_default(),
        thumbnail_url,
        likes: photo.likes.unwrap_or(0),
    })
}

fn response_to_page(response: SearchResponse) -> ResultPage {
    let received = response.results.len();
    let results: Vec<ResultItem> = response
        .results
        .into_iter()
        .filter_map(photo_to_item)
        .collect();
    if results.len() != received {
        warn!(
            "Dropped {} of {} photos that failed validation",
            received - results.len(),
            received
        );
    }
    ResultPage {
        results,
        total: response.total,
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

pub struct UnsplashProvider {
    access_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl UnsplashProvider {
    pub fn new(access_key: String, base_url: Option<String>) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_UNSPLASH_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Self {
            access_key,
            base_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SearchProvider for UnsplashProvider {
    fn name(&self) -> &str {
        "unsplash"
    }

    async fn fetch_page(&self, request: PageRequest<'_>) -> Result<ResultPage, ProviderError> {
        if self.access_key.is_empty() {
            return Err(ProviderError::Config("Unsplash access key is empty".into()));
        }

        info!(
            "Unsplash search: query={:?}, page={}, per_page={}",
            request.query, request.page, request.per_page
        );

        let page = request.page.to_string();
        let per_page = request.per_page.to_string();
        let response = self
            .client
            .get(format!("{}/search/photos", self.base_url))
            .header("Authorization", format!("Client-ID {}", self.access_key))
            .header("Accept-Version", "v1")
            .query(&[
                ("query", request.query),
                ("page", page.as_str()),
                ("per_page", per_page.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        debug!("Unsplash response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Unsplash API error: {} - {}", status, err_body);
            return Err(ProviderError::Api {
                status,
                message: err_body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Parse(e.to_string()))?;

        let page = response_to_page(parsed);
        info!(
            "Unsplash page {}: {} results, total {}",
            request.page,
            page.results.len(),
            page.total
        );
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ResultPage {
        response_to_page(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_full_record_converts() {
        let page = parse(
            r#"{"total": 120, "total_pages": 6, "results": [{
                "id": "abc",
                "alt_description": "a cat on a sofa",
                "description": "Sunday",
                "urls": {"small": "https://images/abc-small.jpg", "full": "x"},
                "likes": 42
            }]}"#,
        );
        assert_eq!(page.total, 120);
        assert_eq!(
            page.results,
            vec![ResultItem {
                id: "abc".into(),
                alt_description: "a cat on a sofa".into(),
                description: "Sunday".into(),
                thumbnail_url: "https://images/abc-small.jpg".into(),
                likes: 42,
            }]
        );
    }

    #[test]
    fn test_null_descriptions_become_empty() {
        let page = parse(
            r#"{"total": 1, "results": [{
                "id": "n", "alt_description": null, "description": null,
                "urls": {"small": "u"}
            }]}"#,
        );
        assert_eq!(page.results[0].description, "");
        assert_eq!(page.results[0].alt_description, "");
        assert_eq!(page.results[0].likes, 0);
    }

    #[test]
    fn test_invalid_records_dropped() {
        let page = parse(
            r#"{"total": 3, "results": [
                {"id": "", "urls": {"small": "u"}},
                {"id": "no-urls"},
                {"id": "ok", "urls": {"small": "u"}}
            ]}"#,
        );
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].id, "ok");
        assert_eq!(page.total, 3);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let provider = UnsplashProvider::new("k".into(), Some("http://localhost:9/".into()));
        assert_eq!(provider.base_url, "http://localhost:9");
        let provider = UnsplashProvider::new("k".into(), None);
        assert_eq!(provider.base_url, DEFAULT_UNSPLASH_BASE_URL);
    }
}
