//! Best-effort article-page image enrichment
//!
//! Entries the feed delivers without an image get one scraped from the
//! article page itself: Open Graph and Twitter Card meta tags first, then
//! the first `<img>` in the markup. Scraping is bounded (short timeout,
//! capped scan window, fixed fan-out) and individual failures only leave
//! the image absent.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use regex::Regex;
use reqwest::Client;
use tracing::debug;

use yerel_core::NewsItem;

use crate::error::NewsError;
use crate::google_news::extract_img_src;

/// Per-article fetch timeout
const SCRAPE_TIMEOUT: Duration = Duration::from_secs(4);

/// Maximum in-flight article fetches per batch
const MAX_CONCURRENT_FETCHES: usize = 8;

/// Only the first entries of a result set are worth a scrape round-trip
const ENRICH_WINDOW: usize = 12;

/// Scan at most this much of the response body
const MAX_SCAN_BYTES: usize = 140_000;

/// Article-page image scraper
pub struct ImageEnricher {
    client: Client,
}

impl ImageEnricher {
    /// Create a new enricher on top of a shared HTTP client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Backfill images for the first entries lacking one.
    ///
    /// Fetches run concurrently, results are written back to their
    /// originating index, and insecure image schemes are upgraded. The
    /// batch itself never fails; it completes once every dispatched
    /// fetch has finished or timed out.
    pub async fn enrich_items(&self, items: &mut [NewsItem]) {
        let targets: Vec<(usize, String)> = items
            .iter()
            .take(ENRICH_WINDOW)
            .enumerate()
            .filter(|(_, item)| item.image.is_none())
            .map(|(idx, item)| (idx, item.link.clone()))
            .collect();

        if targets.is_empty() {
            return;
        }

        debug!("Scraping images for {} articles without one", targets.len());

        let results: Vec<(usize, Result<String, NewsError>)> = stream::iter(targets)
            .map(|(idx, link)| async move { (idx, self.fetch_page_image(&link).await) })
            .buffer_unordered(MAX_CONCURRENT_FETCHES)
            .collect()
            .await;

        for (idx, result) in results {
            match result {
                Ok(url) => items[idx].image = Some(upgrade_scheme(url)),
                Err(e) => debug!("Image scrape failed for {}: {}", items[idx].link, e),
            }
        }
    }

    /// Scrape a representative image from one article page
    async fn fetch_page_image(&self, url: &str) -> Result<String, NewsError> {
        let response = self
            .client
            .get(url)
            .timeout(SCRAPE_TIMEOUT)
            .send()
            .await
            .map_err(|e| NewsError::RequestFailed(e.to_string()))?;

        if response.status().as_u16() >= 400 {
            return Err(NewsError::ApiError {
                status: response.status().as_u16(),
                message: "Failed to fetch article page".to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| NewsError::RequestFailed(e.to_string()))?;

        let html = truncate_on_char_boundary(&body, MAX_SCAN_BYTES);

        extract_meta_image(html)
            .or_else(|| extract_img_src(html))
            .ok_or_else(|| NewsError::ParseError("No image found in page".to_string()))
    }
}

/// Extract an image URL from Open Graph or Twitter Card meta tags,
/// accepting both attribute orders
fn extract_meta_image(html: &str) -> Option<String> {
    let og_pattern =
        Regex::new(r#"<meta[^>]+property=["']og:image["'][^>]+content=["']([^"']+)["']"#).ok()?;
    if let Some(caps) = og_pattern.captures(html) {
        if let Some(url) = caps.get(1) {
            return Some(url.as_str().to_string());
        }
    }

    let og_pattern_rev =
        Regex::new(r#"<meta[^>]+content=["']([^"']+)["'][^>]+property=["']og:image["']"#).ok()?;
    if let Some(caps) = og_pattern_rev.captures(html) {
        if let Some(url) = caps.get(1) {
            return Some(url.as_str().to_string());
        }
    }

    let twitter_pattern =
        Regex::new(r#"<meta[^>]+name=["']twitter:image["'][^>]+content=["']([^"']+)["']"#).ok()?;
    if let Some(caps) = twitter_pattern.captures(html) {
        if let Some(url) = caps.get(1) {
            return Some(url.as_str().to_string());
        }
    }

    let twitter_pattern_rev =
        Regex::new(r#"<meta[^>]+content=["']([^"']+)["'][^>]+name=["']twitter:image["']"#).ok()?;
    if let Some(caps) = twitter_pattern_rev.captures(html) {
        if let Some(url) = caps.get(1) {
            return Some(url.as_str().to_string());
        }
    }

    None
}

/// Rewrite an insecure image URL to https, once
fn upgrade_scheme(url: String) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{}", rest),
        None => url,
    }
}

/// Cut `body` to at most `max` bytes without splitting a character
fn truncate_on_char_boundary(body: &str, max: usize) -> &str {
    if body.len() <= max {
        return body;
    }
    let mut end = max;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
