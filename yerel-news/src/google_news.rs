//! Google News RSS client for district-scoped local news
//!
//! Fetches the Google News search feed with a Turkish-locale query and
//! normalizes raw entries into [`NewsItem`]s. Every per-field extraction
//! step degrades to a placeholder instead of failing: feed content is
//! untrusted and highly variable.

use chrono::{DateTime, Local, Utc};
use regex::Regex;
use reqwest::Client;
use rss::{Channel, Item};
use tracing::{debug, info};

use yerel_core::NewsItem;

use crate::error::NewsError;
use crate::filter::is_istanbul_related;
use crate::resolver::resolve_link;

/// Placeholder source when the entry carries no attribution
const SOURCE_PLACEHOLDER: &str = "Haber";

/// Placeholder shown when the publish time is missing or unparsable
const TIME_PLACEHOLDER: &str = "--:--";

/// Google News RSS client
pub struct GoogleNewsClient {
    client: Client,
    base_url: String,
}

impl GoogleNewsClient {
    /// Create a new client on top of a shared HTTP client
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: "https://news.google.com/rss/search".to_string(),
        }
    }

    /// Fetch the search feed and assemble district-scoped items.
    ///
    /// Entries are sorted newest-first (missing publish times sort as
    /// earliest), truncated to `limit`, normalized, and — when `strict`
    /// is set — dropped unless Istanbul-related.
    pub async fn search(
        &self,
        query: &str,
        district: &str,
        limit: usize,
        strict: bool,
    ) -> Result<Vec<NewsItem>, NewsError> {
        let url = format!(
            "{}?q={}&hl=tr&gl=TR&ceid=TR:tr",
            self.base_url,
            urlencoding::encode(query)
        );

        debug!("Fetching Google News RSS: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| NewsError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NewsError::ApiError {
                status: response.status().as_u16(),
                message: format!("Google News returned status {}", response.status()),
            });
        }

        let content = response
            .bytes()
            .await
            .map_err(|e| NewsError::RequestFailed(e.to_string()))?;

        let channel = Channel::read_from(&content[..])
            .map_err(|e| NewsError::ParseError(format!("Failed to parse Google News RSS: {}", e)))?;

        let items = assemble_items(&channel, district, limit, strict);

        info!(
            "Google News returned {} items for query '{}' (district '{}')",
            items.len(),
            query,
            district
        );

        Ok(items)
    }
}

/// Sort, truncate, normalize and filter a parsed feed channel
pub fn assemble_items(channel: &Channel, district: &str, limit: usize, strict: bool) -> Vec<NewsItem> {
    let mut dated: Vec<(Option<DateTime<Utc>>, &Item)> = channel
        .items()
        .iter()
        .map(|item| (parse_pub_date(item), item))
        .collect();

    // Newest first; None sorts last
    dated.sort_by(|a, b| b.0.cmp(&a.0));

    dated
        .into_iter()
        .take(limit)
        .filter_map(|(published, item)| {
            let entry = normalize_item(item, published, district)?;
            if strict && !is_istanbul_related(&entry.title, &entry.link) {
                return None;
            }
            Some(entry)
        })
        .collect()
}

/// Normalize one raw feed entry; entries without title or link are dropped
fn normalize_item(item: &Item, published: Option<DateTime<Utc>>, district: &str) -> Option<NewsItem> {
    let title = clean_title(item.title()?);
    let link = resolve_link(item.link()?);
    let image = extract_entry_image(item);
    let source = item
        .source()
        .and_then(|s| s.title())
        .unwrap_or(SOURCE_PLACEHOLDER)
        .to_string();

    Some(NewsItem {
        title,
        link,
        image,
        source,
        date: format_entry_time(published),
        district: district.to_string(),
    })
}

/// Strip the "Article Title - Publisher" suffix the feed appends,
/// splitting once from the right
fn clean_title(raw: &str) -> String {
    match raw.rfind(" - ") {
        Some(pos) => raw[..pos].to_string(),
        None => raw.to_string(),
    }
}

/// Parse the entry publish date, trying RFC 2822 then RFC 3339
fn parse_pub_date(item: &Item) -> Option<DateTime<Utc>> {
    item.pub_date().and_then(|d| {
        DateTime::parse_from_rfc2822(d)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|| {
                DateTime::parse_from_rfc3339(d)
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc))
            })
    })
}

/// Render the publish time as local HH:MM
fn format_entry_time(published: Option<DateTime<Utc>>) -> String {
    published
        .map(|dt| dt.with_timezone(&Local).format("%H:%M").to_string())
        .unwrap_or_else(|| TIME_PLACEHOLDER.to_string())
}

/// Pick an image from the entry itself, trying in order:
/// media:content, media:thumbnail, an image enclosure, then the first
/// `<img>` in the description HTML
fn extract_entry_image(item: &Item) -> Option<String> {
    if let Some(url) = media_extension_url(item, "content") {
        return Some(url);
    }

    if let Some(url) = media_extension_url(item, "thumbnail") {
        return Some(url);
    }

    if let Some(enclosure) = item.enclosure() {
        if enclosure.mime_type().starts_with("image/") && !enclosure.url().is_empty() {
            return Some(enclosure.url().to_string());
        }
    }

    item.description().and_then(extract_img_src)
}

/// URL attribute of the first `media:<element>` extension, if any
fn media_extension_url(item: &Item, element: &str) -> Option<String> {
    item.extensions()
        .get("media")?
        .get(element)?
        .first()?
        .attrs()
        .get("url")
        .filter(|url| !url.is_empty())
        .cloned()
}

/// First `<img>` tag's src, falling back to lazy-load attributes
pub(crate) fn extract_img_src(html: &str) -> Option<String> {
    if !html.contains("<img") {
        return None;
    }

    let tag_pattern = Regex::new(r"<img[^>]*>").ok()?;
    let tag = tag_pattern.find(html)?.as_str();

    for attr in ["src", "data-src", "data-lazy-src"] {
        let attr_pattern =
            Regex::new(&format!(r#"\s{}\s*=\s*["']([^"']+)["']"#, attr)).ok()?;
        if let Some(caps) = attr_pattern.captures(tag) {
            if let Some(url) = caps.get(1) {
                return Some(url.as_str().to_string());
            }
        }
    }

    None
}
