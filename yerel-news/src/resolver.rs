//! Google News redirect link resolution
//!
//! The search feed masks article links behind
//! `news.google.com/rss/articles/<token>` redirects, where the token is a
//! base64 blob with the canonical URL embedded in it. Resolution is
//! best-effort: any failure returns the raw link unchanged.

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use regex::Regex;

/// Resolve a masked Google News link to the canonical article URL.
///
/// Non-aggregator URLs pass through unchanged; this function never fails.
pub fn resolve_link(raw: &str) -> String {
    if !raw.contains("news.google.com") || !raw.contains("articles/") {
        return raw.to_string();
    }

    decode_redirect(raw).unwrap_or_else(|| raw.to_string())
}

fn decode_redirect(raw: &str) -> Option<String> {
    let token = raw.split("articles/").nth(1)?.split('?').next()?;

    // Tokens arrive with arbitrary (or no) padding; strip it and decode
    // unpadded. The alphabet varies between standard and url-safe.
    let token = token.trim_end_matches('=');
    let decoded = STANDARD_NO_PAD
        .decode(token)
        .or_else(|_| URL_SAFE_NO_PAD.decode(token))
        .ok()?;

    let text = String::from_utf8_lossy(&decoded);
    let pattern = Regex::new(r#"https?://[^\s|"'>]+"#).ok()?;
    pattern.find(&text).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn masked_url(payload: &[u8]) -> String {
        format!(
            "https://news.google.com/rss/articles/{}?oc=5",
            STANDARD_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn foreign_urls_pass_through() {
        let url = "https://example.com/haber/kadikoy-yangin";
        assert_eq!(resolve_link(url), url);
    }

    #[test]
    fn aggregator_urls_without_articles_segment_pass_through() {
        let url = "https://news.google.com/rss/search?q=test";
        assert_eq!(resolve_link(url), url);
    }

    #[test]
    fn decodes_embedded_url() {
        let url = masked_url(b"\x08\x13\"https://example.com/istanbul-article\"rest");
        assert_eq!(resolve_link(&url), "https://example.com/istanbul-article");
    }

    #[test]
    fn decodes_url_safe_tokens() {
        let token = URL_SAFE_NO_PAD.encode(b"\xfb\xef|https://example.com/semt|\xff");
        let url = format!("https://news.google.com/rss/articles/{}?oc=5", token);
        assert_eq!(resolve_link(&url), "https://example.com/semt");
    }

    #[test]
    fn tolerates_extra_padding() {
        let token = format!("{}===", STANDARD_NO_PAD.encode(b"|https://example.com/a|"));
        let url = format!("https://news.google.com/rss/articles/{}?oc=5", token);
        assert_eq!(resolve_link(&url), "https://example.com/a");
    }

    #[test]
    fn malformed_base64_falls_back() {
        let url = "https://news.google.com/rss/articles/!!!not-base64!!!?oc=5";
        assert_eq!(resolve_link(url), url);
    }

    #[test]
    fn truncated_token_falls_back() {
        // Length 1 mod 4 can never decode
        let url = "https://news.google.com/rss/articles/abcde?oc=5";
        assert_eq!(resolve_link(url), url);
    }

    #[test]
    fn payload_without_url_falls_back() {
        let url = masked_url(b"no links in here");
        assert_eq!(resolve_link(&url), url);
    }

    #[test]
    fn non_utf8_payload_bytes_are_tolerated() {
        let url = masked_url(b"\xff\xfe \xd2https://example.com/x \x01");
        assert_eq!(resolve_link(&url), "https://example.com/x");
    }

    #[test]
    fn missing_query_separator_is_fine() {
        let token = STANDARD_NO_PAD.encode(b"|https://example.com/b|");
        let url = format!("https://news.google.com/rss/articles/{}", token);
        assert_eq!(resolve_link(&url), "https://example.com/b");
    }
}
