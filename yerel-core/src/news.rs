//! News data structures for the district news feed

use serde::{Deserialize, Serialize};

/// One aggregated news entry, ready for the HTTP layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    /// Cleaned headline (trailing publisher suffix stripped)
    pub title: String,
    /// Canonical article URL, post link-resolution; always non-empty
    pub link: String,
    /// Representative image URL; absent until enrichment succeeds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Publisher name
    pub source: String,
    /// Local publish time as HH:MM, "--:--" when unknown
    pub date: String,
    /// District label this fetch run was scoped to
    pub district: String,
}
