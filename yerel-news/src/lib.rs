//! Istanbul local-news feed pipeline
//!
//! This crate provides the stages between the Google News search feed and
//! the HTTP layer:
//! - Feed fetching and entry normalization (`google_news`)
//! - Istanbul relevance filtering (`filter`)
//! - Redirect link resolution (`resolver`)
//! - Best-effort article-page image enrichment (`enrich`)

pub mod enrich;
pub mod error;
pub mod filter;
pub mod google_news;
pub mod resolver;

pub use enrich::ImageEnricher;
pub use error::NewsError;
pub use filter::is_istanbul_related;
pub use google_news::GoogleNewsClient;
pub use resolver::resolve_link;
