//! Business logic services for the Istanbul district news aggregator
//!
//! This crate ties the feed pipeline together: query synthesis, cache
//! lookup, feed fetch, normalization, filtering, image enrichment and
//! cache write-back.

pub mod news_service;

pub use news_service::{breaking_query, district_query, NewsService, NewsServiceConfig};
