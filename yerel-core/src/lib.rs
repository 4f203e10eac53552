//! Core types for the Istanbul district news aggregator
//!
//! This crate defines the shared data structures used across the
//! aggregation pipeline and the HTTP layer.

pub mod news;

pub use news::NewsItem;
