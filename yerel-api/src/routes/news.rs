//! News endpoints

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::info;

use yerel_core::NewsItem;
use yerel_news::is_istanbul_related;
use yerel_services::{breaking_query, district_query};

use crate::AppState;

/// Result-set size for district feeds
const DISTRICT_LIMIT: usize = 30;

/// Result-set size for the city-wide breaking feed
const BREAKING_LIMIT: usize = 70;

/// Scope label attached to city-wide items
const BREAKING_SCOPE: &str = "İstanbul";

/// Create news routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/get-news/{district}", get(district_news))
        .route("/get-breaking", get(breaking_news))
}

/// GET /get-news/{district} - local news scoped to one district
async fn district_news(
    State(state): State<AppState>,
    Path(district): Path<String>,
) -> Json<Vec<NewsItem>> {
    let query = district_query(&district);
    let items = state
        .news
        .fetch_news(&query, &district, DISTRICT_LIMIT, true)
        .await;

    info!("Returning {} items for district '{}'", items.len(), district);
    Json(items)
}

/// GET /get-breaking - city-wide breaking news
async fn breaking_news(State(state): State<AppState>) -> Json<Vec<NewsItem>> {
    let items = state
        .news
        .fetch_news(&breaking_query(), BREAKING_SCOPE, BREAKING_LIMIT, true)
        .await;

    // Second safety pass; the query negatives don't catch everything
    let items: Vec<NewsItem> = items
        .into_iter()
        .filter(|item| is_istanbul_related(&item.title, &item.link))
        .collect();

    info!("Returning {} breaking items", items.len());
    Json(items)
}
