//! API route definitions

mod health;
mod img;
mod news;

use axum::{response::Html, routing::get, Router};

use crate::AppState;

/// Create all application routes
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .merge(news::routes())
        .merge(img::routes())
        .merge(health::routes())
}

/// GET / - static frontend page
async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}
