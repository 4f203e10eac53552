//! Image proxy endpoint
//!
//! Relays remote images byte-for-byte so the frontend avoids hotlink
//! blocks and mixed-content warnings.

use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::debug;

use crate::AppState;

/// Upstream fetch timeout for proxied images
const PROXY_TIMEOUT: Duration = Duration::from_secs(6);

/// Query parameters for the image proxy
#[derive(Debug, Deserialize)]
pub struct ImgQuery {
    /// Absolute URL of the image to relay
    #[serde(default)]
    u: String,
}

/// Create image proxy routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/img", get(img_proxy))
}

/// GET /img?u=... - relay a remote image with a 1-day cache directive
async fn img_proxy(State(state): State<AppState>, Query(params): Query<ImgQuery>) -> Response {
    if !is_absolute_http_url(&params.u) {
        return StatusCode::BAD_REQUEST.into_response();
    }

    let response = match state
        .http
        .get(&params.u)
        .timeout(PROXY_TIMEOUT)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            debug!("Image proxy fetch failed for {}: {}", params.u, e);
            return StatusCode::NOT_FOUND.into_response();
        }
    };

    if response.status().as_u16() >= 400 {
        return StatusCode::NOT_FOUND.into_response();
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("image/jpeg")
        .to_string();

    match response.bytes().await {
        Ok(body) => (
            [
                (header::CONTENT_TYPE, content_type),
                (header::CACHE_CONTROL, "public, max-age=86400".to_string()),
            ],
            body,
        )
            .into_response(),
        Err(e) => {
            debug!("Image proxy body read failed for {}: {}", params.u, e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

fn is_absolute_http_url(u: &str) -> bool {
    u.starts_with("http://") || u.starts_with("https://")
}
