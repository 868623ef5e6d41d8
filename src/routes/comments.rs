//! Comments resource routes. Only `get_comments` and `post_comments` are exposed.

use crate::handlers::{get_comments, post_comments};
use crate::routes::common_routes;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};
use tower_http::limit::RequestBodyLimitLayer;

pub fn comment_routes(state: AppState) -> Router {
    let limit = state.resource.max_body_bytes;
    Router::new()
        .route("/:pk/get_comments", get(get_comments))
        .route("/post_comments", post(post_comments))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(limit))
        .with_state(state)
}

/// Full application: common routes at the root, the resource under `/api/v1/<resource>`.
pub fn app_router(state: AppState) -> Router {
    let base = state.resource.base_path();
    Router::new()
        .merge(common_routes(state.clone()))
        .nest(&base, comment_routes(state))
}
