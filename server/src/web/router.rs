use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, patch, post};
use tower_http::cors::{Any, CorsLayer};

use super::app_state::AppState;
use super::rest_api;

/// Build the axum router with all HTTP routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    // Restrict CORS to the configured public_url origin (or allow any for localhost dev)
    let public_url = &state.public_url;
    let cors = if public_url.contains("localhost") || public_url.contains("127.0.0.1") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origin = public_url
            .parse::<HeaderValue>()
            .unwrap_or_else(|_| HeaderValue::from_static("https://localhost"));
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route("/api/health", get(rest_api::health))
        .route("/api/profiles", post(rest_api::create_profile))
        .route("/api/profiles/{id}", get(rest_api::get_profile))
        .route(
            "/api/servers",
            get(rest_api::list_servers).post(rest_api::create_server),
        )
        .route("/api/servers/{id}", get(rest_api::get_server))
        .route(
            "/api/servers/{id}/navigation",
            get(rest_api::get_navigation),
        )
        .route(
            "/api/servers/{id}/channels",
            post(rest_api::create_channel),
        )
        .route(
            "/api/servers/{id}/members/{profile_id}",
            patch(rest_api::update_member_role),
        )
        .route("/api/invite/{code}", post(rest_api::join_server))
        .layer(cors)
        .with_state(state)
}
