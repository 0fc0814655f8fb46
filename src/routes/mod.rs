//! Route definitions for the parklot API.

pub mod auth;
pub mod car;
pub mod health;
pub mod lot;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::AppState;

/// Request bodies are small JSON forms.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let base_cors = match state.config.frontend_url.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new().allow_origin(origin),
        Err(e) => {
            tracing::warn!(error = %e, url = %state.config.frontend_url, "Invalid FRONTEND_URL, allowing any origin");
            CorsLayer::new().allow_origin(Any)
        }
    };
    let cors = base_cors
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let auth_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/users", post(auth::create_user))
        .route("/auth/me", get(auth::me));

    let lot_routes = Router::new()
        .route("/lot", post(lot::add_lot))
        .route("/lot/profile", get(lot::get_profile).put(lot::update_profile))
        .route("/lot/dashboard", get(lot::dashboard))
        .route("/lot/lots", get(lot::lots))
        .route("/lot/status", patch(lot::update_status))
        .route("/lot/analytics/{lot_id}", get(lot::analytics));

    let car_routes = Router::new().route(
        "/car/profile",
        get(car::get_profile).put(car::update_profile),
    );

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .merge(auth_routes)
        .merge(lot_routes)
        .merge(car_routes)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
