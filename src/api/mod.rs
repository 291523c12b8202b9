//! HTTP API server

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::Level;

use crate::config::AppConfig;
use crate::Error;

mod extract;
pub mod handlers;
pub mod state;

pub use extract::{ApiJson, ApiQuery};
pub use state::AppState;

/// Build the API router using the provided application state
pub fn create_router(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .nest(
            "/api",
            Router::new()
                .route("/locations", get(handlers::list_locations))
                .route("/locations/nearby", get(handlers::nearby_locations))
                .route("/locations/:id", get(handlers::get_location))
                .route("/categories", get(handlers::list_categories))
                .route("/routes", post(handlers::create_route))
                .route("/distance", post(handlers::compute_distance)),
        )
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(config.server.body_limit_bytes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .layer(cors_layer(&config.cors.allowed_origins))
        .with_state(state)
}

/// CORS policy from `*` or a comma-separated origin list
pub fn cors_layer(allowed_origins: &str) -> CorsLayer {
    let allowed_origins = allowed_origins.trim();

    let allow_origin = if allowed_origins.is_empty() || allowed_origins == "*" {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            tracing::warn!(%allowed_origins, "No valid CORS origins parsed; allowing any origin");
            AllowOrigin::any()
        } else {
            AllowOrigin::list(origins)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
