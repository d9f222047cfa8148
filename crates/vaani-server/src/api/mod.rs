mod search;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use vaani_core::AppConfig;
use vaani_cuelinks::{CuelinksClient, CuelinksError};

use crate::middleware::{request_id, REQUEST_ID_HEADER};

pub const HEALTH_MESSAGE: &str = "Vaani Backend is Live!";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// `None` when no API key is configured.
    pub feed: Option<Arc<CuelinksClient>>,
}

impl AppState {
    /// Builds shared state, constructing the feed client only when an API key
    /// is configured.
    ///
    /// # Errors
    ///
    /// Returns [`CuelinksError`] if the HTTP client cannot be built or the
    /// configured base URL is invalid.
    pub fn from_config(config: Arc<AppConfig>) -> Result<Self, CuelinksError> {
        let feed = config
            .api_key()
            .map(|key| {
                CuelinksClient::with_base_url(
                    key,
                    config.cuelinks_request_timeout_secs,
                    &config.user_agent,
                    &config.cuelinks_base_url,
                )
            })
            .transpose()?
            .map(Arc::new);

        Ok(Self { config, feed })
    }
}

/// Error outcomes of the search endpoint.
///
/// Validation and configuration failures report a `message`; upstream
/// failures report an `error`.
#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    Configuration(String),
    Upstream(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message, error) = match self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, Some(message), None),
            ApiError::Configuration(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Some(message), None)
            }
            ApiError::Upstream(error) => (StatusCode::INTERNAL_SERVER_ERROR, None, Some(error)),
        };
        (
            status,
            Json(ErrorBody {
                status: "error",
                message,
                error,
            }),
        )
            .into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/cuelinks-search", post(search::search))
        .route("/search", post(search::search))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                // Outside CORS so preflight responses carry a request id too.
                .layer(axum::middleware::from_fn(request_id))
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn health() -> &'static str {
    HEALTH_MESSAGE
}
