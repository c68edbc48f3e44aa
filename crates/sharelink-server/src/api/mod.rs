mod items;

use std::sync::Arc;

use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use sharelink_relay::RelayClient;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::middleware::{request_id, REQUEST_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<RelayClient>,
}

/// Error body in the `{"detail": ...}` shape callers already parse.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub detail: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

/// Credentialed CORS for the configured origins. Methods and headers are
/// mirrored from the preflight, since wildcards are not allowed alongside
/// credentials.
fn build_cors(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| HeaderValue::from_str(o))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)]))
}

/// Builds the relay router.
///
/// # Errors
///
/// Fails if a configured CORS origin is not a valid header value.
pub fn build_app(state: AppState, cors_origins: &[String]) -> anyhow::Result<Router> {
    Ok(Router::new()
        .route("/getIherbItems", post(items::get_iherb_items))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(request_id))
                .layer(build_cors(cors_origins)?),
        )
        .with_state(state))
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}
