use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Deserialize;
use sharelink_relay::RelayResponse;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

pub(super) const MISSING_URL: &str = "Missing \"url\" parameter.";

#[derive(Debug, Deserialize)]
pub(super) struct ItemsRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// `POST /getIherbItems`: resolves a share link and returns its products.
///
/// Modeled relay failures are 200 responses with `success: false`; only a
/// missing URL (400) and unexpected failures (500) change the status.
pub(super) async fn get_iherb_items(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<ItemsRequest>, JsonRejection>,
) -> Result<Json<RelayResponse>, ApiError> {
    let url = match payload {
        Ok(Json(body)) => body.url,
        Err(rejection) => {
            tracing::warn!(
                request_id = %req_id.0,
                error = %rejection.body_text(),
                "rejected items request body"
            );
            None
        }
    };

    let Some(url) = url.map(|u| u.trim().to_owned()).filter(|u| !u.is_empty()) else {
        return Err(ApiError::bad_request(MISSING_URL));
    };

    let outcome = state.relay.relay(&url).await.map_err(|e| {
        tracing::error!(request_id = %req_id.0, url = %url, error = %e, "relay failed");
        ApiError::internal(e.to_string())
    })?;

    if let Some(message) = outcome.message() {
        tracing::info!(request_id = %req_id.0, url = %url, message, "relay finished without items");
    }

    Ok(Json(outcome.into_response()))
}
