//! Upstream `showItems` POST for `RelayClient`.

use reqwest::header::CONTENT_TYPE;
use serde_json::{json, Value};

use crate::error::RelayError;

use super::{RelayClient, JSON_UTF8};

/// Parsed reply of the upstream product endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamReply {
    /// Raw entries of `cart.prodList`, empty when the path is missing.
    Products(Vec<Value>),
    /// The body was not JSON; kept verbatim for the caller.
    InvalidJson { raw: String },
}

impl RelayClient {
    /// Posts `pcodes` to the upstream endpoint and returns its product list.
    ///
    /// The reply status is not inspected; error pages fall out as
    /// [`UpstreamReply::InvalidJson`] or as an empty product list.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Http`] on network failure or timeout.
    pub async fn fetch_products(&self, pcodes: &str) -> Result<UpstreamReply, RelayError> {
        let response = self
            .client
            .post(&self.upstream_url)
            .header("ih-pref", &self.upstream_pref)
            .header(CONTENT_TYPE, JSON_UTF8)
            .json(&json!({ "data": pcodes }))
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;

        match serde_json::from_str::<Value>(&raw) {
            Ok(body) => {
                let products = extract_product_list(body);
                tracing::debug!(
                    status = status.as_u16(),
                    products = products.len(),
                    "upstream showItems reply"
                );
                Ok(UpstreamReply::Products(products))
            }
            Err(e) => {
                tracing::warn!(
                    status = status.as_u16(),
                    error = %e,
                    "upstream showItems reply is not JSON"
                );
                Ok(UpstreamReply::InvalidJson { raw })
            }
        }
    }
}

/// Takes the `cart.prodList` array out of an upstream reply.
pub(super) fn extract_product_list(mut body: Value) -> Vec<Value> {
    match body.pointer_mut("/cart/prodList").map(Value::take) {
        Some(Value::Array(products)) => products,
        _ => Vec::new(),
    }
}
