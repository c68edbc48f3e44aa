//! The full relay: resolve → extract → fetch → map.

use serde::Serialize;

use crate::client::{RelayClient, UpstreamReply};
use crate::error::RelayError;
use crate::extract::extract_pcodes;
use crate::mapper::map_products;
use crate::types::RelayItem;

/// Diagnostic signals attached to a `no_pcodes_param` outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PcodesDebug {
    pub final_url: Option<String>,
    pub header_location: Option<String>,
}

/// Result of a relay that completed without an unexpected failure.
///
/// Everything except [`RelayOutcome::Items`] is an expected, reportable
/// failure that callers branch on via `success`.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayOutcome {
    Items(Vec<RelayItem>),
    NoLocation,
    NoPcodes(PcodesDebug),
    InvalidUpstreamJson { raw_response: String },
}

/// Wire shape of a relay outcome.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<RelayItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<PcodesDebug>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl RelayOutcome {
    /// Machine-readable tag of a failed outcome.
    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Items(_) => None,
            Self::NoLocation => Some("no_location_header_or_final_url"),
            Self::NoPcodes(_) => Some("no_pcodes_param"),
            Self::InvalidUpstreamJson { .. } => Some("invalid_json_from_post"),
        }
    }

    #[must_use]
    pub fn into_response(self) -> RelayResponse {
        let message = self.message();
        let mut response = RelayResponse {
            success: message.is_none(),
            items: None,
            message,
            debug: None,
            raw_response: None,
        };
        match self {
            Self::Items(items) => response.items = Some(items),
            Self::NoLocation => {}
            Self::NoPcodes(debug) => response.debug = Some(debug),
            Self::InvalidUpstreamJson { raw_response } => {
                response.raw_response = Some(raw_response);
            }
        }
        response
    }
}

impl RelayClient {
    /// Runs the relay for one share link.
    ///
    /// # Errors
    ///
    /// Propagates [`RelayError`] from either outbound call. Missing location,
    /// missing `pcodes`, and a non-JSON upstream reply are returned as
    /// [`RelayOutcome`] values instead.
    pub async fn relay(&self, share_url: &str) -> Result<RelayOutcome, RelayError> {
        let resolution = self.resolve(share_url).await?;

        let candidates: Vec<String> = resolution.location_candidates().collect();
        if candidates.is_empty() {
            tracing::info!(share_url, "no location found for share link");
            return Ok(RelayOutcome::NoLocation);
        }

        let Some(pcodes) = candidates.iter().find_map(|location| extract_pcodes(location)) else {
            tracing::info!(
                share_url,
                candidates = ?candidates,
                "no pcodes in resolved locations"
            );
            return Ok(RelayOutcome::NoPcodes(PcodesDebug {
                final_url: Some(resolution.effective_url),
                header_location: resolution.header_location,
            }));
        };

        tracing::debug!(share_url, pcodes = %pcodes, "forwarding product codes upstream");

        match self.fetch_products(&pcodes).await? {
            UpstreamReply::Products(products) => {
                let items: Vec<RelayItem> = map_products(products).collect();
                tracing::info!(share_url, items = items.len(), "relay succeeded");
                Ok(RelayOutcome::Items(items))
            }
            UpstreamReply::InvalidJson { raw } => Ok(RelayOutcome::InvalidUpstreamJson {
                raw_response: raw,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn no_location_serializes_message_only() {
        let json = serde_json::to_value(RelayOutcome::NoLocation.into_response()).unwrap();
        assert_eq!(
            json,
            json!({"success": false, "message": "no_location_header_or_final_url"})
        );
    }

    #[test]
    fn no_pcodes_serializes_debug_with_nulls() {
        let outcome = RelayOutcome::NoPcodes(PcodesDebug {
            final_url: Some("https://www.iherb.com/page?other=1".to_owned()),
            header_location: None,
        });
        let json = serde_json::to_value(outcome.into_response()).unwrap();
        assert_eq!(
            json,
            json!({
                "success": false,
                "message": "no_pcodes_param",
                "debug": {
                    "finalUrl": "https://www.iherb.com/page?other=1",
                    "headerLocation": null
                }
            })
        );
    }

    #[test]
    fn invalid_json_serializes_raw_response() {
        let outcome = RelayOutcome::InvalidUpstreamJson {
            raw_response: "<html>502</html>".to_owned(),
        };
        let json = serde_json::to_value(outcome.into_response()).unwrap();
        assert_eq!(
            json,
            json!({
                "success": false,
                "message": "invalid_json_from_post",
                "rawResponse": "<html>502</html>"
            })
        );
    }

    #[test]
    fn items_serialize_without_message() {
        let json = serde_json::to_value(RelayOutcome::Items(vec![]).into_response()).unwrap();
        assert_eq!(json, json!({"success": true, "items": []}));
    }
}
