//! Share-link GET for `RelayClient`.

use reqwest::header::LOCATION;
use reqwest::{Response, Url};

use crate::error::RelayError;
use crate::location::Resolution;

use super::{RelayClient, MAX_SHARE_BODY_BYTES};

impl RelayClient {
    /// Fetches `share_url`, following redirects, and collects the signals
    /// used to locate the product codes.
    ///
    /// The HTTP status is not treated as an error: share services answer
    /// with interstitial pages as well as redirects.
    ///
    /// # Errors
    ///
    /// - [`RelayError::InvalidUrl`] — `share_url` is not an absolute
    ///   `http`/`https` URL.
    /// - [`RelayError::Http`] — network failure, timeout, or more than
    ///   [`super::MAX_REDIRECTS`] hops.
    pub async fn resolve(&self, share_url: &str) -> Result<Resolution, RelayError> {
        let requested = parse_share_url(share_url)?;

        let response = self.client.get(requested.clone()).send().await?;
        let status = response.status();
        let effective = response.url().clone();
        let header_location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let body = read_capped_body(response, MAX_SHARE_BODY_BYTES).await?;
        let redirected = effective != requested && !status.is_redirection();

        tracing::debug!(
            requested = %requested,
            effective = %effective,
            status = status.as_u16(),
            redirected,
            header_location = header_location.as_deref(),
            "resolved share link"
        );

        Ok(Resolution {
            requested_url: requested.to_string(),
            effective_url: effective.to_string(),
            redirected,
            header_location,
            body,
        })
    }
}

/// Reads at most `limit` bytes of the body; the rest is dropped unread.
/// Invalid UTF-8 is replaced rather than rejected.
async fn read_capped_body(mut response: Response, limit: usize) -> Result<String, RelayError> {
    let mut bytes: Vec<u8> = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let remaining = limit - bytes.len();
        if chunk.len() > remaining {
            bytes.extend_from_slice(&chunk[..remaining]);
            tracing::debug!(limit, "share-link body truncated");
            break;
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub(super) fn parse_share_url(share_url: &str) -> Result<Url, RelayError> {
    let trimmed = share_url.trim();
    let url = Url::parse(trimmed).map_err(|e| RelayError::InvalidUrl {
        url: trimmed.to_owned(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(RelayError::InvalidUrl {
            url: trimmed.to_owned(),
            reason: format!("unsupported scheme \"{}\"", url.scheme()),
        });
    }

    Ok(url)
}
