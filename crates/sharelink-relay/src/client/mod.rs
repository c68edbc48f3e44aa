//! HTTP client for share-link resolution and the upstream `showItems` call.

mod resolve;
mod upstream;

use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::Client;
use sharelink_core::AppConfig;

use crate::error::RelayError;

pub use upstream::UpstreamReply;
#[cfg(test)]
use resolve::parse_share_url;
#[cfg(test)]
use upstream::extract_product_list;

/// Maximum number of redirect hops followed before the GET fails.
pub(super) const MAX_REDIRECTS: usize = 10;

/// Upper bound on the share-link body kept for the `pcodes` body scan.
pub const MAX_SHARE_BODY_BYTES: usize = 1024 * 1024;

pub(super) const JSON_UTF8: &str = "application/json; charset=UTF-8";

/// Performs the two outbound calls of a relay: the share-link GET and the
/// upstream product POST.
///
/// A single attempt is made per call. Timeouts and network failures surface
/// as [`RelayError::Http`].
#[derive(Debug, Clone)]
pub struct RelayClient {
    pub(super) client: Client,
    pub(super) upstream_url: String,
    pub(super) upstream_pref: String,
}

impl RelayClient {
    /// Creates a `RelayClient` with the given per-request timeout and
    /// `User-Agent`, posting product codes to `upstream_url` with
    /// `upstream_pref` as the `ih-pref` header.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        upstream_url: impl Into<String>,
        upstream_pref: impl Into<String>,
    ) -> Result<Self, RelayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .redirect(redirect_policy())
            .build()?;
        Ok(Self {
            client,
            upstream_url: upstream_url.into(),
            upstream_pref: upstream_pref.into(),
        })
    }

    /// Creates a `RelayClient` from the application configuration.
    ///
    /// # Errors
    ///
    /// See [`RelayClient::new`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, RelayError> {
        Self::new(
            config.request_timeout_secs,
            &config.user_agent,
            config.upstream_url.clone(),
            config.upstream_pref.clone(),
        )
    }
}

/// Follows `http`/`https` hops only. A hop to any other scheme (app deep
/// links) stops the chain so its `Location` header stays readable.
fn redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if !matches!(attempt.url().scheme(), "http" | "https") {
            attempt.stop()
        } else if attempt.previous().len() > MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else {
            attempt.follow()
        }
    })
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
