use thiserror::Error;

/// Failures outside the modeled `success: false` outcomes.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid share URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}
