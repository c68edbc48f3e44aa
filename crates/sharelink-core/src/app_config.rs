use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings for the relay server and its outbound HTTP client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Applies to each outbound call separately (share-link GET, upstream POST).
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Full URL of the upstream `showItems` endpoint.
    pub upstream_url: String,
    /// Value sent in the `ih-pref` header (locale, currency, weight unit).
    pub upstream_pref: String,
    /// Origins allowed to call the relay from a browser, with credentials.
    pub cors_origins: Vec<String>,
}
