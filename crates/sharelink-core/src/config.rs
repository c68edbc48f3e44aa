use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub(crate) const DEFAULT_UPSTREAM_URL: &str =
    "https://checkout14-api.iherb.biz/v3/ec/share/showItems";
pub(crate) const DEFAULT_UPSTREAM_PREF: &str = "lc=ar-SA;cc=SAR;ctc=SA;wp=kilograms";
pub(crate) const DEFAULT_CORS_ORIGIN: &str = "https://lavendersales.flutterflow.app";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default; only malformed values fail.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&or_default("SHARELINK_ENV", "development"));

    let bind_addr = or_default("SHARELINK_BIND_ADDR", "0.0.0.0:8000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("SHARELINK_BIND_ADDR", e.to_string()))?;

    let log_level = or_default("SHARELINK_LOG_LEVEL", "info");

    let request_timeout_secs = or_default("SHARELINK_REQUEST_TIMEOUT_SECS", "20")
        .parse::<u64>()
        .map_err(|e| invalid("SHARELINK_REQUEST_TIMEOUT_SECS", e.to_string()))?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "SHARELINK_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    let user_agent = or_default("SHARELINK_USER_AGENT", "sharelink/0.1 (share-relay)");

    let upstream_url = or_default("SHARELINK_UPSTREAM_URL", DEFAULT_UPSTREAM_URL);
    if !(upstream_url.starts_with("https://") || upstream_url.starts_with("http://")) {
        return Err(invalid(
            "SHARELINK_UPSTREAM_URL",
            format!("\"{upstream_url}\" is not an http(s) URL"),
        ));
    }

    let upstream_pref = or_default("SHARELINK_UPSTREAM_PREF", DEFAULT_UPSTREAM_PREF);

    let cors_origins = parse_origins(&or_default("SHARELINK_CORS_ORIGINS", DEFAULT_CORS_ORIGIN));
    if cors_origins.is_empty() {
        return Err(invalid(
            "SHARELINK_CORS_ORIGINS",
            "at least one origin is required".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        request_timeout_secs,
        user_agent,
        upstream_url,
        upstream_pref,
        cors_origins,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/'))
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
