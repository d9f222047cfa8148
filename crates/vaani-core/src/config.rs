use crate::app_config::AppConfig;
use crate::ConfigError;

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
/// Empty values are treated the same as unset ones, so `PORT=` falls back to
/// the default and `CUELINKS_API_KEY=` counts as a missing key.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::{IpAddr, SocketAddr};

    let non_empty = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        non_empty(var).unwrap_or_else(|| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let port = or_default("PORT", "3000")
        .parse::<u16>()
        .map_err(|e| invalid("PORT", e.to_string()))?;

    let host = or_default("VAANI_BIND_HOST", "0.0.0.0")
        .parse::<IpAddr>()
        .map_err(|e| invalid("VAANI_BIND_HOST", e.to_string()))?;

    let cuelinks_request_timeout_secs = or_default("CUELINKS_REQUEST_TIMEOUT_SECS", "30")
        .parse::<u64>()
        .map_err(|e| invalid("CUELINKS_REQUEST_TIMEOUT_SECS", e.to_string()))?;

    Ok(AppConfig {
        cuelinks_api_key: non_empty("CUELINKS_API_KEY"),
        cuelinks_base_url: or_default("CUELINKS_BASE_URL", "https://api.cuelinks.com/v2/"),
        cuelinks_request_timeout_secs,
        bind_addr: SocketAddr::new(host, port),
        log_level: or_default("VAANI_LOG_LEVEL", "info"),
        user_agent: or_default("VAANI_USER_AGENT", "vaani/0.1 (price-search)"),
    })
}
