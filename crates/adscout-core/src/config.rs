use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

const DEFAULT_RAPIDAPI_HOST: &str = "tiktok-api23.p.rapidapi.com";
pub(crate) const RAPIDAPI_KEY_VAR: &str = "ADSCOUT_RAPIDAPI_KEY";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is invalid.
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
/// Returns `ConfigError` if a value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    // Only commands that call the API need the key; see `AppConfig::require_rapidapi_key`.
    let rapidapi_key = optional(RAPIDAPI_KEY_VAR);
    let rapidapi_host = or_default("ADSCOUT_RAPIDAPI_HOST", DEFAULT_RAPIDAPI_HOST);
    let api_base_url = lookup("ADSCOUT_API_BASE_URL")
        .unwrap_or_else(|_| format!("https://{rapidapi_host}"));
    if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "ADSCOUT_API_BASE_URL".to_string(),
            reason: format!("'{api_base_url}' must start with http:// or https://"),
        });
    }

    let log_level = or_default("ADSCOUT_LOG_LEVEL", "info");
    let taxonomy_path = PathBuf::from(or_default(
        "ADSCOUT_TAXONOMY_PATH",
        "./config/categories.json",
    ));
    let run_config_path = PathBuf::from(or_default("ADSCOUT_RUN_CONFIG_PATH", "./config/run.yaml"));
    let output_dir = PathBuf::from(or_default("ADSCOUT_OUTPUT_DIR", "."));

    let request_timeout_secs = parse_u64("ADSCOUT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("ADSCOUT_USER_AGENT", "adscout/0.1 (ads-research)");
    let inter_request_delay_ms = parse_u64("ADSCOUT_INTER_REQUEST_DELAY_MS", "0")?;
    let max_retries = parse_u32("ADSCOUT_MAX_RETRIES", "0")?;
    let retry_backoff_base_secs = parse_u64("ADSCOUT_RETRY_BACKOFF_BASE_SECS", "1")?;

    Ok(AppConfig {
        rapidapi_key,
        rapidapi_host,
        api_base_url,
        log_level,
        taxonomy_path,
        run_config_path,
        output_dir,
        request_timeout_secs,
        user_agent,
        inter_request_delay_ms,
        max_retries,
        retry_backoff_base_secs,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
