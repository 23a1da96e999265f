use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("ADSCOUT_RAPIDAPI_KEY", "test-key");
    m
}

#[test]
fn build_app_config_loads_without_api_key() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("key is optional at load time");
    assert_eq!(cfg.rapidapi_key, None);
    let result = cfg.require_rapidapi_key();
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "ADSCOUT_RAPIDAPI_KEY"),
        "expected MissingEnvVar(ADSCOUT_RAPIDAPI_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_api_key_as_missing() {
    let mut map = HashMap::new();
    map.insert("ADSCOUT_RAPIDAPI_KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.rapidapi_key, None);
    assert!(matches!(
        cfg.require_rapidapi_key(),
        Err(ConfigError::MissingEnvVar(_))
    ));
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.rapidapi_key.as_deref(), Some("test-key"));
    assert_eq!(cfg.require_rapidapi_key().ok(), Some("test-key"));
    assert_eq!(cfg.rapidapi_host, "tiktok-api23.p.rapidapi.com");
    assert_eq!(cfg.api_base_url, "https://tiktok-api23.p.rapidapi.com");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.taxonomy_path, PathBuf::from("./config/categories.json"));
    assert_eq!(cfg.run_config_path, PathBuf::from("./config/run.yaml"));
    assert_eq!(cfg.output_dir, PathBuf::from("."));
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "adscout/0.1 (ads-research)");
    assert_eq!(cfg.inter_request_delay_ms, 0);
    assert_eq!(cfg.max_retries, 0);
    assert_eq!(cfg.retry_backoff_base_secs, 1);
}

#[test]
fn base_url_follows_host_override() {
    let mut map = full_env();
    map.insert("ADSCOUT_RAPIDAPI_HOST", "ads.example.com");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.rapidapi_host, "ads.example.com");
    assert_eq!(cfg.api_base_url, "https://ads.example.com");
}

#[test]
fn base_url_override_wins_over_host() {
    let mut map = full_env();
    map.insert("ADSCOUT_API_BASE_URL", "http://127.0.0.1:9999");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "http://127.0.0.1:9999");
    assert_eq!(cfg.rapidapi_host, "tiktok-api23.p.rapidapi.com");
}

#[test]
fn base_url_without_scheme_is_rejected() {
    let mut map = full_env();
    map.insert("ADSCOUT_API_BASE_URL", "ads.example.com");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ADSCOUT_API_BASE_URL"),
        "expected InvalidEnvVar(ADSCOUT_API_BASE_URL), got: {result:?}"
    );
}

#[test]
fn request_timeout_override() {
    let mut map = full_env();
    map.insert("ADSCOUT_REQUEST_TIMEOUT_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 60);
}

#[test]
fn request_timeout_invalid() {
    let mut map = full_env();
    map.insert("ADSCOUT_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ADSCOUT_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(ADSCOUT_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn max_retries_override() {
    let mut map = full_env();
    map.insert("ADSCOUT_MAX_RETRIES", "3");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_retries, 3);
}

#[test]
fn max_retries_invalid() {
    let mut map = full_env();
    map.insert("ADSCOUT_MAX_RETRIES", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ADSCOUT_MAX_RETRIES"),
        "expected InvalidEnvVar(ADSCOUT_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn inter_request_delay_override() {
    let mut map = full_env();
    map.insert("ADSCOUT_INTER_REQUEST_DELAY_MS", "500");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.inter_request_delay_ms, 500);
}

#[test]
fn output_and_config_paths_override() {
    let mut map = full_env();
    map.insert("ADSCOUT_OUTPUT_DIR", "/tmp/ads");
    map.insert("ADSCOUT_TAXONOMY_PATH", "/etc/adscout/categories.json");
    map.insert("ADSCOUT_RUN_CONFIG_PATH", "/etc/adscout/run.yaml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.output_dir, PathBuf::from("/tmp/ads"));
    assert_eq!(
        cfg.taxonomy_path,
        PathBuf::from("/etc/adscout/categories.json")
    );
    assert_eq!(cfg.run_config_path, PathBuf::from("/etc/adscout/run.yaml"));
}

#[test]
fn debug_output_redacts_api_key() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("test-key"), "key leaked: {rendered}");
    assert!(rendered.contains("[redacted]"));
}
