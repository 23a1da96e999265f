use std::path::PathBuf;

use crate::config::RAPIDAPI_KEY_VAR;
use crate::ConfigError;

#[derive(Clone)]
pub struct AppConfig {
    /// `None` when unset or blank; dry runs and offline commands do not need it.
    pub rapidapi_key: Option<String>,
    pub rapidapi_host: String,
    /// Scheme + host the ads endpoints hang off, e.g. `https://tiktok-api23.p.rapidapi.com`.
    pub api_base_url: String,
    pub log_level: String,
    pub taxonomy_path: PathBuf,
    pub run_config_path: PathBuf,
    pub output_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub inter_request_delay_ms: u64,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
}

impl AppConfig {
    /// The API key, for commands that talk to the ads API.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when no key is configured.
    pub fn require_rapidapi_key(&self) -> Result<&str, ConfigError> {
        self.rapidapi_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar(RAPIDAPI_KEY_VAR.to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "rapidapi_key",
                &self.rapidapi_key.as_ref().map(|_| "[redacted]"),
            )
            .field("rapidapi_host", &self.rapidapi_host)
            .field("api_base_url", &self.api_base_url)
            .field("log_level", &self.log_level)
            .field("taxonomy_path", &self.taxonomy_path)
            .field("run_config_path", &self.run_config_path)
            .field("output_dir", &self.output_dir)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .finish()
    }
}
