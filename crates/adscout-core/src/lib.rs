pub mod app_config;
pub mod config;
pub mod records;
pub mod run_config;
pub mod sanitize;
pub mod taxonomy;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use records::{AdRecord, IndustrySheet, ResultTable, COLUMNS};
pub use run_config::{load_run_config, ListingQuery, PageRange, RunConfig, Thresholds};
pub use sanitize::{sanitize_opt, sanitize_string};
pub use taxonomy::{load_taxonomy, resolve, Category, Taxonomy};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse taxonomy file {path}: {source}")]
    TaxonomyParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse run config: {0}")]
    RunConfigParse(#[from] serde_yaml::Error),

    #[error("run config validation failed: {0}")]
    Validation(String),
}
