use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::records::AdRecord;
use crate::ConfigError;

/// Upper bound on pages walked per industry.
pub const MAX_PAGES_PER_INDUSTRY: u32 = 100;

/// Everything that shapes one collection run, loaded from `run.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Industry ids to walk, in order. Duplicates are walked once per occurrence.
    pub industries: Vec<String>,
    #[serde(default)]
    pub pages: PageRange,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub query: ListingQuery,
}

/// Inclusive 1-based page range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub first: u32,
    pub last: u32,
}

impl Default for PageRange {
    fn default() -> Self {
        Self { first: 1, last: 10 }
    }
}

impl PageRange {
    #[must_use]
    pub fn iter(&self) -> RangeInclusive<u32> {
        self.first..=self.last
    }

    /// Number of pages in the range, saturating at `u32::MAX`.
    #[must_use]
    pub fn len(&self) -> u32 {
        if self.last < self.first {
            0
        } else {
            (self.last - self.first).saturating_add(1)
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Inclusive engagement thresholds an ad must meet to count as a "top" ad.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub min_ctr: f64,
    pub min_likes: i64,
    pub min_comments: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_ctr: 0.05,
            min_likes: 2000,
            min_comments: 150,
        }
    }
}

impl Thresholds {
    /// `true` when every metric meets its threshold.
    #[must_use]
    pub fn passes(&self, ctr: f64, likes: i64, comments: i64) -> bool {
        ctr >= self.min_ctr && likes >= self.min_likes && comments >= self.min_comments
    }

    /// [`Self::passes`] over a record, with absent counts treated as `0`.
    #[must_use]
    pub fn admits(&self, record: &AdRecord) -> bool {
        self.passes(
            record.ctr,
            record.likes.unwrap_or(0),
            record.comments.unwrap_or(0),
        )
    }
}

/// Fixed listing-endpoint parameters sent with every page request of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingQuery {
    /// Look-back window in days.
    pub period: u32,
    /// Page size.
    pub limit: u32,
    pub country: String,
    pub order_by: String,
    pub like: u32,
    pub ad_format: u32,
    pub ad_language: String,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            period: 7,
            limit: 10,
            country: "US".to_string(),
            order_by: "ctr".to_string(),
            like: 1,
            ad_format: 2,
            ad_language: "en".to_string(),
        }
    }
}

/// Load and validate a run configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_run_config(path: &Path) -> Result<RunConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_run_config(&content)
}

fn parse_run_config(content: &str) -> Result<RunConfig, ConfigError> {
    let mut run_config: RunConfig = serde_yaml::from_str(content)?;
    for id in &mut run_config.industries {
        *id = id.trim().to_string();
    }
    validate_run_config(&run_config)?;
    Ok(run_config)
}

fn validate_run_config(run_config: &RunConfig) -> Result<(), ConfigError> {
    if run_config.industries.is_empty() {
        return Err(ConfigError::Validation(
            "at least one industry id is required".to_string(),
        ));
    }

    if let Some(pos) = run_config.industries.iter().position(String::is_empty) {
        return Err(ConfigError::Validation(format!(
            "industry id at position {pos} is empty"
        )));
    }

    let pages = run_config.pages;
    if pages.first == 0 {
        return Err(ConfigError::Validation(
            "pages.first must be at least 1".to_string(),
        ));
    }
    if pages.last < pages.first {
        return Err(ConfigError::Validation(format!(
            "pages.last ({}) is before pages.first ({})",
            pages.last, pages.first
        )));
    }
    if pages.len() > MAX_PAGES_PER_INDUSTRY {
        return Err(ConfigError::Validation(format!(
            "page range {}..={} exceeds {MAX_PAGES_PER_INDUSTRY} pages",
            pages.first, pages.last
        )));
    }

    let t = run_config.thresholds;
    if !t.min_ctr.is_finite() || !(0.0..=1.0).contains(&t.min_ctr) {
        return Err(ConfigError::Validation(format!(
            "thresholds.min_ctr must be within [0, 1], got {}",
            t.min_ctr
        )));
    }
    if t.min_likes < 0 || t.min_comments < 0 {
        return Err(ConfigError::Validation(
            "thresholds.min_likes and thresholds.min_comments must be non-negative".to_string(),
        ));
    }

    let q = &run_config.query;
    if q.limit == 0 {
        return Err(ConfigError::Validation(
            "query.limit must be at least 1".to_string(),
        ));
    }
    for (field, value) in [
        ("country", &q.country),
        ("order_by", &q.order_by),
        ("ad_language", &q.ad_language),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "query.{field} must be non-empty"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "run_config_test.rs"]
mod tests;
