//! Industry taxonomy: the two-level category tree the ads API keys industries by.
//!
//! The tree is loaded from a JSON document shaped like
//!
//! ```json
//! [
//!   { "id": "22000000000", "name": "Apparel & Accessories",
//!     "sub_industry": [ { "id": "22102000000", "name": "Bags" } ] }
//! ]
//! ```
//!
//! Ad listings report industries as `label_<id>`; lookups strip that prefix.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Prefix the listing endpoint puts in front of industry ids.
pub const LABEL_PREFIX: &str = "label_";

/// Cell text used for an ad whose industry key is not in the taxonomy.
pub const UNRESOLVED_INDUSTRY: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sub_industry: Vec<Category>,
}

/// The full category tree, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Taxonomy {
    categories: Vec<Category>,
}

impl Taxonomy {
    #[must_use]
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Number of top-level categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// See [`resolve`].
    #[must_use]
    pub fn resolve(&self, industry_id: &str) -> Option<&str> {
        resolve(industry_id, &self.categories)
    }

    /// Name for an ad's own industry column: the resolved name, or `"-"`.
    #[must_use]
    pub fn display_name(&self, industry_key: &str) -> &str {
        self.resolve(industry_key).unwrap_or(UNRESOLVED_INDUSTRY)
    }

    /// Name for a configured industry's sheet: the resolved name, or
    /// `Industry_<id>` with the id exactly as configured.
    #[must_use]
    pub fn sheet_name(&self, industry_id: &str) -> String {
        self.resolve(industry_id)
            .map_or_else(|| format!("Industry_{industry_id}"), str::to_owned)
    }
}

/// Looks up the name for `industry_id` in a two-level category tree.
///
/// A leading `label_` is stripped first. Top-level categories are scanned in
/// order; each one's id is checked before its `sub_industry` list. The first
/// match wins. Returns `None` when nothing matches, including for an empty
/// tree.
#[must_use]
pub fn resolve<'a>(industry_id: &str, categories: &'a [Category]) -> Option<&'a str> {
    let id = industry_id
        .strip_prefix(LABEL_PREFIX)
        .unwrap_or(industry_id);

    for category in categories {
        if category.id == id {
            return Some(category.name.as_str());
        }
        if let Some(sub) = category.sub_industry.iter().find(|sub| sub.id == id) {
            return Some(sub.name.as_str());
        }
    }

    None
}

/// Load the taxonomy from a JSON file.
///
/// # Errors
///
/// Returns [`ConfigError::FileIo`] if the file cannot be read and
/// [`ConfigError::TaxonomyParse`] if it is not a JSON array of categories.
pub fn load_taxonomy(path: &Path) -> Result<Taxonomy, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_taxonomy(&content).map_err(|e| ConfigError::TaxonomyParse {
        path: path.display().to_string(),
        source: e,
    })
}

fn parse_taxonomy(content: &str) -> Result<Taxonomy, serde_json::Error> {
    serde_json::from_str(content)
}
