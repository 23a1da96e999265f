//! Per-item outcomes of a collection run.
//!
//! Every listing request and every detail request the pipeline issues is
//! recorded as an [`ItemResult`], so callers can tell exactly which pages and
//! ads made it into the result tables and which were skipped.

use chrono::{DateTime, Utc};

/// One unit of work the pipeline attempted.
///
/// `occurrence` is the industry's position in the configured list, so a
/// repeated industry id keeps its passes apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    ListingPage {
        industry_id: String,
        occurrence: usize,
        page: u32,
    },
    AdDetail {
        industry_id: String,
        occurrence: usize,
        page: u32,
        /// `None` when the listing entry carried no id.
        ad_id: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Succeeded,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemResult {
    pub item: Item,
    pub outcome: ItemOutcome,
}

impl ItemResult {
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, ItemOutcome::Failed { .. })
    }

    /// Human-readable failure message, `None` for successes.
    #[must_use]
    pub fn failure_message(&self) -> Option<String> {
        let ItemOutcome::Failed { reason } = &self.outcome else {
            return None;
        };
        Some(match &self.item {
            Item::ListingPage {
                industry_id, page, ..
            } => format!(
                "Error retrieving data for industry {industry_id} on page {page}: {reason}"
            ),
            Item::AdDetail { ad_id, .. } => format!(
                "Error processing ad {}: {reason}",
                ad_id.as_deref().unwrap_or("<missing id>")
            ),
        })
    }
}

/// Aggregated outcome of one run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub items: Vec<ItemResult>,
}

impl RunReport {
    #[must_use]
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            items: Vec::new(),
        }
    }

    pub(crate) fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub(crate) fn push(&mut self, item: Item, outcome: ItemOutcome) {
        self.items.push(ItemResult { item, outcome });
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemResult> {
        self.items.iter().filter(|r| r.is_failure())
    }

    /// `true` when nothing failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }

    #[must_use]
    pub fn failure_messages(&self) -> Vec<String> {
        self.items
            .iter()
            .filter_map(ItemResult::failure_message)
            .collect()
    }

    /// Pages of the configured industry at position `occurrence` whose listing
    /// request succeeded, in request order.
    #[must_use]
    pub fn succeeded_pages(&self, occurrence: usize) -> Vec<u32> {
        self.listing_pages(occurrence, false)
    }

    /// Pages of the configured industry at position `occurrence` whose listing
    /// request failed, in request order.
    #[must_use]
    pub fn failed_pages(&self, occurrence: usize) -> Vec<u32> {
        self.listing_pages(occurrence, true)
    }

    fn listing_pages(&self, occurrence: usize, failed: bool) -> Vec<u32> {
        self.items
            .iter()
            .filter(|r| r.is_failure() == failed)
            .filter_map(|r| match &r.item {
                Item::ListingPage {
                    occurrence: at,
                    page,
                    ..
                } if *at == occurrence => Some(*page),
                _ => None,
            })
            .collect()
    }

    /// Ad ids whose detail request failed.
    #[must_use]
    pub fn failed_ads(&self) -> Vec<Option<&str>> {
        self.failures()
            .filter_map(|r| match &r.item {
                Item::AdDetail { ad_id, .. } => Some(ad_id.as_deref()),
                Item::ListingPage { .. } => None,
            })
            .collect()
    }

    #[must_use]
    pub fn listing_failure_count(&self) -> usize {
        self.failures()
            .filter(|r| matches!(r.item, Item::ListingPage { .. }))
            .count()
    }

    #[must_use]
    pub fn detail_failure_count(&self) -> usize {
        self.failures()
            .filter(|r| matches!(r.item, Item::AdDetail { .. }))
            .count()
    }

    /// Number of ads whose detail fetch succeeded, i.e. rows in the all-ads table.
    #[must_use]
    pub fn ads_collected(&self) -> usize {
        self.items
            .iter()
            .filter(|r| !r.is_failure() && matches!(r.item, Item::AdDetail { .. }))
            .count()
    }

    /// Wall-clock duration, once finished.
    #[must_use]
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|end| end - self.started_at)
    }
}
