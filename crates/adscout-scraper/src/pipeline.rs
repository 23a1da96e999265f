//! Collection run: industries × pages → listing → detail → normalize → filter.
//!
//! Requests are issued strictly one after another. A failed listing page or
//! detail request is recorded in the [`RunReport`] and skipped; only errors
//! that would fail every request (see [`ScraperError::is_run_fatal`]) abort
//! the run.

use std::time::Duration;

use adscout_core::{
    AdRecord, ListingQuery, PageRange, ResultTable, RunConfig, Taxonomy, Thresholds,
};

use crate::client::AdsClient;
use crate::error::ScraperError;
use crate::normalize::normalize_ad;
use crate::report::{Item, ItemOutcome, RunReport};
use crate::types::AdSummary;

/// Explicit inputs for one run.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub industries: Vec<String>,
    pub pages: PageRange,
    pub query: ListingQuery,
    pub thresholds: Thresholds,
    /// Pause between consecutive HTTP requests; `0` disables pacing.
    pub inter_request_delay_ms: u64,
}

impl RunPlan {
    #[must_use]
    pub fn from_run_config(run_config: &RunConfig, inter_request_delay_ms: u64) -> Self {
        Self {
            industries: run_config.industries.clone(),
            pages: run_config.pages,
            query: run_config.query.clone(),
            thresholds: run_config.thresholds,
            inter_request_delay_ms,
        }
    }
}

/// Output of a run: every collected ad, the ads that passed the thresholds,
/// and the per-item report.
#[derive(Debug, Clone)]
pub struct Collection {
    pub all: ResultTable,
    pub top: ResultTable,
    pub report: RunReport,
}

/// One listing page of one configured industry occurrence.
#[derive(Clone, Copy)]
struct PagePosition<'a> {
    industry_id: &'a str,
    occurrence: usize,
    page: u32,
}

impl PagePosition<'_> {
    fn listing_item(self) -> Item {
        Item::ListingPage {
            industry_id: self.industry_id.to_owned(),
            occurrence: self.occurrence,
            page: self.page,
        }
    }

    fn detail_item(self, ad_id: Option<String>) -> Item {
        Item::AdDetail {
            industry_id: self.industry_id.to_owned(),
            occurrence: self.occurrence,
            page: self.page,
            ad_id,
        }
    }
}

/// Sleeps between requests, never before the first one.
struct Pacer {
    delay: Duration,
    is_first: bool,
}

impl Pacer {
    fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            is_first: true,
        }
    }

    async fn wait(&mut self) {
        if !self.is_first && !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.is_first = false;
    }
}

/// Walks every configured industry and page, building the all-ads and
/// top-ads tables.
///
/// Each industry occurrence in `plan.industries` yields one sheet in each
/// table, named by [`Taxonomy::sheet_name`], even when every page failed.
/// Ads are not deduplicated.
///
/// # Errors
///
/// Returns a run-fatal [`ScraperError`] (invalid base URL or header). Every
/// other failure is recorded in [`Collection::report`] instead.
pub async fn collect(
    client: &AdsClient,
    plan: &RunPlan,
    taxonomy: &Taxonomy,
) -> Result<Collection, ScraperError> {
    let mut all = ResultTable::default();
    let mut top = ResultTable::default();
    let mut report = RunReport::start();
    let mut pacer = Pacer::new(plan.inter_request_delay_ms);

    for (occurrence, industry_id) in plan.industries.iter().enumerate() {
        let name = taxonomy.sheet_name(industry_id);
        let mut records: Vec<AdRecord> = Vec::new();
        let mut top_records: Vec<AdRecord> = Vec::new();

        for page in plan.pages.iter() {
            let at = PagePosition {
                industry_id,
                occurrence,
                page,
            };
            pacer.wait().await;
            let ads = match client.list_ads(industry_id, page, &plan.query).await {
                Ok(ads) => {
                    tracing::debug!(industry = %industry_id, page, count = ads.len(), "fetched listing page");
                    report.push(at.listing_item(), ItemOutcome::Succeeded);
                    ads
                }
                Err(e) if e.is_run_fatal() => return Err(e),
                Err(e) => {
                    tracing::warn!(industry = %industry_id, page, error = %e, "listing request failed");
                    report.push(
                        at.listing_item(),
                        ItemOutcome::Failed {
                            reason: e.to_string(),
                        },
                    );
                    continue;
                }
            };

            for summary in ads {
                let Some(record) =
                    fetch_record(client, &mut pacer, &mut report, taxonomy, at, &summary)
                        .await?
                else {
                    continue;
                };

                if plan.thresholds.admits(&record) {
                    top_records.push(record.clone());
                }
                records.push(record);
            }
        }

        tracing::info!(
            industry = %industry_id,
            sheet = %name,
            ads = records.len(),
            top_ads = top_records.len(),
            "industry collected"
        );

        all.push_sheet(industry_id, &name).records = records;
        top.push_sheet(industry_id, &name).records = top_records;
    }

    report.finish();
    Ok(Collection { all, top, report })
}

/// Fetches detail for one listed ad and normalizes it.
///
/// `Ok(None)` means the ad was skipped and the reason recorded.
async fn fetch_record(
    client: &AdsClient,
    pacer: &mut Pacer,
    report: &mut RunReport,
    taxonomy: &Taxonomy,
    at: PagePosition<'_>,
    summary: &AdSummary,
) -> Result<Option<AdRecord>, ScraperError> {
    let PagePosition {
        industry_id, page, ..
    } = at;
    let item = at.detail_item(summary.id.clone());

    let Some(ad_id) = summary.id.as_deref() else {
        tracing::warn!(industry = %industry_id, page, "listing entry has no ad id");
        report.push(
            item,
            ItemOutcome::Failed {
                reason: "listing entry has no ad id".to_owned(),
            },
        );
        return Ok(None);
    };

    pacer.wait().await;
    match client.ad_detail(ad_id).await {
        Ok(detail) => {
            report.push(item, ItemOutcome::Succeeded);
            Ok(Some(normalize_ad(summary, &detail, taxonomy)))
        }
        Err(e) if e.is_run_fatal() => Err(e),
        Err(e) => {
            tracing::warn!(industry = %industry_id, page, ad_id, error = %e, "detail request failed");
            report.push(
                item,
                ItemOutcome::Failed {
                    reason: e.to_string(),
                },
            );
            Ok(None)
        }
    }
}
