//! Normalization from listing + detail responses to [`adscout_core::AdRecord`].

use adscout_core::{sanitize_opt, sanitize_string, AdRecord, Taxonomy};

use crate::types::{AdDetail, AdSummary};

/// Merges an ad's listing summary and detail record into one flat row.
///
/// Every string field is stripped of ASCII control characters. Numeric fields
/// are copied unchanged; a missing CTR becomes `0.0`. The ad's own industry
/// key is resolved against `taxonomy` (`"-"` when it does not resolve).
#[must_use]
pub fn normalize_ad(summary: &AdSummary, detail: &AdDetail, taxonomy: &Taxonomy) -> AdRecord {
    let industry = summary
        .industry_key
        .as_deref()
        .map_or(adscout_core::taxonomy::UNRESOLVED_INDUSTRY, |key| {
            taxonomy.display_name(key)
        });
    let video = summary.video_info.as_ref();

    AdRecord {
        ad_id: summary
            .id
            .as_deref()
            .map(sanitize_string)
            .unwrap_or_default(),
        brand_name: sanitize_opt(summary.brand_name.as_deref()),
        industry: sanitize_string(industry),
        ctr: summary.ctr.unwrap_or(0.0),
        objective: sanitize_opt(summary.objective_key.as_deref()),
        likes: summary.like,
        comments: detail.comment,
        shares: detail.share,
        video_url: sanitize_opt(video.and_then(|v| v.rendition_url())),
        video_cover_url: sanitize_opt(video.and_then(|v| v.cover.as_deref())),
        video_duration: video.and_then(|v| v.duration),
        landing_page: sanitize_opt(detail.landing_page.as_deref()),
        description: sanitize_opt(summary.ad_title.as_deref()),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
