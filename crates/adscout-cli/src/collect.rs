//! The `collect` command.
//!
//! Item-level failures (a listing page, a single ad) are printed and skipped;
//! only configuration problems, run-fatal client errors and workbook I/O
//! failures end the command with an error.

use std::path::{Path, PathBuf};

use adscout_core::{load_run_config, load_taxonomy, AppConfig, Taxonomy};
use adscout_scraper::{collect, AdsClient, Collection, RunPlan};

pub(crate) const ALL_ADS_FILE: &str = "tiktok_ads_data.xlsx";
pub(crate) const TOP_ADS_FILE: &str = "top_ads_data.xlsx";
pub(crate) const COMBINED_TOP_ADS_FILE: &str = "combined_top_ads_data.xlsx";

/// Where one run writes its three workbooks.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct OutputPaths {
    pub all: PathBuf,
    pub top: PathBuf,
    pub combined: PathBuf,
}

impl OutputPaths {
    pub(crate) fn in_dir(dir: &Path) -> Self {
        Self {
            all: dir.join(ALL_ADS_FILE),
            top: dir.join(TOP_ADS_FILE),
            combined: dir.join(COMBINED_TOP_ADS_FILE),
        }
    }
}

pub(crate) fn build_ads_client(config: &AppConfig) -> anyhow::Result<AdsClient> {
    let key = config.require_rapidapi_key()?;
    let client = AdsClient::new(
        key,
        &config.rapidapi_host,
        &config.api_base_url,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build ads client: {e}"))?;
    Ok(client.with_retry_policy(config.max_retries, config.retry_backoff_base_secs))
}

/// Runs a full collection and writes the all-ads, top-ads and combined
/// top-ads workbooks.
///
/// When `dry_run` is `true` the plan is printed and nothing is requested or
/// written; no API key is needed.
///
/// # Errors
///
/// Returns an error if the run config or taxonomy cannot be loaded, the
/// client cannot be built (including a missing API key), the run aborts on a run-fatal error, or a workbook
/// cannot be written. Failed pages and ads are printed, not propagated.
pub(crate) async fn run_collect(
    config: &AppConfig,
    run_config_path: Option<&Path>,
    out_dir: Option<&Path>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let run_config_path = run_config_path.unwrap_or(config.run_config_path.as_path());
    let run_config = load_run_config(run_config_path).map_err(|e| {
        anyhow::anyhow!(
            "failed to load run config {}: {e}",
            run_config_path.display()
        )
    })?;
    let taxonomy = load_taxonomy(&config.taxonomy_path)?;
    tracing::debug!(categories = taxonomy.len(), "taxonomy loaded");

    let plan = RunPlan::from_run_config(&run_config, config.inter_request_delay_ms);
    let out_dir = out_dir.unwrap_or(config.output_dir.as_path());
    let paths = OutputPaths::in_dir(out_dir);

    if dry_run {
        for line in dry_run_lines(&plan, &taxonomy, &paths) {
            println!("{line}");
        }
        return Ok(());
    }

    std::fs::create_dir_all(out_dir).map_err(|e| {
        anyhow::anyhow!("failed to create output dir {}: {e}", out_dir.display())
    })?;

    let client = build_ads_client(config)?;
    tracing::info!(
        industries = plan.industries.len(),
        first_page = plan.pages.first,
        last_page = plan.pages.last,
        "starting collection run"
    );
    let collection = collect(&client, &plan, &taxonomy).await?;

    for message in collection.report.failure_messages() {
        eprintln!("{message}");
    }
    for line in summary_lines(&collection) {
        println!("{line}");
    }

    write_outputs(&collection, &paths)?;

    if let Some(elapsed) = collection.report.elapsed() {
        tracing::info!(
            elapsed_secs = elapsed.num_seconds(),
            ads = collection.report.ads_collected(),
            listing_failures = collection.report.listing_failure_count(),
            detail_failures = collection.report.detail_failure_count(),
            "collection run finished"
        );
    }
    println!(
        "Data collection completed. All ads saved to {} and top ads saved to {}; combined top ads saved to {}",
        paths.all.display(),
        paths.top.display(),
        paths.combined.display()
    );

    Ok(())
}

fn write_outputs(collection: &Collection, paths: &OutputPaths) -> anyhow::Result<()> {
    adscout_export::write_result_table(&collection.all, &paths.all)
        .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", paths.all.display()))?;
    adscout_export::write_result_table(&collection.top, &paths.top)
        .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", paths.top.display()))?;
    adscout_export::combine_workbook(&paths.top, &paths.combined).map_err(|e| {
        anyhow::anyhow!("failed to write {}: {e}", paths.combined.display())
    })?;
    Ok(())
}

/// One line per configured industry: sheet name, id and record counts.
pub(crate) fn summary_lines(collection: &Collection) -> Vec<String> {
    collection
        .all
        .sheets
        .iter()
        .zip(&collection.top.sheets)
        .map(|(all, top)| {
            let failed_pages = collection.report.failed_pages(all.occurrence);
            let line = format!(
                "{} ({}): {} ads, {} top ads",
                all.name,
                all.industry_id,
                all.records.len(),
                top.records.len()
            );
            if failed_pages.is_empty() {
                line
            } else {
                let pages: Vec<String> = failed_pages.iter().map(ToString::to_string).collect();
                format!("{line}, failed pages [{}]", pages.join(", "))
            }
        })
        .collect()
}

pub(crate) fn dry_run_lines(plan: &RunPlan, taxonomy: &Taxonomy, paths: &OutputPaths) -> Vec<String> {
    let mut lines = vec![format!(
        "dry-run: would collect pages {}-{} for {} industries (min ctr {}, min likes {}, min comments {})",
        plan.pages.first,
        plan.pages.last,
        plan.industries.len(),
        plan.thresholds.min_ctr,
        plan.thresholds.min_likes,
        plan.thresholds.min_comments
    )];
    lines.extend(
        plan.industries
            .iter()
            .map(|id| format!("  {id} -> {}", taxonomy.sheet_name(id))),
    );
    lines.push(format!(
        "outputs: {}, {}, {}",
        paths.all.display(),
        paths.top.display(),
        paths.combined.display()
    ));
    lines
}

#[cfg(test)]
#[path = "collect_test.rs"]
mod tests;
