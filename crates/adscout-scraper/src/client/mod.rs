//! HTTP client for the RapidAPI-hosted TikTok trending-ads API.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use adscout_core::ListingQuery;

use crate::error::ScraperError;
use crate::retry::retry_with_backoff;
use crate::types::{AdDetail, AdSummary, DetailResponse, ListingResponse};

const LISTING_PATH: &str = "api/trending/ads";
const DETAIL_PATH: &str = "api/trending/ads/detail";

/// Client for the trending-ads listing and detail endpoints.
///
/// Every request carries the `x-rapidapi-key` / `x-rapidapi-host` header pair.
/// Non-2xx responses surface as [`ScraperError::UnexpectedStatus`] (or
/// [`ScraperError::RateLimited`] for 429) and bodies that do not decode as
/// [`ScraperError::Deserialize`].
#[derive(Debug)]
pub struct AdsClient {
    client: Client,
    base_url: Url,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl AdsClient {
    /// Creates a client rooted at `base_url`, e.g.
    /// `https://tiktok-api23.p.rapidapi.com` or a wiremock server URI.
    ///
    /// Retries are disabled; see [`Self::with_retry_policy`].
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidHeader`] if the key or host is not a valid
    ///   header value.
    /// - [`ScraperError::InvalidBaseUrl`] if `base_url` does not parse.
    /// - [`ScraperError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        api_key: &str,
        api_host: &str,
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ScraperError> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(api_key).map_err(|_| ScraperError::InvalidHeader {
            header: "x-rapidapi-key",
        })?;
        key.set_sensitive(true);
        headers.insert("x-rapidapi-key", key);
        headers.insert(
            "x-rapidapi-host",
            HeaderValue::from_str(api_host).map_err(|_| ScraperError::InvalidHeader {
                header: "x-rapidapi-host",
            })?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        // A trailing slash makes `Url::join` append to the base path instead
        // of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ScraperError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ScraperError::InvalidBaseUrl {
                base_url: normalised,
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url,
            max_retries: 0,
            backoff_base_secs: 0,
        })
    }

    /// Enables retries of transient failures (429, 5xx, timeouts).
    #[must_use]
    pub fn with_retry_policy(mut self, max_retries: u32, backoff_base_secs: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_secs = backoff_base_secs;
        self
    }

    /// Fetches one page of ads for `industry_id`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`] on network failure.
    /// - [`ScraperError::RateLimited`] / [`ScraperError::UnexpectedStatus`] on
    ///   non-2xx responses.
    /// - [`ScraperError::Deserialize`] if the body is not the expected envelope.
    pub async fn list_ads(
        &self,
        industry_id: &str,
        page: u32,
        query: &ListingQuery,
    ) -> Result<Vec<AdSummary>, ScraperError> {
        let url = self.listing_url(industry_id, page, query)?;
        let response: ListingResponse = self
            .get_json(&url, || format!("listing(industry={industry_id}, page={page})"))
            .await?;
        Ok(response.into_materials())
    }

    /// Fetches the engagement detail for one ad.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_ads`].
    pub async fn ad_detail(&self, ad_id: &str) -> Result<AdDetail, ScraperError> {
        let url = self.build_url(DETAIL_PATH, &[("ads_id", ad_id)])?;
        let response: DetailResponse = self
            .get_json(&url, || format!("detail(ads_id={ad_id})"))
            .await?;
        Ok(response.data.unwrap_or_default())
    }

    fn listing_url(
        &self,
        industry_id: &str,
        page: u32,
        query: &ListingQuery,
    ) -> Result<Url, ScraperError> {
        let page = page.to_string();
        let period = query.period.to_string();
        let limit = query.limit.to_string();
        let like = query.like.to_string();
        let ad_format = query.ad_format.to_string();
        self.build_url(
            LISTING_PATH,
            &[
                ("page", page.as_str()),
                ("period", period.as_str()),
                ("limit", limit.as_str()),
                ("country", query.country.as_str()),
                ("order_by", query.order_by.as_str()),
                ("like", like.as_str()),
                ("ad_format", ad_format.as_str()),
                ("industry", industry_id),
                ("ad_language", query.ad_language.as_str()),
            ],
        )
    }

    /// Joins `path` onto the base URL and appends percent-encoded `params`.
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, ScraperError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| ScraperError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut().extend_pairs(params);
        Ok(url)
    }

    async fn get_json<T, C>(&self, url: &Url, context: C) -> Result<T, ScraperError>
    where
        T: DeserializeOwned,
        C: Fn() -> String,
    {
        let context = &context;
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || async move {
            let response = self.client.get(url.clone()).send().await?;
            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                let retry_after_secs = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(60);
                return Err(ScraperError::RateLimited {
                    url: redact(url),
                    retry_after_secs,
                });
            }

            if !status.is_success() {
                return Err(ScraperError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: redact(url),
                });
            }

            let body = response.text().await?;
            serde_json::from_str::<T>(&body).map_err(|e| ScraperError::Deserialize {
                context: context(),
                source: e,
            })
        })
        .await
    }
}

/// URL without its query string, for error messages.
fn redact(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
