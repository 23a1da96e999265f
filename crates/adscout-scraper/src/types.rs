//! Response types for the trending-ads listing and detail endpoints.
//!
//! ## Observed shape
//!
//! ### Envelopes
//! Both endpoints wrap their payload in `{"code": 0, "msg": "OK", "data": ...}`.
//! The listing puts ads under `data.materials`; the detail endpoint puts the
//! record directly under `data`. A missing or `null` `data` is treated as an
//! empty page / an all-absent detail rather than a decode failure.
//!
//! ### Numbers
//! `ctr`, `like`, `comment`, `share` and `duration` arrive as JSON numbers
//! from most regions but as numeric strings (`"0.07"`, `"2310"`) from others.
//! The `lenient_*` deserializers accept both; an empty string is absent.
//!
//! ### Ids
//! Ad ids are large integers that some responses quote and some don't. They
//! are always kept as strings.
//!
//! ### Text
//! Free-text fields (`brand_name`, `ad_title`, ...) are normally strings but
//! occasionally arrive as bare numbers; those are kept as their decimal text.
//! Any other JSON type in a text field is treated as absent, so one odd ad
//! never fails the whole page.
//!
//! ### `video_info`
//! Optional. `video_url` is a map keyed by rendition (`"540p"`, `"720p"`, ...);
//! only `"720p"` is exported. `cover` is normally a URL string.

use std::collections::HashMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Rendition exported in the "Video Url" column.
pub const VIDEO_RENDITION: &str = "720p";

/// Top-level response from `GET /api/trending/ads`.
#[derive(Debug, Default, Deserialize)]
pub struct ListingResponse {
    #[serde(default)]
    pub data: Option<ListingData>,
}

impl ListingResponse {
    /// The ads on this page; empty when `data` or `materials` is absent.
    #[must_use]
    pub fn into_materials(self) -> Vec<AdSummary> {
        self.data.map(|d| d.materials).unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub materials: Vec<AdSummary>,
}

/// One ad as returned by the listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AdSummary {
    /// Ad identifier, used as `ads_id` for the detail request.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub brand_name: Option<String>,
    /// Industry as `label_<id>`.
    #[serde(default, deserialize_with = "lenient_text")]
    pub industry_key: Option<String>,
    /// Click-through rate as a fraction. Treated as `0` when absent.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ctr: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub objective_key: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub like: Option<i64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub ad_title: Option<String>,
    #[serde(default)]
    pub video_info: Option<VideoInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VideoInfo {
    /// Seconds.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub cover: Option<String>,
    #[serde(default)]
    pub video_url: Option<HashMap<String, Value>>,
}

impl VideoInfo {
    /// URL of the `720p` rendition, if present and a string.
    #[must_use]
    pub fn rendition_url(&self) -> Option<&str> {
        self.video_url
            .as_ref()
            .and_then(|urls| urls.get(VIDEO_RENDITION))
            .and_then(Value::as_str)
    }
}

/// Top-level response from `GET /api/trending/ads/detail`.
#[derive(Debug, Default, Deserialize)]
pub struct DetailResponse {
    #[serde(default)]
    pub data: Option<AdDetail>,
}

/// Engagement detail for one ad.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AdDetail {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub comment: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub share: Option<i64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub landing_page: Option<String>,
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("number {n} is not representable as f64"))),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<f64>()
                .map(Some)
                .map_err(|e| D::Error::custom(format!("invalid number {s:?}: {e}")))
        }
        Some(other) => Err(D::Error::custom(format!("expected a number, got {other}"))),
    }
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(integral))
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected an integer, got {n}"))),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("expected an integer, got {s:?}")))
        }
        Some(other) => Err(D::Error::custom(format!(
            "expected an integer, got {other}"
        ))),
    }
}

/// `2000.0` → `2000`; fractional or out-of-range values → `None`.
#[allow(clippy::cast_possible_truncation)]
fn integral(f: f64) -> Option<i64> {
    #[allow(clippy::cast_precision_loss)]
    let in_range = f >= i64::MIN as f64 && f <= i64::MAX as f64;
    (f.is_finite() && f.fract() == 0.0 && in_range).then_some(f as i64)
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!("expected an ad id, got {other}"))),
    }
}

/// Strings pass through; anything that is not a string or number is dropped.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_reads_materials() {
        let body = r#"{
            "code": 0,
            "msg": "OK",
            "data": {
                "materials": [{
                    "id": "7312345678901234567",
                    "brand_name": "Acme",
                    "industry_key": "label_22102000000",
                    "ctr": 0.07,
                    "objective_key": "campaign_objective_conversion",
                    "like": 2310,
                    "ad_title": "Summer bags",
                    "video_info": {
                        "duration": 15.2,
                        "cover": "https://cdn.example.com/cover.jpg",
                        "video_url": {"540p": "https://cdn.example.com/540.mp4", "720p": "https://cdn.example.com/720.mp4"}
                    }
                }],
                "pagination": {"page": 1, "size": 10, "total": 500}
            }
        }"#;
        let ads = serde_json::from_str::<ListingResponse>(body)
            .unwrap()
            .into_materials();
        assert_eq!(ads.len(), 1);
        let ad = &ads[0];
        assert_eq!(ad.id.as_deref(), Some("7312345678901234567"));
        assert_eq!(ad.like, Some(2310));
        assert_eq!(ad.ctr, Some(0.07));
        let video = ad.video_info.as_ref().unwrap();
        assert_eq!(video.rendition_url(), Some("https://cdn.example.com/720.mp4"));
        assert_eq!(video.duration, Some(15.2));
    }

    #[test]
    fn listing_without_data_is_empty() {
        let ads = serde_json::from_str::<ListingResponse>(r#"{"code": 0}"#)
            .unwrap()
            .into_materials();
        assert!(ads.is_empty());
        let ads = serde_json::from_str::<ListingResponse>(r#"{"data": null}"#)
            .unwrap()
            .into_materials();
        assert!(ads.is_empty());
        let ads = serde_json::from_str::<ListingResponse>(r#"{"data": {}}"#)
            .unwrap()
            .into_materials();
        assert!(ads.is_empty());
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let ad: AdSummary =
            serde_json::from_str(r#"{"id": 42, "ctr": "0.05", "like": "2000"}"#).unwrap();
        assert_eq!(ad.id.as_deref(), Some("42"));
        assert_eq!(ad.ctr, Some(0.05));
        assert_eq!(ad.like, Some(2000));
    }

    #[test]
    fn integral_floats_are_accepted_as_counts() {
        let detail: AdDetail = serde_json::from_str(r#"{"comment": 150.0, "share": "12.0"}"#).unwrap();
        assert_eq!(detail.comment, Some(150));
        assert_eq!(detail.share, Some(12));
    }

    #[test]
    fn fractional_count_is_rejected() {
        assert!(serde_json::from_str::<AdDetail>(r#"{"comment": 1.5}"#).is_err());
    }

    #[test]
    fn garbage_number_is_rejected() {
        assert!(serde_json::from_str::<AdSummary>(r#"{"ctr": "high"}"#).is_err());
        assert!(serde_json::from_str::<AdSummary>(r#"{"like": [1]}"#).is_err());
    }

    #[test]
    fn empty_and_null_numbers_are_absent() {
        let ad: AdSummary = serde_json::from_str(r#"{"ctr": "", "like": null}"#).unwrap();
        assert_eq!(ad.ctr, None);
        assert_eq!(ad.like, None);
        assert_eq!(ad.id, None);
    }

    #[test]
    fn video_info_without_720p() {
        let video: VideoInfo =
            serde_json::from_str(r#"{"video_url": {"540p": "https://x/540.mp4"}}"#).unwrap();
        assert_eq!(video.rendition_url(), None);
        let video: VideoInfo = serde_json::from_str(r#"{"video_url": null}"#).unwrap();
        assert_eq!(video.rendition_url(), None);
    }

    #[test]
    fn non_string_cover_is_dropped() {
        let video: VideoInfo = serde_json::from_str(r#"{"cover": {}}"#).unwrap();
        assert_eq!(video.cover, None);
    }

    #[test]
    fn non_string_text_fields_do_not_fail_the_page() {
        let body = r#"{"data": {"materials": [
            {"id": "good", "brand_name": "Acme"},
            {"id": "odd", "brand_name": 12345, "ad_title": 7, "objective_key": true, "industry_key": {}}
        ]}}"#;
        let ads = serde_json::from_str::<ListingResponse>(body)
            .unwrap()
            .into_materials();
        assert_eq!(ads.len(), 2);
        assert_eq!(ads[0].brand_name.as_deref(), Some("Acme"));
        assert_eq!(ads[1].brand_name.as_deref(), Some("12345"));
        assert_eq!(ads[1].ad_title.as_deref(), Some("7"));
        assert_eq!(ads[1].objective_key, None);
        assert_eq!(ads[1].industry_key, None);
    }

    #[test]
    fn numeric_landing_page_is_kept_as_text() {
        let detail: AdDetail = serde_json::from_str(r#"{"landing_page": 42}"#).unwrap();
        assert_eq!(detail.landing_page.as_deref(), Some("42"));
    }

    #[test]
    fn detail_envelope_without_data_is_default() {
        let resp: DetailResponse = serde_json::from_str(r#"{"code": 0}"#).unwrap();
        assert!(resp.data.is_none());
    }
}
