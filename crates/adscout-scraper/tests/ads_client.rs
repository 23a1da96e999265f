//! Integration tests for `AdsClient` using wiremock HTTP mocks.

use adscout_core::ListingQuery;
use adscout_scraper::{AdsClient, ScraperError};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> AdsClient {
    AdsClient::new("test-key", "ads.example.com", base_url, 5, "adscout-test/0.1")
        .expect("client construction should not fail")
}

// ---------------------------------------------------------------------------
// list_ads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_ads_sends_auth_headers_and_listing_params() {
    let server = MockServer::start().await;

    let body = json!({
        "code": 0,
        "msg": "OK",
        "data": {
            "materials": [
                {
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
                        "video_url": { "720p": "https://cdn.example.com/720.mp4" }
                    }
                },
                { "id": 7312345678901234568_u64, "ctr": "0.01", "like": "12" }
            ]
        }
    });

    Mock::given(method("GET"))
        .and(path("/api/trending/ads"))
        .and(header("x-rapidapi-key", "test-key"))
        .and(header("x-rapidapi-host", "ads.example.com"))
        .and(query_param("page", "2"))
        .and(query_param("period", "7"))
        .and(query_param("limit", "10"))
        .and(query_param("country", "US"))
        .and(query_param("order_by", "ctr"))
        .and(query_param("like", "1"))
        .and(query_param("ad_format", "2"))
        .and(query_param("industry", "22102000000"))
        .and(query_param("ad_language", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let ads = client
        .list_ads("22102000000", 2, &ListingQuery::default())
        .await
        .expect("listing should parse");

    assert_eq!(ads.len(), 2);
    assert_eq!(ads[0].id.as_deref(), Some("7312345678901234567"));
    assert_eq!(ads[0].brand_name.as_deref(), Some("Acme"));
    assert_eq!(ads[0].like, Some(2310));
    assert_eq!(ads[1].id.as_deref(), Some("7312345678901234568"));
    assert_eq!(ads[1].ctr, Some(0.01));
    assert_eq!(ads[1].like, Some(12));
}

#[tokio::test]
async fn list_ads_with_null_data_is_empty_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trending/ads"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "code": 0, "data": null })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let ads = client
        .list_ads("1", 1, &ListingQuery::default())
        .await
        .expect("null data should be an empty page");
    assert!(ads.is_empty());
}

#[tokio::test]
async fn list_ads_server_error_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trending/ads"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .list_ads("1", 1, &ListingQuery::default())
        .await
        .expect_err("500 should fail");

    match err {
        ScraperError::UnexpectedStatus { status, url } => {
            assert_eq!(status, 500);
            assert!(
                !url.contains("industry="),
                "query string should be redacted: {url}"
            );
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn list_ads_429_is_rate_limited_with_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trending/ads"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "17"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .list_ads("1", 1, &ListingQuery::default())
        .await
        .expect_err("429 should fail");

    assert!(
        matches!(
            err,
            ScraperError::RateLimited {
                retry_after_secs: 17,
                ..
            }
        ),
        "expected RateLimited, got {err:?}"
    );
}

#[tokio::test]
async fn list_ads_malformed_json_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trending/ads"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .list_ads("22101000000", 4, &ListingQuery::default())
        .await
        .expect_err("html should not decode");

    match err {
        ScraperError::Deserialize { context, .. } => {
            assert!(context.contains("industry=22101000000"));
            assert!(context.contains("page=4"));
        }
        other => panic!("expected Deserialize, got {other:?}"),
    }
}

#[tokio::test]
async fn retry_policy_recovers_from_transient_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trending/ads"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/trending/ads"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "materials": [{ "id": "1" }] } })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri()).with_retry_policy(2, 0);
    let ads = client
        .list_ads("1", 1, &ListingQuery::default())
        .await
        .expect("second attempt should succeed");
    assert_eq!(ads.len(), 1);
}

// ---------------------------------------------------------------------------
// ad_detail
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ad_detail_reads_engagement_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trending/ads/detail"))
        .and(query_param("ads_id", "7312345678901234567"))
        .and(header("x-rapidapi-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "data": {
                "comment": 180,
                "share": "42",
                "landing_page": "https://acme.example.com/bags"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let detail = client
        .ad_detail("7312345678901234567")
        .await
        .expect("detail should parse");

    assert_eq!(detail.comment, Some(180));
    assert_eq!(detail.share, Some(42));
    assert_eq!(
        detail.landing_page.as_deref(),
        Some("https://acme.example.com/bags")
    );
}

#[tokio::test]
async fn ad_detail_without_data_is_all_absent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trending/ads/detail"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "code": 0 })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let detail = client.ad_detail("1").await.expect("should parse");
    assert_eq!(detail.comment, None);
    assert_eq!(detail.share, None);
    assert_eq!(detail.landing_page, None);
}

#[tokio::test]
async fn ad_detail_not_found_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trending/ads/detail"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.ad_detail("1").await.expect_err("404 should fail");
    assert!(matches!(
        err,
        ScraperError::UnexpectedStatus { status: 404, .. }
    ));
    assert!(!err.is_run_fatal());
}
