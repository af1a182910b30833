//! Integration tests for `CatalogClient` using wiremock HTTP mocks.

use chrono::NaiveDate;
use msr_youtube::{CatalogClient, YoutubeError};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> CatalogClient {
    CatalogClient::with_base_url("test-token", 30, 0, 0, base_url)
        .expect("client construction should not fail")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

#[tokio::test]
async fn list_video_ids_follows_next_page_token() {
    let server = MockServer::start().await;

    let page_one = serde_json::json!({
        "items": [
            { "id": { "videoId": "vid-1" } },
            { "id": { "videoId": "vid-2" } }
        ],
        "nextPageToken": "PAGE2"
    });
    let page_two = serde_json::json!({
        "items": [
            { "id": { "videoId": "vid-3" } }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("channelId", "UC123"))
        .and(query_param_is_missing("pageToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&page_one))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("pageToken", "PAGE2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&page_two))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let ids = client
        .list_video_ids("UC123", date(2025, 8, 1), date(2025, 8, 31))
        .await
        .expect("pagination should succeed");

    assert_eq!(ids, vec!["vid-1", "vid-2", "vid-3"]);
}

#[tokio::test]
async fn list_video_ids_sends_period_bounds_as_instants() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("publishedAfter", "2025-08-01T00:00:00Z"))
        .and(query_param("publishedBefore", "2025-08-31T23:59:59Z"))
        .and(query_param("type", "video"))
        .and(query_param("maxResults", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let ids = client
        .list_video_ids("UC123", date(2025, 8, 1), date(2025, 8, 31))
        .await
        .expect("empty result should succeed");

    assert!(ids.is_empty());
}

#[tokio::test]
async fn list_video_details_batches_ids_in_chunks_of_fifty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("part", "contentDetails,snippet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })))
        .expect(3)
        .mount(&server)
        .await;

    let ids: Vec<String> = (0..120).map(|i| format!("vid-{i}")).collect();
    let client = test_client(&server.uri());
    let videos = client
        .list_video_details(&ids)
        .await
        .expect("chunked fetch should succeed");

    assert!(videos.is_empty());
}

#[tokio::test]
async fn list_video_details_parses_duration_and_title() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "items": [
            {
                "id": "vid-1",
                "snippet": { "title": "여름 신제품 소개" },
                "contentDetails": { "duration": "PT1M5S" }
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let videos = client
        .list_video_details(&["vid-1".to_owned()])
        .await
        .expect("should parse videos");

    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].id, "vid-1");
    assert_eq!(videos[0].snippet.title, "여름 신제품 소개");
    assert_eq!(videos[0].content_details.duration, "PT1M5S");
}

#[tokio::test]
async fn subscriber_count_parses_string_counter() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "items": [
            { "statistics": { "subscriberCount": "48210" } }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/channels"))
        .and(query_param("part", "statistics"))
        .and(query_param("id", "UC123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let count = client
        .subscriber_count("UC123")
        .await
        .expect("should parse count");
    assert_eq!(count, 48_210);
}

#[tokio::test]
async fn subscriber_count_defaults_to_zero_when_channel_missing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let count = client
        .subscriber_count("UC-unknown")
        .await
        .expect("absent channel is not an error");
    assert_eq!(count, 0);
}

#[tokio::test]
async fn api_error_surfaces_status_and_message() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "error": { "code": 403, "message": "The request cannot be completed because you have exceeded your quota." }
    });

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .list_video_ids("UC123", date(2025, 8, 1), date(2025, 8, 31))
        .await
        .expect_err("quota error must propagate");

    match err {
        YoutubeError::Api { status, message } => {
            assert_eq!(status, 403);
            assert!(message.contains("quota"), "unexpected message: {message}");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}
