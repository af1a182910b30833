//! Integration tests for `MonthGrid` using wiremock HTTP mocks.

use msr_core::{MonthlySummary, Period};
use msr_sheets::{MonthGrid, SheetsClient};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn grid(base_url: &str) -> MonthGrid {
    let client = SheetsClient::with_base_url("test-token", "sheet-1", 30, base_url)
        .expect("client construction should not fail");
    MonthGrid::new(client, "Report")
}

fn header_path() -> String {
    "/v4/spreadsheets/sheet-1/values/Report!1:3".to_owned()
}

#[tokio::test]
async fn locate_column_finds_trimmed_exact_match() {
    let server = MockServer::start().await;

    let header = serde_json::json!({
        "values": [
            ["항목", "", ""],
            [],
            ["", " 7월 ", "8월"]
        ]
    });
    Mock::given(method("GET"))
        .and(path(header_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(&header))
        .mount(&server)
        .await;

    let grid = grid(&server.uri());
    assert_eq!(grid.locate_column("7월").await.expect("read ok"), Some(2));
    assert_eq!(grid.locate_column("8월").await.expect("read ok"), Some(3));
    assert_eq!(grid.locate_column("9월").await.expect("read ok"), None);
}

#[tokio::test]
async fn resolve_twice_creates_exactly_one_column() {
    let server = MockServer::start().await;

    // First resolve sees a header without the label; after the create write,
    // subsequent reads see it in place.
    let before = serde_json::json!({
        "values": [
            ["항목"],
            [],
            ["항목"]
        ]
    });
    let after = serde_json::json!({
        "values": [
            ["항목"],
            [],
            ["항목", "3월"]
        ]
    });

    Mock::given(method("GET"))
        .and(path(header_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(&before))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(header_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(&after))
        .mount(&server)
        .await;

    // The single header write: label into B3 (widest header row is 1 wide).
    Mock::given(method("PUT"))
        .and(path("/v4/spreadsheets/sheet-1/values/Report!B3"))
        .and(body_partial_json(serde_json::json!({ "values": [["3월"]] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let grid = grid(&server.uri());
    let first = grid.resolve_column("3월").await.expect("first resolve");
    let second = grid.resolve_column("3월").await.expect("second resolve");

    assert_eq!(first, 2);
    assert_eq!(second, 2, "repeat resolution must return the same column");
}

#[tokio::test]
async fn create_column_appends_after_widest_header_row() {
    let server = MockServer::start().await;

    // Row 1 is wider than the label row; the new column goes after it.
    let header = serde_json::json!({
        "values": [
            ["항목", "a", "b", "c"],
            [],
            ["", "5월"]
        ]
    });
    Mock::given(method("GET"))
        .and(path(header_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(&header))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/v4/spreadsheets/sheet-1/values/Report!E3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let grid = grid(&server.uri());
    let col = grid.create_column("6월").await.expect("create ok");
    assert_eq!(col, 5);
}

#[tokio::test]
async fn write_summary_issues_one_block_write_and_overwrites_idempotently() {
    let server = MockServer::start().await;

    let header = serde_json::json!({
        "values": [
            ["항목", ""],
            [],
            ["", "8월"]
        ]
    });
    Mock::given(method("GET"))
        .and(path(header_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(&header))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/v4/spreadsheets/sheet-1/values/Report!B4:B16"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(2)
        .mount(&server)
        .await;

    let period = Period::for_month(2025, 8).expect("valid month");
    let mut summary = MonthlySummary::for_period(&period);
    summary.total_views = 1000;

    let grid = grid(&server.uri());
    let first_col = grid.write_summary(&period, &summary).await.expect("first write");

    summary.total_views = 2000;
    let second_col = grid.write_summary(&period, &summary).await.expect("second write");

    assert_eq!(first_col, 2);
    assert_eq!(
        second_col, 2,
        "rewriting a period must reuse its column, never duplicate it"
    );
}

#[tokio::test]
async fn write_summary_sends_block_in_schema_order() {
    let server = MockServer::start().await;

    let header = serde_json::json!({
        "values": [[], [], ["", "8월"]]
    });
    Mock::given(method("GET"))
        .and(path(header_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(&header))
        .mount(&server)
        .await;

    let period = Period::for_month(2025, 8).expect("valid month");
    let mut summary = MonthlySummary::for_period(&period);
    summary.shorts_count = 2;
    summary.best_video_title = "Short B".to_owned();

    let expected: Vec<Vec<String>> = msr_sheets::layout::summary_rows(&summary)
        .into_iter()
        .map(|cell| vec![cell])
        .collect();

    Mock::given(method("PUT"))
        .and(path("/v4/spreadsheets/sheet-1/values/Report!B4:B16"))
        .and(body_partial_json(serde_json::json!({ "values": expected })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let grid = grid(&server.uri());
    grid.write_summary(&period, &summary).await.expect("write ok");
}

#[tokio::test]
async fn anchor_emptiness_covers_absent_blank_and_filled() {
    let server = MockServer::start().await;

    // Column B: range read returns no values at all.
    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1/values/Report!B4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;
    // Column C: a whitespace-only cell.
    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1/values/Report!C4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "values": [["   "]]
        })))
        .mount(&server)
        .await;
    // Column D: a real period range.
    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1/values/Report!D4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "values": [["2025-07-01 ~ 2025-07-31"]]
        })))
        .mount(&server)
        .await;

    let grid = grid(&server.uri());
    assert!(grid.anchor_is_empty(2).await.expect("read ok"));
    assert!(grid.anchor_is_empty(3).await.expect("read ok"));
    assert!(!grid.anchor_is_empty(4).await.expect("read ok"));
}
