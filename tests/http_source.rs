use std::time::Duration;

use rusty_dashboard::data::error::FetchError;
use rusty_dashboard::data::loader::LoadReport;
use rusty_dashboard::data::source::{HttpSource, RecordSource};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn fetch(server: &MockServer) -> Result<LoadReport, FetchError> {
    let source = HttpSource::new(format!("{}/data", server.uri()), Duration::from_secs(5));
    tokio::task::spawn_blocking(move || source.fetch())
        .await
        .expect("fetch task panicked")
}

#[tokio::test(flavor = "multi_thread")]
async fn parses_a_json_array_of_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "end_year": 2027,
                "topic": "gas",
                "region": "Northern America",
                "country": "United States of America",
                "intensity": 6,
                "relevance": 2,
                "likelihood": 3,
                "title": "U.S. natural gas consumption is expected to increase"
            },
            { "end_year": "", "topic": "oil", "intensity": "" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let report = fetch(&server).await.unwrap();
    assert!(report.skipped.is_empty());
    let records = report.store.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].end_year, Some(2027));
    assert_eq!(records[0].likelihood, Some(3.0));
    assert_eq!(records[1].end_year, None);
    assert_eq!(records[1].intensity, None);
}

#[tokio::test(flavor = "multi_thread")]
async fn non_success_status_is_a_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = fetch(&server).await.unwrap_err();
    assert!(matches!(err, FetchError::Status(503)), "got {err:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_json_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = fetch(&server).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)), "got {err:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn object_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let err = fetch(&server).await.unwrap_err();
    assert!(matches!(err, FetchError::NotAnArray), "got {err:?}");
}
