//! Integration tests for the analyzer
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! submission and analysis cycle end-to-end over real HTTP.

use std::sync::Arc;
use std::time::Duration;
use web_analyzer::config::{Config, UserAgentConfig};
use web_analyzer::output::{collect_report, render_json, AnalysisStatistics};
use web_analyzer::storage::{AnalysisStore, MemoryStore};
use web_analyzer::{AnalysisOrchestrator, AnalysisStatus, Submission};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const POLL: Duration = Duration::from_millis(10);

/// Creates a test configuration with short timeouts
fn create_test_config() -> Config {
    let mut config = Config::default();
    config.user_agent = UserAgentConfig {
        name: "TestBot".to_string(),
        version: "1.0.0".to_string(),
        contact_url: None,
    };
    config.fetcher.timeout_secs = 5;
    config.fetcher.connect_timeout_secs = 2;
    config.link_checker.timeout_secs = 2;
    config
}

fn create_orchestrator(config: &Config) -> (AnalysisOrchestrator, Arc<dyn AnalysisStore>) {
    let store: Arc<dyn AnalysisStore> = Arc::new(MemoryStore::new());
    let orchestrator = AnalysisOrchestrator::from_config(config, Arc::clone(&store))
        .expect("Failed to build orchestrator");
    (orchestrator, store)
}

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(body)
}

#[tokio::test]
async fn test_full_analysis_of_single_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let page = format!(
        r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">
<html>
<head><title> Integration Page </title></head>
<body>
    <h1>Main</h1>
    <h2>First</h2>
    <h2>Second</h2>
    <a href="/about">About</a>
    <a href="/about">About again</a>
    <a href="/missing">Missing</a>
    <a href="{}/external">External</a>
</body>
</html>"#,
        base_url
    );

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "TestBot/1.0.0"))
        .respond_with(html_response(page))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Each distinct link is probed exactly once
    Mock::given(method("HEAD"))
        .and(path("/about"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/external"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    // /missing has no mock, so wiremock answers 404

    let (orchestrator, _store) = create_orchestrator(&create_test_config());
    let result = orchestrator
        .analyze(&base_url)
        .await
        .expect("record should exist after analysis");

    assert_eq!(result.status, AnalysisStatus::Completed);
    assert_eq!(result.html_version, "HTML 4.01 Strict");
    assert_eq!(result.title, "Integration Page");
    assert_eq!(result.heading_count("h1"), 1);
    assert_eq!(result.heading_count("h2"), 2);
    assert_eq!(result.internal_links, 3);
    assert_eq!(result.external_links, 1);
    assert_eq!(result.broken_links, 1);
    assert!(!result.login_form_present);
    assert!(result.message.is_none());
}

#[tokio::test]
async fn test_submit_then_poll_until_completed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let page = r#"<!DOCTYPE html><html><head><title>Sign in</title></head>
<body><form action="/login"><input type="text" name="user"><input type="password" name="pw"></form></body></html>"#;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(page.to_string()))
        .mount(&mock_server)
        .await;

    let (orchestrator, _store) = create_orchestrator(&create_test_config());

    assert_eq!(orchestrator.submit(&base_url), Submission::Accepted);
    let result = orchestrator
        .wait_for(&base_url, POLL)
        .await
        .expect("record should exist after submission");

    assert_eq!(result.status, AnalysisStatus::Completed);
    assert_eq!(result.html_version, "HTML5");
    assert_eq!(result.title, "Sign in");
    assert!(result.login_form_present);
    assert_eq!(result.total_links(), 0);
    assert_eq!(orchestrator.list_submitted_urls(), vec![base_url]);
}

#[tokio::test]
async fn test_concurrent_submissions_fetch_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            html_response("<title>Slow</title>".to_string()).set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let (orchestrator, _store) = create_orchestrator(&create_test_config());

    assert_eq!(orchestrator.submit(&base_url), Submission::Accepted);
    for _ in 0..5 {
        assert_eq!(orchestrator.submit(&base_url), Submission::Coalesced);
    }

    let status = orchestrator.get_result(&base_url).map(|r| r.status);
    assert!(matches!(
        status,
        Some(AnalysisStatus::Pending) | Some(AnalysisStatus::InProgress)
    ));

    let result = orchestrator.wait_for(&base_url, POLL).await.unwrap();
    assert_eq!(result.status, AnalysisStatus::Completed);
    assert_eq!(result.title, "Slow");
}

#[tokio::test]
async fn test_non_success_status_records_error() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<title>Not Found</title>"))
        .mount(&mock_server)
        .await;

    let (orchestrator, _store) = create_orchestrator(&create_test_config());
    let url = format!("{}/gone", base_url);
    let result = orchestrator.analyze(&url).await.unwrap();

    assert_eq!(result.status, AnalysisStatus::Error);
    assert_eq!(result.title, "");
    let message = result.message.unwrap();
    assert!(message.starts_with("Failed to fetch URL"), "{}", message);
    assert!(message.contains("404"), "{}", message);
}

#[tokio::test]
async fn test_undecodable_body_records_parse_error() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x3c, 0xff, 0xfe, 0x3e]))
        .mount(&mock_server)
        .await;

    let (orchestrator, _store) = create_orchestrator(&create_test_config());
    let result = orchestrator.analyze(&base_url).await.unwrap();

    assert_eq!(result.status, AnalysisStatus::Error);
    assert!(result.message.unwrap().starts_with("Failed to parse HTML"));
}

#[tokio::test]
async fn test_redirect_is_followed() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let new_url = format!("{}/new", base_url);
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", new_url.as_str()),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(html_response("<title>Moved Here</title>".to_string()))
        .mount(&mock_server)
        .await;

    let (orchestrator, _store) = create_orchestrator(&create_test_config());
    let url = format!("{}/old", base_url);
    let result = orchestrator.analyze(&url).await.unwrap();

    assert_eq!(result.status, AnalysisStatus::Completed);
    assert_eq!(result.title, "Moved Here");
    // The record stays keyed by the submitted URL
    assert!(orchestrator.get_result(&new_url).is_none());
}

#[tokio::test]
async fn test_report_covers_every_submission() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(html_response("<title>Fine</title>".to_string()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let (orchestrator, store) = create_orchestrator(&create_test_config());
    let ok = format!("{}/ok", base_url);
    let broken = format!("{}/broken", base_url);

    orchestrator.submit(&ok);
    orchestrator.submit(&broken);
    orchestrator.wait_for(&ok, POLL).await.unwrap();
    orchestrator.wait_for(&broken, POLL).await.unwrap();

    let report = collect_report(store.as_ref());
    assert_eq!(report.len(), 2);
    assert!(report.is_settled());

    let stats = AnalysisStatistics::from_report(&report);
    assert_eq!(stats.count(AnalysisStatus::Completed), 1);
    assert_eq!(stats.count(AnalysisStatus::Error), 1);

    let json: serde_json::Value = serde_json::from_str(&render_json(&report).unwrap()).unwrap();
    assert_eq!(json["results"][ok.as_str()]["Status"], "Completed");
    assert_eq!(json["results"][broken.as_str()]["Status"], "Error");
}
