//! End-to-end client tests over real HTTP against a mock server.

use std::time::Duration;

use firecrawl::jobs::PollPolicy;
use firecrawl::types::{CrawlRequest, PaginationConfig, ScrapeRequest};
use firecrawl::{ClientBuilder, FirecrawlClient, FirecrawlError};
use serde_json::json;
use wiremock::matchers::{
    body_partial_json, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> FirecrawlClient {
    ClientBuilder::new()
        .api_key("fc-test")
        .base_url(server.uri())
        .poll_policy(
            PollPolicy::new()
                .with_interval(Duration::from_millis(10))
                .with_timeout(Duration::from_secs(5)),
        )
        .build()
        .unwrap()
}

fn page(next: Option<String>, urls: &[&str]) -> serde_json::Value {
    let data: Vec<_> = urls
        .iter()
        .map(|url| json!({"markdown": url, "metadata": {"sourceURL": url}}))
        .collect();
    json!({
        "status": "completed",
        "total": 3,
        "completed": 3,
        "next": next,
        "data": data
    })
}

#[tokio::test]
async fn scrape_sends_auth_and_json_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/scrape"))
        .and(header("authorization", "Bearer fc-test"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({"url": "https://example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"markdown": "# Example"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let document = client(&server)
        .scrape(&ScrapeRequest::new("https://example.com"))
        .await
        .unwrap();

    assert_eq!(document.markdown.as_deref(), Some("# Example"));
}

#[tokio::test]
async fn unauthorized_envelope_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/scrape"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"success": false, "error": "Unauthorized: Invalid token"})),
        )
        .mount(&server)
        .await;

    let result = client(&server)
        .scrape(&ScrapeRequest::new("https://example.com"))
        .await;

    match result {
        Err(FirecrawlError::Unauthorized { message }) => {
            assert!(message.contains("Invalid token"));
        }
        other => panic!("expected Unauthorized, got {other:?}"),
    }
}

#[tokio::test]
async fn crawl_status_follows_next_links() {
    let server = MockServer::start().await;
    let next = format!("{}/v2/crawl/c1?skip=2", server.uri());
    Mock::given(method("GET"))
        .and(path("/v2/crawl/c1"))
        .and(query_param_is_missing("skip"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            Some(next),
            &["https://a.example", "https://b.example"],
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/crawl/c1"))
        .and(query_param("skip", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page(None, &["https://c.example"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let job = client(&server)
        .get_crawl_status_with("c1", PaginationConfig::default())
        .await
        .unwrap();

    assert_eq!(job.data.len(), 3);
    assert!(job.next.is_none());
}

#[tokio::test]
async fn max_results_stops_paging_and_keeps_next() {
    let server = MockServer::start().await;
    let next = format!("{}/v2/crawl/c1?skip=2", server.uri());
    Mock::given(method("GET"))
        .and(path("/v2/crawl/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            Some(next.clone()),
            &["https://a.example", "https://b.example"],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let pagination = PaginationConfig {
        auto_paginate: true,
        max_pages: None,
        max_results: Some(1),
    };
    let job = client(&server)
        .get_crawl_status_with("c1", pagination)
        .await
        .unwrap();

    assert_eq!(job.data.len(), 1);
    assert_eq!(job.next.as_deref(), Some(next.as_str()));
}

#[tokio::test]
async fn max_pages_stops_paging_and_keeps_next() {
    let server = MockServer::start().await;
    let second = format!("{}/v2/batch/scrape/b1?skip=2", server.uri());
    let third = format!("{}/v2/batch/scrape/b1?skip=4", server.uri());
    Mock::given(method("GET"))
        .and(path("/v2/batch/scrape/b1"))
        .and(query_param_is_missing("skip"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            Some(second),
            &["https://a.example", "https://b.example"],
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/batch/scrape/b1"))
        .and(query_param("skip", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            Some(third.clone()),
            &["https://c.example"],
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/batch/scrape/b1"))
        .and(query_param("skip", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(None, &[])))
        .expect(0)
        .mount(&server)
        .await;

    let pagination = PaginationConfig {
        max_pages: Some(1),
        ..PaginationConfig::default()
    };
    let job = client(&server)
        .get_batch_scrape_status_with("b1", pagination)
        .await
        .unwrap();

    assert_eq!(job.data.len(), 3);
    assert_eq!(job.next.as_deref(), Some(third.as_str()));
}

#[tokio::test]
async fn repeating_next_link_ends_the_crawl() {
    let server = MockServer::start().await;
    let next = format!("{}/v2/crawl/c1?skip=1", server.uri());
    Mock::given(method("POST"))
        .and(path("/v2/crawl"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "id": "c1"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/crawl/c1"))
        .and(query_param_is_missing("skip"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page(Some(next.clone()), &["https://a.example"])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/crawl/c1"))
        .and(query_param("skip", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page(Some(next), &["https://b.example"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let request = CrawlRequest::new("https://example.com");

    let result = tokio::time::timeout(Duration::from_secs(5), client.crawl(&request))
        .await
        .expect("crawl did not finish");

    assert!(matches!(result, Err(FirecrawlError::InvalidResponse(_))));
}

#[tokio::test]
async fn cancel_with_no_content_is_confirmed() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/crawl/c1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client(&server).cancel_crawl("c1").await.unwrap();

    assert!(outcome.is_cancelled());
}

#[tokio::test]
async fn foreign_next_link_is_refused() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/crawl/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            Some("https://elsewhere.example/steal".to_string()),
            &["https://a.example"],
        )))
        .mount(&server)
        .await;

    let result = client(&server)
        .get_crawl_status_with("c1", PaginationConfig::default())
        .await;

    assert!(matches!(result, Err(FirecrawlError::InvalidResponse(_))));
}

#[tokio::test]
async fn extract_polls_until_completed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/extract"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "id": "e1"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/extract/e1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "status": "processing"})),
        )
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/extract/e1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "status": "completed",
            "data": {"price": 10}
        })))
        .mount(&server)
        .await;

    let request =
        firecrawl::types::ExtractRequest::new(["https://example.com"], "Find the price");
    let job = client(&server).extract(&request).await.unwrap();

    assert_eq!(
        job.data.and_then(|d| d.get("price").cloned()),
        Some(10_i64.into())
    );
}

#[tokio::test]
async fn concurrent_calls_each_get_their_own_result() {
    let server = MockServer::start().await;
    for n in 0..8 {
        Mock::given(method("POST"))
            .and(path("/v2/scrape"))
            .and(body_partial_json(json!({"url": format!("https://site{n}.example")})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({
                        "success": true,
                        "data": {"markdown": format!("page {n}")}
                    }))
                    .set_delay(Duration::from_millis(10 * (8 - n))),
            )
            .mount(&server)
            .await;
    }

    let client = client(&server);
    let handles: Vec<_> = (0..8)
        .map(|n| {
            let client = client.clone();
            tokio::spawn(async move {
                let request = ScrapeRequest::new(format!("https://site{n}.example"));
                (n, client.scrape(&request).await)
            })
        })
        .collect();

    for handle in handles {
        let (n, result) = handle.await.unwrap();
        assert_eq!(
            result.unwrap().markdown,
            Some(format!("page {n}")),
            "call {n} got another call's result"
        );
    }
}
