//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use sponsor_finder::config::Config;
use sponsor_finder::crawler::{build_http_client, HttpFetcher};
use sponsor_finder::storage::{open_storage, save_crawl_results, Storage};
use sponsor_finder::{CrawlRequest, CrawlScheduler, CrawlState, CrawlStrategy};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(format!("<html><body>{}</body></html>", body))
}

fn scheduler() -> CrawlScheduler<HttpFetcher> {
    let client = build_http_client(&Config::default()).expect("Failed to build client");
    CrawlScheduler::with_defaults(HttpFetcher::new(client))
}

fn request(server: &MockServer, max_pages: i64) -> CrawlRequest {
    let seed = Url::parse(&server.uri()).expect("Failed to parse base URL");
    CrawlRequest::new(seed)
        .with_max_pages(max_pages)
        .with_delay(Duration::ZERO)
}

/// Mounts a 404 for every path without a more specific mock
async fn mount_not_found(server: &MockServer) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

async fn requested_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .expect("Request recording is enabled")
        .iter()
        .map(|r| r.url.path().to_string())
        .collect()
}

fn set(emails: &[&str]) -> HashSet<String> {
    emails.iter().map(|e| e.to_string()).collect()
}

#[tokio::test]
async fn test_homepage_then_contact_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<a href="mailto:info@real-corp.com">Email us</a>
               <a href="/contact">Contact</a>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(html("<p>Sales: sales@real-corp.com</p>"))
        .mount(&server)
        .await;
    mount_not_found(&server).await;

    let outcome = scheduler().run(&request(&server, 2)).await;

    assert_eq!(
        outcome.emails,
        set(&["info@real-corp.com", "sales@real-corp.com"])
    );
    assert_eq!(outcome.pages_visited, 2);
    assert_eq!(outcome.state, CrawlState::Done);
    assert_eq!(requested_paths(&server).await, vec!["/", "/contact"]);
}

#[tokio::test]
async fn test_placeholder_addresses_are_dropped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html("<p>Write to test@test.com</p>"))
        .mount(&server)
        .await;
    mount_not_found(&server).await;

    let outcome = scheduler().run(&request(&server, 3)).await;

    assert!(outcome.emails.is_empty());
    assert_eq!(outcome.pages_visited, 3);
}

#[tokio::test]
async fn test_server_errors_yield_empty_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(5)
        .mount(&server)
        .await;

    let outcome = scheduler().run(&request(&server, 5)).await;

    assert!(outcome.emails.is_empty());
    assert_eq!(outcome.pages_visited, 5);
    assert_eq!(outcome.state, CrawlState::Done);
}

#[tokio::test]
async fn test_budget_is_respected() {
    let server = MockServer::start().await;

    let links: String = (0..30)
        .map(|i| format!(r#"<a href="/contact/office-{}">Office {}</a>"#, i, i))
        .collect();
    Mock::given(method("GET"))
        .respond_with(html(&format!("sales@real-corp.com {}", links)))
        .expect(4)
        .mount(&server)
        .await;

    let outcome = scheduler().run(&request(&server, 4)).await;

    assert_eq!(outcome.pages_visited, 4);
    assert_eq!(outcome.emails, set(&["sales@real-corp.com"]));

    let paths = requested_paths(&server).await;
    let distinct: HashSet<&String> = paths.iter().collect();
    assert_eq!(distinct.len(), paths.len());
}

#[tokio::test]
async fn test_zero_budget_makes_no_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html("sales@real-corp.com"))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = scheduler().run(&request(&server, 0)).await;

    assert!(outcome.emails.is_empty());
    assert_eq!(outcome.pages_visited, 0);
}

#[tokio::test]
async fn test_unreachable_homepage_falls_back_to_contact_paths() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(html("<p>partners@real-corp.com</p>"))
        .mount(&server)
        .await;
    mount_not_found(&server).await;

    let outcome = scheduler().run(&request(&server, 2)).await;

    assert_eq!(outcome.emails, set(&["partners@real-corp.com"]));
    assert_eq!(requested_paths(&server).await, vec!["/", "/contact"]);
}

#[tokio::test]
async fn test_breadth_first_visits_in_discovery_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<a href="/sponsorship">Sponsor us</a>"#))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/contact-us"))
        .respond_with(html("hello@real-corp.com"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sponsorship"))
        .respond_with(html("sponsors@real-corp.com"))
        .mount(&server)
        .await;
    mount_not_found(&server).await;

    let request = request(&server, 3).with_strategy(CrawlStrategy::BreadthFirst);
    let outcome = scheduler().run(&request).await;

    assert_eq!(
        requested_paths(&server).await,
        vec!["/", "/contact", "/contact-us"]
    );
    assert_eq!(outcome.emails, set(&["hello@real-corp.com"]));
}

#[tokio::test]
async fn test_other_sites_are_not_followed() {
    let server = MockServer::start().await;
    let other = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(&format!(
            r#"<a href="{}/contact">Partner contact</a>"#,
            other.uri()
        )))
        .mount(&server)
        .await;
    mount_not_found(&server).await;

    Mock::given(method("GET"))
        .respond_with(html("leak@other-corp.com"))
        .expect(0)
        .mount(&other)
        .await;

    let outcome = scheduler().run(&request(&server, 5)).await;

    assert!(outcome.emails.is_empty());
    assert_eq!(outcome.pages_visited, 5);
}

#[tokio::test]
async fn test_non_html_pages_are_skipped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("sales@real-corp.com", "application/pdf"),
        )
        .mount(&server)
        .await;
    mount_not_found(&server).await;

    let outcome = scheduler().run(&request(&server, 1)).await;

    assert!(outcome.emails.is_empty());
    assert_eq!(outcome.pages_visited, 1);
}

#[tokio::test]
async fn test_crawl_results_are_saved() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<a href="mailto:sales@real-corp.com">Sales</a> info@real-corp.com"#,
        ))
        .mount(&server)
        .await;
    mount_not_found(&server).await;

    let request = request(&server, 1);
    let outcome = scheduler().run(&request).await;
    let emails = outcome.sorted_emails();

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut storage = open_storage(&dir.path().join("sponsor_center.db")).unwrap();
    let company_id = save_crawl_results(&mut storage, &request.seed, &emails, &[]).unwrap();
    storage
        .record_search("email", request.seed.as_str(), emails.len(), None)
        .unwrap();

    let contacts = storage.get_company_contacts(company_id).unwrap();
    let saved: HashSet<String> = contacts.into_iter().map(|c| c.email).collect();
    assert_eq!(saved, set(&["info@real-corp.com", "sales@real-corp.com"]));

    let stats = storage.statistics().unwrap();
    assert_eq!(stats.total_companies, 1);
    assert_eq!(stats.total_contacts, 2);
    assert_eq!(stats.total_searches, 1);
}

#[tokio::test]
async fn test_crawl_entry_point_uses_config() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html("<p>Founders: founders@real-corp.com</p>"))
        .mount(&server)
        .await;
    mount_not_found(&server).await;

    let mut config = Config::default();
    config.crawler.max_pages = 6;
    config.crawler.delay_ms = 0;

    let seed = Url::parse(&server.uri()).unwrap();
    let outcome = sponsor_finder::crawler::crawl(&config, seed).await.unwrap();

    assert_eq!(outcome.emails, set(&["founders@real-corp.com"]));
    assert_eq!(outcome.pages_visited, 6);
}
