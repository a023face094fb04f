//! Integration tests for full archive runs
//!
//! These tests point both the listing site and the archive endpoint at a
//! wiremock server and exercise the whole pipeline end-to-end.

use ne_archive::archive::{Archiver, RunOutcome};
use ne_archive::config::Config;
use std::collections::HashSet;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AUTHOR: &str = "test-author";

/// Builds a config pointing the site and the archive endpoint at the mock
/// server, with near-zero backoff so tests run fast
fn test_config(server_uri: &str) -> Config {
    let mut config = Config::default();
    config.site.base_url = server_uri.to_string();
    config.archive.endpoint = server_uri.to_string();
    config.backoff.min_wait_secs = 0;
    config.backoff.max_wait_secs = 1;
    config
}

/// Renders a listing page with the Nintendo Enthusiast markup the default
/// selectors expect
fn listing_page(total_pages: u32, page: u32, posts: u32) -> String {
    let pagination: String = (1..=total_pages)
        .map(|n| format!(r#"<a class="mnmd-pagination__item" href="/page/{n}/">{n}</a>"#))
        .collect();
    let titles: String = (1..=posts)
        .map(|i| {
            format!(
                r#"<h3 class="post__title"><a href="/posts/p{page}-{i}/">Post {page}-{i}</a></h3>"#
            )
        })
        .collect();
    format!(r#"<html><body><div class="mnmd-main-col">{titles}{pagination}</div></body></html>"#)
}

/// Mounts listing mocks for an author with the given page/post counts
async fn mount_listing(server: &MockServer, total_pages: u32, posts_per_page: u32) {
    Mock::given(method("GET"))
        .and(path(format!("/author/{}", AUTHOR)))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(listing_page(total_pages, 1, posts_per_page)),
        )
        .mount(server)
        .await;

    for n in 2..=total_pages {
        Mock::given(method("GET"))
            .and(path(format!("/author/{}/page/{}/", AUTHOR, n)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(listing_page(total_pages, n, posts_per_page)),
            )
            .mount(server)
            .await;
    }
}

#[tokio::test]
async fn test_full_run_archives_every_post_in_listing_order() {
    let server = MockServer::start().await;
    mount_listing(&server, 3, 3).await;

    Mock::given(method("GET"))
        .and(path_regex("^/save/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(9)
        .mount(&server)
        .await;

    let archiver = Archiver::new(test_config(&server.uri())).expect("failed to build archiver");
    let result = archiver.run(AUTHOR).await;

    assert_eq!(result.outcome, RunOutcome::Complete);
    assert_eq!(result.archived_urls.len(), 9);

    // Page-ascending, within-page order
    let expected_suffixes: Vec<String> = (1..=3)
        .flat_map(|page| (1..=3).map(move |i| format!("/posts/p{}-{}/", page, i)))
        .collect();
    for (url, suffix) in result.archived_urls.iter().zip(&expected_suffixes) {
        assert!(
            url.ends_with(suffix.as_str()),
            "expected {} to end with {}",
            url,
            suffix
        );
    }
}

#[tokio::test]
async fn test_snapshot_url_comes_from_content_location() {
    let server = MockServer::start().await;
    mount_listing(&server, 1, 1).await;

    Mock::given(method("GET"))
        .and(path_regex("^/save/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-location", "/web/20240101000000/https://example.com/x"),
        )
        .mount(&server)
        .await;

    let archiver = Archiver::new(test_config(&server.uri())).expect("failed to build archiver");
    let result = archiver.run(AUTHOR).await;

    assert_eq!(result.outcome, RunOutcome::Complete);
    assert_eq!(result.archived_urls.len(), 1);
    assert!(result.archived_urls[0].starts_with(&server.uri()));
    assert!(result.archived_urls[0].contains("/web/20240101000000/"));
}

#[tokio::test]
async fn test_invalid_author_reports_failure_without_archiving() {
    let server = MockServer::start().await;

    // A nonexistent author's page has no pagination control
    Mock::given(method("GET"))
        .and(path(format!("/author/{}", AUTHOR)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><p>Author not found</p></body></html>"),
        )
        .mount(&server)
        .await;

    // The archive endpoint must never be touched
    Mock::given(method("GET"))
        .and(path_regex("^/save/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let archiver = Archiver::new(test_config(&server.uri())).expect("failed to build archiver");
    let result = archiver.run(AUTHOR).await;

    assert_eq!(result.outcome, RunOutcome::Failed);
    assert!(result.archived_urls.is_empty());
}

#[tokio::test]
async fn test_rate_limited_batch_backs_off_and_retries() {
    let server = MockServer::start().await;
    mount_listing(&server, 1, 3).await;

    // The first save request is throttled; everything after succeeds
    Mock::given(method("GET"))
        .and(path_regex("^/save/"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex("^/save/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&server)
        .await;

    let archiver = Archiver::new(test_config(&server.uri())).expect("failed to build archiver");
    let result = archiver.run(AUTHOR).await;

    assert_eq!(result.outcome, RunOutcome::Complete);
    assert_eq!(result.archived_urls.len(), 3);

    // The throttled post was resubmitted, not duplicated
    let unique: HashSet<&String> = result.archived_urls.iter().collect();
    assert_eq!(unique.len(), 3);
}

#[tokio::test]
async fn test_generic_archive_error_reports_partial_results() {
    let server = MockServer::start().await;
    mount_listing(&server, 1, 3).await;

    // The third post's submission always fails terminally
    Mock::given(method("GET"))
        .and(path_regex("^/save/.*p1-3"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex("^/save/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri());
    config.archive.batch_size = 2;

    let archiver = Archiver::new(config).expect("failed to build archiver");
    let result = archiver.run(AUTHOR).await;

    // The first batch of two completed before the failing batch
    assert_eq!(result.outcome, RunOutcome::Partial);
    assert_eq!(result.archived_urls.len(), 2);
    assert_eq!(result.outcome.exit_code(), 2);
}
