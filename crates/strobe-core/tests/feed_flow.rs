//! End-to-end feed flow over a mock HTTP server: refresh, forward appends,
//! invalidation, and error recovery, exercising the real `HttpPhotoSource`.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use strobe_core::{Error, FeedConfig, HttpPhotoSource, PhotoFeed};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn photo_json(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "description": format!("photo {id}"),
        "likes": 11,
        "width": 1600,
        "height": 900,
        "color": "#112233",
        "urls": {
            "raw": format!("https://img.example.com/{id}/raw"),
            "full": format!("https://img.example.com/{id}/full"),
            "regular": format!("https://img.example.com/{id}/regular"),
            "small": format!("https://img.example.com/{id}/small"),
            "thumb": format!("https://img.example.com/{id}/thumb")
        }
    })
}

async fn mount_page(server: &MockServer, page: u32, ids: &[&str], expect: u64) {
    let body: Vec<serde_json::Value> = ids.iter().map(|id| photo_json(id)).collect();
    Mock::given(method("GET"))
        .and(path("/photos"))
        .and(query_param("page", page.to_string()))
        .and(query_param("client_id", "itest-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expect)
        .mount(server)
        .await;
}

fn feed(server: &MockServer) -> PhotoFeed<HttpPhotoSource> {
    let source =
        HttpPhotoSource::with_timeout(&server.uri(), Duration::from_secs(5)).unwrap();
    PhotoFeed::new(source, "itest-key", FeedConfig::default()).unwrap()
}

#[tokio::test]
async fn full_session_dedups_across_pages_and_fetches_each_page_once() {
    let server = MockServer::start().await;
    // Page 2 repeats "b"; page 3 ends the stream.
    mount_page(&server, 1, &["a", "b", "b"], 1).await;
    mount_page(&server, 2, &["b", "c"], 1).await;
    mount_page(&server, 3, &[], 1).await;

    let feed = feed(&server);
    let mut session = feed.session();

    let mut merged: Vec<String> = Vec::new();
    merged.extend(session.refresh().await.unwrap().into_iter().map(|s| s.id));
    merged.extend(session.load_more().await.unwrap().into_iter().map(|s| s.id));
    merged.extend(session.load_more().await.unwrap().into_iter().map(|s| s.id));

    assert_eq!(merged, vec!["a", "b", "c"]);
    assert!(session.is_exhausted());

    // Exhausted sessions stop asking the remote; expectations on the mocks
    // verify one fetch per page.
    assert!(session.load_more().await.unwrap().is_empty());
    server.verify().await;
}

#[tokio::test]
async fn second_session_replays_from_cache_until_invalidated() {
    let server = MockServer::start().await;
    mount_page(&server, 1, &["a"], 2).await;

    let feed = feed(&server);

    feed.session().load_more().await.unwrap();

    // Cache hit: no second request for page 1.
    let replay = feed.session().load_more().await.unwrap();
    assert_eq!(replay.len(), 1);
    assert_eq!(replay[0].id, "a");

    // Invalidation forces the next session back to the network.
    feed.invalidate();
    let refetched = feed.session().load_more().await.unwrap();
    assert_eq!(refetched[0].id, "a");

    server.verify().await;
}

#[tokio::test]
async fn refresh_over_http_resets_dedup_and_cache() {
    let server = MockServer::start().await;
    mount_page(&server, 1, &["a"], 2).await;

    let feed = feed(&server);
    let mut session = feed.session();

    let first = session.refresh().await.unwrap();
    assert_eq!(first[0].id, "a");

    // Refresh must clear the cache (second request happens) and the dedup
    // set ("a" is emitted again instead of being suppressed).
    let second = session.refresh().await.unwrap();
    assert_eq!(second[0].id, "a");

    server.verify().await;
}

#[tokio::test]
async fn server_error_surfaces_as_recoverable_and_retry_recovers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/photos"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_page(&server, 1, &["a"], 1).await;

    let feed = feed(&server);
    let mut session = feed.session();

    let err = session.refresh().await.expect_err("first load must fail");
    assert!(matches!(err, Error::Http { status: 503, .. }));
    assert!(err.is_recoverable());
    assert!(!session.state().has_content);

    let recovered = session.retry().await.unwrap();
    assert_eq!(recovered[0].id, "a");
    assert!(session.state().has_content);
}

#[tokio::test]
async fn summaries_carry_projection_fields_end_to_end() {
    let server = MockServer::start().await;
    mount_page(&server, 1, &["pic"], 1).await;

    let feed = feed(&server);
    let summaries = feed.session().refresh().await.unwrap();

    let summary = &summaries[0];
    assert_eq!(summary.title, "photo pic");
    assert_eq!(summary.likes, 11);
    assert_eq!(summary.thumbnail_url, "https://img.example.com/pic/small");
    assert_eq!(summary.full_image_url, "https://img.example.com/pic/full");
    assert_eq!(summary.accent_color.as_deref(), Some("#112233"));
    assert!((summary.aspect_ratio - 16.0 / 9.0).abs() < f32::EPSILON);
}
