//! Remote source boundary and its HTTP implementation.
//!
//! [`PhotoSource`] is the seam the paging engine fetches through; tests
//! substitute a recording mock, production wires in [`HttpPhotoSource`].
//! The source is stateless and carries no retry logic of its own - retry
//! policy belongs to whoever replays the load request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::engine::PageNumber;
use crate::types::Photo;
use crate::{Error, Result};

/// One page of photos from the remote, or a failure.
///
/// `fetch_page` returns all items for the requested page; there is no
/// batching contract beyond that. Implementations must not retry.
#[async_trait]
pub trait PhotoSource: Send + Sync {
    /// Fetch the given page using the supplied access credential.
    async fn fetch_page(&self, page: PageNumber, client_id: &str) -> Result<Vec<Photo>>;
}

/// HTTP client for the photo API.
///
/// Issues `GET <base>/photos?page=N&client_id=K` and decodes the body as a
/// JSON array of [`Photo`]. Timeouts live here, not in the engine.
pub struct HttpPhotoSource {
    client: Client,
    base_url: Url,
}

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

impl HttpPhotoSource {
    /// Creates a source with the default request timeout.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a source with a custom request timeout (primarily for tests).
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("strobe/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .build()
            .map_err(Error::Network)?;
        Ok(Self { client, base_url })
    }

    fn photos_url(&self) -> Result<Url> {
        self.base_url.join("photos").map_err(Error::from)
    }
}

#[async_trait]
impl PhotoSource for HttpPhotoSource {
    async fn fetch_page(&self, page: PageNumber, client_id: &str) -> Result<Vec<Photo>> {
        let url = self.photos_url()?;
        debug!(page, %url, "fetching photo page");

        let response = self
            .client
            .get(url.clone())
            .query(&[("page", page.to_string().as_str()), ("client_id", client_id)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let photos: Vec<Photo> = serde_json::from_str(&body)?;

        info!(page, count = photos.len(), "fetched photo page");
        Ok(photos)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn page_body(ids: &[&str]) -> String {
        let photos: Vec<serde_json::Value> = ids
            .iter()
            .map(|id| {
                serde_json::json!({
                    "id": id,
                    "description": format!("photo {id}"),
                    "likes": 3,
                    "width": 1200,
                    "height": 800,
                    "color": "#60544D",
                    "urls": {
                        "raw": "r", "full": "f", "regular": "g",
                        "small": "s", "thumb": "t"
                    }
                })
            })
            .collect();
        serde_json::to_string(&photos).unwrap()
    }

    #[tokio::test]
    async fn fetch_page_sends_page_and_credential() -> anyhow::Result<()> {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/photos"))
            .and(query_param("page", "2"))
            .and(query_param("client_id", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_string(page_body(&["a", "b"])))
            .expect(1)
            .mount(&server)
            .await;

        let source = HttpPhotoSource::new(&server.uri())?;
        let photos = source.fetch_page(2, "test-key").await?;

        assert_eq!(photos.len(), 2);
        assert_eq!(photos[0].id, "a");
        assert_eq!(photos[1].id, "b");
        Ok(())
    }

    #[tokio::test]
    async fn fetch_page_maps_error_status() -> anyhow::Result<()> {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/photos"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let source = HttpPhotoSource::new(&server.uri())?;
        let err = source.fetch_page(1, "k").await.expect_err("503 must fail");

        match err {
            Error::Http { status, .. } => {
                assert_eq!(status, 503);
                assert!(err.is_recoverable());
            },
            other => panic!("expected Http error, got: {other}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn fetch_page_maps_not_found_as_permanent() -> anyhow::Result<()> {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/photos"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source = HttpPhotoSource::new(&server.uri())?;
        let err = source.fetch_page(1, "k").await.expect_err("404 must fail");

        match err {
            Error::Http { status, .. } => {
                assert_eq!(status, 404);
                assert!(!err.is_recoverable(), "a missing resource is not transient");
            },
            other => panic!("expected Http error, got: {other}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn fetch_page_rejects_malformed_body() -> anyhow::Result<()> {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/photos"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"not\": \"an array\"}"))
            .mount(&server)
            .await;

        let source = HttpPhotoSource::new(&server.uri())?;
        let err = source.fetch_page(1, "k").await.expect_err("must fail");

        assert!(matches!(err, Error::Decode(_)));
        assert!(!err.is_recoverable());
        Ok(())
    }

    #[tokio::test]
    async fn fetch_page_accepts_empty_array() -> anyhow::Result<()> {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/photos"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;

        let source = HttpPhotoSource::new(&server.uri())?;
        let photos = source.fetch_page(7, "k").await?;

        assert!(photos.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn fetch_page_times_out() -> anyhow::Result<()> {
        let server = MockServer::start().await;

        // Server delay is well past the client timeout so the test is not
        // sensitive to scheduler jitter.
        Mock::given(method("GET"))
            .and(path("/photos"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("[]")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let source = HttpPhotoSource::with_timeout(&server.uri(), Duration::from_millis(50))?;
        let err = source.fetch_page(1, "k").await.expect_err("must time out");

        assert!(matches!(err, Error::Network(_)));
        assert!(err.is_recoverable(), "timeout should be retryable: {err}");
        Ok(())
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = HttpPhotoSource::new("not a url");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }
}
