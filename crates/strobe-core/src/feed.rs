//! Session factory and presentation-facing feed surface.
//!
//! [`PhotoFeed`] owns the long-lived pieces: the shared [`PageCache`], the
//! remote source handle, and the credential. Every call to
//! [`PhotoFeed::session`] hands out a brand-new [`PagingEngine`] with an
//! empty dedup set - invalidation is always engine *replacement*, never a
//! reach into a live engine's state, so an in-flight load from the old
//! session can never race a half-reset one.
//!
//! [`FeedSession`] is the sequential driver a consumer holds: refresh, load
//! more, retry, and a small `{is_loading, error_message, has_content}`
//! projection of the load-state transitions.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::PageCache;
use crate::config::Config;
use crate::engine::{LoadRequest, LoadedPage, PagingEngine, PagingState};
use crate::source::{HttpPhotoSource, PhotoSource};
use crate::types::PhotoSummary;
use crate::{Error, Result};

/// Advisory paging parameters surfaced to consumers.
///
/// The engine itself is page-granular; these mirror what the remote serves
/// per page and how far ahead a consumer should ask for the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedConfig {
    /// Items the remote serves per page.
    pub page_size: usize,
    /// How many items before the end of loaded content a consumer should
    /// trigger the next append.
    pub prefetch_distance: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            prefetch_distance: 2,
        }
    }
}

/// Consumer-observable projection of the session's load state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedState {
    /// A load is in flight.
    pub is_loading: bool,
    /// Message of the last failed load. Suppressed once the session holds
    /// content: an append failure leaves existing items visible and the
    /// retry affordance carries the detail.
    pub error_message: Option<String>,
    /// At least one item has been emitted this session.
    pub has_content: bool,
}

/// Long-lived composition root for the photo feed.
///
/// The cache outlives every session; sessions die with their engine.
pub struct PhotoFeed<S: PhotoSource> {
    source: Arc<S>,
    cache: Arc<PageCache>,
    client_id: String,
    config: FeedConfig,
}

impl PhotoFeed<HttpPhotoSource> {
    /// Wires an HTTP-backed feed from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let source = HttpPhotoSource::with_timeout(
            &config.api_base_url,
            std::time::Duration::from_secs(config.timeout_secs),
        )?;
        Self::new(source, config.access_key.clone(), config.feed())
    }
}

impl<S: PhotoSource> PhotoFeed<S> {
    /// Creates a feed over `source`.
    ///
    /// A blank credential is a provisioning fault and is rejected here,
    /// before any load can run.
    pub fn new(source: S, client_id: impl Into<String>, config: FeedConfig) -> Result<Self> {
        let client_id = client_id.into();
        if client_id.trim().is_empty() {
            return Err(Error::Config(
                "access key must be configured and non-blank".into(),
            ));
        }
        Ok(Self {
            source: Arc::new(source),
            cache: Arc::new(PageCache::new()),
            client_id,
            config,
        })
    }

    /// Starts a new session: a fresh engine bound to an empty dedup set,
    /// sharing this feed's page cache.
    #[must_use]
    pub fn session(&self) -> FeedSession<S> {
        debug!("starting new feed session");
        FeedSession {
            engine: PagingEngine::new(
                Arc::clone(&self.source),
                Arc::clone(&self.cache),
                self.client_id.clone(),
            ),
            pages: Vec::new(),
            anchor: None,
            next_key: None,
            exhausted: false,
            last_request: None,
            state: FeedState::default(),
        }
    }

    /// Drops every cached page. Live sessions keep their dedup state;
    /// callers that want a clean slate start a new [`Self::session`].
    pub fn invalidate(&self) {
        self.cache.clear();
    }

    /// The shared page cache (observability and tests).
    #[must_use]
    pub fn cache(&self) -> &Arc<PageCache> {
        &self.cache
    }

    /// Advisory paging parameters.
    #[must_use]
    pub const fn config(&self) -> FeedConfig {
        self.config
    }
}

/// Sequential driver over one engine instance.
///
/// Methods take `&mut self`: a session is one logical browsing pass and its
/// loads are issued in order. Concurrent sessions each get their own engine
/// from [`PhotoFeed::session`].
pub struct FeedSession<S: PhotoSource> {
    engine: PagingEngine<S>,
    pages: Vec<LoadedPage>,
    anchor: Option<usize>,
    next_key: Option<u32>,
    exhausted: bool,
    last_request: Option<LoadRequest>,
    state: FeedState,
}

impl<S: PhotoSource> FeedSession<S> {
    /// Reloads the stream, anchored at the page closest to the current
    /// anchor position when one is set, else at page 1. Clears the shared
    /// cache and this session's dedup set before fetching.
    pub async fn refresh(&mut self) -> Result<Vec<PhotoSummary>> {
        let key = self.paging_state().refresh_key();
        self.run(LoadRequest::Refresh { key }).await
    }

    /// Loads the next page forward. Returns an empty batch once the stream
    /// reported end-of-stream.
    pub async fn load_more(&mut self) -> Result<Vec<PhotoSummary>> {
        if self.exhausted {
            debug!("load_more after end of stream is a no-op");
            return Ok(Vec::new());
        }
        let key = self.next_key;
        self.run(LoadRequest::Append { key }).await
    }

    /// Replays the last failed (or last issued) request. Falls back to a
    /// refresh when nothing has been requested yet.
    pub async fn retry(&mut self) -> Result<Vec<PhotoSummary>> {
        match self.last_request {
            Some(request) => self.run(request).await,
            None => self.refresh().await,
        }
    }

    /// Updates the anchor position (absolute item index) used to pick the
    /// refresh page.
    pub fn set_anchor(&mut self, anchor: Option<usize>) {
        self.anchor = anchor;
    }

    /// Current load-state projection.
    #[must_use]
    pub fn state(&self) -> FeedState {
        let mut state = self.state.clone();
        if state.has_content {
            state.error_message = None;
        }
        state
    }

    /// Total items emitted so far this session.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.pages.iter().map(|p| p.photos.len()).sum()
    }

    /// Whether the stream has signalled end-of-stream.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    fn paging_state(&self) -> PagingState {
        PagingState {
            pages: self.pages.clone(),
            anchor: self.anchor,
        }
    }

    async fn run(&mut self, request: LoadRequest) -> Result<Vec<PhotoSummary>> {
        self.last_request = Some(request);
        self.state.is_loading = true;

        let result = self.engine.load(request).await;
        self.state.is_loading = false;

        match result {
            Ok(page) => {
                if matches!(request, LoadRequest::Refresh { .. }) {
                    self.pages.clear();
                    self.anchor = None;
                }
                self.state.error_message = None;
                self.next_key = page.next_key;
                self.exhausted = page.next_key.is_none();

                let summaries: Vec<PhotoSummary> =
                    page.photos.iter().map(|p| p.to_summary()).collect();
                self.pages.push(page);
                self.state.has_content = self.item_count() > 0;
                Ok(summaries)
            },
            Err(err) => {
                warn!(error = %err, recoverable = err.is_recoverable(), "load failed");
                self.state.error_message = Some(err.to_string());
                Err(err)
            },
        }
    }
}
