//! The paging engine: one session of sequential page loads.
//!
//! An engine instance is a *session*: it owns the set of identifiers already
//! emitted since it was created, shares the [`PageCache`] with every other
//! session, and classifies each load as a page of data or a typed error.
//! Sessions end by being dropped and replaced - the feed never reaches into
//! a live engine to reset its state, which is what makes refresh racing an
//! in-flight append safe.
//!
//! For a given load the engine decides, in order: short-circuit prepends
//! (the cursor is linear and starts at page 1, there is nothing earlier),
//! invalidate on refresh, serve from cache when the page is still valid,
//! otherwise fetch, dedup, and store.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::cache::PageCache;
use crate::source::PhotoSource;
use crate::types::Photo;
use crate::Result;

/// Page-number cursor. Positive, linear, no gaps.
pub type PageNumber = u32;

/// The first page of the stream.
pub const FIRST_PAGE: PageNumber = 1;

/// One logical page request.
///
/// `key` is the target page; when absent, refresh and append both start at
/// [`FIRST_PAGE`]. Requests are `Copy` so a failed one can be replayed
/// verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadRequest {
    /// Start a new logical session: invalidate the shared cache and this
    /// engine's dedup set, then load `key` (default page 1).
    Refresh {
        /// Target page, defaulting to [`FIRST_PAGE`].
        key: Option<PageNumber>,
    },
    /// Load the next page forward without invalidating anything.
    Append {
        /// Target page, defaulting to [`FIRST_PAGE`].
        key: Option<PageNumber>,
    },
    /// Request for content before the given key. Always answered with an
    /// empty page - the stream has no pages before 1.
    Prepend {
        /// The key the consumer asked to prepend before.
        key: PageNumber,
    },
}

/// Successful outcome of one load.
///
/// `prev_key` is `None` iff the page is 1; `next_key` is `None` iff the page
/// held zero items after dedup, which is the end-of-stream signal.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPage {
    /// Items for this page, deduplicated, in fetch order.
    pub photos: Vec<Photo>,
    /// Cursor for the previous page, absent at page 1.
    pub prev_key: Option<PageNumber>,
    /// Cursor for the next page, absent at end of stream.
    pub next_key: Option<PageNumber>,
}

/// Snapshot of the pages a consumer currently holds, used to anchor a
/// forced refresh at the page closest to the consumer's position.
#[derive(Debug, Default)]
pub struct PagingState {
    /// Pages loaded so far, in load order.
    pub pages: Vec<LoadedPage>,
    /// Absolute item index of the consumer's anchor across `pages`, if any.
    pub anchor: Option<usize>,
}

impl PagingState {
    /// The page to reload on a forced refresh: `prev_key + 1` of the page
    /// closest to the anchor when present, else its `next_key - 1`, else
    /// nothing (fall back to page 1).
    #[must_use]
    pub fn refresh_key(&self) -> Option<PageNumber> {
        let anchor = self.anchor?;
        let page = self.closest_page_to(anchor)?;
        page.prev_key
            .map(|k| k + 1)
            .or_else(|| page.next_key.map(|k| k - 1))
    }

    fn closest_page_to(&self, anchor: usize) -> Option<&LoadedPage> {
        let mut covered = 0usize;
        for page in &self.pages {
            covered += page.photos.len();
            if anchor < covered {
                return Some(page);
            }
        }
        // Anchor past the last loaded item clamps to the last page.
        self.pages.last()
    }
}

/// One session's paging engine.
///
/// Shares the [`PageCache`] with the feed; exclusively owns its dedup set.
/// Loads within one session may overlap, so the set sits behind its own
/// lock. The lock is never held across an await.
pub struct PagingEngine<S: PhotoSource> {
    source: Arc<S>,
    cache: Arc<PageCache>,
    client_id: String,
    seen_ids: Mutex<HashSet<String>>,
}

impl<S: PhotoSource> PagingEngine<S> {
    /// Creates a fresh session over `source`, sharing `cache`.
    pub fn new(source: Arc<S>, cache: Arc<PageCache>, client_id: impl Into<String>) -> Self {
        Self {
            source,
            cache,
            client_id: client_id.into(),
            seen_ids: Mutex::new(HashSet::new()),
        }
    }

    fn seen(&self) -> MutexGuard<'_, HashSet<String>> {
        self.seen_ids.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Executes one load request.
    ///
    /// Remote failures come back as the `Err` arm, never a panic, and leave
    /// both the cache and the dedup set untouched - the identical request
    /// can be replayed.
    pub async fn load(&self, request: LoadRequest) -> Result<LoadedPage> {
        let page = match request {
            LoadRequest::Prepend { key } => {
                debug!(key, "prepend short-circuits to an empty page");
                return Ok(LoadedPage {
                    photos: Vec::new(),
                    prev_key: None,
                    next_key: Some(key),
                });
            },
            LoadRequest::Refresh { key } => {
                // A refresh starts a new logical session: everything cached
                // or already-seen belongs to the old one.
                info!("refresh: invalidating page cache and session dedup set");
                self.cache.clear();
                self.seen().clear();
                key.unwrap_or(FIRST_PAGE)
            },
            LoadRequest::Append { key } => key.unwrap_or(FIRST_PAGE),
        };

        if let Some(cached) = self.cache.get(page) {
            // Cached items were deduplicated when first stored; replaying
            // the filter here would drop them against their own ids.
            debug!(page, count = cached.photos.len(), "page cache hit");
            return Ok(Self::paged(page, cached.photos));
        }

        let fetched = self.source.fetch_page(page, &self.client_id).await?;

        let photos = {
            let mut seen = self.seen();
            let before = fetched.len();
            let kept: Vec<Photo> = fetched
                .into_iter()
                .filter(|photo| seen.insert(photo.id.clone()))
                .collect();
            if kept.len() < before {
                debug!(page, dropped = before - kept.len(), "deduplicated photos");
            }
            kept
        };

        self.cache.put(page, photos.clone());
        Ok(Self::paged(page, photos))
    }

    fn paged(page: PageNumber, photos: Vec<Photo>) -> LoadedPage {
        LoadedPage {
            prev_key: (page != FIRST_PAGE).then(|| page - 1),
            next_key: (!photos.is_empty()).then(|| page + 1),
            photos,
        }
    }
}
