//! Shared in-memory page cache.
//!
//! The cache maps page numbers to immutable snapshots of previously fetched
//! (already deduplicated) pages. It is shared by reference between the feed
//! and every engine instance, so it outlives individual sessions; entries
//! live until [`PageCache::clear`] - there is no TTL or background
//! revalidation, refresh is the only invalidation path.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::engine::PageNumber;
use crate::types::Photo;

/// Immutable snapshot of one fetched page.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedPage {
    /// Photos stored for this page, post-dedup, in fetch order.
    pub photos: Vec<Photo>,
    /// The page number this snapshot was stored under.
    pub page: PageNumber,
}

/// Thread-safe page-number → snapshot map.
///
/// All three operations take the same lock, so concurrent loads (a refresh
/// racing a stale in-flight append) never observe a partially cleared or
/// partially written map. `get` clones the snapshot out; the map is never
/// exposed by reference.
#[derive(Debug, Default)]
pub struct PageCache {
    pages: Mutex<HashMap<PageNumber, CachedPage>>,
}

impl PageCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PageNumber, CachedPage>> {
        self.pages.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pure lookup. Returns a clone of the stored snapshot, if any.
    #[must_use]
    pub fn get(&self, page: PageNumber) -> Option<CachedPage> {
        self.lock().get(&page).cloned()
    }

    /// Inserts or overwrites the snapshot for `page`. Last writer wins.
    pub fn put(&self, page: PageNumber, photos: Vec<Photo>) {
        debug!(page, count = photos.len(), "caching page");
        self.lock().insert(page, CachedPage { photos, page });
    }

    /// Atomically removes every entry.
    pub fn clear(&self) {
        let mut pages = self.lock();
        debug!(evicted = pages.len(), "clearing page cache");
        pages.clear();
    }

    /// Number of cached pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cache holds no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
