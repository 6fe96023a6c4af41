//! # strobe-core
//!
//! Core functionality for strobe - an incremental, deduplicating photo feed
//! over a remote paginated API.
//!
//! This crate fetches pages of photos from a remote source one page at a
//! time, filters out identifiers already emitted during the current browsing
//! session, and keeps every fetched page in an in-memory cache so that
//! re-delivery (a re-subscription, a retry, a consumer rebuilding its view)
//! never hits the network for a page that is still valid.
//!
//! ## Architecture
//!
//! The crate is organized around several key components:
//!
//! - **Source**: the remote boundary - `fetch_page(page, client_id)` over HTTP
//! - **Cache**: a shared, lock-protected page-number → snapshot map
//! - **Engine**: the paging core - request classification, session dedup,
//!   cursor computation, typed load results
//! - **Feed**: per-subscription session factory, invalidation wiring, and
//!   projection of raw photos into presentation summaries
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use strobe_core::{FeedConfig, HttpPhotoSource, PhotoFeed, Result};
//!
//! # async fn run() -> Result<()> {
//! let source = HttpPhotoSource::new("https://api.unsplash.com/")?;
//! let feed = PhotoFeed::new(source, "access-key", FeedConfig::default())?;
//!
//! let mut session = feed.session();
//! let first = session.refresh().await?;
//! let more = session.load_more().await?;
//!
//! println!("loaded {} + {} photos", first.len(), more.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error handling
//!
//! All operations return [`Result<T, Error>`]. Remote failures are never
//! panics and never escape the engine as anything but the typed error: the
//! feed stays usable and the same request can be replayed with
//! [`feed::FeedSession::retry`].

/// Shared in-memory page cache
pub mod cache;
/// Configuration loading (TOML file + environment overrides)
pub mod config;
/// The paging engine: request kinds, session dedup, cursor computation
pub mod engine;
/// Error types and result alias
pub mod error;
/// Session factory and presentation-facing feed surface
pub mod feed;
/// Remote source boundary and its HTTP implementation
pub mod source;
/// Wire and presentation data types
pub mod types;

pub use cache::{CachedPage, PageCache};
pub use config::Config;
pub use engine::{FIRST_PAGE, LoadRequest, LoadedPage, PageNumber, PagingEngine, PagingState};
pub use error::{Error, Result};
pub use feed::{FeedConfig, FeedSession, FeedState, PhotoFeed};
pub use source::{HttpPhotoSource, PhotoSource};
pub use types::{Photo, PhotoSummary, PhotoUrls};
