// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod cache;
pub mod config;
pub mod intent;
pub mod listing;
pub mod rewrite;
pub mod source;
pub mod xmltv;

// ---- Re-exports for stable public API ----
pub use crate::cache::{FetchError, ListingCache};
pub use crate::config::FeedConfig;
pub use crate::listing::{AppLink, Channel, HandlerIdentity, TvListing, EXTRA_DISPLAY_NUMBER};
pub use crate::rewrite::rewrite_app_links;
pub use crate::source::FeedSource;
