// src/cache.rs
//! Single-slot listing cache: fetch and parse the feed at most once per cache
//! lifetime, then hand the same parsed listing back on every later call.
//!
//! The cache is an owned value, constructed by the application entry point
//! and passed down by reference. Exclusive access is what `&mut self` says it
//! is: the first-access race of a process-wide slot cannot be expressed here.
//! Callers that share a cache across threads wrap it in their own lock.

use thiserror::Error;
use tracing::error;

use crate::listing::TvListing;
use crate::source::{FeedSource, SourceError};
use crate::xmltv;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("reading feed source")]
    Source(#[from] SourceError),
    #[error("parsing feed {uri}")]
    Parse {
        uri: String,
        #[source]
        source: quick_xml::DeError,
    },
}

#[derive(Debug, Default)]
pub struct ListingCache {
    slot: Option<TvListing>,
}

impl ListingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached listing, fetching and parsing it first if the slot
    /// is empty. A cached listing is returned as-is: no re-fetch, no
    /// re-validation, even if the underlying source has changed since.
    ///
    /// On failure the slot stays empty, so the next call retries instead of
    /// remembering the failure.
    pub fn get_or_fetch(&mut self, source: &FeedSource) -> Result<&TvListing, FetchError> {
        if self.slot.is_none() {
            let stream = source.open()?;
            let listing = xmltv::parse(stream).map_err(|e| FetchError::Parse {
                uri: source.describe(),
                source: e,
            })?;
            self.slot = Some(listing);
        }
        match &self.slot {
            Some(listing) => Ok(listing),
            None => unreachable!("slot populated above"),
        }
    }

    /// Log-and-degrade variant matching the original feed helper: a fetch or
    /// parse failure is logged with the source identifier and the caller
    /// gets whatever the cache currently holds (`None` on a first failure).
    pub fn get_or_fetch_lenient(&mut self, source: &FeedSource) -> Option<&TvListing> {
        if self.slot.is_none() {
            if let Err(e) = self.get_or_fetch(source) {
                error!(error = ?e, source = %source.describe(), "error fetching feed");
            }
        }
        self.slot.as_ref()
    }

    pub fn cached(&self) -> Option<&TvListing> {
        self.slot.as_ref()
    }

    /// Mutable view of the cached listing, for the in-place app-link rewrite.
    pub fn cached_mut(&mut self) -> Option<&mut TvListing> {
        self.slot.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cache_reports_nothing() {
        let cache = ListingCache::new();
        assert!(cache.cached().is_none());
    }

    #[test]
    fn parse_failure_leaves_slot_empty() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "definitely not xml").unwrap();
        let source = FeedSource::Local(tmp.path().to_path_buf());

        let mut cache = ListingCache::new();
        assert!(matches!(
            cache.get_or_fetch(&source),
            Err(FetchError::Parse { .. })
        ));
        assert!(cache.cached().is_none());
    }
}
