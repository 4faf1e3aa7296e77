//! TV listing demo — Binary Entrypoint
//! Loads the feed config, fetches and caches the listing, rewrites its
//! app links to the configured handler, and prints a channel summary.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tvlisting::{rewrite_app_links, FeedConfig, ListingCache};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let config = FeedConfig::load_default()?;
    let source = config.source();
    let handler = config.handler();

    let mut cache = ListingCache::new();
    let listing = cache.get_or_fetch(&source)?;
    info!(channels = listing.channels.len(), source = %source.describe(), "feed loaded");

    if let Some(listing) = cache.cached_mut() {
        rewrite_app_links(listing, &handler);
    }

    if let Some(listing) = cache.cached() {
        for channel in &listing.channels {
            let link = channel
                .app_link
                .as_ref()
                .and_then(|l| l.intent_uri.as_deref())
                .unwrap_or("-");
            println!("{:>6}  {:<24}  {}", channel.display_number, channel.display_name, link);
        }
    }
    Ok(())
}
