// src/rewrite.rs
//! Rewrites channel app-link intent URIs so every deep link in the listing
//! targets one handler component.

use tracing::warn;

use crate::intent::{ComponentName, IntentUri};
use crate::listing::{HandlerIdentity, TvListing};

/// Point every decodable app-link intent URI in `listing` at `handler`,
/// in place. Channels without an app link, without an intent URI, or with a
/// URI the codec rejects are left untouched; a malformed URI is logged and
/// never aborts the rest of the batch.
///
/// The codec encodes canonically, so running this twice with the same
/// handler leaves the listing unchanged after the first pass.
pub fn rewrite_app_links(listing: &mut TvListing, handler: &HandlerIdentity) {
    if listing.channels.is_empty() {
        return;
    }

    let component = ComponentName::new(handler.package.clone(), handler.qualified_class());
    for channel in &mut listing.channels {
        let Some(app_link) = channel.app_link.as_mut() else {
            continue;
        };
        let Some(intent_uri) = app_link.intent_uri.as_deref() else {
            continue;
        };
        let mut intent = match IntentUri::decode(intent_uri) {
            Ok(intent) => intent,
            Err(e) => {
                warn!(error = %e, uri = %intent_uri, "invalid intent uri");
                continue;
            }
        };
        intent.set_component(component.clone());
        app_link.intent_uri = Some(intent.encode());
    }
}
