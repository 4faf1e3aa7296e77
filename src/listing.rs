// src/listing.rs
use serde::{Deserialize, Serialize};

/// Extras key under which feeds encode the channel display number inside
/// an app-link intent URI.
pub const EXTRA_DISPLAY_NUMBER: &str = "display-number";

/// Parsed representation of the full feed. Ordered as the feed lists them.
/// Treated as immutable after parse, except the `AppLink::intent_uri`
/// rewrite in [`crate::rewrite`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TvListing {
    pub channels: Vec<Channel>,
}

/// One tunable entry in the listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Channel {
    pub display_number: String, // e.g. "1-1"
    pub display_name: String,
    pub icon_uri: Option<String>,
    pub app_link: Option<AppLink>,
}

/// Optional deep-link metadata attached to a channel. `intent_uri` may be
/// absent even when the app-link element itself is present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppLink {
    pub text: Option<String>,
    pub color: Option<String>,
    pub poster_uri: Option<String>,
    pub intent_uri: Option<String>,
}

/// The (package, class) pair that should receive rewritten deep links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerIdentity {
    pub package: String,
    pub class: String,
}

impl HandlerIdentity {
    pub fn new(package: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            class: class.into(),
        }
    }

    /// Fully qualified class name. A bare class name resolves against the
    /// package, so `("com.example.tv", "RichActivity")` names
    /// `com.example.tv.RichActivity`.
    pub fn qualified_class(&self) -> String {
        if self.class.contains('.') {
            self.class.clone()
        } else {
            format!("{}.{}", self.package, self.class)
        }
    }
}
