// src/config.rs
//! Feed configuration: which source the listing comes from and which handler
//! component rewritten app links should target. The local-vs-network choice
//! is a static configuration value, not negotiated at runtime.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::listing::HandlerIdentity;
use crate::source::FeedSource;

const ENV_PATH: &str = "TVLISTING_CONFIG_PATH";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// When set, the bundled feed is used and `feed_url` is ignored.
    pub use_local_feed: bool,
    pub local_feed_path: String,
    pub feed_url: String,
    pub handler_package: String,
    pub handler_class: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            use_local_feed: true,
            local_feed_path: "feeds/rich_tv_input_xmltv_feed.xml".to_string(),
            feed_url: String::new(),
            handler_package: "com.example.tv".to_string(),
            handler_class: "RichActivity".to_string(),
        }
    }
}

impl FeedConfig {
    /// The source the static selection rule picks.
    pub fn source(&self) -> FeedSource {
        if self.use_local_feed {
            FeedSource::from_uri(&self.local_feed_path)
        } else {
            FeedSource::from_uri(&self.feed_url)
        }
    }

    pub fn handler(&self) -> HandlerIdentity {
        HandlerIdentity::new(self.handler_package.clone(), self.handler_class.clone())
    }

    /// Load from an explicit path. Supports TOML or JSON formats.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading feed config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        parse_config(&content, ext.as_str())
    }

    /// Load using env var + fallbacks:
    /// 1) $TVLISTING_CONFIG_PATH
    /// 2) config/tvlisting.toml
    /// 3) config/tvlisting.json
    /// 4) built-in defaults (bundled local feed)
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            } else {
                return Err(anyhow!("TVLISTING_CONFIG_PATH points to non-existent path"));
            }
        }
        let toml_p = PathBuf::from("config/tvlisting.toml");
        if toml_p.exists() {
            return Self::load_from(&toml_p);
        }
        let json_p = PathBuf::from("config/tvlisting.json");
        if json_p.exists() {
            return Self::load_from(&json_p);
        }
        Ok(Self::default())
    }
}

fn parse_config(s: &str, hint_ext: &str) -> Result<FeedConfig> {
    if hint_ext == "json" {
        return serde_json::from_str(s).context("parsing feed config json");
    }
    if hint_ext == "toml" {
        return toml::from_str(s).context("parsing feed config toml");
    }
    // No usable extension hint: try TOML first, then JSON.
    if let Ok(v) = toml::from_str(s) {
        return Ok(v);
    }
    if let Ok(v) = serde_json::from_str(s) {
        return Ok(v);
    }
    Err(anyhow!("unsupported feed config format"))
}
