// src/source.rs
//! Byte-source abstraction for the feed: a URI-like identifier is classified
//! by scheme into a direct local open or a network fetch, and the resulting
//! stream is always handed out behind a buffering layer.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::time::Duration;

use once_cell::sync::OnceCell;
use thiserror::Error;

/// Fixed network bounds; not configurable per call.
const CONNECT_TIMEOUT: Duration = Duration::from_millis(3000);
const READ_TIMEOUT: Duration = Duration::from_millis(10_000);

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to open local feed {path}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch remote feed {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("remote feed {url} answered {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// A resolved feed location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    /// Bundled resource or local file, opened directly.
    Local(PathBuf),
    /// Anything else: fetched over the network with fixed timeouts.
    Remote(String),
}

impl FeedSource {
    /// Classify a URI-like identifier. `file://` and the bundled-resource
    /// scheme `res://` strip to a direct path, as does a bare path with no
    /// scheme; every other scheme goes over the network.
    pub fn from_uri(uri: &str) -> Self {
        if let Some(path) = uri.strip_prefix("file://").or_else(|| uri.strip_prefix("res://")) {
            return FeedSource::Local(PathBuf::from(path));
        }
        match uri.split_once("://") {
            Some(_) => FeedSource::Remote(uri.to_string()),
            None => FeedSource::Local(PathBuf::from(uri)),
        }
    }

    /// Identifier used in logs and errors.
    pub fn describe(&self) -> String {
        match self {
            FeedSource::Local(path) => path.display().to_string(),
            FeedSource::Remote(url) => url.clone(),
        }
    }

    /// Open the source as a buffered byte stream. The stream is closed when
    /// dropped, on every exit path of the caller.
    pub fn open(&self) -> Result<Box<dyn BufRead>, SourceError> {
        match self {
            FeedSource::Local(path) => {
                let file = File::open(path).map_err(|source| SourceError::Open {
                    path: path.display().to_string(),
                    source,
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
            FeedSource::Remote(url) => {
                let response = http_client()
                    .get(url)
                    .send()
                    .and_then(|r| r.error_for_status())
                    .map_err(|source| match source.status() {
                        Some(status) => SourceError::Status {
                            url: url.clone(),
                            status,
                        },
                        None => SourceError::Fetch {
                            url: url.clone(),
                            source,
                        },
                    })?;
                Ok(Box::new(BufReader::new(response)))
            }
        }
    }
}

/// Shared blocking client; built once, first use.
fn http_client() -> &'static reqwest::blocking::Client {
    static CLIENT: OnceCell<reqwest::blocking::Client> = OnceCell::new();
    CLIENT.get_or_init(|| {
        reqwest::blocking::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(READ_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new())
    })
}
