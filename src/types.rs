//! Core types for sitegrab

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Highest crawl depth HTTrack accepts; a request depth of 0 maps to this
pub const MAX_TOOL_DEPTH: u32 = 9;

/// Upper bound accepted for [`ScrapeRequest::max_depth`]
pub const MAX_REQUEST_DEPTH: u32 = 10;

/// Upper bound accepted for [`ScrapeRequest::max_size_mb`]
pub const MAX_REQUEST_SIZE_MB: u64 = 1000;

/// Unique identifier for a scrape within one [`Scraper`](crate::Scraper)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScrapeId(pub u64);

impl ScrapeId {
    /// Create a new ScrapeId
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner u64 value
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ScrapeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ScrapeId> for u64 {
    fn from(id: ScrapeId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ScrapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated description of one website scrape
///
/// Immutable once validated. Depth and size caps are advisory hints passed
/// to HTTrack, not limits enforced by this library.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeRequest {
    /// The URL of the website to scrape (must start with http:// or https://)
    pub url: String,

    /// Maximum depth to crawl, 0 = unlimited (capped at HTTrack's maximum)
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    /// Maximum size in MB to download, 0 = unlimited
    #[serde(default = "default_max_size_mb")]
    pub max_size_mb: u64,

    /// Follow links to external domains
    #[serde(default)]
    pub external_links: bool,

    /// Download images, videos, and other media files
    #[serde(default = "default_true")]
    pub include_media: bool,
}

impl ScrapeRequest {
    /// Create a request for `url` with default limits (depth 2, 100 MB,
    /// no external links, media included)
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_depth: default_max_depth(),
            max_size_mb: default_max_size_mb(),
            external_links: false,
            include_media: true,
        }
    }

    /// Validate the request
    ///
    /// Rejects URLs without an http/https scheme and out-of-range limits.
    /// Called by [`Scraper::scrape`](crate::Scraper::scrape) before any
    /// subprocess is spawned.
    pub fn validate(&self) -> Result<()> {
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(Error::InvalidRequest {
                message: "URL must start with http:// or https://".to_string(),
            });
        }
        if let Err(e) = url::Url::parse(&self.url) {
            return Err(Error::InvalidRequest {
                message: format!("URL failed to parse: {}", e),
            });
        }
        if self.max_depth > MAX_REQUEST_DEPTH {
            return Err(Error::InvalidRequest {
                message: format!(
                    "max_depth {} exceeds maximum of {}",
                    self.max_depth, MAX_REQUEST_DEPTH
                ),
            });
        }
        if self.max_size_mb > MAX_REQUEST_SIZE_MB {
            return Err(Error::InvalidRequest {
                message: format!(
                    "max_size_mb {} exceeds maximum of {}",
                    self.max_size_mb, MAX_REQUEST_SIZE_MB
                ),
            });
        }
        Ok(())
    }
}

fn default_max_depth() -> u32 {
    2
}

fn default_max_size_mb() -> u64 {
    100
}

fn default_true() -> bool {
    true
}

/// Terminal artifact of a successful scrape
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScrapeReport {
    /// Path of the produced ZIP archive
    pub archive_path: PathBuf,
    /// Number of regular files found under the project directory at archive time
    pub file_count: u64,
    /// Uncompressed total size of those files in bytes
    pub total_bytes: u64,
    /// Size of the archive file in bytes
    pub archive_bytes: u64,
    /// When the archive was created
    pub created_at: DateTime<Utc>,
}

/// Event emitted during the scrape lifecycle
///
/// Consumers subscribe via [`Scraper::subscribe`](crate::Scraper::subscribe);
/// no polling required.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Scrape accepted and session directory created
    Queued {
        /// Scrape ID
        id: ScrapeId,
        /// Target URL
        url: String,
    },

    /// Mirror progress update
    ///
    /// Telemetry parsed best-effort from HTTrack output; `percent` never
    /// regresses within one scrape.
    Mirroring {
        /// Scrape ID
        id: ScrapeId,
        /// Progress percentage (0 to 100)
        percent: u8,
        /// Files reported complete so far
        files: u64,
        /// Bytes reported transferred so far
        bytes: u64,
    },

    /// HTTrack exited successfully
    MirrorComplete {
        /// Scrape ID
        id: ScrapeId,
        /// Files reported complete over the whole run
        files: u64,
        /// Bytes reported transferred over the whole run
        bytes: u64,
    },

    /// Archive packaging started
    Archiving {
        /// Scrape ID
        id: ScrapeId,
    },

    /// Scrape finished; the archive is ready
    Complete {
        /// Scrape ID
        id: ScrapeId,
        /// The produced archive and its stats
        report: ScrapeReport,
    },

    /// Scrape failed
    Failed {
        /// Scrape ID
        id: ScrapeId,
        /// Error message
        error: String,
    },
}
