//! # sitegrab
//!
//! Website mirroring and archiving library built on HTTrack.
//!
//! ## Design Philosophy
//!
//! sitegrab is designed to be:
//! - **Thin orchestration** - Crawling is delegated entirely to HTTrack;
//!   this crate owns option translation, progress telemetry, and packaging
//! - **Sensible defaults** - Works out of the box with zero configuration
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Event-driven** - Consumers subscribe to events, no polling required
//!
//! ## Quick Start
//!
//! ```no_run
//! use sitegrab::{Config, Scraper, ScrapeRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scraper = Scraper::new(Config::default())?;
//!
//!     // Subscribe to events
//!     let mut events = scraper.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     let report = scraper.scrape(ScrapeRequest::new("https://example.com")).await?;
//!     println!("Archive: {}", report.archive_path.display());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// ZIP packaging of mirrored trees
pub mod archive;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// HTTrack invocation (flag translation, subprocess run, output parsing)
pub mod mirror;
/// Progress telemetry and console rendering
pub mod progress;
/// Core scrape orchestration
pub mod scraper;
/// Per-scrape session directories
pub mod session;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use archive::ArchiveSummary;
pub use config::{Config, OutputStyle, ToolOptions};
pub use error::{ArchiveError, Error, MirrorError, Result};
pub use mirror::{CliMirrorHandler, MirrorHandler, MirrorOutcome};
pub use progress::{ProgressRenderer, ProgressSnapshot};
pub use scraper::Scraper;
pub use session::ScrapeSession;
pub use types::{Event, ScrapeId, ScrapeReport, ScrapeRequest};
