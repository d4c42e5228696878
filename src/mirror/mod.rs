//! Website mirroring via the external HTTrack binary
//!
//! This module owns everything between a validated scrape request and a
//! populated project directory: flag translation, subprocess execution, and
//! best-effort progress parsing.
//!
//! ## Architecture
//!
//! The core abstraction is the [`MirrorHandler`] trait, which defines the
//! interface for one mirror run. The production implementation is
//! [`CliMirrorHandler`], which executes the external `httrack` binary;
//! tests inject handlers that fabricate output trees instead.
//!
//! ## Usage
//!
//! ```no_run
//! use sitegrab::mirror::{CliMirrorHandler, MirrorHandler};
//! use sitegrab::{ProgressSnapshot, ScrapeRequest};
//! use std::path::Path;
//! use tokio::sync::watch;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Try to find httrack in PATH
//!     let handler = CliMirrorHandler::from_path()
//!         .expect("httrack binary not found");
//!
//!     let (progress_tx, _progress_rx) = watch::channel(ProgressSnapshot::default());
//!     let request = ScrapeRequest::new("https://example.com");
//!     let outcome = handler
//!         .mirror(&request, Path::new("/tmp/scrape/site"), progress_tx)
//!         .await?;
//!     println!(
//!         "mirrored {} files, {} bytes",
//!         outcome.progress.files, outcome.progress.bytes
//!     );
//!
//!     Ok(())
//! }
//! ```

mod args;
mod cli;
mod parser;
mod traits;

pub use args::build_args;
pub use cli::CliMirrorHandler;
pub use parser::ProgressParser;
pub use traits::{MirrorHandler, MirrorOutcome};
