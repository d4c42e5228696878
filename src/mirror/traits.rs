//! Traits and types for website mirroring

use async_trait::async_trait;
use std::path::Path;
use tokio::sync::watch;

use crate::progress::ProgressSnapshot;
use crate::types::ScrapeRequest;

/// Result of a completed mirror run
#[must_use]
#[derive(Debug, Clone, Copy)]
pub struct MirrorOutcome {
    /// Final progress snapshot at process exit
    pub progress: ProgressSnapshot,
}

/// Trait for website mirroring
///
/// This trait defines the interface for running the mirroring tool against
/// one scrape request. The production implementation drives the external
/// HTTrack binary; tests substitute handlers that fabricate output trees.
///
/// # Examples
///
/// ```no_run
/// use sitegrab::mirror::{CliMirrorHandler, MirrorHandler};
/// use sitegrab::{ProgressSnapshot, ScrapeRequest};
/// use std::path::Path;
/// use tokio::sync::watch;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let handler = CliMirrorHandler::from_path()
///     .expect("httrack binary not found");
///
/// let (progress_tx, _progress_rx) = watch::channel(ProgressSnapshot::default());
/// let request = ScrapeRequest::new("https://example.com");
/// let outcome = handler
///     .mirror(&request, Path::new("/tmp/scrape/site"), progress_tx)
///     .await?;
/// println!("{} files mirrored", outcome.progress.files);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait MirrorHandler: Send + Sync {
    /// Mirror `request.url` into `project_dir`, running to completion
    ///
    /// Progress snapshots are published through `progress` as output is
    /// parsed; publishing is best-effort and a handler that reports nothing
    /// is still correct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The subprocess cannot be spawned
    /// - The tool exits with a non-zero status (always fatal)
    /// - Reading the output streams fails
    async fn mirror(
        &self,
        request: &ScrapeRequest,
        project_dir: &Path,
        progress: watch::Sender<ProgressSnapshot>,
    ) -> crate::Result<MirrorOutcome>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
