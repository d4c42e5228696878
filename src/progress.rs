//! Progress telemetry and console rendering
//!
//! Progress is parsed best-effort from HTTrack's output and carried as
//! [`ProgressSnapshot`] values. The optional [`ProgressRenderer`] consumes
//! scrape events and redraws a single in-place status bar; it is purely
//! presentational and keeps no state beyond the bar itself.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::types::Event;

/// Coarse progress signals extracted from HTTrack output
///
/// `percent` is monotonically non-decreasing and `files` monotonically
/// increasing over the lifetime of one scrape. All three values are
/// telemetry only, never a correctness signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Completion percentage (0 to 100)
    pub percent: u8,
    /// Number of files reported complete
    pub files: u64,
    /// Number of bytes reported transferred
    pub bytes: u64,
}

impl ProgressSnapshot {
    /// Bytes transferred expressed in MiB
    pub fn megabytes(&self) -> f64 {
        self.bytes as f64 / (1024.0 * 1024.0)
    }
}

/// Renders scrape events as an in-place console progress bar
///
/// Subscribe to a [`Scraper`](crate::Scraper), hand the receiver to
/// [`ProgressRenderer::attach`], and await the returned handle after the
/// scrape completes.
pub struct ProgressRenderer {
    bar: ProgressBar,
}

impl ProgressRenderer {
    /// Create a renderer drawing to stderr
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    /// Create a renderer with an explicit draw target (hidden in tests)
    pub fn with_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(100), target);
        bar.set_style(bar_style());
        Self { bar }
    }

    /// Consume events until the scrape reaches a terminal state
    ///
    /// The spawned task ends on `Complete`, `Failed`, or channel close.
    pub fn attach(self, mut events: broadcast::Receiver<Event>) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(Event::Queued { url, .. }) => {
                        self.bar.set_message(format!("Scraping {}", url));
                    }
                    Ok(Event::Mirroring {
                        percent,
                        files,
                        bytes,
                        ..
                    }) => {
                        self.bar.set_position(u64::from(percent));
                        let snapshot = ProgressSnapshot {
                            percent,
                            files,
                            bytes,
                        };
                        self.bar.set_message(format!(
                            "Downloaded {} files ({:.1} MiB)",
                            files,
                            snapshot.megabytes()
                        ));
                    }
                    Ok(Event::MirrorComplete { files, .. }) => {
                        self.bar.set_position(100);
                        self.bar.set_message(format!("Mirror complete, {} files", files));
                    }
                    Ok(Event::Archiving { .. }) => {
                        self.bar.set_message("Creating ZIP archive...".to_string());
                    }
                    Ok(Event::Complete { report, .. }) => {
                        self.bar.finish_with_message(format!(
                            "Done: {} ({} files)",
                            report.archive_path.display(),
                            report.file_count
                        ));
                        break;
                    }
                    Ok(Event::Failed { error, .. }) => {
                        self.bar.abandon_with_message(format!("Failed: {}", error));
                        break;
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}

impl Default for ProgressRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos:>3}% {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-")
}
