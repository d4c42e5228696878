//! CLI-based mirror handler using the external httrack binary

use super::args::build_args;
use super::parser::ProgressParser;
use super::traits::{MirrorHandler, MirrorOutcome};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, trace};

use crate::config::ToolOptions;
use crate::error::MirrorError;
use crate::progress::ProgressSnapshot;
use crate::types::ScrapeRequest;

/// CLI-based mirror handler using the external httrack binary
///
/// Spawns `httrack` with flags translated from the scrape request, merges
/// its stdout and stderr into one line stream, and feeds every line through
/// a [`ProgressParser`]. A non-zero exit status is fatal.
///
/// # Examples
///
/// ```no_run
/// use sitegrab::mirror::CliMirrorHandler;
/// use std::path::PathBuf;
///
/// // Create with explicit path
/// let handler = CliMirrorHandler::new(PathBuf::from("/usr/bin/httrack"));
///
/// // Or auto-discover from PATH
/// let handler = CliMirrorHandler::from_path()
///     .expect("httrack not found in PATH");
/// ```
#[derive(Debug)]
pub struct CliMirrorHandler {
    binary_path: PathBuf,
    options: ToolOptions,
}

impl CliMirrorHandler {
    /// Create a new CLI handler with an explicit binary path and default
    /// tool options
    pub fn new(binary_path: PathBuf) -> Self {
        Self {
            binary_path,
            options: ToolOptions::default(),
        }
    }

    /// Attempt to find httrack in PATH
    ///
    /// Uses the `which` crate to search for the `httrack` binary in the
    /// system PATH.
    ///
    /// # Returns
    ///
    /// `Some(CliMirrorHandler)` if the binary is found, `None` otherwise.
    pub fn from_path() -> Option<Self> {
        which::which("httrack").ok().map(Self::new)
    }

    /// Resolve a handler from tool options
    ///
    /// Uses the explicit `httrack_path` when set, otherwise searches PATH
    /// when `search_path` is enabled.
    pub fn resolve(options: &ToolOptions) -> Result<Self, MirrorError> {
        let binary_path = match &options.httrack_path {
            Some(path) => path.clone(),
            None if options.search_path => {
                which::which("httrack").map_err(|_| MirrorError::BinaryNotFound)?
            }
            None => return Err(MirrorError::BinaryNotFound),
        };
        Ok(Self {
            binary_path,
            options: options.clone(),
        })
    }

    /// Path of the binary this handler runs
    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }
}

/// Forward lines of one output stream into the shared channel
fn spawn_line_reader<R>(stream: R, tx: mpsc::Sender<String>) -> tokio::task::JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(stream).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if tx.send(line).await.is_err() {
                break;
            }
        }
    })
}

#[async_trait]
impl MirrorHandler for CliMirrorHandler {
    async fn mirror(
        &self,
        request: &ScrapeRequest,
        project_dir: &Path,
        progress: watch::Sender<ProgressSnapshot>,
    ) -> crate::Result<MirrorOutcome> {
        let args = build_args(request, project_dir, &self.options);
        debug!(binary = ?self.binary_path, ?args, "launching httrack");

        let mut child = Command::new(&self.binary_path)
            .args(&args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| MirrorError::LaunchFailed {
                path: self.binary_path.clone(),
                reason: e.to_string(),
            })?;

        // Merge stdout and stderr into one ordered-enough line stream.
        let (line_tx, mut line_rx) = mpsc::channel::<String>(64);
        let stdout_task = child
            .stdout
            .take()
            .map(|stdout| spawn_line_reader(stdout, line_tx.clone()));
        let stderr_task = child
            .stderr
            .take()
            .map(|stderr| spawn_line_reader(stderr, line_tx.clone()));
        drop(line_tx);

        let mut parser = ProgressParser::new();
        while let Some(line) = line_rx.recv().await {
            trace!(line = line.as_str(), "httrack output");
            if parser.observe(&line) {
                progress.send_replace(parser.snapshot());
            }
        }

        if let Some(task) = stdout_task {
            task.await?;
        }
        if let Some(task) = stderr_task {
            task.await?;
        }

        let status = child.wait().await?;
        if !status.success() {
            return Err(MirrorError::ToolFailed {
                code: status.code(),
            }
            .into());
        }

        let snapshot = parser.snapshot();
        info!(
            files = snapshot.files,
            bytes = snapshot.bytes,
            "httrack finished"
        );
        Ok(MirrorOutcome { progress: snapshot })
    }

    fn name(&self) -> &'static str {
        "cli-httrack"
    }
}
