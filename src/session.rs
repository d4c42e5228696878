//! Per-scrape session directories
//!
//! Every scrape owns a freshly created directory under the configured work
//! root, named from the scrape ID and a UTC timestamp. Concurrent scrapes
//! therefore never share filesystem state.

use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::Result;
use crate::types::ScrapeId;

/// Filesystem state owned by one scrape invocation
///
/// The layout is `<work_root>/scrape-<id>-<timestamp>/` containing the
/// HTTrack project directory and, after packaging, the archive next to it.
#[derive(Clone, Debug)]
pub struct ScrapeSession {
    id: ScrapeId,
    work_dir: PathBuf,
    project_dir: PathBuf,
    archive_path: PathBuf,
}

impl ScrapeSession {
    /// Create the session directory tree, replacing any leftover directory
    /// of the same name
    pub(crate) fn create(work_root: &Path, project_name: &str, id: ScrapeId) -> Result<Self> {
        let dir_name = format!("scrape-{:04}-{}", id.get(), Utc::now().format("%Y%m%d-%H%M%S%3f"));
        let work_dir = work_root.join(dir_name);

        if work_dir.exists() {
            std::fs::remove_dir_all(&work_dir)?;
        }
        std::fs::create_dir_all(&work_dir)?;
        debug!(?work_dir, %id, "created session directory");

        let project_dir = work_dir.join(project_name);
        let archive_path = work_dir.join(format!("{}.zip", project_name));

        Ok(Self {
            id,
            work_dir,
            project_dir,
            archive_path,
        })
    }

    /// The scrape this session belongs to
    pub fn id(&self) -> ScrapeId {
        self.id
    }

    /// Directory owned by this scrape
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Directory HTTrack is expected to populate (`-O` target)
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Where the archive is written
    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    /// Delete the mirrored tree, leaving the archive in place
    pub(crate) fn remove_mirror_tree(&self) -> Result<()> {
        if self.project_dir.exists() {
            std::fs::remove_dir_all(&self.project_dir)?;
            debug!(project_dir = ?self.project_dir, "removed mirror tree");
        }
        Ok(())
    }

    /// Best-effort listing of the first `limit` entries under the work dir,
    /// relative paths only; used for failure diagnostics
    pub(crate) fn diagnostic_listing(&self, limit: usize) -> Vec<String> {
        WalkDir::new(&self.work_dir)
            .min_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .take(limit)
            .map(|entry| {
                entry
                    .path()
                    .strip_prefix(&self.work_dir)
                    .unwrap_or_else(|_| entry.path())
                    .display()
                    .to_string()
            })
            .collect()
    }
}
