//! ZIP packaging of mirrored trees
//!
//! Walks the completed project directory, tallies regular files and byte
//! totals, and writes a single compressed archive whose entries are the
//! directory's contents (the directory itself is not a nested entry).

use std::fs::File;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::FileOptions;

use crate::error::{ArchiveError, Result};

/// Stats for one produced archive
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// Number of regular files stored
    pub file_count: u64,
    /// Uncompressed total size of stored files in bytes
    pub total_bytes: u64,
    /// Size of the archive file in bytes
    pub archive_bytes: u64,
}

/// Package `project_dir` into a ZIP archive at `archive_path`
///
/// Fails with [`ArchiveError::MissingProjectDir`] when the directory does
/// not exist, and with [`ArchiveError::EmptyArchive`] when the written
/// archive is absent or zero-length afterwards. Blocking; callers on the
/// async path run this through `spawn_blocking`.
pub fn write_archive(project_dir: &Path, archive_path: &Path) -> Result<ArchiveSummary> {
    if !project_dir.is_dir() {
        return Err(ArchiveError::MissingProjectDir {
            path: project_dir.to_path_buf(),
        }
        .into());
    }

    debug!(?project_dir, ?archive_path, "creating ZIP archive");

    let file = File::create(archive_path)?;
    let mut writer = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut file_count: u64 = 0;
    let mut total_bytes: u64 = 0;

    for entry in WalkDir::new(project_dir).min_depth(1) {
        let entry = entry.map_err(|e| ArchiveError::Unreadable {
            path: e.path().map(Path::to_path_buf).unwrap_or_default(),
            reason: e.to_string(),
        })?;
        let path = entry.path();

        // The archive itself must never end up inside the archive.
        if path == archive_path {
            continue;
        }

        let name = entry_name(path, project_dir);

        if entry.file_type().is_dir() {
            writer
                .add_directory(name.as_str(), options)
                .map_err(ArchiveError::Zip)?;
        } else if entry.file_type().is_file() {
            writer
                .start_file(name.as_str(), options)
                .map_err(ArchiveError::Zip)?;
            let mut source = File::open(path)?;
            let written = std::io::copy(&mut source, &mut writer)?;
            file_count += 1;
            total_bytes += written;
        }
        // Symlinks and other special entries are skipped.
    }

    writer.finish().map_err(ArchiveError::Zip)?;

    let archive_bytes = std::fs::metadata(archive_path)
        .map(|m| m.len())
        .unwrap_or(0);
    if archive_bytes == 0 {
        return Err(ArchiveError::EmptyArchive {
            path: archive_path.to_path_buf(),
        }
        .into());
    }

    let summary = ArchiveSummary {
        file_count,
        total_bytes,
        archive_bytes,
    };
    info!(
        file_count,
        total_mib = format_args!("{:.2}", total_bytes as f64 / (1024.0 * 1024.0)),
        archive_mib = format_args!("{:.2}", archive_bytes as f64 / (1024.0 * 1024.0)),
        "archive created"
    );
    Ok(summary)
}

/// Archive entry name for `path`, relative to the walk root, with forward
/// slashes on every platform
fn entry_name(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Read;
    use tempfile::TempDir;

    fn build_tree(root: &Path) {
        std::fs::create_dir_all(root.join("assets/css")).unwrap();
        std::fs::create_dir_all(root.join("empty")).unwrap();
        std::fs::write(root.join("index.html"), "<html>home</html>").unwrap();
        std::fs::write(root.join("assets/logo.svg"), "<svg/>").unwrap();
        std::fs::write(root.join("assets/css/site.css"), "body{}").unwrap();
    }

    #[test]
    fn file_count_matches_tree() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("site");
        build_tree(&project);

        let archive = dir.path().join("site.zip");
        let summary = write_archive(&project, &archive).unwrap();

        assert_eq!(summary.file_count, 3);
        let expected: u64 = ["<html>home</html>", "<svg/>", "body{}"]
            .iter()
            .map(|s| s.len() as u64)
            .sum();
        assert_eq!(summary.total_bytes, expected);
        assert!(summary.archive_bytes > 0);
    }

    #[test]
    fn round_trip_preserves_count_and_content() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("site");
        build_tree(&project);

        let archive = dir.path().join("site.zip");
        let summary = write_archive(&project, &archive).unwrap();

        let mut zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
        let mut files = 0;
        let mut index_body = String::new();
        for i in 0..zip.len() {
            let mut entry = zip.by_index(i).unwrap();
            if entry.is_dir() {
                continue;
            }
            files += 1;
            if entry.name() == "index.html" {
                entry.read_to_string(&mut index_body).unwrap();
            }
        }
        assert_eq!(files, summary.file_count);
        assert_eq!(index_body, "<html>home</html>");
    }

    #[test]
    fn entries_are_rooted_at_project_contents() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("site");
        build_tree(&project);

        let archive = dir.path().join("site.zip");
        write_archive(&project, &archive).unwrap();

        let mut zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
        for i in 0..zip.len() {
            let entry = zip.by_index(i).unwrap();
            assert!(
                !entry.name().starts_with("site/"),
                "project dir leaked into entry name: {}",
                entry.name()
            );
        }
        assert!(zip.by_name("assets/css/site.css").is_ok());
    }

    #[test]
    fn missing_project_dir_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = write_archive(&dir.path().join("absent"), &dir.path().join("out.zip"));
        match result {
            Err(Error::Archive(ArchiveError::MissingProjectDir { path })) => {
                assert!(path.ends_with("absent"));
            }
            other => panic!("expected MissingProjectDir, got: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn empty_tree_still_yields_valid_archive() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("site");
        std::fs::create_dir_all(&project).unwrap();

        let archive = dir.path().join("site.zip");
        let summary = write_archive(&project, &archive).unwrap();

        assert_eq!(summary.file_count, 0);
        assert!(summary.archive_bytes > 0);
        assert!(archive.is_file());
    }

    #[test]
    fn archive_inside_project_dir_is_not_self_included() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("site");
        build_tree(&project);

        // Archive written into the walked tree on purpose
        let archive = project.join("bundle.zip");
        let summary = write_archive(&project, &archive).unwrap();
        assert_eq!(summary.file_count, 3);

        let mut zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
        assert!(zip.by_name("bundle.zip").is_err());
    }
}
