//! Configuration types for sitegrab

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration for a [`Scraper`](crate::Scraper)
///
/// Works out of the box with zero configuration: scrapes land under
/// `./scrapes`, the HTTrack binary is discovered from PATH, and the mirrored
/// tree is kept next to the archive.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Root directory under which per-scrape session directories are created
    /// (default: "./scrapes")
    #[serde(default = "default_work_root")]
    pub work_root: PathBuf,

    /// Name of the HTTrack project directory and archive stem inside each
    /// session directory (default: "website_scrape")
    #[serde(default = "default_project_name")]
    pub project_name: String,

    /// Keep the mirrored tree next to the archive after a successful scrape
    /// (default: true); when false the tree is removed once the archive has
    /// been verified
    #[serde(default = "default_true")]
    pub keep_mirror_tree: bool,

    /// External tool settings
    #[serde(default)]
    pub tool: ToolOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_root: default_work_root(),
            project_name: default_project_name(),
            keep_mirror_tree: true,
            tool: ToolOptions::default(),
        }
    }
}

/// HTTrack binary location and invocation settings
///
/// Groups settings for the external binary. Used as a nested sub-config
/// within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolOptions {
    /// Path to the httrack executable (auto-detected if None)
    #[serde(default)]
    pub httrack_path: Option<PathBuf>,

    /// Whether to search PATH for the binary if no explicit path is set
    /// (default: true)
    #[serde(default = "default_true")]
    pub search_path: bool,

    /// Maximum simultaneous connections passed as `-c<n>` (default: 8)
    #[serde(default = "default_connections")]
    pub connections: u8,

    /// Console output shape requested from HTTrack
    #[serde(default)]
    pub output_style: OutputStyle,
}

impl Default for ToolOptions {
    fn default() -> Self {
        Self {
            httrack_path: None,
            search_path: true,
            connections: default_connections(),
            output_style: OutputStyle::default(),
        }
    }
}

/// Verbosity shape of the HTTrack invocation
///
/// HTTrack deployments historically ran with one of two flag sets; the
/// enumeration makes the choice explicit instead of maintaining parallel
/// command builders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// `-v --display`: verbose output with a live display line
    Display,
    /// `--quiet`: minimal output, progress still parseable from scan lines
    #[default]
    Quiet,
}

fn default_work_root() -> PathBuf {
    PathBuf::from("./scrapes")
}

fn default_project_name() -> String {
    "website_scrape".to_string()
}

fn default_connections() -> u8 {
    8
}

fn default_true() -> bool {
    true
}
