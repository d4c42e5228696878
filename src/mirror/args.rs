//! Translation of scrape options into HTTrack command-line flags

use std::path::Path;

use crate::config::{OutputStyle, ToolOptions};
use crate::types::{MAX_TOOL_DEPTH, ScrapeRequest};

/// File extensions excluded when media download is disabled
const MEDIA_EXTENSIONS: &[&str] = &[
    "gif", "jpg", "jpeg", "png", "svg", "webp", "mp4", "avi", "mov", "mp3", "wav", "ico",
];

/// Build the ordered HTTrack argument list for a validated request
///
/// Pure function of the request, the project directory, and the tool
/// options. Depth 0 maps to HTTrack's maximum supported depth, size 0 omits
/// the byte-limit flag entirely.
pub fn build_args(request: &ScrapeRequest, project_dir: &Path, options: &ToolOptions) -> Vec<String> {
    let mut args = vec![
        request.url.clone(),
        "-O".to_string(),
        project_dir.display().to_string(),
    ];

    match options.output_style {
        OutputStyle::Display => {
            args.push("-v".to_string());
            args.push("--display".to_string());
        }
        OutputStyle::Quiet => {
            args.push("--quiet".to_string());
        }
    }

    if request.max_depth > 0 {
        args.push(format!("-r{}", request.max_depth));
    } else {
        args.push(format!("-r{}", MAX_TOOL_DEPTH));
    }

    if request.max_size_mb > 0 {
        args.push(format!("-M{}", request.max_size_mb * 1_048_576));
    }

    if !request.external_links {
        args.push("-%e0".to_string());
    }

    if !request.include_media {
        for ext in MEDIA_EXTENSIONS {
            args.push(format!("-*{}", ext));
        }
    }

    args.push(format!("-c{}", options.connections));
    args.push("-%v".to_string());

    args
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn request() -> ScrapeRequest {
        ScrapeRequest::new("https://example.com")
    }

    fn build(request: &ScrapeRequest) -> Vec<String> {
        build_args(request, &PathBuf::from("/tmp/work/site"), &ToolOptions::default())
    }

    #[test]
    fn url_and_output_lead_the_command() {
        let args = build(&request());
        assert_eq!(args[0], "https://example.com");
        assert_eq!(args[1], "-O");
        assert_eq!(args[2], "/tmp/work/site");
    }

    #[test]
    fn depth_zero_maps_to_tool_maximum() {
        let mut req = request();
        req.max_depth = 0;
        let args = build(&req);
        assert!(args.contains(&"-r9".to_string()));
        assert!(!args.contains(&"-r0".to_string()));
    }

    #[test]
    fn positive_depth_maps_to_depth_flag() {
        let mut req = request();
        req.max_depth = 3;
        let args = build(&req);
        assert!(args.contains(&"-r3".to_string()));
    }

    #[test]
    fn size_zero_omits_size_flag() {
        let mut req = request();
        req.max_size_mb = 0;
        let args = build(&req);
        assert!(!args.iter().any(|a| a.starts_with("-M")));
    }

    #[test]
    fn size_cap_converts_megabytes_to_bytes() {
        let mut req = request();
        req.max_size_mb = 100;
        let args = build(&req);
        assert!(args.contains(&"-M104857600".to_string()));
    }

    #[test]
    fn external_links_disabled_adds_suppression_flag() {
        let req = request();
        assert!(build(&req).contains(&"-%e0".to_string()));

        let mut req = request();
        req.external_links = true;
        assert!(!build(&req).contains(&"-%e0".to_string()));
    }

    #[test]
    fn media_exclusions_cover_common_extensions() {
        let mut req = request();
        req.include_media = false;
        let args = build(&req);
        for ext in ["gif", "jpg", "mp4", "mp3", "ico"] {
            assert!(args.contains(&format!("-*{}", ext)), "missing -*{}", ext);
        }

        let req = request();
        assert!(!build(&req).iter().any(|a| a.starts_with("-*")));
    }

    #[test]
    fn output_style_selects_flag_shape() {
        let quiet = ToolOptions::default();
        let args = build_args(&request(), &PathBuf::from("/tmp/s"), &quiet);
        assert!(args.contains(&"--quiet".to_string()));
        assert!(!args.contains(&"--display".to_string()));

        let display = ToolOptions {
            output_style: OutputStyle::Display,
            ..Default::default()
        };
        let args = build_args(&request(), &PathBuf::from("/tmp/s"), &display);
        assert!(args.contains(&"-v".to_string()));
        assert!(args.contains(&"--display".to_string()));
        assert!(!args.contains(&"--quiet".to_string()));
    }

    #[test]
    fn connection_cap_and_scan_flag_trail() {
        let args = build(&request());
        let len = args.len();
        assert_eq!(args[len - 2], "-c8");
        assert_eq!(args[len - 1], "-%v");
    }

    #[test]
    fn spec_example_request() {
        // {depth 1, size 0, external false, media false}
        let req = ScrapeRequest {
            url: "https://example.com".to_string(),
            max_depth: 1,
            max_size_mb: 0,
            external_links: false,
            include_media: false,
        };
        let args = build(&req);
        assert!(args.contains(&"-r1".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("-M")));
        assert!(args.contains(&"-%e0".to_string()));
        assert!(args.iter().filter(|a| a.starts_with("-*")).count() >= 10);
    }
}
