//! Custom configuration example
//!
//! This example shows how to configure sitegrab with various options:
//! - An explicit httrack binary path
//! - A custom work root and project name
//! - Verbose HTTrack output and a lower connection cap
//! - Dropping the mirrored tree once the archive is verified
//! - Consuming raw events instead of the bundled progress bar

use sitegrab::config::{Config, OutputStyle, ToolOptions};
use sitegrab::{Event, Scraper, ScrapeRequest};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = Config {
        work_root: PathBuf::from("/var/tmp/sitegrab"),
        project_name: "docs_dump".to_string(),
        // Only the archive survives a successful scrape
        keep_mirror_tree: false,
        tool: ToolOptions {
            httrack_path: Some(PathBuf::from("/usr/bin/httrack")),
            search_path: false,
            connections: 4,
            output_style: OutputStyle::Display,
        },
    };

    let scraper = Scraper::new(config)?;

    // Consume raw events
    let mut events = scraper.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                Event::Queued { id, url } => {
                    println!("✓ Queued scrape #{}: {}", id, url);
                }
                Event::Mirroring {
                    id,
                    percent,
                    files,
                    bytes,
                } => {
                    println!(
                        "⬇ Scrape #{}: {}% ({} files, {:.2} MiB)",
                        id,
                        percent,
                        files,
                        bytes as f64 / 1_048_576.0
                    );
                }
                Event::MirrorComplete { id, files, .. } => {
                    println!("✓ Scrape #{} mirrored {} files, archiving next", id, files);
                }
                Event::Complete { id, report } => {
                    println!("✓ Complete #{}: {:?}", id, report.archive_path);
                }
                Event::Failed { id, error } => {
                    println!("✗ Failed #{}: {}", id, error);
                }
                _ => {}
            }
        }
    });

    // Deep crawl of a documentation site, media excluded
    let request = ScrapeRequest {
        url: "https://docs.example.com".to_string(),
        max_depth: 5,
        max_size_mb: 500,
        external_links: false,
        include_media: false,
    };

    let report = scraper.scrape(request).await?;
    println!("Archive ready at {}", report.archive_path.display());

    Ok(())
}
