//! Basic scrape example
//!
//! This example demonstrates the core functionality of sitegrab:
//! - Creating a scraper instance
//! - Subscribing to events with a live progress bar
//! - Running one scrape and receiving the archive path

use sitegrab::{Config, ProgressRenderer, Scraper, ScrapeRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    // Create scraper instance (httrack discovered from PATH)
    let scraper = Scraper::new(Config::default())?;

    // Render events as an in-place progress bar
    let renderer = ProgressRenderer::new().attach(scraper.subscribe());

    // Scrape with default limits: depth 2, 100 MB cap, no external links
    let report = scraper
        .scrape(ScrapeRequest::new("https://example.com"))
        .await?;
    renderer.await?;

    println!("Archive: {}", report.archive_path.display());
    println!(
        "{} files, {:.2} MiB mirrored, {:.2} MiB compressed",
        report.file_count,
        report.total_bytes as f64 / 1_048_576.0,
        report.archive_bytes as f64 / 1_048_576.0
    );

    Ok(())
}
