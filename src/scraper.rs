//! Scrape orchestration
//!
//! [`Scraper`] wires the pipeline together: request validation, session
//! directory creation, the mirror run with progress forwarding, archive
//! packaging, and result publication. Consumers subscribe to [`Event`]s for
//! live progress; the `scrape` call itself returns the terminal
//! [`ScrapeReport`].

use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::archive::write_archive;
use crate::config::Config;
use crate::error::{MirrorError, Result};
use crate::mirror::{CliMirrorHandler, MirrorHandler};
use crate::progress::ProgressSnapshot;
use crate::session::ScrapeSession;
use crate::types::{Event, ScrapeId, ScrapeReport, ScrapeRequest};

/// Buffer size of the event broadcast channel
const EVENT_BUFFER: usize = 1000;

/// Maximum work-dir entries listed when a scrape fails
const DIAGNOSTIC_ENTRIES: usize = 10;

/// Maximum project subdirectories named after a successful mirror
const SUBDIR_PEEK: usize = 5;

/// Orchestrates website scrapes
///
/// One `Scraper` serves any number of `scrape` calls, concurrently if
/// desired; every invocation owns a unique session directory under the
/// configured work root.
pub struct Scraper {
    config: Config,
    handler: Arc<dyn MirrorHandler>,
    event_tx: broadcast::Sender<Event>,
    next_id: AtomicU64,
}

impl Scraper {
    /// Create a scraper backed by the external httrack binary
    ///
    /// The binary is resolved from `config.tool` (explicit path or PATH
    /// discovery); fails with [`MirrorError::BinaryNotFound`] when absent.
    pub fn new(config: Config) -> Result<Self> {
        let handler = CliMirrorHandler::resolve(&config.tool)?;
        Ok(Self::with_handler(config, Arc::new(handler)))
    }

    /// Create a scraper with an injected mirror handler
    pub fn with_handler(config: Config, handler: Arc<dyn MirrorHandler>) -> Self {
        let (event_tx, _rx) = broadcast::channel(EVENT_BUFFER);
        Self {
            config,
            handler,
            event_tx,
            next_id: AtomicU64::new(1),
        }
    }

    /// Subscribe to scrape lifecycle events
    ///
    /// Events are sent to all active subscribers via the broadcast channel.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// The effective configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scrape a website and package the mirrored tree into a ZIP archive
    ///
    /// Runs the full pipeline to completion and returns the archive path
    /// and stats. On failure a best-effort listing of the partial output is
    /// logged before the error propagates; the original error is never
    /// replaced or swallowed.
    pub async fn scrape(&self, request: ScrapeRequest) -> Result<ScrapeReport> {
        request.validate()?;
        let id = ScrapeId::new(self.next_id.fetch_add(1, Ordering::Relaxed));

        let depth = if request.max_depth == 0 {
            "unlimited".to_string()
        } else {
            request.max_depth.to_string()
        };
        let max_size = if request.max_size_mb == 0 {
            "unlimited".to_string()
        } else {
            format!("{} MB", request.max_size_mb)
        };
        info!(
            %id,
            url = request.url.as_str(),
            depth = depth.as_str(),
            max_size = max_size.as_str(),
            external_links = request.external_links,
            include_media = request.include_media,
            handler = self.handler.name(),
            "starting scrape"
        );

        let session = ScrapeSession::create(&self.config.work_root, &self.config.project_name, id)?;
        self.emit(Event::Queued {
            id,
            url: request.url.clone(),
        });

        match self.run_pipeline(&request, &session).await {
            Ok(report) => {
                self.emit(Event::Complete {
                    id,
                    report: report.clone(),
                });
                Ok(report)
            }
            Err(error) => {
                let entries = session.diagnostic_listing(DIAGNOSTIC_ENTRIES);
                warn!(
                    %id,
                    work_dir = ?session.work_dir(),
                    ?entries,
                    "scrape failed; partial output listed"
                );
                self.emit(Event::Failed {
                    id,
                    error: error.to_string(),
                });
                Err(error)
            }
        }
    }

    async fn run_pipeline(
        &self,
        request: &ScrapeRequest,
        session: &ScrapeSession,
    ) -> Result<ScrapeReport> {
        let id = session.id();

        // Forward parsed progress snapshots as Mirroring events until the
        // handler drops its end of the channel.
        let (progress_tx, mut progress_rx) = watch::channel(ProgressSnapshot::default());
        let event_tx = self.event_tx.clone();
        let forwarder = tokio::spawn(async move {
            while progress_rx.changed().await.is_ok() {
                let snapshot = *progress_rx.borrow_and_update();
                let _ = event_tx.send(Event::Mirroring {
                    id,
                    percent: snapshot.percent,
                    files: snapshot.files,
                    bytes: snapshot.bytes,
                });
            }
        });

        let mirror_result = self
            .handler
            .mirror(request, session.project_dir(), progress_tx)
            .await;
        forwarder.await?;
        let outcome = mirror_result?;

        if !session.project_dir().is_dir() {
            return Err(MirrorError::OutputMissing {
                path: session.project_dir().to_path_buf(),
            }
            .into());
        }
        self.emit(Event::MirrorComplete {
            id,
            files: outcome.progress.files,
            bytes: outcome.progress.bytes,
        });

        if let Ok(entries) = std::fs::read_dir(session.project_dir()) {
            let subdirs: Vec<String> = entries
                .filter_map(|e| e.ok())
                .filter(|e| e.path().is_dir())
                .take(SUBDIR_PEEK)
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect();
            debug!(%id, ?subdirs, "project subdirectories");
        }

        self.emit(Event::Archiving { id });
        let project_dir = session.project_dir().to_path_buf();
        let archive_path = session.archive_path().to_path_buf();
        let summary =
            tokio::task::spawn_blocking(move || write_archive(&project_dir, &archive_path))
                .await??;

        if !self.config.keep_mirror_tree {
            session.remove_mirror_tree()?;
        }

        let report = ScrapeReport {
            archive_path: session.archive_path().to_path_buf(),
            file_count: summary.file_count,
            total_bytes: summary.total_bytes,
            archive_bytes: summary.archive_bytes,
            created_at: Utc::now(),
        };
        info!(
            %id,
            archive = ?report.archive_path,
            files = report.file_count,
            "scrape complete"
        );
        Ok(report)
    }

    fn emit(&self, event: Event) {
        // Send fails only when no subscriber exists; events are optional.
        let _ = self.event_tx.send(event);
    }
}
