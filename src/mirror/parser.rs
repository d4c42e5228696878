//! Parser for HTTrack output lines
//!
//! HTTrack's textual output is not a stable contract; everything extracted
//! here is best-effort telemetry. A run whose output matches none of the
//! patterns still completes normally with an empty snapshot.

use regex::Regex;
use tracing::warn;

use crate::progress::ProgressSnapshot;

/// Incremental extractor of progress signals from HTTrack output
///
/// Feed each output line to [`observe`](Self::observe). The running
/// [`ProgressSnapshot`] enforces the monotonicity invariants: the percentage
/// never regresses and the file counter only grows.
#[derive(Debug)]
pub struct ProgressParser {
    percent: Option<Regex>,
    file_done: Option<Regex>,
    bytes: Option<Regex>,
    snapshot: ProgressSnapshot,
}

impl ProgressParser {
    /// Create a parser with an all-zero snapshot
    pub fn new() -> Self {
        Self {
            percent: compile(r"(\d+)%"),
            file_done: compile(r"(?i)\b(generated|saved|downloaded|written)\b"),
            bytes: compile(r"(?i)(\d+)\s*bytes?\s+transferred"),
            snapshot: ProgressSnapshot::default(),
        }
    }

    /// Consume one output line, returning true when the snapshot changed
    pub fn observe(&mut self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() {
            return false;
        }

        let mut changed = false;

        if let Some(re) = &self.percent
            && let Some(caps) = re.captures(line)
            && let Some(value) = caps.get(1).and_then(|m| m.as_str().parse::<u64>().ok())
        {
            let percent = value.min(100) as u8;
            if percent > self.snapshot.percent {
                self.snapshot.percent = percent;
                changed = true;
            }
        }

        if let Some(re) = &self.file_done
            && re.is_match(line)
        {
            self.snapshot.files += 1;
            changed = true;
        }

        if let Some(re) = &self.bytes
            && let Some(caps) = re.captures(line)
            && let Some(value) = caps.get(1).and_then(|m| m.as_str().parse::<u64>().ok())
            && value != self.snapshot.bytes
        {
            self.snapshot.bytes = value;
            changed = true;
        }

        changed
    }

    /// The latest snapshot
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.snapshot
    }
}

impl Default for ProgressParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Compile a hardcoded pattern; a failure disables that signal rather than
/// failing the run
fn compile(pattern: &str) -> Option<Regex> {
    Regex::new(pattern)
        .map_err(|e| warn!("invalid progress pattern '{}': {}", pattern, e))
        .ok()
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_percentage() {
        let mut parser = ProgressParser::new();
        assert!(parser.observe("42% (1234 bytes) - example.com/index.html"));
        assert_eq!(parser.snapshot().percent, 42);
    }

    #[test]
    fn percentage_never_regresses() {
        let mut parser = ProgressParser::new();
        parser.observe("60% done");
        assert!(!parser.observe("30% done"));
        assert_eq!(parser.snapshot().percent, 60);
        parser.observe("61% done");
        assert_eq!(parser.snapshot().percent, 61);
    }

    #[test]
    fn percentage_is_non_decreasing_over_any_sequence() {
        let lines = [
            "5% scanning", "17% mirror", "12% retry", "17% still", "99% nearly", "80% regress",
            "100% done",
        ];
        let mut parser = ProgressParser::new();
        let mut last = 0;
        for line in lines {
            parser.observe(line);
            let now = parser.snapshot().percent;
            assert!(now >= last, "percent regressed: {} -> {}", last, now);
            last = now;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn oversized_percentage_is_clamped() {
        let mut parser = ProgressParser::new();
        parser.observe("250% of something");
        assert_eq!(parser.snapshot().percent, 100);
    }

    #[test]
    fn counts_completed_files_case_insensitively() {
        let mut parser = ProgressParser::new();
        parser.observe("File generated: index.html");
        parser.observe("SAVED example.com/about.html");
        parser.observe("12/34 downloaded (style.css)");
        parser.observe("written www/logo data");
        assert_eq!(parser.snapshot().files, 4);
    }

    #[test]
    fn extracts_bytes_transferred() {
        let mut parser = ProgressParser::new();
        parser.observe("4096 bytes transferred");
        assert_eq!(parser.snapshot().bytes, 4096);
        parser.observe("1048576 Bytes Transferred");
        assert_eq!(parser.snapshot().bytes, 1_048_576);
    }

    #[test]
    fn unmatched_lines_leave_snapshot_unchanged() {
        let mut parser = ProgressParser::new();
        assert!(!parser.observe("Mirror launched on Thu, 07 Aug 2026"));
        assert!(!parser.observe(""));
        assert!(!parser.observe("   "));
        assert_eq!(parser.snapshot(), ProgressSnapshot::default());
    }

    #[test]
    fn a_line_can_update_multiple_signals() {
        let mut parser = ProgressParser::new();
        assert!(parser.observe("75% saved, 2048 bytes transferred"));
        let snapshot = parser.snapshot();
        assert_eq!(snapshot.percent, 75);
        assert_eq!(snapshot.files, 1);
        assert_eq!(snapshot.bytes, 2048);
    }
}
