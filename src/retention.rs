//! Deletion of category files older than the retention window.
//!
//! A file is eligible when the date embedded in its name is strictly earlier
//! than `today - max_log_days`. The sweep keeps no state between runs, so it
//! stays correct across restarts and day boundaries.
//!
//! Sweeps are not locked. Run at most one sweep per category at a time.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use time::{Date, Duration};
use tracing::{debug, info, warn};

use crate::naming::{LogFileNamer, today};
use crate::{Error, LogCategory, Result};

/// Outcome of a single sweep.
#[derive(Debug, Default)]
pub struct SweepReport {
    /// Files that were removed.
    pub deleted: Vec<PathBuf>,
    /// Files carrying the extension and prefix whose date could not be parsed.
    pub skipped: Vec<PathBuf>,
    /// Files that were eligible but could not be removed.
    pub failed: Vec<(PathBuf, io::Error)>,
}

impl SweepReport {
    /// Number of files removed.
    pub fn deleted_count(&self) -> usize {
        self.deleted.len()
    }
}

/// Prunes the daily files of one category.
#[derive(Debug, Clone, Copy)]
pub struct RetentionSweeper<'a> {
    category: &'a LogCategory,
}

impl<'a> RetentionSweeper<'a> {
    pub fn new(category: &'a LogCategory) -> Self {
        Self { category }
    }

    /// First date that is kept: `today - max_log_days`.
    pub fn cutoff(&self, today: Date) -> Date {
        today
            .checked_sub(Duration::days(i64::from(self.category.max_log_days)))
            .unwrap_or(Date::MIN)
    }

    /// Delete expired files relative to `today` and return how many were removed.
    pub fn sweep(&self, today: Date) -> Result<usize> {
        Ok(self.sweep_with_report(today)?.deleted_count())
    }

    /// Delete expired files relative to the current date.
    pub fn sweep_today(&self) -> Result<usize> {
        self.sweep(today())
    }

    /// Delete expired files relative to `today`, reporting every file acted on.
    ///
    /// A missing directory is not an error. Unparseable names and failed
    /// deletions are logged and recorded without stopping the sweep.
    pub fn sweep_with_report(&self, today: Date) -> Result<SweepReport> {
        self.category.validate()?;

        let namer = LogFileNamer::new(self.category);

        let entries = match fs::read_dir(namer.directory()) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(directory = %namer.directory().display(), "Log directory missing, nothing to sweep");
                return Ok(SweepReport::default());
            }
            Err(e) => return Err(Error::Io(e)),
        };

        let paths = entries.map(|entry| entry.map(|e| e.path()));
        let report = self.sweep_paths(paths, today);

        info!(
            logger = %self.category.logger_name,
            deleted = report.deleted.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            max_log_days = self.category.max_log_days,
            "Old log files cleaned up"
        );

        Ok(report)
    }

    /// Apply the retention rule to a directory listing.
    fn sweep_paths<I>(&self, paths: I, today: Date) -> SweepReport
    where
        I: IntoIterator<Item = io::Result<PathBuf>>,
    {
        let namer = LogFileNamer::new(self.category);
        let cutoff = self.cutoff(today);
        let extension = namer.dotted_extension();
        let prefix = namer.dashed_prefix();
        let mut report = SweepReport::default();

        for entry in paths {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!(directory = %namer.directory().display(), error = %e, "Skipping unreadable directory entry");
                    continue;
                }
            };

            let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_owned) else {
                continue;
            };
            if !name.ends_with(extension.as_str()) || !is_file(&path) {
                continue;
            }
            // Same extension, different category.
            if !name.starts_with(prefix.as_str()) {
                continue;
            }

            let file_date = match namer.parse_file_date(&name) {
                Ok(date) => date,
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "Skipping log file with unparseable date");
                    report.skipped.push(path);
                    continue;
                }
            };

            if file_date >= cutoff {
                continue;
            }

            match fs::remove_file(&path) {
                Ok(()) => {
                    debug!(file = %path.display(), "Deleted expired log file");
                    report.deleted.push(path);
                }
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "Failed to delete expired log file");
                    report.failed.push((path, e));
                }
            }
        }

        report
    }
}

impl LogCategory {
    /// Delete this category's files older than `max_log_days`, relative to today.
    pub fn clear_old_logs(&self) -> Result<usize> {
        RetentionSweeper::new(self).sweep_today()
    }
}

fn is_file(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}
