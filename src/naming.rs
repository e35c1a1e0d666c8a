//! Daily file names for a log category.
//!
//! A category writes one file per calendar day, named
//! `<file_prefix>-<YYYY-MM-DD>.<extension>`. The retention sweep relies on
//! being able to read the date back out of that name.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

use crate::{Error, LogCategory, Result};

/// `YYYY-MM-DD`, zero padded.
pub(crate) const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

// Resolved once: `time` refuses to read the local offset once other threads
// exist, so asking again later could flip file names over to UTC mid-run.
static LOCAL_OFFSET: Lazy<UtcOffset> =
    Lazy::new(|| UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC));

/// Offset used for file dates and line timestamps alike.
///
/// The local offset as seen on first use, or UTC when it cannot be determined.
/// Call this early (before spawning threads) to pin the local offset.
pub fn local_offset() -> UtcOffset {
    *LOCAL_OFFSET
}

/// The current calendar date at [`local_offset`].
pub fn today() -> Date {
    OffsetDateTime::now_utc().to_offset(local_offset()).date()
}

/// Derives file names and paths for a category.
#[derive(Debug, Clone, Copy)]
pub struct LogFileNamer<'a> {
    category: &'a LogCategory,
}

impl<'a> LogFileNamer<'a> {
    pub fn new(category: &'a LogCategory) -> Self {
        Self { category }
    }

    /// Name the logger identifies itself with.
    pub fn logger_name(&self) -> &'a str {
        &self.category.logger_name
    }

    pub fn directory(&self) -> &'a Path {
        &self.category.directory
    }

    /// File name for `date`, e.g. `app-2024-06-10.log`.
    pub fn file_name(&self, date: Date) -> Result<String> {
        let stamp = date
            .format(DATE_FORMAT)
            .map_err(time::error::Error::from)?;
        Ok(format!(
            "{}-{}.{}",
            self.category.file_prefix, stamp, self.category.extension
        ))
    }

    /// Full path of the file for `date`.
    pub fn file_path(&self, date: Date) -> Result<PathBuf> {
        Ok(self.category.directory.join(self.file_name(date)?))
    }

    /// Full path of today's file. Recomputed on every call.
    pub fn today_path(&self) -> Result<PathBuf> {
        self.file_path(today())
    }

    /// Suffix every file of the category ends with, including the dot.
    pub(crate) fn dotted_extension(&self) -> String {
        format!(".{}", self.category.extension)
    }

    /// Prefix every file of the category starts with, including the dash.
    pub(crate) fn dashed_prefix(&self) -> String {
        format!("{}-", self.category.file_prefix)
    }

    /// Recover the date embedded in a file name of this category.
    pub fn parse_file_date(&self, file_name: &str) -> Result<Date> {
        let parse_error = |reason: String| Error::DateParse {
            file: PathBuf::from(file_name),
            reason,
        };

        let stem = file_name
            .strip_suffix(self.dotted_extension().as_str())
            .ok_or_else(|| parse_error(format!("missing .{} extension", self.category.extension)))?;
        let stamp = stem
            .strip_prefix(self.dashed_prefix().as_str())
            .ok_or_else(|| parse_error(format!("missing {}- prefix", self.category.file_prefix)))?;

        Date::parse(stamp, DATE_FORMAT).map_err(|e| parse_error(e.to_string()))
    }
}
