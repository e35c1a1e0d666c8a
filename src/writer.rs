use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use time::Date;
use tracing_subscriber::fmt::MakeWriter;

use crate::LogCategory;
use crate::naming::{LogFileNamer, today};

/// State of the current day's file.
#[derive(Debug)]
pub struct DayFile {
    /// The open file handle.
    pub file: File,
    /// Path of the open file.
    pub path: PathBuf,
    /// Calendar day the file belongs to.
    pub date: Date,
}

/// Appends to the category's file for the current day.
///
/// The path is resolved when the writer is opened and again whenever the
/// calendar day changes, so a long-lived logger moves on to the new day's file
/// at midnight. Clones share the same open file.
#[derive(Debug, Clone)]
pub struct DailyFileWriter {
    /// Category whose files are written.
    category: Arc<LogCategory>,
    /// Current file state, protected by mutex.
    state: Arc<Mutex<DayFile>>,
}

impl DailyFileWriter {
    /// Open today's file for `category`.
    pub fn open(category: &LogCategory) -> io::Result<Self> {
        Self::open_on(category, today())
    }

    /// Open the file for `date`.
    pub(crate) fn open_on(category: &LogCategory, date: Date) -> io::Result<Self> {
        if category.create_dir {
            std::fs::create_dir_all(&category.directory)?;
        }

        let state = open_day_file(category, date)?;
        Ok(Self {
            category: Arc::new(category.clone()),
            state: Arc::new(Mutex::new(state)),
        })
    }

    /// Path of the file currently written to.
    pub fn path(&self) -> io::Result<PathBuf> {
        Ok(self.lock()?.path.clone())
    }

    /// Write `buf` to the file for `date`, switching files if the day changed.
    pub(crate) fn write_on(&self, date: Date, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self.lock()?;

        if guard.date != date {
            // Close the previous day's file before opening the next one
            *guard = open_day_file(&self.category, date)?;
        }

        // One write call per record keeps lines whole under O_APPEND
        guard.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, DayFile>> {
        self.state
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))
    }
}

fn open_day_file(category: &LogCategory, date: Date) -> io::Result<DayFile> {
    let path = LogFileNamer::new(category)
        .file_path(date)
        .map_err(io::Error::other)?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    Ok(DayFile { file, path, date })
}

impl Write for DailyFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_on(today(), buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        // File::flush takes &mut self, but sync_all works on &File
        self.lock()?.file.sync_all()
    }
}

impl<'a> MakeWriter<'a> for DailyFileWriter {
    type Writer = DailyFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
