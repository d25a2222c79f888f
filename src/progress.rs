//! Append-only progress log: one timestamped line per pipeline step.

use chrono::Local;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::info;

use crate::common::constants::LOG_TIMESTAMP_FORMAT;
use crate::common::error::Result;
use crate::common::types::LogEntry;

/// Destination for progress entries
pub trait ProgressSink {
    fn append(&self, entry: &LogEntry) -> io::Result<()>;
}

/// Appends `<timestamp>,<message>` lines to a text file, creating it if needed.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ProgressSink for FileSink {
    fn append(&self, entry: &LogEntry) -> io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{}", entry.to_line())
    }
}

/// Keeps entries in memory; clones share the same buffer.
#[derive(Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().expect("progress buffer poisoned").clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.message).collect()
    }
}

impl ProgressSink for MemorySink {
    fn append(&self, entry: &LogEntry) -> io::Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "progress buffer poisoned"))?;
        entries.push(entry.clone());
        Ok(())
    }
}

pub struct ProgressLogger {
    sink: Box<dyn ProgressSink>,
    echo: bool,
}

impl ProgressLogger {
    pub fn new(sink: Box<dyn ProgressSink>) -> Self {
        Self { sink, echo: true }
    }

    pub fn to_file<P: AsRef<Path>>(path: P) -> Self {
        Self::new(Box::new(FileSink::new(path)))
    }

    /// Disable the stdout echo (tests)
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }

    pub fn log_progress(&self, message: &str) -> Result<()> {
        let entry = LogEntry {
            timestamp: timestamp_now(),
            message: message.to_string(),
        };
        self.sink.append(&entry)?;
        info!(progress = %message);
        if self.echo {
            println!("\n{}\n", message);
        }
        Ok(())
    }
}

pub fn timestamp_now() -> String {
    Local::now().format(LOG_TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp_now();
        // e.g. 2023-Sep-08-09:16:35
        assert!(NaiveDateTime::parse_from_str(&ts, LOG_TIMESTAMP_FORMAT).is_ok(), "bad timestamp {ts}");
        assert_eq!(ts.split('-').count(), 4);
    }

    #[test]
    fn test_file_sink_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("code_log.txt");
        fs::write(&path, "2020-Jan-01-00:00:00,earlier run\n").unwrap();

        let logger = ProgressLogger::to_file(&path).quiet();
        logger.log_progress("Starting ETL Process.").unwrap();
        logger.log_progress("ETL Process Completed.").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "2020-Jan-01-00:00:00,earlier run");
        assert!(lines[1].ends_with(",Starting ETL Process."));
        assert!(lines[2].ends_with(",ETL Process Completed."));
    }

    #[test]
    fn test_memory_sink_captures_in_order() {
        let sink = MemorySink::new();
        let logger = ProgressLogger::new(Box::new(sink.clone())).quiet();

        logger.log_progress("one").unwrap();
        logger.log_progress("two").unwrap();

        assert_eq!(sink.messages(), vec!["one", "two"]);
        assert!(!sink.entries()[0].timestamp.is_empty());
    }
}
