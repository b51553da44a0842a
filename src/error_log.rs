use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use jiff::Zoned;

/// Destination for user-facing failure messages.
///
/// Implementations must not fail: a message that can't be recorded is reported and dropped.
pub trait ErrorLog {
    fn log_error(&mut self, message: &str);
}

/// Appends timestamped lines to a file and mirrors every message to stderr.
#[derive(Debug, Clone)]
pub struct FileLog {
    path: PathBuf,
}

impl FileLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn append(&self, line: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}

impl ErrorLog for FileLog {
    fn log_error(&mut self, message: &str) {
        if let Err(e) = self.append(&format_line(&Zoned::now(), message)) {
            eprintln!("[ERROR] Failed to write to {}: {e}", self.path.display());
        }
        eprintln!("[ERROR] {message}");
    }
}

/// Keeps messages in memory, for callers that inspect them afterwards.
#[derive(Debug, Default, Clone)]
pub struct MemoryLog {
    pub messages: Vec<String>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.contains(needle))
    }
}

impl ErrorLog for MemoryLog {
    fn log_error(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

/// `YYYY-MM-DD HH:MM:SS - message\n`, in the timestamp's own time zone
fn format_line(now: &Zoned, message: &str) -> String {
    format!("{} - {message}\n", now.strftime("%Y-%m-%d %H:%M:%S"))
}
