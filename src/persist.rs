use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{Error, Result};

/// Where results and the error log live, relative to a project root.
#[derive(Debug, Clone)]
pub struct Layout {
    pub data_dir: PathBuf,
    pub error_log: PathBuf,
}

impl Layout {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            data_dir: root.join("data"),
            error_log: root.join("error.log"),
        }
    }

    /// `data/{FROM}_{TO}_{DATE}.json`
    pub fn rate_file(&self, from: &str, to: &str, date: &str) -> PathBuf {
        self.data_dir.join(format!("{from}_{to}_{date}.json"))
    }

    /// `data/error_{FROM}_{TO}_{DATE}.json`
    pub fn error_file(&self, from: &str, to: &str, date: &str) -> PathBuf {
        self.data_dir.join(format!("error_{from}_{to}_{date}.json"))
    }
}

/// Write `payload` to `path` as pretty JSON, creating parent directories and replacing any
/// existing file. Non-ASCII text is written as-is.
pub fn save_json<T: Serialize + ?Sized>(payload: &T, path: &Path) -> Result<()> {
    write_pretty(payload, path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("wrote {}", path.display());
    Ok(())
}

fn write_pretty<T: Serialize + ?Sized>(payload: &T, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    let mut ser = Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    payload.serialize(&mut ser)?;
    writer.flush()
}
