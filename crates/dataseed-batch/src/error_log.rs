use std::fs::{File, OpenOptions, create_dir_all};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use dataseed_core::ErrorRecord;

/// Append-only sink for failed items.
pub trait ErrorSink: Send {
    fn append(&mut self, record: &ErrorRecord) -> io::Result<()>;
}

impl ErrorSink for Vec<ErrorRecord> {
    fn append(&mut self, record: &ErrorRecord) -> io::Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// Error log file with one line per failed item.
#[derive(Debug)]
pub struct FileErrorLog {
    path: PathBuf,
    file: File,
}

impl FileErrorLog {
    /// Open `path` for appending, creating it and its parent if needed.
    pub fn open(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ErrorSink for FileErrorLog {
    fn append(&mut self, record: &ErrorRecord) -> io::Result<()> {
        writeln!(self.file, "{}", record.to_log_line())?;
        self.file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataseed_core::FailureKind;

    #[test]
    fn appends_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("errors.log");

        let mut log = FileErrorLog::open(&path).unwrap();
        log.append(&ErrorRecord::new("a", FailureKind::Rejected, "conflict"))
            .unwrap();
        drop(log);

        let mut log = FileErrorLog::open(&path).unwrap();
        log.append(&ErrorRecord::new(
            "b",
            FailureKind::Exhausted { attempts: 3 },
            "timeout",
        ))
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("a: rejected: conflict"));
        assert!(lines[1].ends_with("b: exhausted after 3 attempts: timeout"));
    }
}
