//! Append-only line writer with size-based rotation.
//!
//! Once the file passes a size threshold it is renamed to a timestamped backup and a fresh file is
//! started. Only the newest few backups are kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Default size threshold before rotation (10 MB).
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Default number of backups kept after rotation.
pub const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating file writer.
///
/// The file is opened lazily on the first write, so construction never
/// fails. Backups are named `<file name>.<UTC timestamp>`, e.g.
/// `yamiyume-otlp.json.20261016T142501.337`.
///
/// # Thread Safety
///
/// The handle sits behind a `Mutex`; concurrent `write_line` calls are
/// serialized and never interleave within a line.
///
/// # Rotation Strategy
///
/// 1. Before each write, stat the file
/// 2. If it has reached `max_bytes`:
///    - close the handle and rename the file to its backup name
///    - delete backups beyond the newest `max_backups`
/// 3. Reopen (create) the file and append the line
///
/// # Example
///
/// ```rust,ignore
/// let writer = FileWriter::with_limits("/tmp/traces.json".into(), 1024, 2);
/// writer.write_line(r#"{"resourceSpans":[]}"#)?;
/// ```
pub struct FileWriter {
    /// Path of the live file.
    file_path: PathBuf,
    /// Size at which the live file is rotated.
    max_bytes: u64,
    /// Backups kept after rotation.
    max_backups: usize,
    /// Opened on first write, dropped on rotation.
    writer: Mutex<Option<File>>,
}

impl FileWriter {
    /// Creates a writer with the default 10 MB / 3 backups limits.
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    /// Creates a writer with explicit limits.
    ///
    /// # Parameters
    ///
    /// * `file_path` - Live file, created on first write
    /// * `max_bytes` - Rotation threshold; a file at or above it is rotated
    /// * `max_backups` - Number of timestamped backups to keep
    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            max_backups,
            writer: Mutex::new(None),
        }
    }

    /// Appends `line` and a newline, rotating first if the file is too big.
    ///
    /// The line is flushed before returning.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the line was written and flushed
    /// - `Err(io::Error)` otherwise
    ///
    /// # Errors
    ///
    /// Fails on rotation, open, write or flush errors, or a poisoned lock.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| io::Error::other(format!("Mutex poisoned: {e}")))?;

        self.check_and_rotate(&mut writer)?;

        if writer.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            *writer = Some(file);
        }
        let file = writer
            .as_mut()
            .ok_or_else(|| io::Error::other("No file available"))?;

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn check_and_rotate(&self, writer: &mut Option<File>) -> io::Result<()> {
        let size = fs::metadata(&self.file_path).map_or(0, |m| m.len());
        if size >= self.max_bytes {
            *writer = None;
            self.rotate_files()?;
        }
        Ok(())
    }

    fn rotate_files(&self) -> io::Result<()> {
        let timestamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%.3f");
        let mut backup = self.file_path.clone().into_os_string();
        backup.push(format!(".{timestamp}"));

        if self.file_path.exists() {
            fs::rename(&self.file_path, PathBuf::from(backup))?;
        }

        self.cleanup_old_backups()
    }

    /// Deletes all but the newest `max_backups` backups.
    ///
    /// Timestamps sort lexicographically, so names are enough to order them.
    fn cleanup_old_backups(&self) -> io::Result<()> {
        let parent_dir = match self.file_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let Some(file_name) = self.file_path.file_name().and_then(|s| s.to_str()) else {
            return Err(io::Error::other("Invalid file name"));
        };
        let prefix = format!("{file_name}.");

        let mut backups: Vec<PathBuf> = fs::read_dir(parent_dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();

        backups.sort_unstable_by(|a, b| b.cmp(a));

        for old_backup in backups.iter().skip(self.max_backups) {
            // the next rotation tries again
            let _ = fs::remove_file(old_backup);
        }

        Ok(())
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backups(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|n| n.starts_with("trace.json."))
            .collect();
        names.sort();
        names
    }

    #[test]
    fn appends_lines_lazily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = FileWriter::new(path.clone());
        assert!(!path.exists());

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotates_when_threshold_reached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = FileWriter::with_limits(path.clone(), 8, 3);

        writer.write_line("0123456789").unwrap();
        writer.write_line("next").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "next\n");
        let rotated = backups(dir.path());
        assert_eq!(rotated.len(), 1);
        assert_eq!(fs::read_to_string(dir.path().join(&rotated[0])).unwrap(), "0123456789\n");
    }

    #[test]
    fn keeps_only_newest_backups() {
        let dir = tempfile::tempdir().unwrap();
        for stamp in ["19990101T000000.000", "19990102T000000.000", "19990103T000000.000"] {
            fs::write(dir.path().join(format!("trace.json.{stamp}")), "old").unwrap();
        }
        fs::write(dir.path().join("unrelated.json.1"), "x").unwrap();

        let writer = FileWriter::with_limits(dir.path().join("trace.json"), 1, 2);
        writer.write_line("x").unwrap();
        writer.write_line("y").unwrap();

        let kept = backups(dir.path());
        assert_eq!(kept.len(), 2);
        assert!(!kept.iter().any(|n| n.contains("19990101") || n.contains("19990102")));
        assert!(dir.path().join("unrelated.json.1").exists());
    }
}
