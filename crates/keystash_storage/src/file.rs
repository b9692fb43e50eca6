//! File-based storage backend for persistent storage.

use crate::backend::{sorted_keys, write_samples, StorageBackend};
use crate::codec::{decode_entry, encode_entry};
use crate::error::StorageResult;
use crate::stats::{AccessStats, StatsSnapshot};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// File name used when no path is given.
pub const DEFAULT_FILENAME: &str = "storage.txt";

/// A file-based storage backend.
///
/// The file on disk is the single source of truth. Every operation re-reads
/// and re-parses the whole file, and every mutation rewrites it in full, so
/// nothing is cached between calls. The file is created on first write.
///
/// # Format
///
/// UTF-8 text, one `escaped_key=escaped_value` line per entry (see
/// [`crate::codec`]). Empty lines, lines without a separator and lines
/// that are not valid UTF-8 are skipped on load. Line order is not stable
/// across saves.
///
/// # Concurrency
///
/// Read-modify-write cycles take no lock. Another process writing the same
/// file concurrently may lose updates.
///
/// # Example
///
/// ```no_run
/// use keystash_storage::{FileBackend, StorageBackend};
///
/// let mut backend = FileBackend::new("settings.txt");
/// assert!(backend.store("theme", "dark"));
///
/// let reopened = FileBackend::new("settings.txt");
/// assert_eq!(reopened.retrieve("theme"), "dark");
/// ```
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    stats: AccessStats,
}

impl Default for FileBackend {
    fn default() -> Self {
        Self::new(DEFAULT_FILENAME)
    }
}

impl FileBackend {
    /// Label reported by [`StorageBackend::backend_type`].
    pub const BACKEND_TYPE: &'static str = "FileStorage";

    /// Creates a backend for the file at `path`.
    ///
    /// The file is not touched until the first operation.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            stats: AccessStats::new(),
        }
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if the storage file exists and can be opened.
    #[must_use]
    pub fn file_exists(&self) -> bool {
        File::open(&self.path).is_ok()
    }

    /// Flushes pending changes to disk.
    ///
    /// Every mutation is written through immediately, so this always
    /// succeeds.
    pub fn flush(&mut self) -> bool {
        true
    }

    /// Reads and parses the whole file.
    ///
    /// A missing file is an empty mapping, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read. Lines that
    /// are not valid UTF-8 are skipped, not reported.
    pub fn load(&self) -> StorageResult<HashMap<String, String>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(err) => return Err(err.into()),
        };

        let mut data = HashMap::new();
        for (lineno, raw) in bytes.split(|&b| b == b'\n').enumerate() {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            if raw.is_empty() {
                continue;
            }
            let Ok(line) = std::str::from_utf8(raw) else {
                trace!(path = %self.path.display(), line = lineno + 1, "skipping line that is not valid UTF-8");
                continue;
            };
            match decode_entry(line) {
                Some((key, value)) => {
                    data.insert(key, value);
                }
                None => trace!(path = %self.path.display(), line = lineno + 1, "skipping line without separator"),
            }
        }

        trace!(path = %self.path.display(), entries = data.len(), "loaded storage file");
        Ok(data)
    }

    /// Truncates the file and writes every entry of `data` to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn save(&self, data: &HashMap<String, String>) -> StorageResult<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        for (key, value) in data {
            writeln!(writer, "{}", encode_entry(key, value))?;
        }
        writer.flush()?;

        trace!(path = %self.path.display(), entries = data.len(), "saved storage file");
        Ok(())
    }

    /// Loads the file for a read-only operation, degrading failures to an
    /// empty mapping.
    fn load_or_empty(&self, op: &'static str) -> HashMap<String, String> {
        self.load().unwrap_or_else(|err| {
            debug!(path = %self.path.display(), op, error = %err, "storage file unreadable");
            HashMap::new()
        })
    }

    /// Loads, applies `mutate`, and saves if `mutate` reports a change.
    ///
    /// Returns `false` on any I/O failure or if nothing changed.
    fn modify<F>(&mut self, op: &'static str, mutate: F) -> bool
    where
        F: FnOnce(&mut HashMap<String, String>) -> bool,
    {
        let mut data = match self.load() {
            Ok(data) => data,
            Err(err) => {
                debug!(path = %self.path.display(), op, error = %err, "storage file unreadable");
                return false;
            }
        };

        if !mutate(&mut data) {
            return false;
        }

        self.stats.record_write();
        self.save_logged(op, &data)
    }

    fn save_logged(&self, op: &'static str, data: &HashMap<String, String>) -> bool {
        match self.save(data) {
            Ok(()) => true,
            Err(err) => {
                debug!(path = %self.path.display(), op, error = %err, "storage file not writable");
                false
            }
        }
    }
}

impl StorageBackend for FileBackend {
    fn store(&mut self, key: &str, value: &str) -> bool {
        self.modify("store", |data| {
            data.insert(key.to_owned(), value.to_owned());
            true
        })
    }

    fn retrieve(&self, key: &str) -> String {
        self.stats.record_read();
        self.load_or_empty("retrieve")
            .remove(key)
            .unwrap_or_default()
    }

    fn remove(&mut self, key: &str) -> bool {
        self.modify("remove", |data| data.remove(key).is_some())
    }

    fn list_keys(&self) -> Vec<String> {
        self.stats.record_read();
        sorted_keys(self.load_or_empty("list_keys").keys())
    }

    fn clear(&mut self) {
        self.stats.record_write();
        self.save_logged("clear", &HashMap::new());
    }

    fn backend_type(&self) -> &'static str {
        Self::BACKEND_TYPE
    }

    fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    fn debug_info(&self) -> String {
        let stats = self.stats.snapshot();
        let exists = if self.file_exists() { "Yes" } else { "No" };
        let data = self.load_or_empty("debug_info");

        let mut out = format!("{} Debug Info:\n", Self::BACKEND_TYPE);
        out.push_str(&format!("  Filename: {}\n", self.path.display()));
        out.push_str(&format!("  File exists: {exists}\n"));
        out.push_str(&format!("  Read operations: {}\n", stats.reads));
        out.push_str(&format!("  Write operations: {}\n", stats.writes));
        out.push_str("  Persistence: Full (data survives program restart)\n");
        out.push_str(&format!("  Total entries: {}\n", data.len()));
        write_samples(&mut out, &data);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use tempfile::tempdir;

    #[test]
    fn file_not_created_until_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kv.txt");

        let mut backend = FileBackend::new(&path);
        assert!(!backend.file_exists());
        assert_eq!(backend.retrieve("k"), "");
        assert!(backend.list_keys().is_empty());
        assert!(!path.exists());

        assert!(backend.store("k", "v"));
        assert!(backend.file_exists());
    }

    #[test]
    fn file_store_and_retrieve() {
        let dir = tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path().join("kv.txt"));

        assert!(backend.store("key", "value"));
        assert_eq!(backend.retrieve("key"), "value");
        assert_eq!(backend.retrieve("other"), "");
    }

    #[test]
    fn file_persistence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kv.txt");

        {
            let mut backend = FileBackend::new(&path);
            backend.store("a=b", "x\ny");
            backend.store("tab", "1\t2");
        }

        let backend = FileBackend::new(&path);
        assert_eq!(backend.retrieve("a=b"), "x\ny");
        assert_eq!(backend.retrieve("tab"), "1\t2");
        assert_eq!(backend.list_keys(), vec!["a=b", "tab"]);
    }

    #[test]
    fn file_format_is_escaped_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kv.txt");

        let mut backend = FileBackend::new(&path);
        backend.store("a=b", "x\ny");

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "a\\=b=x\\ny\n");
    }

    #[test]
    fn file_reads_external_changes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kv.txt");

        let backend = FileBackend::new(&path);
        fs::write(&path, "k=1\n").unwrap();
        assert_eq!(backend.retrieve("k"), "1");

        fs::write(&path, "k=2\n").unwrap();
        assert_eq!(backend.retrieve("k"), "2");
    }

    #[test]
    fn file_skips_blank_and_malformed_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kv.txt");
        fs::write(&path, "\nno separator here\nk=v\n\n").unwrap();

        let backend = FileBackend::new(&path);
        assert_eq!(backend.list_keys(), vec!["k"]);
        assert_eq!(backend.retrieve("k"), "v");
    }

    #[test]
    fn file_unknown_escape_passes_through() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kv.txt");
        fs::write(&path, "k=\\q\n").unwrap();

        let backend = FileBackend::new(&path);
        assert_eq!(backend.retrieve("k"), "\\q");
    }

    #[test]
    fn file_remove() {
        let dir = tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path().join("kv.txt"));

        backend.store("k", "v");
        assert!(backend.remove("k"));
        assert!(!backend.remove("k"));
        assert_eq!(backend.retrieve("k"), "");
    }

    #[test]
    fn file_remove_missing_does_not_create_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kv.txt");

        let mut backend = FileBackend::new(&path);
        assert!(!backend.remove("k"));
        assert!(!path.exists());
        assert_eq!(backend.stats().writes, 0);
    }

    #[test]
    fn file_clear_writes_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kv.txt");

        let mut backend = FileBackend::new(&path);
        backend.store("a", "1");
        backend.store("b", "2");
        backend.clear();

        assert!(backend.list_keys().is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn file_unwritable_path_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("kv.txt");

        let mut backend = FileBackend::new(&path);
        assert!(!backend.store("k", "v"));
        assert!(matches!(
            backend.save(&HashMap::new()),
            Err(StorageError::Io(_))
        ));
        backend.clear();
        assert!(!path.exists());
    }

    #[test]
    fn file_unreadable_degrades_to_empty() {
        let dir = tempdir().unwrap();
        // A directory cannot be read as a file.
        let mut backend = FileBackend::new(dir.path());

        assert_eq!(backend.retrieve("k"), "");
        assert!(backend.list_keys().is_empty());
        assert!(!backend.store("k", "v"));
        assert!(backend.load().is_err());
    }

    #[test]
    fn file_skips_invalid_utf8_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kv.txt");
        fs::write(&path, b"good=1\nbad=\xff\n").unwrap();

        let mut backend = FileBackend::new(&path);
        assert_eq!(backend.retrieve("good"), "1");
        assert_eq!(backend.retrieve("bad"), "");
        assert_eq!(backend.list_keys(), vec!["good"]);

        assert!(backend.store("k", "v"));
        assert_eq!(backend.retrieve("k"), "v");
        assert_eq!(backend.retrieve("good"), "1");
    }

    #[cfg(unix)]
    #[test]
    fn file_remove_fails_on_read_only_file() {
        use std::fs::OpenOptions;

        let dir = tempdir().unwrap();
        let path = dir.path().join("kv.txt");
        let mut backend = FileBackend::new(&path);
        assert!(backend.store("k", "v"));

        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_readonly(true);
        fs::set_permissions(&path, perms).unwrap();

        // Privileged users can write regardless of permissions.
        if OpenOptions::new().write(true).open(&path).is_ok() {
            return;
        }

        assert!(!backend.remove("k"));
        assert!(!backend.store("other", "v"));
        assert_eq!(backend.retrieve("k"), "v");
        assert_eq!(backend.list_keys(), vec!["k"]);
    }

    #[test]
    fn file_stats() {
        let dir = tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path().join("kv.txt"));

        backend.store("k", "v");
        backend.retrieve("k");
        backend.list_keys();
        backend.remove("missing");
        backend.remove("k");
        backend.clear();

        let stats = backend.stats();
        assert_eq!(stats.reads, 2);
        assert_eq!(stats.writes, 3);
    }

    #[test]
    fn file_flush_always_succeeds() {
        let dir = tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path().join("kv.txt"));
        assert!(backend.flush());
    }

    #[test]
    fn file_default_path() {
        let backend = FileBackend::default();
        assert_eq!(backend.path(), Path::new(DEFAULT_FILENAME));
        assert_eq!(backend.backend_type(), "FileStorage");
    }

    #[test]
    fn file_debug_info() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kv.txt");
        let mut backend = FileBackend::new(&path);

        assert!(backend.debug_info().contains("File exists: No"));

        backend.store("k", "v");
        let info = backend.debug_info();
        assert!(info.starts_with("FileStorage Debug Info:"));
        assert!(info.contains("File exists: Yes"));
        assert!(info.contains("Total entries: 1"));
        assert!(info.contains("\"k\" -> \"v\""));
    }
}
