//! File-based data source.
//!
//! Polls a JSON file containing a saved farm report. Useful for inspecting
//! a response captured earlier, and for running without a backend.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::{DataSource, Document};

/// A data source that reads a farm report document from a JSON file.
///
/// The source tracks the file's modification time and only returns a new
/// document when the file has been updated; the first poll always reads.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
            last_modified: None,
        }
    }

    /// Returns the path being watched.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn get_modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    /// Read and parse the file.
    fn read_file(&mut self) -> Option<Document> {
        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(document) => {
                    self.last_error = None;
                    Some(document)
                }
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "report file is not valid JSON");
                    self.last_error = Some(format!("Parse error: {}", e));
                    None
                }
            },
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read report file");
                self.last_error = Some(format!("Read error: {}", e));
                None
            }
        }
    }
}

impl DataSource for FileSource {
    fn poll(&mut self) -> Option<Document> {
        let current_modified = self.get_modified_time();

        let file_changed = match (&self.last_modified, &current_modified) {
            (None, _) => true,        // First poll, always read
            (Some(_), None) => false, // File disappeared, keep the last dataset
            (Some(last), Some(current)) => current > last,
        };

        if file_changed {
            if let Some(document) = self.read_file() {
                self.last_modified = current_modified;
                return Some(document);
            }
        }

        None
    }

    fn request(&mut self) {
        // Forget the recorded mtime so the next poll re-reads the file.
        self.last_modified = None;
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
