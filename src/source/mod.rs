//! Data source abstraction for fetching farm reports.
//!
//! This module provides a trait-based abstraction for obtaining the JSON
//! documents served by the farm backend, either over HTTP or from a file
//! saved to disk.

mod file;
mod http;
mod report;

pub use file::FileSource;
pub use http::HttpSource;
pub use report::{CropHealth, HistoryEntry, HistoryResponse, PestRisk, SoilCondition};

use std::fmt::Debug;

/// A fetched response body, kept verbatim.
///
/// The raw view pretty-prints this value unchanged; the dashboard views
/// decode it into a [`HistoryResponse`] first.
pub type Document = serde_json::Value;

/// Trait for obtaining farm report documents from various backends.
///
/// Implementations deliver whole documents - there is no incremental update
/// path. A new document replaces the previous dataset wholesale.
///
/// # Example
///
/// ```
/// use farmwatch::{DataSource, FileSource};
///
/// let mut source = FileSource::new("history.json");
/// if let Some(document) = source.poll() {
///     println!("fetched {} bytes of JSON", document.to_string().len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for a newly available document.
    ///
    /// Returns `Some(document)` if a fresh response has arrived since the
    /// last poll, `None` otherwise. Must be non-blocking; the render loop
    /// calls this every tick.
    fn poll(&mut self) -> Option<Document>;

    /// Ask the source to produce a fresh document.
    ///
    /// For [`HttpSource`] this queues one GET request. Sources that have no
    /// notion of re-fetching may ignore it.
    fn request(&mut self) {}

    /// Returns a human-readable description of the source.
    ///
    /// Shown in the status bar.
    fn description(&self) -> &str;

    /// The diagnostic retained from the most recent failure, if any.
    fn error(&self) -> Option<&str>;
}
