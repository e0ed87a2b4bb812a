//! Application state and navigation logic.

use std::time::Instant;

use crate::data::{FarmData, Thresholds};
use crate::source::{DataSource, Document, HistoryResponse};
use crate::ui::Theme;

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Summary cards, embedded trend chart and alert banner.
    Overview,
    /// Full-area trend chart.
    Trends,
    /// Per-day readings table.
    History,
    /// The fetched document, pretty-printed verbatim.
    Raw,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Overview => View::Trends,
            View::Trends => View::History,
            View::History => View::Raw,
            View::Raw => View::Overview,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Overview => View::Raw,
            View::Trends => View::Overview,
            View::History => View::Trends,
            View::Raw => View::History,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Trends => "Trends",
            View::History => "History",
            View::Raw => "Raw",
        }
    }
}

/// Which endpoint the app talks to and how the response body is read.
///
/// The history variant decodes the body into [`HistoryResponse`] and drives
/// the dashboard views; the document variant displays the body verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// `GET {base}/farm-data/history?days=N`, decoded as history.
    History { days: u32 },
    /// `GET {base}/farm-data`, displayed as-is.
    Document,
}

impl Variant {
    /// The URL this variant fetches, relative to the configured base.
    pub fn endpoint(&self, base_url: &str) -> String {
        match self {
            Variant::History { days } => {
                format!("{}/farm-data/history?days={}", base_url, days)
            }
            Variant::Document => format!("{}/farm-data", base_url),
        }
    }

    /// The view shown at startup.
    pub fn initial_view(&self) -> View {
        match self {
            Variant::History { .. } => View::Overview,
            Variant::Document => View::Raw,
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    // Data source
    source: Box<dyn DataSource>,
    pub variant: Variant,
    pub document: Option<Document>,
    pub data: Option<FarmData>,
    pub load_error: Option<String>,
    pub fetched_at: Option<Instant>,
    pub thresholds: Thresholds,

    // Navigation state
    pub selected_day: usize,
    pub raw_scroll: u16,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App with the given data source and shape variant.
    pub fn new(source: Box<dyn DataSource>, variant: Variant, thresholds: Thresholds) -> Self {
        Self {
            running: true,
            current_view: variant.initial_view(),
            show_help: false,
            source,
            variant,
            document: None,
            data: None,
            load_error: None,
            fetched_at: None,
            thresholds,
            selected_day: 0,
            raw_scroll: 0,
            theme: Theme::auto_detect(),
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Poll the data source for a new document.
    ///
    /// Returns true if a document was received. A failed fetch only records
    /// a diagnostic; the content views keep their loading placeholder.
    pub fn poll_source(&mut self) -> bool {
        if let Some(document) = self.source.poll() {
            self.ingest(document);
            return true;
        }

        if let Some(err) = self.source.error() {
            self.load_error = Some(err.to_string());
        }
        false
    }

    /// Store a fetched document and, for the history variant, decode it.
    fn ingest(&mut self, document: Document) {
        match self.variant {
            Variant::History { .. } => {
                match serde_json::from_value::<HistoryResponse>(document.clone()) {
                    Ok(response) => {
                        let data = FarmData::from_response(response, &self.thresholds);
                        if self.selected_day >= data.entries.len() {
                            self.selected_day = data.entries.len().saturating_sub(1);
                        }
                        self.data = Some(data);
                        self.load_error = None;
                    }
                    Err(e) => {
                        // Malformed body: keep whatever dataset we had
                        tracing::warn!(error = %e, "response does not match the history shape");
                        self.load_error = Some(format!("Malformed history: {}", e));
                    }
                }
            }
            Variant::Document => {
                self.load_error = None;
            }
        }

        self.document = Some(document);
        self.fetched_at = Some(Instant::now());
    }

    /// Ask the source for a fresh document.
    pub fn request_refresh(&mut self) {
        self.source.request();
    }

    /// The fetched document as 2-space-indented JSON text.
    pub fn raw_pretty(&self) -> Option<String> {
        self.document
            .as_ref()
            .and_then(|d| serde_json::to_string_pretty(d).ok())
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        match self.current_view {
            View::History => {
                if let Some(ref data) = self.data {
                    let max = data.entries.len().saturating_sub(1);
                    self.selected_day = (self.selected_day + n).min(max);
                }
            }
            View::Raw => {
                self.raw_scroll = self.raw_scroll.saturating_add(n as u16);
            }
            _ => {}
        }
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        match self.current_view {
            View::History => {
                self.selected_day = self.selected_day.saturating_sub(n);
            }
            View::Raw => {
                self.raw_scroll = self.raw_scroll.saturating_sub(n as u16);
            }
            _ => {}
        }
    }

    /// Jump to the first item.
    pub fn select_first(&mut self) {
        match self.current_view {
            View::History => self.selected_day = 0,
            View::Raw => self.raw_scroll = 0,
            _ => {}
        }
    }

    /// Jump to the last item.
    pub fn select_last(&mut self) {
        if self.current_view == View::History {
            if let Some(ref data) = self.data {
                self.selected_day = data.entries.len().saturating_sub(1);
            }
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Close overlays, otherwise return to the Overview.
    pub fn go_back(&mut self) {
        if self.show_help {
            self.show_help = false;
            return;
        }
        if self.current_view != View::Overview {
            self.current_view = View::Overview;
        }
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FileSource;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn history_json() -> &'static str {
        r#"{
            "history": [
                {
                    "date": "2025-08-06",
                    "crop_health": { "status": "Healthy", "score": 90 },
                    "soil_condition": { "moisture": 20.0, "pH": 6.5, "nutrients": "Medium" },
                    "pest_risk": { "risk": "Low", "probability": 0.1 }
                },
                {
                    "date": "2025-08-05",
                    "crop_health": { "status": "Stressed", "score": 40 },
                    "soil_condition": { "moisture": 25.0, "pH": 7.0, "nutrients": "Low" },
                    "pest_risk": { "risk": "Medium", "probability": 0.2 }
                },
                {
                    "date": "2025-08-04",
                    "crop_health": { "status": "Healthy", "score": 60 },
                    "soil_condition": { "moisture": 30.0, "pH": 6.9, "nutrients": "High" },
                    "pest_risk": { "risk": "High", "probability": 0.9 }
                }
            ]
        }"#
    }

    fn app_with_file(content: &str, variant: Variant) -> (App, NamedTempFile) {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file.flush().unwrap();
        let source = Box::new(FileSource::new(file.path()));
        (App::new(source, variant, Thresholds::default()), file)
    }

    #[test]
    fn test_history_document_is_decoded() {
        let (mut app, _file) = app_with_file(history_json(), Variant::History { days: 7 });

        assert!(app.poll_source());

        let data = app.data.as_ref().unwrap();
        assert_eq!(data.entries.len(), 3);
        assert_eq!(data.issues, vec![1, 2]);
        assert_eq!(
            data.alert_message().unwrap(),
            "Alert: 2 day(s) with poor crop health or high pest risk detected!"
        );
        assert!(app.load_error.is_none());
        assert!(app.document.is_some());
    }

    #[test]
    fn test_failed_fetch_keeps_loading_state() {
        let source = Box::new(FileSource::new("/nonexistent/history.json"));
        let mut app = App::new(source, Variant::History { days: 7 }, Thresholds::default());

        assert!(!app.poll_source());

        // Diagnostic captured, content still loading, nothing escaped
        assert!(app.load_error.is_some());
        assert!(app.data.is_none());
        assert!(app.document.is_none());
    }

    #[test]
    fn test_malformed_body_is_a_diagnostic_only() {
        // Valid JSON, wrong shape
        let (mut app, _file) =
            app_with_file(r#"{"weather": "sunny"}"#, Variant::History { days: 7 });

        assert!(app.poll_source());

        assert!(app.data.is_none());
        assert!(app.load_error.as_ref().unwrap().contains("Malformed"));
        // The document itself is still available to the raw view
        assert!(app.document.is_some());
    }

    #[test]
    fn test_empty_history_renders_defined_empty_state() {
        let (mut app, _file) = app_with_file(r#"{"history": []}"#, Variant::History { days: 7 });

        assert!(app.poll_source());

        let data = app.data.as_ref().unwrap();
        assert!(data.latest().is_none());
        assert!(data.series.is_empty());
        assert!(data.alert_message().is_none());
    }

    #[test]
    fn test_raw_pretty_round_trip() {
        let (mut app, _file) = app_with_file(r#"{"a":1,"b":[1,2]}"#, Variant::Document);

        assert!(app.poll_source());

        let expected =
            serde_json::to_string_pretty(&serde_json::json!({"a": 1, "b": [1, 2]})).unwrap();
        assert_eq!(app.raw_pretty().unwrap(), expected);
        assert!(app.load_error.is_none());
    }

    #[test]
    fn test_document_variant_starts_on_raw_view() {
        let (app, _file) = app_with_file("{}", Variant::Document);
        assert_eq!(app.current_view, View::Raw);
    }

    #[test]
    fn test_view_cycle_is_closed() {
        let mut view = View::Overview;
        for _ in 0..4 {
            view = view.next();
        }
        assert_eq!(view, View::Overview);
        assert_eq!(View::Overview.prev(), View::Raw);
    }

    #[test]
    fn test_selection_is_clamped_to_history() {
        let (mut app, _file) = app_with_file(history_json(), Variant::History { days: 7 });
        app.poll_source();
        app.set_view(View::History);

        app.select_next_n(10);
        assert_eq!(app.selected_day, 2);
        app.select_first();
        assert_eq!(app.selected_day, 0);
        app.select_last();
        assert_eq!(app.selected_day, 2);
    }

    #[test]
    fn test_variant_endpoints() {
        assert_eq!(
            Variant::History { days: 7 }.endpoint("http://127.0.0.1:8000"),
            "http://127.0.0.1:8000/farm-data/history?days=7"
        );
        assert_eq!(
            Variant::Document.endpoint("http://127.0.0.1:8000"),
            "http://127.0.0.1:8000/farm-data"
        );
    }
}
