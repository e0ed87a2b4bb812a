// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # farmwatch
//!
//! A terminal dashboard and library for monitoring smart-farm sensor data.
//!
//! This crate fetches sensor-derived history from a farm backend and
//! renders it in an interactive terminal UI: a multi-series trend chart,
//! at-a-glance summary cards, a per-day readings table, an alert banner for
//! flagged days, and a raw pretty-printed view of the fetched document.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(processing)   │(rendering)   │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── HttpSource | FileSource                    │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation, and document ingestion
//! - **[`source`]**: Data source abstraction ([`DataSource`] trait) with
//!   implementations for HTTP fetching and file replay
//! - **[`data`]**: Data models and processing - derives chronological chart
//!   series from the history and flags issue days against thresholds
//! - **[`ui`]**: Terminal rendering using ratatui - summary cards, trend
//!   chart, readings table, raw view, and theme support
//! - **[`config`]**: Layered settings (defaults, file, environment, flags)
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Dashboard over the last 7 days from the default backend
//! farmwatch
//!
//! # Raw document variant against another backend
//! farmwatch --raw --base-url http://farm:8000
//!
//! # Replay a saved response without a backend
//! farmwatch --file history.json
//! ```
//!
//! ### As a library with a file source
//!
//! ```
//! use farmwatch::{App, FileSource, Thresholds, Variant};
//!
//! let source = Box::new(FileSource::new("history.json"));
//! let app = App::new(source, Variant::History { days: 7 }, Thresholds::default());
//! ```
//!
//! ### Transforming a history response directly
//!
//! ```
//! use farmwatch::{FarmData, HistoryResponse, Thresholds};
//!
//! let response: HistoryResponse = serde_json::from_str(r#"{"history": []}"#).unwrap();
//! let data = FarmData::from_response(response, &Thresholds::default());
//! assert!(data.latest().is_none());
//! assert!(data.alert_message().is_none());
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, Variant, View};
pub use self::config::Settings;
pub use data::{FarmData, Thresholds, TrendSeries};
pub use source::{
    CropHealth, DataSource, Document, FileSource, HistoryEntry, HistoryResponse, HttpSource,
    PestRisk, SoilCondition,
};
