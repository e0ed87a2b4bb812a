//! Terminal UI rendering using ratatui.
//!
//! This module contains all the view-specific rendering logic for the TUI.
//! Each view is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`overview`]: Summary cards, embedded trend chart and alert banner
//! - [`chart`]: Multi-series trend chart over the history window
//! - [`history`]: Per-day readings table with flagged rows
//! - [`raw`]: The fetched document, pretty-printed verbatim
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! The main loop in `main.rs` calls into these modules based on the current
//! view:
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ View Content                         │
//! │ (overview/chart/history/raw::render) │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Help overlay rendered on top (common::render_help)
//! ```

pub mod chart;
pub mod common;
pub mod history;
pub mod overview;
pub mod raw;
pub mod theme;

pub use theme::Theme;
