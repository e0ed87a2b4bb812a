//! Data models and processing for farm reports.
//!
//! This module turns the raw history document into the derived values the
//! views render: chronological chart series and the flagged "issue" days.
//!
//! ## Data Flow
//!
//! ```text
//! HistoryResponse (wire order, newest-first)
//!        │
//!        ▼
//! FarmData::from_response()
//!        │
//!        ├──▶ TrendSeries (labels + values, reversed oldest-first)
//!        │
//!        └──▶ issues (input-order indices matching the Thresholds predicate)
//! ```

pub mod farm;
pub mod series;

pub use farm::{FarmData, Thresholds};
pub use series::TrendSeries;
