//! # btog-types
//!
//! Core types for turning Bosun metric metadata into Grafana dashboards.
//!
//! Two schemas live here:
//!
//! - **Metric metadata** as served by Bosun's `/api/metadata/metrics`
//!   endpoint: a JSON object keyed by metric name whose values carry the
//!   description, unit, rate type and known tag keys of each metric.
//! - **Dashboard documents** in the row-based Grafana layout: a dashboard
//!   holds rows, rows hold graph panels, panels hold query targets.
//!
//! ## Features
//!
//! - `serde`: JSON serialization of both schemas via serde
//!
//! ## Example
//!
//! ```rust
//! use btog_types::{Dashboard, Panel, Row, Template};
//!
//! let mut panel = Panel::graph();
//! panel.title = "haproxy.server.hrsp_5xx".to_string();
//!
//! let dashboard = Dashboard::builder()
//!     .title("HAProxy")
//!     .template(Template::custom("host", "lb01"))
//!     .row(Row::new(vec![panel]))
//!     .build();
//!
//! assert_eq!(dashboard.rows.len(), 1);
//! assert_eq!(dashboard.style, "dark");
//! ```

mod dashboard;
mod metadata;
mod panel;
mod templating;

pub use dashboard::*;
pub use metadata::*;
pub use panel::*;
pub use templating::*;

/// Total width of a dashboard row in grid units.
///
/// A panel's `span` is its share of this width.
pub const ROW_WIDTH: u32 = 12;
