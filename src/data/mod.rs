//! Metric selection and query building.
//!
//! This module holds everything between the raw metadata from a source and
//! the panels of a dashboard.
//!
//! ## Submodules
//!
//! - [`metrics`]: The metric list ([`Metrics`]) with prefix filtering and sorting
//! - [`query`]: printf-style query templates ([`QueryTemplate`])
//! - [`tags`]: OpenTSDB tag sets ([`TagSet`])
//! - [`template_vars`]: Dashboard template variables given as `name=value` pairs
//!
//! ## Data Flow
//!
//! ```text
//! Vec<MetricEntry> (from a MetadataSource)
//!        │
//!        ▼
//! Metrics::starts_with(prefix)   (drops metrics without metadata)
//!        │
//!        ▼
//! Metrics::sort_by_name()
//!        │
//!        └──▶ per metric: TagSet fill + QueryTemplate::render()
//! ```

pub mod metrics;
pub mod query;
pub mod tags;
pub mod template_vars;

pub use metrics::Metrics;
pub use query::{QueryArgs, QueryTemplate};
pub use tags::TagSet;
pub use template_vars::{parse_template_vars, TemplateVar};
