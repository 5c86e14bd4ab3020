//! Error types for dashboard generation.

use thiserror::Error;

/// Errors in the settings that drive dashboard generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A tag list entry is not a `key=value` pair.
    #[error("bad tag: {0:?}")]
    InvalidTag(String),

    /// The same tag key appears twice in one list.
    #[error("duplicate tag: {0}")]
    DuplicateTag(String),

    /// A template variable has no initial value.
    #[error("Template vars must have an initial value: {0:?}")]
    InvalidTemplateVar(String),

    /// The query template cannot be parsed.
    #[error("invalid query template {template:?}: {reason}")]
    InvalidQuery { template: String, reason: String },

    /// Panels per row must divide a row into at least one grid unit each.
    #[error("panels per row must be between 1 and {max}, got {got}")]
    InvalidPerRow { got: u32, max: u32 },
}
