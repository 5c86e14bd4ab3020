//! Graph panels and their parts.

/// A graph panel in a dashboard row.
///
/// Field names follow Grafana's row-era panel JSON. Fields the generator
/// never changes are still emitted so the document imports without
/// Grafana filling in surprises.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Panel {
    pub bars: bool,
    pub datasource: String,
    pub editable: bool,
    pub error: bool,
    pub fill: u32,
    pub id: u32,
    #[cfg_attr(feature = "serde", serde(rename = "isNew"))]
    pub is_new: bool,
    pub legend: Legend,
    pub lines: bool,
    pub linewidth: u32,
    pub links: Vec<Link>,
    #[cfg_attr(feature = "serde", serde(rename = "nullPointMode"))]
    pub null_point_mode: String,
    pub percentage: bool,
    pub pointradius: u32,
    pub points: bool,
    pub renderer: String,
    /// Width in grid units out of [`ROW_WIDTH`](crate::ROW_WIDTH).
    pub span: u32,
    pub stack: bool,
    #[cfg_attr(feature = "serde", serde(rename = "steppedLine"))]
    pub stepped_line: bool,
    pub targets: Vec<Target>,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub panel_type: String,
    pub y_formats: Vec<String>,
    #[cfg_attr(feature = "serde", serde(rename = "leftYAxisLabel"))]
    pub left_y_axis_label: String,
    #[cfg_attr(feature = "serde", serde(rename = "rightYAxisLabel"))]
    pub right_y_axis_label: String,
    pub yaxes: Vec<Axis>,
    pub xaxis: Axis,
}

impl Panel {
    /// A line graph panel with Grafana's usual defaults and a hidden legend.
    pub fn graph() -> Self {
        Self {
            renderer: "flot".to_string(),
            panel_type: "graph".to_string(),
            y_formats: vec!["short".to_string(), "short".to_string()],
            lines: true,
            linewidth: 2,
            legend: Legend::default(),
            ..Default::default()
        }
    }
}

/// An axis of a graph panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Axis {
    pub show: bool,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    pub label: String,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "logBase", skip_serializing_if = "is_zero")
    )]
    pub log_base: u32,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "String::is_empty"))]
    pub format: String,
}

impl Axis {
    /// A visible axis with only its defaults.
    pub fn shown() -> Self {
        Self {
            show: true,
            ..Default::default()
        }
    }

    /// A hidden axis.
    pub fn hidden() -> Self {
        Self::default()
    }

    /// A visible linear axis with a label and a `short` value format.
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            show: true,
            label: label.into(),
            log_base: 1,
            format: "short".to_string(),
        }
    }
}

#[cfg(feature = "serde")]
fn is_zero(n: &u32) -> bool {
    *n == 0
}

/// A query attached to a panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Target {
    pub aggregator: String,
    #[cfg_attr(feature = "serde", serde(rename = "downsampleAggregator"))]
    pub downsample_aggregator: String,
    pub errors: TargetErrors,
    /// Query expression handed to the datasource.
    pub expr: String,
    #[cfg_attr(feature = "serde", serde(rename = "refId"))]
    pub ref_id: String,
}

impl Target {
    /// Create a target for an expression.
    pub fn new(expr: impl Into<String>, ref_id: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            ref_id: ref_id.into(),
            ..Default::default()
        }
    }
}

/// Always-empty error object Grafana expects on each target.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetErrors {}

/// Legend settings of a graph panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Legend {
    pub avg: bool,
    pub current: bool,
    pub max: bool,
    pub min: bool,
    pub show: bool,
    pub total: bool,
    pub values: bool,
}

/// A link shown in the panel header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Link {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub link_type: String,
    pub title: String,
}

impl Link {
    /// An absolute link carrying only a title.
    pub fn absolute(title: impl Into<String>) -> Self {
        Self {
            link_type: "Absolute".to_string(),
            title: title.into(),
        }
    }
}
