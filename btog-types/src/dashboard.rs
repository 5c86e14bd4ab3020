//! Dashboard - the top-level Grafana document.

use crate::{Panel, Template};

/// A Grafana dashboard in the row-based layout.
///
/// # Example
///
/// ```rust
/// use btog_types::{Dashboard, Row, Panel};
///
/// let dashboard = Dashboard::builder()
///     .title("Load balancers")
///     .row(Row::new(vec![Panel::graph(), Panel::graph()]))
///     .build();
///
/// assert_eq!(dashboard.panel_count(), 2);
///
/// // Serialize with serde (requires "serde" feature)
/// // let json = serde_json::to_string_pretty(&dashboard)?;
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Dashboard {
    pub editable: bool,
    #[cfg_attr(feature = "serde", serde(rename = "hideControls"))]
    pub hide_controls: bool,
    /// Always `null` so Grafana assigns an id on import.
    pub id: Option<u64>,
    pub rows: Vec<Row>,
    #[cfg_attr(feature = "serde", serde(rename = "schemaVersion"))]
    pub schema_version: u32,
    #[cfg_attr(feature = "serde", serde(rename = "sharedCrosshair"))]
    pub shared_crosshair: bool,
    pub style: String,
    pub tags: Vec<String>,
    pub templating: Templating,
    pub timezone: String,
    pub title: String,
    pub version: u32,
}

impl Dashboard {
    /// Title used when none is configured.
    pub const DEFAULT_TITLE: &'static str = "Gen Dashboard";

    /// Create an empty, editable dark dashboard in UTC.
    pub fn new() -> Self {
        Self {
            editable: true,
            style: "dark".to_string(),
            timezone: "utc".to_string(),
            title: Self::DEFAULT_TITLE.to_string(),
            ..Default::default()
        }
    }

    /// Create a builder for constructing dashboards.
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::new()
    }

    /// Number of panels across all rows.
    pub fn panel_count(&self) -> usize {
        self.rows.iter().map(|r| r.panels.len()).sum()
    }

    /// Iterate over all panels in row order.
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.rows.iter().flat_map(|r| r.panels.iter())
    }
}

/// Template variable list of a dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Templating {
    pub list: Vec<Template>,
}

/// A horizontal row of panels.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Row {
    pub collapse: bool,
    pub editable: bool,
    pub panels: Vec<Panel>,
    pub title: String,
}

impl Row {
    /// Create an untitled row holding the given panels.
    pub fn new(panels: Vec<Panel>) -> Self {
        Self {
            panels,
            ..Default::default()
        }
    }

    /// Check if the row has no panels.
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Number of panels in the row.
    pub fn len(&self) -> usize {
        self.panels.len()
    }
}

/// Builder for constructing `Dashboard` instances.
#[derive(Debug)]
pub struct DashboardBuilder {
    dashboard: Dashboard,
}

impl DashboardBuilder {
    /// Create a new builder starting from [`Dashboard::new`].
    pub fn new() -> Self {
        Self {
            dashboard: Dashboard::new(),
        }
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.dashboard.title = title.into();
        self
    }

    /// Set the style ("dark" or "light").
    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.dashboard.style = style.into();
        self
    }

    /// Set the timezone ("utc" or "browser").
    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.dashboard.timezone = timezone.into();
        self
    }

    /// Set whether the dashboard is editable.
    pub fn editable(mut self, editable: bool) -> Self {
        self.dashboard.editable = editable;
        self
    }

    /// Add a dashboard tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.dashboard.tags.push(tag.into());
        self
    }

    /// Add a template variable.
    pub fn template(mut self, template: Template) -> Self {
        self.dashboard.templating.list.push(template);
        self
    }

    /// Add several template variables.
    pub fn templates(mut self, templates: impl IntoIterator<Item = Template>) -> Self {
        self.dashboard.templating.list.extend(templates);
        self
    }

    /// Append a row.
    pub fn row(mut self, row: Row) -> Self {
        self.dashboard.rows.push(row);
        self
    }

    /// Build the dashboard.
    pub fn build(self) -> Dashboard {
        self.dashboard
    }
}

impl Default for DashboardBuilder {
    fn default() -> Self {
        Self::new()
    }
}
