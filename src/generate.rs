//! Dashboard layout: one graph panel per metric, `per_row` panels per row.

use btog_types::{Axis, Dashboard, Link, MetricEntry, Panel, Row, Target, ROW_WIDTH};
use tracing::debug;

use crate::data::query::COUNTER_RATE;
use crate::data::{Metrics, QueryArgs, QueryTemplate, TagSet, TemplateVar};
use crate::error::GenerateError;

/// Everything that shapes a generated dashboard, already parsed.
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    /// Dashboard title.
    pub title: String,
    /// Datasource name written into every panel.
    pub datasource: String,
    /// Panels per row, 1 to [`ROW_WIDTH`].
    pub per_row: u32,
    /// Query expression template.
    pub query: QueryTemplate,
    /// Dashboard template variables.
    pub template_vars: Vec<TemplateVar>,
    /// Group-by tags for every query.
    pub group_tags: TagSet,
    /// Filter tags for every query.
    pub where_tags: TagSet,
    /// Add `k=*` to the group-by tags for each tag key of the metric.
    pub fill_group_tags: bool,
    /// Add `k=*` to the filter tags for each tag key of the metric.
    pub fill_where_tags: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            title: Dashboard::DEFAULT_TITLE.to_string(),
            datasource: "Bosun".to_string(),
            per_row: 6,
            query: QueryTemplate::default(),
            template_vars: Vec::new(),
            group_tags: TagSet::new(),
            where_tags: TagSet::new(),
            fill_group_tags: false,
            fill_where_tags: false,
        }
    }
}

/// Builds dashboards from metric lists.
#[derive(Debug, Clone)]
pub struct DashboardGenerator {
    settings: GeneratorSettings,
    span: u32,
}

impl DashboardGenerator {
    /// Create a generator, checking that `per_row` fits in a row.
    pub fn new(settings: GeneratorSettings) -> Result<Self, GenerateError> {
        if settings.per_row == 0 || settings.per_row > ROW_WIDTH {
            return Err(GenerateError::InvalidPerRow {
                got: settings.per_row,
                max: ROW_WIDTH,
            });
        }
        let span = ROW_WIDTH / settings.per_row;
        Ok(Self { settings, span })
    }

    /// The settings this generator was built with.
    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Width of each panel in grid units.
    pub fn span(&self) -> u32 {
        self.span
    }

    /// Lay out one panel per metric, in name order.
    ///
    /// A row closes every `per_row` panels; a final partial row is kept.
    /// An empty metric list yields a dashboard without rows.
    pub fn generate(&self, metrics: &Metrics) -> Dashboard {
        let metrics = metrics.clone().sorted();
        let per_row = self.settings.per_row as usize;

        let mut builder = Dashboard::builder().title(&self.settings.title).templates(
            self.settings
                .template_vars
                .iter()
                .map(TemplateVar::to_template),
        );

        let mut panels: Vec<Panel> = Vec::with_capacity(per_row);
        for (i, metric) in metrics.iter().enumerate() {
            if i != 0 && i % per_row == 0 {
                debug!("Appending row with {} panels", panels.len());
                builder = builder.row(Row::new(std::mem::take(&mut panels)));
            }
            panels.push(self.panel(i as u32, metric));
        }
        if !panels.is_empty() {
            debug!("Appending row with {} panels", panels.len());
            builder = builder.row(Row::new(panels));
        }

        builder.build()
    }

    /// Query expression for one metric.
    pub fn query_for(&self, metric: &MetricEntry) -> String {
        let mut group_tags = self.settings.group_tags.clone();
        if self.settings.fill_group_tags {
            group_tags.fill_wildcards(&metric.tag_keys);
        }
        let mut where_tags = self.settings.where_tags.clone();
        if self.settings.fill_where_tags {
            where_tags.fill_wildcards(&metric.tag_keys);
        }

        let group_tags = group_tags.tags();
        let where_tags = where_tags.tags();
        self.settings.query.render(&QueryArgs {
            rate: if metric.is_counter() { COUNTER_RATE } else { "" },
            metric: &metric.metric,
            group_tags: &group_tags,
            where_tags: &where_tags,
        })
    }

    fn panel(&self, id: u32, metric: &MetricEntry) -> Panel {
        let mut panel = Panel::graph();
        panel.id = id;
        panel.title = metric.metric.clone();
        panel.datasource = self.settings.datasource.clone();
        panel.span = self.span;
        panel.targets = vec![Target::new(self.query_for(metric), "A")];
        panel.yaxes = vec![Axis::labeled(metric.unit()), Axis::hidden()];
        panel.xaxis = Axis::shown();
        if !metric.desc().is_empty() {
            panel.links.push(Link::absolute(metric.desc()));
        }
        panel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use btog_types::MetricMetadata;

    fn metric(name: &str, rate: &str, desc: &str) -> MetricEntry {
        MetricEntry::new(name)
            .with_metadata(MetricMetadata {
                desc: (!desc.is_empty()).then(|| desc.to_string()),
                unit: Some("bytes".to_string()),
                rate: Some(rate.to_string()),
                ..Default::default()
            })
            .with_tag_keys(["host", "svname"])
    }

    fn metrics(n: usize) -> Metrics {
        (0..n)
            .map(|i| metric(&format!("haproxy.server.m{:02}", i), "gauge", ""))
            .collect()
    }

    fn generator(per_row: u32) -> DashboardGenerator {
        DashboardGenerator::new(GeneratorSettings {
            per_row,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_per_row_validation() {
        for bad in [0, 13, 100] {
            let err = DashboardGenerator::new(GeneratorSettings {
                per_row: bad,
                ..Default::default()
            })
            .unwrap_err();
            assert!(matches!(err, GenerateError::InvalidPerRow { got, .. } if got == bad));
        }
        assert_eq!(generator(1).span(), 12);
        assert_eq!(generator(5).span(), 2);
        assert_eq!(generator(6).span(), 2);
        assert_eq!(generator(12).span(), 1);
    }

    #[test]
    fn test_rows_close_every_per_row_panels() {
        let d = generator(3).generate(&metrics(7));
        let sizes: Vec<_> = d.rows.iter().map(Row::len).collect();
        assert_eq!(sizes, vec![3, 3, 1]);
        assert_eq!(d.panel_count(), 7);

        let ids: Vec<_> = d.panels().map(|p| p.id).collect();
        assert_eq!(ids, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn test_exact_multiple_has_no_empty_row() {
        let d = generator(2).generate(&metrics(4));
        let sizes: Vec<_> = d.rows.iter().map(Row::len).collect();
        assert_eq!(sizes, vec![2, 2]);
    }

    #[test]
    fn test_no_metrics() {
        let d = generator(6).generate(&Metrics::new());
        assert!(d.rows.is_empty());
        assert_eq!(d.title, "Gen Dashboard");
    }

    #[test]
    fn test_panels_sorted_by_name() {
        let list: Metrics = vec![
            metric("b.metric", "gauge", ""),
            metric("a.metric", "gauge", ""),
        ]
        .into();
        let d = generator(6).generate(&list);
        let titles: Vec<_> = d.panels().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["a.metric", "b.metric"]);
    }

    #[test]
    fn test_panel_contents() {
        let list: Metrics = vec![metric("haproxy.server.bin", "counter", "Bytes in.")].into();
        let d = DashboardGenerator::new(GeneratorSettings {
            datasource: "Bosun-prod".to_string(),
            per_row: 4,
            ..Default::default()
        })
        .unwrap()
        .generate(&list);

        let panel = &d.rows[0].panels[0];
        assert_eq!(panel.id, 0);
        assert_eq!(panel.title, "haproxy.server.bin");
        assert_eq!(panel.datasource, "Bosun-prod");
        assert_eq!(panel.span, 3);
        assert_eq!(panel.targets.len(), 1);
        assert_eq!(panel.targets[0].ref_id, "A");
        assert_eq!(
            panel.targets[0].expr,
            r#"q("sum:$ds-avg:rate{counter,,1}:haproxy.server.bin{}{}", "$start", "")"#
        );
        assert_eq!(panel.yaxes, vec![Axis::labeled("bytes"), Axis::hidden()]);
        assert_eq!(panel.xaxis, Axis::shown());
        assert_eq!(panel.links, vec![Link::absolute("Bytes in.")]);
    }

    #[test]
    fn test_no_link_without_description() {
        let list: Metrics = vec![metric("x", "gauge", "")].into();
        let d = generator(6).generate(&list);
        assert!(d.rows[0].panels[0].links.is_empty());
    }

    #[test]
    fn test_fill_tags() {
        let gen = DashboardGenerator::new(GeneratorSettings {
            group_tags: TagSet::parse("host=$host").unwrap(),
            where_tags: TagSet::parse("env=prod").unwrap(),
            fill_group_tags: true,
            fill_where_tags: true,
            ..Default::default()
        })
        .unwrap();

        let expr = gen.query_for(&metric("haproxy.server.scur", "gauge", ""));
        assert_eq!(
            expr,
            r#"q("sum:$ds-avg:haproxy.server.scur{host=$host,svname=*}{env=prod,host=*,svname=*}", "$start", "")"#
        );
    }

    #[test]
    fn test_tags_without_fill() {
        let gen = DashboardGenerator::new(GeneratorSettings {
            group_tags: TagSet::parse("host=*").unwrap(),
            ..Default::default()
        })
        .unwrap();

        let expr = gen.query_for(&metric("haproxy.server.scur", "gauge", ""));
        assert_eq!(
            expr,
            r#"q("sum:$ds-avg:haproxy.server.scur{host=*}{}", "$start", "")"#
        );
    }

    #[test]
    fn test_template_vars() {
        let d = DashboardGenerator::new(GeneratorSettings {
            title: "Edge".to_string(),
            template_vars: vec![TemplateVar::new("host", "lb01")],
            ..Default::default()
        })
        .unwrap()
        .generate(&Metrics::new());

        assert_eq!(d.title, "Edge");
        assert_eq!(d.templating.list.len(), 1);
        assert_eq!(d.templating.list[0].name, "host");
    }
}
