use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use btog::{output, Overrides, Settings};

#[derive(Parser, Debug)]
#[command(name = "btog")]
#[command(about = "Generate a Grafana dashboard from Bosun metric metadata")]
struct Args {
    /// Bosun root url [default: http://bosun]
    #[arg(short, long = "base-url", alias = "baseurl")]
    base_url: Option<String>,

    /// Datasource to use in panels [default: Bosun]
    #[arg(short, long)]
    datasource: Option<String>,

    /// Get all metrics that start with this string [default: haproxy.server.]
    #[arg(short, long = "metric-root")]
    metric_root: Option<String>,

    /// Number of graph panels per row [default: 6]
    #[arg(short, long = "per-row")]
    per_row: Option<u32>,

    /// CSV of template vars with an initial value, i.e. host=foo,group=baz.
    /// Referenced as $host and $group in the query.
    #[arg(short, long = "template-vars")]
    template_vars: Option<String>,

    /// Query template. %s placeholders in order: counter rate prefix, metric,
    /// group-by tags, filter tags. %[n]s picks argument n.
    /// [default: q("sum:$ds-avg:%s%s{%s}{%s}", "$start", "")]
    #[arg(short, long)]
    query: Option<String>,

    /// Accepted for compatibility; has no effect
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    tagstar: Option<bool>,

    /// Tags to use in the group-by field, i.e. host=*
    #[arg(long = "grouptags", alias = "group-tags")]
    group_tags: Option<String>,

    /// Tags to use in the filter/where field, i.e. host=*
    #[arg(long = "wheretags", alias = "where-tags")]
    where_tags: Option<String>,

    /// Fill in group-by tags with tagk=* for all tag keys not in --grouptags
    #[arg(
        long = "fillgrouptags",
        alias = "fill-group-tags",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    fill_group_tags: Option<bool>,

    /// Fill in filter tags with tagk=* for all tag keys not in --wheretags
    #[arg(
        long = "fillwheretags",
        alias = "fill-where-tags",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    fill_where_tags: Option<bool>,

    /// Dashboard title [default: Gen Dashboard]
    #[arg(long)]
    title: Option<String>,

    /// Read metric metadata from a saved /api/metadata/metrics response
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Write the dashboard to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// HTTP timeout (e.g., "10s", "500ms") [default: 10s]
    #[arg(long)]
    timeout: Option<String>,

    /// TOML config file; flags take precedence over it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.base_url.clone(),
            datasource: self.datasource.clone(),
            metric_root: self.metric_root.clone(),
            per_row: self.per_row,
            template_vars: self.template_vars.clone(),
            query: self.query.clone(),
            tagstar: self.tagstar,
            group_tags: self.group_tags.clone(),
            where_tags: self.where_tags.clone(),
            fill_group_tags: self.fill_group_tags,
            fill_where_tags: self.fill_where_tags,
            title: self.title.clone(),
            input: self.input.clone(),
            output: self.output.clone(),
            timeout: self.timeout.clone(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = Settings::load(args.config.as_deref(), &args.overrides())?;
    let timeout = settings.timeout()?;
    debug!(
        base_url = %settings.base_url,
        metric_root = %settings.metric_root,
        per_row = settings.per_row,
        ?timeout,
        "Loaded settings"
    );

    let rt = tokio::runtime::Runtime::new()?;
    let dashboard = rt.block_on(btog::generate(&settings))?;

    output::write_dashboard(&dashboard, settings.output.as_deref())
}

/// Log to stderr; stdout carries the dashboard.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
