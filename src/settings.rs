//! Layered configuration.
//!
//! Settings are merged from, lowest to highest precedence:
//!
//! 1. built-in defaults
//! 2. a TOML config file (`--config`)
//! 3. `BTOG_*` environment variables (e.g. `BTOG_BASE_URL`, `BTOG_PER_ROW`)
//! 4. command-line flags
//!
//! # Example config file
//!
//! ```toml
//! base_url = "http://bosun.example.com:8070"
//! metric_root = "haproxy.server."
//! per_row = 4
//! group_tags = "host=*"
//! fill_where_tags = true
//!
//! [template_vars]
//! host = "ny-lb01"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::data::query::DEFAULT_QUERY;
use crate::data::{parse_template_vars, QueryTemplate, TagSet, TemplateVar};
use crate::error::GenerateError;
use crate::generate::GeneratorSettings;

/// Prefix of environment variables read as settings.
pub const ENV_PREFIX: &str = "BTOG";

/// Template variables, either as a `name=value,...` string or a table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TemplateVars {
    Csv(String),
    Table(BTreeMap<String, String>),
}

impl Default for TemplateVars {
    fn default() -> Self {
        TemplateVars::Csv(String::new())
    }
}

impl TemplateVars {
    /// Parse into variables. Both forms accept an empty initial value.
    pub fn parse(&self) -> Result<Vec<TemplateVar>, GenerateError> {
        match self {
            TemplateVars::Csv(s) => parse_template_vars(s),
            TemplateVars::Table(table) => table
                .iter()
                .map(|(name, value)| {
                    if name.trim().is_empty() {
                        Err(GenerateError::InvalidTemplateVar(format!("={value}")))
                    } else {
                        Ok(TemplateVar::new(name.trim(), value.trim()))
                    }
                })
                .collect(),
        }
    }
}

/// Fully merged settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Bosun root URL.
    pub base_url: String,
    /// Datasource name written into panels.
    pub datasource: String,
    /// Only metrics starting with this prefix get a panel.
    pub metric_root: String,
    /// Panels per row.
    pub per_row: u32,
    /// Dashboard template variables.
    pub template_vars: TemplateVars,
    /// Query template; see [`QueryTemplate`].
    pub query: String,
    /// Accepted for compatibility with older invocations; has no effect.
    pub tagstar: bool,
    /// Group-by tags, e.g. `host=*`.
    pub group_tags: String,
    /// Filter tags, e.g. `host=*`.
    pub where_tags: String,
    /// Fill group-by tags with `k=*` for each tag key of a metric.
    pub fill_group_tags: bool,
    /// Fill filter tags with `k=*` for each tag key of a metric.
    pub fill_where_tags: bool,
    /// Dashboard title.
    pub title: String,
    /// Read metadata from this file instead of Bosun.
    pub input: Option<PathBuf>,
    /// Write the dashboard here instead of stdout.
    pub output: Option<PathBuf>,
    /// HTTP timeout in seconds ("10s", "2.5s") or milliseconds ("500ms").
    pub timeout: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://bosun".to_string(),
            datasource: "Bosun".to_string(),
            metric_root: "haproxy.server.".to_string(),
            per_row: 6,
            template_vars: TemplateVars::default(),
            query: DEFAULT_QUERY.to_string(),
            tagstar: true,
            group_tags: String::new(),
            where_tags: String::new(),
            fill_group_tags: false,
            fill_where_tags: false,
            title: btog_types::Dashboard::DEFAULT_TITLE.to_string(),
            input: None,
            output: None,
            timeout: "10s".to_string(),
        }
    }
}

/// Values given on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub datasource: Option<String>,
    pub metric_root: Option<String>,
    pub per_row: Option<u32>,
    pub template_vars: Option<String>,
    pub query: Option<String>,
    pub tagstar: Option<bool>,
    pub group_tags: Option<String>,
    pub where_tags: Option<String>,
    pub fill_group_tags: Option<bool>,
    pub fill_where_tags: Option<bool>,
    pub title: Option<String>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub timeout: Option<String>,
}

impl Settings {
    /// Merge defaults, the optional config file, the environment and `overrides`.
    pub fn load(config_path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        Self::load_with_env(config_path, overrides, Environment::with_prefix(ENV_PREFIX))
    }

    /// Like [`Settings::load`] with an explicit environment source.
    pub fn load_with_env(
        config_path: Option<&Path>,
        overrides: &Overrides,
        env: Environment,
    ) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        builder = builder.add_source(env);

        let path_string = |p: &Option<PathBuf>| p.as_ref().map(|p| p.display().to_string());
        builder = builder
            .set_override_option("base_url", overrides.base_url.clone())?
            .set_override_option("datasource", overrides.datasource.clone())?
            .set_override_option("metric_root", overrides.metric_root.clone())?
            .set_override_option("per_row", overrides.per_row.map(i64::from))?
            .set_override_option("template_vars", overrides.template_vars.clone())?
            .set_override_option("query", overrides.query.clone())?
            .set_override_option("tagstar", overrides.tagstar)?
            .set_override_option("group_tags", overrides.group_tags.clone())?
            .set_override_option("where_tags", overrides.where_tags.clone())?
            .set_override_option("fill_group_tags", overrides.fill_group_tags)?
            .set_override_option("fill_where_tags", overrides.fill_where_tags)?
            .set_override_option("title", overrides.title.clone())?
            .set_override_option("input", path_string(&overrides.input))?
            .set_override_option("output", path_string(&overrides.output))?
            .set_override_option("timeout", overrides.timeout.clone())?;

        let settings: Settings = builder
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        Ok(settings)
    }

    /// HTTP timeout as a duration.
    pub fn timeout(&self) -> Result<Duration> {
        parse_timeout(&self.timeout).with_context(|| format!("Invalid timeout {:?}", self.timeout))
    }

    /// Parse the generator-facing settings.
    pub fn generator_settings(&self) -> Result<GeneratorSettings, GenerateError> {
        Ok(GeneratorSettings {
            title: self.title.clone(),
            datasource: self.datasource.clone(),
            per_row: self.per_row,
            query: QueryTemplate::parse(&self.query)?,
            template_vars: self.template_vars.parse()?,
            group_tags: TagSet::parse(&self.group_tags)?,
            where_tags: TagSet::parse(&self.where_tags)?,
            fill_group_tags: self.fill_group_tags,
            fill_where_tags: self.fill_where_tags,
        })
    }
}

/// Timeouts take an `ms` or `s` suffix and must be positive.
fn parse_timeout(s: &str) -> Result<Duration> {
    let s = s.trim();
    let (value, scale) = match s.strip_suffix("ms") {
        Some(v) => (v, 1_000.0),
        None => match s.strip_suffix('s') {
            Some(v) => (v, 1.0),
            None => bail!("expected an \"ms\" or \"s\" suffix"),
        },
    };

    let value: f64 = value.trim().parse()?;
    if !value.is_finite() || value <= 0.0 {
        bail!("timeout must be positive");
    }
    Ok(Duration::from_secs_f64(value / scale))
}
