//! Dashboard serialization.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use btog_types::Dashboard;
use serde::Serialize;
use tracing::info;

/// Serialize a dashboard as tab-indented JSON.
pub fn to_json(dashboard: &Dashboard) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    dashboard
        .serialize(&mut ser)
        .context("Failed to serialize dashboard")?;
    Ok(String::from_utf8(buf)?)
}

/// Write the dashboard JSON, followed by a newline, to `writer`.
pub fn write_to<W: Write>(dashboard: &Dashboard, mut writer: W) -> Result<()> {
    let json = to_json(dashboard)?;
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write the dashboard to `path`, or to stdout when no path is given.
pub fn write_dashboard(dashboard: &Dashboard, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_to(dashboard, std::io::BufWriter::new(file))?;
            info!("Wrote dashboard to: {}", path.display());
        }
        None => write_to(dashboard, std::io::stdout().lock())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use btog_types::{Panel, Row, Target};
    use tempfile::tempdir;

    #[test]
    fn test_to_json_uses_tabs() {
        let json = to_json(&Dashboard::new()).unwrap();
        assert!(json.starts_with("{\n\t\"editable\": true,\n\t\"hideControls\": false,"));
        assert!(json.contains("\n\t\"templating\": {\n\t\t\"list\": []\n\t},"));
        assert!(json.ends_with('}'));
    }

    #[test]
    fn test_write_to_appends_newline() {
        let mut out = Vec::new();
        write_to(&Dashboard::new(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("}\n"));

        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["title"], "Gen Dashboard");
        assert!(parsed["id"].is_null());
    }

    #[test]
    fn test_query_quotes_are_escaped() {
        let mut panel = Panel::graph();
        panel.targets.push(Target::new(r#"q("sum:x", "$start", "")"#, "A"));
        let dashboard = Dashboard::builder().row(Row::new(vec![panel])).build();

        let json = to_json(&dashboard).unwrap();
        assert!(json.contains(r#""expr": "q(\"sum:x\", \"$start\", \"\")""#));
    }

    #[test]
    fn test_write_dashboard_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dashboard.json");

        write_dashboard(&Dashboard::new(), Some(&path)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Dashboard = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, Dashboard::new());
    }
}
