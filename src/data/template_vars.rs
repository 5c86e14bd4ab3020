//! Dashboard template variables from `name=value` lists.

use btog_types::Template;

use crate::error::GenerateError;

/// A template variable with its initial value.
///
/// Referenced as `$name` inside panel queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateVar {
    pub name: String,
    pub value: String,
}

impl TemplateVar {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Dashboard form of this variable.
    pub fn to_template(&self) -> Template {
        Template::custom(&self.name, &self.value)
    }
}

/// Parse a comma-separated list like `host=foo,group=baz`.
///
/// Every variable needs an initial value. An empty string yields no variables.
pub fn parse_template_vars(s: &str) -> Result<Vec<TemplateVar>, GenerateError> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }

    s.split(',')
        .map(|entry| {
            let kv: Vec<&str> = entry.split('=').collect();
            match kv.as_slice() {
                [name, value] if !name.trim().is_empty() => {
                    Ok(TemplateVar::new(name.trim(), value.trim()))
                }
                _ => Err(GenerateError::InvalidTemplateVar(entry.to_string())),
            }
        })
        .collect()
}
