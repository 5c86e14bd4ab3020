//! Dashboard template variables.

/// A template variable, referenced as `$name` inside panel queries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Template {
    #[cfg_attr(feature = "serde", serde(rename = "allFormat"))]
    pub all_format: String,
    pub current: Current,
    #[cfg_attr(feature = "serde", serde(rename = "includeAll"))]
    pub include_all: bool,
    pub multi: bool,
    #[cfg_attr(feature = "serde", serde(rename = "multiFormat"))]
    pub multi_format: String,
    pub name: String,
    pub options: Vec<TemplateOption>,
    pub query: String,
    pub refresh: bool,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub template_type: String,
}

impl Template {
    /// A `custom` variable with a single, selected value.
    pub fn custom(name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            all_format: "glob".to_string(),
            multi_format: "glob".to_string(),
            current: Current {
                text: value.clone(),
                value: value.clone(),
            },
            name: name.into(),
            options: vec![TemplateOption {
                selected: true,
                text: value.clone(),
                value: value.clone(),
            }],
            query: value,
            template_type: "custom".to_string(),
            ..Default::default()
        }
    }
}

/// Currently selected value of a template variable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Current {
    pub text: String,
    pub value: String,
}

/// One selectable value of a template variable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TemplateOption {
    pub selected: bool,
    pub text: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_template() {
        let t = Template::custom("host", "ny-lb01");
        assert_eq!(t.name, "host");
        assert_eq!(t.all_format, "glob");
        assert_eq!(t.multi_format, "glob");
        assert_eq!(t.current.text, "ny-lb01");
        assert_eq!(t.current.value, "ny-lb01");
        assert_eq!(t.options.len(), 1);
        assert!(t.options[0].selected);
        assert_eq!(t.query, "ny-lb01");
        assert_eq!(t.template_type, "custom");
        assert!(!t.include_all);
        assert!(!t.multi);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_template_json_keys() {
        let value = serde_json::to_value(Template::custom("group", "web")).unwrap();
        assert_eq!(value["allFormat"], "glob");
        assert_eq!(value["multiFormat"], "glob");
        assert_eq!(value["includeAll"], false);
        assert_eq!(value["type"], "custom");
        assert_eq!(value["current"], serde_json::json!({ "text": "web", "value": "web" }));
        assert_eq!(
            value["options"],
            serde_json::json!([{ "selected": true, "text": "web", "value": "web" }])
        );
    }
}
