use indexmap::IndexMap;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("Invalid placeholder regex"));

/// Values substituted into `{{name}}` placeholders of command templates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVars {
    values: IndexMap<String, String>,
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Render `template`, leaving unknown placeholders untouched
    pub fn render(&self, template: &str) -> String {
        PLACEHOLDER
            .replace_all(template, |caps: &Captures| match self.get(&caps[1]) {
                Some(value) => value.to_string(),
                None => {
                    tracing::warn!("No value for placeholder '{}' in: {}", &caps[1], template);
                    caps[0].to_string()
                }
            })
            .into_owned()
    }
}

/// Whether `template` references the placeholder `name`
pub fn uses_placeholder(template: &str, name: &str) -> bool {
    PLACEHOLDER
        .captures_iter(template)
        .any(|caps| &caps[1] == name)
}
