use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{(\w+)\}|(\w+))").expect("variable regex is valid")
});

/// Execution context handed to every transformer: template variables for option
/// interpolation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformContext {
    variables: HashMap<String, String>,
}

impl TransformContext {
    pub fn new(variables: HashMap<String, String>) -> Self {
        Self { variables }
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// Replace `$name` and `${name}` references. Unknown variables are left as written.
    pub fn interpolate(&self, text: &str) -> String {
        if self.variables.is_empty() || !text.contains('$') {
            return text.to_string();
        }
        VARIABLE
            .replace_all(text, |caps: &Captures<'_>| {
                let name = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
                match self.variables.get(name) {
                    Some(value) => value.clone(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    /// [`TransformContext::interpolate`] applied to every string inside a JSON value.
    pub fn interpolate_json(&self, value: &serde_json::Value) -> serde_json::Value {
        use serde_json::Value;
        match value {
            Value::String(s) => Value::String(self.interpolate(s)),
            Value::Array(items) => Value::Array(items.iter().map(|v| self.interpolate_json(v)).collect()),
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), self.interpolate_json(v)))
                    .collect(),
            ),
            other => other.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn both_reference_forms() {
        let ctx = TransformContext::default()
            .with_variable("host", "web-1")
            .with_variable("dc", "eu");
        assert_eq!(ctx.interpolate("$host in ${dc}"), "web-1 in eu");
        assert_eq!(ctx.interpolate("${dc}west"), "euwest");
    }

    #[test]
    fn unknown_variables_stay() {
        let ctx = TransformContext::default().with_variable("a", "1");
        assert_eq!(ctx.interpolate("$b and ${c}"), "$b and ${c}");
    }

    #[test]
    fn interpolates_nested_json() {
        let ctx = TransformContext::default().with_variable("f", "cpu");
        let out = ctx.interpolate_json(&json!({ "sort": [{ "field": "$f", "desc": true }] }));
        assert_eq!(out, json!({ "sort": [{ "field": "cpu", "desc": true }] }));
    }
}
