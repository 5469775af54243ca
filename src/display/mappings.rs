//! Value mappings: rules that replace a raw value's text (and optionally its color).

use std::collections::BTreeMap;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};
use crate::types::Value;

/// Replacement produced by a matching [`ValueMapping`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueMappingResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
}

impl ValueMappingResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }
}

/// Values matched by [`ValueMapping::Special`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialValueMatch {
    #[serde(rename = "true")]
    True,
    #[serde(rename = "false")]
    False,
    #[serde(rename = "null")]
    Null,
    #[serde(rename = "nan")]
    NaN,
    #[serde(rename = "null+nan")]
    NullAndNaN,
    #[serde(rename = "empty")]
    Empty,
}

impl SpecialValueMatch {
    fn matches(self, value: &Value) -> bool {
        let is_nan = matches!(value, Value::Float64(v) if v.is_nan());
        match self {
            SpecialValueMatch::True => {
                matches!(value, Value::Bool(true)) || matches!(value, Value::Utf8(s) if s == "true")
            }
            SpecialValueMatch::False => {
                matches!(value, Value::Bool(false))
                    || matches!(value, Value::Utf8(s) if s == "false")
            }
            SpecialValueMatch::Null => value.is_null(),
            SpecialValueMatch::NaN => is_nan,
            SpecialValueMatch::NullAndNaN => value.is_null() || is_nan,
            SpecialValueMatch::Empty => matches!(value, Value::Utf8(s) if s.is_empty()),
        }
    }
}

/// One mapping rule, serialized as `{"type": ..., "options": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "options", rename_all = "lowercase")]
pub enum ValueMapping {
    /// Exact match on the value's text.
    Value(BTreeMap<String, ValueMappingResult>),
    /// Inclusive numeric range; a missing bound is open.
    Range {
        #[serde(default)]
        from: Option<f64>,
        #[serde(default)]
        to: Option<f64>,
        result: ValueMappingResult,
    },
    /// Regular expression on the value's text; `$1`-style groups are substituted into the
    /// result text.
    Regex {
        pattern: String,
        result: ValueMappingResult,
    },
    /// Null, NaN, booleans or the empty string.
    Special {
        #[serde(rename = "match")]
        matcher: SpecialValueMatch,
        result: ValueMappingResult,
    },
}

/// A regex written either as `/pattern/flags` or as a bare pattern matched against the whole
/// text.
#[derive(Debug, Clone)]
pub struct JsRegex {
    regex: Regex,
    global: bool,
}

impl JsRegex {
    /// Parse `/pattern/flags` (flags `g i m s` are honored) or a bare pattern, which is
    /// anchored as `^pattern$`.
    pub fn parse(text: &str) -> FrameResult<Self> {
        let invalid = |source| FrameError::InvalidRegex {
            pattern: text.to_string(),
            source,
        };

        let delimited = text
            .strip_prefix('/')
            .and_then(|rest| rest.rfind('/').map(|end| (&rest[..end], &rest[end + 1..])));

        match delimited {
            Some((pattern, flags)) => {
                let regex = RegexBuilder::new(pattern)
                    .case_insensitive(flags.contains('i'))
                    .multi_line(flags.contains('m'))
                    .dot_matches_new_line(flags.contains('s'))
                    .build()
                    .map_err(invalid)?;
                Ok(Self {
                    regex,
                    global: flags.contains('g'),
                })
            }
            None => {
                let regex = Regex::new(&format!("^(?:{text})$")).map_err(invalid)?;
                Ok(Self {
                    regex,
                    global: false,
                })
            }
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Replace the first match, or every match for `/…/g`.
    pub fn replace(&self, text: &str, replacement: &str) -> String {
        if self.global {
            self.regex.replace_all(text, replacement).into_owned()
        } else {
            self.regex.replace(text, replacement).into_owned()
        }
    }
}

enum CompiledMapping {
    Value(BTreeMap<String, ValueMappingResult>),
    Range {
        from: Option<f64>,
        to: Option<f64>,
        result: ValueMappingResult,
    },
    Regex {
        regex: JsRegex,
        result: ValueMappingResult,
    },
    Special {
        matcher: SpecialValueMatch,
        result: ValueMappingResult,
    },
}

/// Mappings with their regexes compiled once. Rules with an invalid regex are skipped.
pub struct ValueMapper {
    rules: Vec<CompiledMapping>,
}

impl std::fmt::Debug for ValueMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueMapper")
            .field("rules", &self.rules.len())
            .finish()
    }
}

impl ValueMapper {
    pub fn new(mappings: &[ValueMapping]) -> Self {
        let rules = mappings
            .iter()
            .filter_map(|m| match m {
                ValueMapping::Value(table) => Some(CompiledMapping::Value(table.clone())),
                ValueMapping::Range { from, to, result } => Some(CompiledMapping::Range {
                    from: *from,
                    to: *to,
                    result: result.clone(),
                }),
                ValueMapping::Regex { pattern, result } => {
                    if pattern.is_empty() {
                        return None;
                    }
                    match JsRegex::parse(pattern) {
                        Ok(regex) => Some(CompiledMapping::Regex {
                            regex,
                            result: result.clone(),
                        }),
                        Err(err) => {
                            tracing::debug!(error = %err, "skipping regex value mapping");
                            None
                        }
                    }
                }
                ValueMapping::Special { matcher, result } => Some(CompiledMapping::Special {
                    matcher: *matcher,
                    result: result.clone(),
                }),
            })
            .collect();
        Self { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First matching rule's result.
    pub fn map(&self, value: &Value) -> Option<ValueMappingResult> {
        for rule in &self.rules {
            match rule {
                CompiledMapping::Value(table) => {
                    let key = match value {
                        Value::Null => "null".to_string(),
                        other => other.to_text(),
                    };
                    if let Some(result) = table.get(&key) {
                        return Some(result.clone());
                    }
                }
                CompiledMapping::Range { from, to, result } => {
                    if value.is_null() {
                        continue;
                    }
                    let n = value.to_number();
                    if n.is_nan() {
                        continue;
                    }
                    let hit = match (from, to) {
                        (Some(from), Some(to)) => n >= *from && n <= *to,
                        (Some(from), None) => n >= *from,
                        (None, Some(to)) => n <= *to,
                        (None, None) => false,
                    };
                    if hit {
                        return Some(result.clone());
                    }
                }
                CompiledMapping::Regex { regex, result } => {
                    if value.is_null() {
                        continue;
                    }
                    let text = value.to_text();
                    if regex.is_match(&text) {
                        let replacement = result.text.as_deref().unwrap_or_default();
                        return Some(ValueMappingResult {
                            text: Some(regex.replace(&text, replacement)),
                            ..result.clone()
                        });
                    }
                }
                CompiledMapping::Special { matcher, result } => {
                    if matcher.matches(value) {
                        return Some(result.clone());
                    }
                }
            }
        }
        None
    }
}

/// One-shot lookup of the first mapping that matches `value`.
pub fn get_value_mapping_result(mappings: &[ValueMapping], value: &Value) -> Option<ValueMappingResult> {
    ValueMapper::new(mappings).map(value)
}
