//! Field matchers: predicates that select fields inside frames.
//!
//! Matchers are configured as `{"id": ..., "options": ...}` ([`FieldMatcherConfig`]) and
//! compiled once into a [`FieldMatcher`]. Name-based matchers compare against the field's
//! display name (`config.displayName` or `name`). Positional matchers (`first`,
//! `firstTimeField`) expect the field to be borrowed from the frame it is tested against.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};
use crate::types::{DataFrame, Field, FieldType};

/// Predicate over a field in the context of its frame and all frames of the batch.
pub trait FieldMatcher: Send + Sync {
    fn matches(&self, field: &Field, frame: &DataFrame, all_frames: &[DataFrame]) -> bool;
}

impl<F> FieldMatcher for F
where
    F: Fn(&Field, &DataFrame, &[DataFrame]) -> bool + Send + Sync,
{
    fn matches(&self, field: &Field, frame: &DataFrame, all_frames: &[DataFrame]) -> bool {
        self(field, frame, all_frames)
    }
}

/// Options for the `byNames` matcher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ByNamesOptions {
    pub names: Vec<String>,
}

/// Serializable matcher selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "id", content = "options")]
pub enum FieldMatcherConfig {
    #[serde(rename = "byName")]
    ByName(String),
    #[serde(rename = "byNames")]
    ByNames(ByNamesOptions),
    #[serde(rename = "byRegexp")]
    ByRegexp(String),
    #[serde(rename = "byType")]
    ByType(FieldType),
    #[serde(rename = "numeric")]
    Numeric,
    #[serde(rename = "time")]
    Time,
    #[serde(rename = "first")]
    First,
    #[serde(rename = "firstTimeField")]
    FirstTimeField,
    #[serde(rename = "byFrameRefID")]
    ByFrameRefId(String),
}

impl FieldMatcherConfig {
    pub fn id(&self) -> &'static str {
        match self {
            FieldMatcherConfig::ByName(_) => "byName",
            FieldMatcherConfig::ByNames(_) => "byNames",
            FieldMatcherConfig::ByRegexp(_) => "byRegexp",
            FieldMatcherConfig::ByType(_) => "byType",
            FieldMatcherConfig::Numeric => "numeric",
            FieldMatcherConfig::Time => "time",
            FieldMatcherConfig::First => "first",
            FieldMatcherConfig::FirstTimeField => "firstTimeField",
            FieldMatcherConfig::ByFrameRefId(_) => "byFrameRefID",
        }
    }

    /// Compile into a matcher. Fails only for an invalid `byRegexp` pattern.
    pub fn build(&self) -> FrameResult<Box<dyn FieldMatcher>> {
        let matcher: Box<dyn FieldMatcher> = match self.clone() {
            FieldMatcherConfig::ByName(name) => {
                Box::new(move |f: &Field, _: &DataFrame, _: &[DataFrame]| f.display_name() == name)
            }
            FieldMatcherConfig::ByNames(opts) => Box::new(move |f: &Field, _: &DataFrame, _: &[DataFrame]| {
                opts.names.iter().any(|n| n == f.display_name())
            }),
            FieldMatcherConfig::ByRegexp(pattern) => {
                let regex = Regex::new(&pattern)
                    .map_err(|source| FrameError::InvalidRegex { pattern, source })?;
                Box::new(move |f: &Field, _: &DataFrame, _: &[DataFrame]| {
                    regex.is_match(f.display_name())
                })
            }
            FieldMatcherConfig::ByType(field_type) => {
                Box::new(move |f: &Field, _: &DataFrame, _: &[DataFrame]| f.field_type == field_type)
            }
            FieldMatcherConfig::Numeric => Box::new(|f: &Field, _: &DataFrame, _: &[DataFrame]| {
                f.field_type == FieldType::Number
            }),
            FieldMatcherConfig::Time => Box::new(|f: &Field, _: &DataFrame, _: &[DataFrame]| {
                f.field_type == FieldType::Time
            }),
            FieldMatcherConfig::First => Box::new(|f: &Field, frame: &DataFrame, _: &[DataFrame]| {
                frame.fields.first().is_some_and(|first| std::ptr::eq(first, f))
            }),
            FieldMatcherConfig::FirstTimeField => {
                Box::new(|f: &Field, frame: &DataFrame, _: &[DataFrame]| {
                    frame
                        .fields
                        .iter()
                        .find(|candidate| candidate.field_type == FieldType::Time)
                        .is_some_and(|first| std::ptr::eq(first, f))
                })
            }
            FieldMatcherConfig::ByFrameRefId(ref_id) => {
                Box::new(move |_: &Field, frame: &DataFrame, _: &[DataFrame]| {
                    frame.ref_id.as_deref() == Some(ref_id.as_str())
                })
            }
        };
        Ok(matcher)
    }
}

/// Names of every field in `frames` selected by `matcher`, in frame then field order.
pub fn matching_field_names(matcher: &dyn FieldMatcher, frames: &[DataFrame]) -> Vec<String> {
    frames
        .iter()
        .flat_map(|frame| {
            frame
                .fields
                .iter()
                .filter(move |f| matcher.matches(f, frame, frames))
                .map(|f| f.display_name().to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldConfig, Value};

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Field::new("time", FieldType::Time, vec![Value::Int64(1), Value::Int64(2)]),
            Field::new("cpu", FieldType::Number, vec![Value::Float64(0.5), Value::Float64(0.7)]),
            Field::new("host", FieldType::String, vec!["a".into(), "b".into()]).with_config(
                FieldConfig {
                    display_name: Some("Server".to_string()),
                    ..FieldConfig::default()
                },
            ),
        ])
        .with_ref_id("A")
    }

    fn names(config: FieldMatcherConfig) -> Vec<String> {
        let matcher = config.build().unwrap();
        matching_field_names(matcher.as_ref(), &[frame()])
    }

    #[test]
    fn name_matchers_use_display_names() {
        assert_eq!(names(FieldMatcherConfig::ByName("Server".into())), vec!["Server"]);
        assert!(names(FieldMatcherConfig::ByName("host".into())).is_empty());
        assert_eq!(
            names(FieldMatcherConfig::ByNames(ByNamesOptions {
                names: vec!["cpu".into(), "time".into()]
            })),
            vec!["time", "cpu"]
        );
        assert_eq!(names(FieldMatcherConfig::ByRegexp("^(c|t)".into())), vec!["time", "cpu"]);
    }

    #[test]
    fn type_and_position_matchers() {
        assert_eq!(names(FieldMatcherConfig::Numeric), vec!["cpu"]);
        assert_eq!(names(FieldMatcherConfig::Time), vec!["time"]);
        assert_eq!(names(FieldMatcherConfig::ByType(FieldType::String)), vec!["Server"]);
        assert_eq!(names(FieldMatcherConfig::First), vec!["time"]);
        assert_eq!(names(FieldMatcherConfig::FirstTimeField), vec!["time"]);
        assert_eq!(names(FieldMatcherConfig::ByFrameRefId("A".into())).len(), 3);
        assert!(names(FieldMatcherConfig::ByFrameRefId("B".into())).is_empty());
    }

    #[test]
    fn invalid_regex_is_an_error() {
        let err = FieldMatcherConfig::ByRegexp("(".into()).build().err().unwrap();
        assert!(matches!(err, FrameError::InvalidRegex { .. }));
    }

    #[test]
    fn configs_round_trip_through_json() {
        let config: FieldMatcherConfig =
            serde_json::from_str(r#"{"id": "byName", "options": "cpu"}"#).unwrap();
        assert_eq!(config, FieldMatcherConfig::ByName("cpu".into()));
        let numeric: FieldMatcherConfig = serde_json::from_str(r#"{"id": "numeric"}"#).unwrap();
        assert_eq!(numeric.id(), "numeric");
    }
}
