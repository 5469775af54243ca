use serde::{Deserialize, Serialize};

use super::{DataTransformer, TransformContext, decode_options};
use crate::display::JsRegex;
use crate::matchers::{ByNamesOptions, FieldMatcher, FieldMatcherConfig};
use crate::types::{DataFrame, Field};

/// Field selection by explicit names and/or a name pattern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameMatchOptions {
    pub names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterFieldsByNameOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<NameMatchOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<NameMatchOptions>,
}

struct NameSelector {
    names: Option<Box<dyn FieldMatcher>>,
    pattern: Option<JsRegex>,
}

impl NameSelector {
    fn compile(options: &NameMatchOptions) -> Option<Self> {
        let names = if options.names.is_empty() {
            None
        } else {
            FieldMatcherConfig::ByNames(ByNamesOptions {
                names: options.names.clone(),
            })
            .build()
            .ok()
        };
        let pattern = options
            .pattern
            .as_deref()
            .filter(|p| !p.is_empty())
            .and_then(|p| match JsRegex::parse(p) {
                Ok(regex) => Some(regex),
                Err(err) => {
                    tracing::debug!(error = %err, "ignoring invalid field name pattern");
                    None
                }
            });
        if names.is_none() && pattern.is_none() {
            return None;
        }
        Some(Self { names, pattern })
    }

    fn matches(&self, field: &Field, frame: &DataFrame, frames: &[DataFrame]) -> bool {
        self.names
            .as_ref()
            .is_some_and(|m| m.matches(field, frame, frames))
            || self
                .pattern
                .as_ref()
                .is_some_and(|re| re.is_match(field.display_name()))
    }
}

/// Keep the fields selected by `include` (all fields when unset), then drop those selected by
/// `exclude`. Frames left without fields are removed.
pub fn filter_fields_by_name(options: &FilterFieldsByNameOptions, frames: Vec<DataFrame>) -> Vec<DataFrame> {
    let include = options.include.as_ref().and_then(NameSelector::compile);
    let exclude = options.exclude.as_ref().and_then(NameSelector::compile);
    if include.is_none() && exclude.is_none() {
        return frames;
    }

    let mut out = Vec::with_capacity(frames.len());
    for frame in &frames {
        let fields: Vec<Field> = frame
            .fields
            .iter()
            .filter(|f| include.as_ref().is_none_or(|sel| sel.matches(f, frame, &frames)))
            .filter(|f| !exclude.as_ref().is_some_and(|sel| sel.matches(f, frame, &frames)))
            .cloned()
            .collect();
        if fields.is_empty() {
            continue;
        }
        out.push(DataFrame {
            name: frame.name.clone(),
            ref_id: frame.ref_id.clone(),
            fields,
            length: frame.length,
        });
    }
    out
}

pub struct FilterByNameTransformer;

impl DataTransformer for FilterByNameTransformer {
    fn id(&self) -> &'static str {
        "filterFieldsByName"
    }

    fn name(&self) -> &'static str {
        "Filter by name"
    }

    fn description(&self) -> &'static str {
        "Removes part of the query results using a regex pattern or a list of names."
    }

    fn transform(
        &self,
        options: &serde_json::Value,
        _ctx: &TransformContext,
        frames: Vec<DataFrame>,
    ) -> Vec<DataFrame> {
        match decode_options::<FilterFieldsByNameOptions>(self.id(), options) {
            Some(opts) => filter_fields_by_name(&opts, frames),
            None => frames,
        }
    }
}
