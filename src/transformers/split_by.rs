//! `splitBy`: one output frame per distinct value of a grouping field.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{DataTransformer, TransformContext, decode_options};
use crate::matchers::FieldMatcherConfig;
use crate::types::{DataFrame, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitByOptions {
    /// Display name of the grouping field.
    pub field: String,
}

fn group_key(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        other => other.to_text(),
    }
}

/// Split a single frame by the values of `options.field`.
///
/// Output frames follow the first-seen order of the group values and are named after them.
/// Every output keeps the source refId, drops the grouping field and holds its group's rows
/// in source order. Input with more or fewer than one frame, or without the grouping
/// field, is returned unchanged.
pub fn split_by(options: &SplitByOptions, frames: Vec<DataFrame>) -> Vec<DataFrame> {
    if frames.len() != 1 {
        tracing::debug!(frames = frames.len(), "splitBy expects exactly one frame");
        return frames;
    }

    let matcher = match FieldMatcherConfig::ByName(options.field.clone()).build() {
        Ok(m) => m,
        Err(_) => return frames,
    };

    let frame = &frames[0];
    let Some(group_idx) = frame
        .fields
        .iter()
        .position(|f| matcher.matches(f, frame, &frames))
    else {
        tracing::debug!(field = %options.field, "splitBy field not found");
        return frames;
    };

    // Groups in first-seen order, plus a key -> position index.
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for (row, value) in frame.fields[group_idx].values.iter().enumerate() {
        let key = group_key(value);
        match positions.get(&key) {
            Some(&pos) => groups[pos].1.push(row),
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push((key, vec![row]));
            }
        }
    }

    groups
        .into_iter()
        .map(|(key, rows)| DataFrame {
            name: Some(key),
            ref_id: frame.ref_id.clone(),
            fields: frame
                .fields
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != group_idx)
                .map(|(_, field)| field.take(&rows))
                .collect(),
            length: rows.len(),
        })
        .collect()
}

pub struct SplitByTransformer;

impl DataTransformer for SplitByTransformer {
    fn id(&self) -> &'static str {
        "splitBy"
    }

    fn name(&self) -> &'static str {
        "Split by"
    }

    fn description(&self) -> &'static str {
        "Split a frame into one frame per distinct value of a field."
    }

    fn transform(
        &self,
        options: &serde_json::Value,
        _ctx: &TransformContext,
        frames: Vec<DataFrame>,
    ) -> Vec<DataFrame> {
        match decode_options::<SplitByOptions>(self.id(), options) {
            Some(opts) => split_by(&opts, frames),
            None => frames,
        }
    }
}
