use serde::{Deserialize, Serialize};

use super::{DataTransformer, TransformContext, decode_options};
use crate::processing::head;
use crate::types::DataFrame;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LimitOptions {
    pub limit_field: usize,
}

impl Default for LimitOptions {
    fn default() -> Self {
        Self { limit_field: 10 }
    }
}

/// Keep the first `limit_field` rows of every frame.
pub fn limit(options: &LimitOptions, frames: Vec<DataFrame>) -> Vec<DataFrame> {
    frames
        .into_iter()
        .map(|frame| {
            if frame.length <= options.limit_field {
                frame
            } else {
                head(&frame, options.limit_field)
            }
        })
        .collect()
}

pub struct LimitTransformer;

impl DataTransformer for LimitTransformer {
    fn id(&self) -> &'static str {
        "limit"
    }

    fn name(&self) -> &'static str {
        "Limit"
    }

    fn description(&self) -> &'static str {
        "Limit the number of rows displayed."
    }

    fn transform(
        &self,
        options: &serde_json::Value,
        _ctx: &TransformContext,
        frames: Vec<DataFrame>,
    ) -> Vec<DataFrame> {
        match decode_options::<LimitOptions>(self.id(), options) {
            Some(opts) => limit(&opts, frames),
            None => frames,
        }
    }
}
