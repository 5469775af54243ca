use serde::{Deserialize, Serialize};

use super::{DataTransformer, TransformContext, decode_options};
use crate::processing::sort_by;
use crate::types::DataFrame;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortByField {
    pub field: String,
    pub desc: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortByOptions {
    /// Only the first entry is applied.
    pub sort: Vec<SortByField>,
}

/// Sort the rows of every frame by the first configured field. Frames without that field are
/// returned as they are.
pub fn sort_frames(options: &SortByOptions, frames: Vec<DataFrame>) -> Vec<DataFrame> {
    let Some(key) = options.sort.first().filter(|s| !s.field.is_empty()) else {
        return frames;
    };
    frames
        .into_iter()
        .map(|frame| match sort_by(&frame, &key.field, key.desc) {
            Some(sorted) => sorted,
            None => {
                tracing::trace!(field = %key.field, "sort field not in frame");
                frame
            }
        })
        .collect()
}

pub struct SortByTransformer;

impl DataTransformer for SortByTransformer {
    fn id(&self) -> &'static str {
        "sortBy"
    }

    fn name(&self) -> &'static str {
        "Sort by"
    }

    fn description(&self) -> &'static str {
        "Sort rows by a field."
    }

    fn transform(
        &self,
        options: &serde_json::Value,
        _ctx: &TransformContext,
        frames: Vec<DataFrame>,
    ) -> Vec<DataFrame> {
        match decode_options::<SortByOptions>(self.id(), options) {
            Some(opts) => sort_frames(&opts, frames),
            None => frames,
        }
    }
}
