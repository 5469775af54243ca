use serde::{Deserialize, Serialize};

use super::{DataTransformer, TransformContext, decode_options};
use crate::display::JsRegex;
use crate::types::DataFrame;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterByRefIdOptions {
    /// RefId, either as an exact value, a bare pattern or `/pattern/flags`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
}

/// Keep frames whose refId matches `options.include`. Frames without a refId never match.
pub fn filter_frames_by_ref_id(options: &FilterByRefIdOptions, frames: Vec<DataFrame>) -> Vec<DataFrame> {
    let Some(include) = options.include.as_deref().filter(|s| !s.is_empty()) else {
        return frames;
    };
    let regex = match JsRegex::parse(include) {
        Ok(regex) => regex,
        Err(err) => {
            tracing::debug!(error = %err, "invalid refId pattern, passing frames through");
            return frames;
        }
    };
    frames
        .into_iter()
        .filter(|f| f.ref_id.as_deref().is_some_and(|id| regex.is_match(id)))
        .collect()
}

pub struct FilterByRefIdTransformer;

impl DataTransformer for FilterByRefIdTransformer {
    fn id(&self) -> &'static str {
        "filterByRefId"
    }

    fn name(&self) -> &'static str {
        "Filter data by query"
    }

    fn description(&self) -> &'static str {
        "Keep only the frames produced by matching queries."
    }

    fn transform(
        &self,
        options: &serde_json::Value,
        _ctx: &TransformContext,
        frames: Vec<DataFrame>,
    ) -> Vec<DataFrame> {
        match decode_options::<FilterByRefIdOptions>(self.id(), options) {
            Some(opts) => filter_frames_by_ref_id(&opts, frames),
            None => frames,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames() -> Vec<DataFrame> {
        vec![
            DataFrame::default().with_ref_id("A"),
            DataFrame::default().with_ref_id("B"),
            DataFrame::default().with_ref_id("AB"),
            DataFrame::default(),
        ]
    }

    fn ref_ids(frames: &[DataFrame]) -> Vec<&str> {
        frames.iter().filter_map(|f| f.ref_id.as_deref()).collect()
    }

    fn opts(include: &str) -> FilterByRefIdOptions {
        FilterByRefIdOptions {
            include: Some(include.to_string()),
        }
    }

    #[test]
    fn exact_ref_id() {
        assert_eq!(ref_ids(&filter_frames_by_ref_id(&opts("A"), frames())), vec!["A"]);
    }

    #[test]
    fn alternation_and_delimited_regex() {
        assert_eq!(ref_ids(&filter_frames_by_ref_id(&opts("A|B"), frames())), vec!["A", "B"]);
        assert_eq!(
            ref_ids(&filter_frames_by_ref_id(&opts("/a/i"), frames())),
            vec!["A", "AB"]
        );
    }

    #[test]
    fn empty_or_invalid_pass_through() {
        assert_eq!(filter_frames_by_ref_id(&FilterByRefIdOptions::default(), frames()).len(), 4);
        assert_eq!(filter_frames_by_ref_id(&opts(""), frames()).len(), 4);
        assert_eq!(filter_frames_by_ref_id(&opts("(["), frames()).len(), 4);
    }
}
