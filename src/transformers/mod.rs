//! Registry-driven frame transformations.
//!
//! A transformer is a pure function `(options, context) -> Vec<DataFrame> -> Vec<DataFrame>`
//! registered under a string id. Pipelines are lists of [`DataTransformerConfig`] applied in
//! order by [`transform_data_frame`], or lazily over a stream of frame batches by
//! [`transform_stream`].
//!
//! Transformers fail open: bad options, a missing field or an unsupported input shape return
//! the input unchanged instead of an error.
//!
//! ```
//! use frame_pipeline::transformers::{transform_data_frame, DataTransformerConfig, TransformContext};
//! use frame_pipeline::types::{DataFrame, Field, FieldType};
//! use serde_json::json;
//!
//! let frame = DataFrame::new(vec![
//!     Field::new("host", FieldType::String, vec!["a".into(), "b".into(), "a".into()]),
//!     Field::new("cpu", FieldType::Number, vec![1.0.into(), 2.0.into(), 3.0.into()]),
//! ]);
//!
//! let configs = vec![DataTransformerConfig::new("splitBy", json!({ "field": "host" }))];
//! let out = transform_data_frame(&TransformContext::default(), &configs, vec![frame]);
//! assert_eq!(out.len(), 2);
//! assert_eq!(out[0].name.as_deref(), Some("a"));
//! ```

mod context;
mod filter_by_name;
mod filter_by_ref_id;
mod limit;
mod organize;
mod reduce;
mod sort_by;
mod split_by;

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use futures::stream::{Stream, StreamExt};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};
use crate::types::DataFrame;

pub use context::TransformContext;
pub use filter_by_name::{FilterByNameTransformer, FilterFieldsByNameOptions, NameMatchOptions, filter_fields_by_name};
pub use filter_by_ref_id::{FilterByRefIdOptions, FilterByRefIdTransformer, filter_frames_by_ref_id};
pub use limit::{LimitOptions, LimitTransformer, limit};
pub use organize::{OrganizeOptions, OrganizeTransformer, organize_fields};
pub use reduce::{ReduceOptions, ReduceTransformer, reduce_frames};
pub use sort_by::{SortByField, SortByOptions, SortByTransformer, sort_frames};
pub use split_by::{SplitByOptions, SplitByTransformer, split_by};

/// A named, registry-discoverable transformation.
pub trait DataTransformer: Send + Sync {
    fn id(&self) -> &'static str;
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;

    /// Apply the transformation. `options` has already been interpolated with `ctx`.
    fn transform(
        &self,
        options: &serde_json::Value,
        ctx: &TransformContext,
        frames: Vec<DataFrame>,
    ) -> Vec<DataFrame>;
}

/// One step of a pipeline, in dashboard JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataTransformerConfig {
    pub id: String,
    #[serde(default)]
    pub options: serde_json::Value,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

impl DataTransformerConfig {
    pub fn new(id: impl Into<String>, options: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            options,
            disabled: false,
        }
    }
}

/// Decode transformer options, treating `null` as the default options.
///
/// Returns `None` (and logs) when the options do not fit `T`.
pub(crate) fn decode_options<T>(id: &str, options: &serde_json::Value) -> Option<T>
where
    T: DeserializeOwned + Default,
{
    if options.is_null() {
        return Some(T::default());
    }
    match serde_json::from_value(options.clone()) {
        Ok(opts) => Some(opts),
        Err(err) => {
            tracing::debug!(transformer = id, error = %err, "invalid options, passing frames through");
            None
        }
    }
}

/// Transformers indexed by id, in registration order.
#[derive(Clone, Default)]
pub struct TransformerRegistry {
    transformers: Vec<Arc<dyn DataTransformer>>,
    index: HashMap<&'static str, usize>,
}

impl fmt::Debug for TransformerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.transformers.iter().map(|t| t.id()))
            .finish()
    }
}

static STANDARD: LazyLock<TransformerRegistry> = LazyLock::new(TransformerRegistry::with_builtins);

impl TransformerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in transformer.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(SplitByTransformer));
        registry.register(Arc::new(FilterByNameTransformer));
        registry.register(Arc::new(FilterByRefIdTransformer));
        registry.register(Arc::new(OrganizeTransformer));
        registry.register(Arc::new(SortByTransformer));
        registry.register(Arc::new(LimitTransformer));
        registry.register(Arc::new(ReduceTransformer));
        registry
    }

    /// The shared registry of built-in transformers.
    pub fn standard() -> &'static TransformerRegistry {
        &STANDARD
    }

    /// Add or replace a transformer.
    pub fn register(&mut self, transformer: Arc<dyn DataTransformer>) {
        let id = transformer.id();
        match self.index.get(id) {
            Some(&i) => self.transformers[i] = transformer,
            None => {
                self.index.insert(id, self.transformers.len());
                self.transformers.push(transformer);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn DataTransformer>> {
        self.index.get(id).map(|&i| Arc::clone(&self.transformers[i]))
    }

    /// Strict lookup.
    pub fn try_get(&self, id: &str) -> FrameResult<Arc<dyn DataTransformer>> {
        self.get(id).ok_or_else(|| FrameError::UnknownId(id.to_string()))
    }

    /// Registered transformers in registration order.
    pub fn list(&self) -> impl Iterator<Item = &Arc<dyn DataTransformer>> {
        self.transformers.iter()
    }

    /// Run `configs` in order. Disabled steps and unknown ids are skipped.
    pub fn apply(
        &self,
        ctx: &TransformContext,
        configs: &[DataTransformerConfig],
        frames: Vec<DataFrame>,
    ) -> Vec<DataFrame> {
        configs.iter().fold(frames, |frames, config| {
            if config.disabled {
                return frames;
            }
            let Some(transformer) = self.get(&config.id) else {
                tracing::debug!(transformer = %config.id, "unknown transformer, skipping");
                return frames;
            };
            let options = ctx.interpolate_json(&config.options);
            tracing::trace!(transformer = %config.id, frames = frames.len(), "applying transformer");
            transformer.transform(&options, ctx, frames)
        })
    }
}

/// Run a pipeline with the built-in transformers.
pub fn transform_data_frame(
    ctx: &TransformContext,
    configs: &[DataTransformerConfig],
    frames: Vec<DataFrame>,
) -> Vec<DataFrame> {
    TransformerRegistry::standard().apply(ctx, configs, frames)
}

/// Operator form of [`transform_data_frame`]: each batch emitted by `input` is run through the
/// pipeline.
pub fn transform_stream<S>(
    input: S,
    configs: Vec<DataTransformerConfig>,
    ctx: TransformContext,
) -> impl Stream<Item = Vec<DataFrame>>
where
    S: Stream<Item = Vec<DataFrame>>,
{
    input.map(move |frames| transform_data_frame(&ctx, &configs, frames))
}
