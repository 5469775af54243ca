//! `frame-pipeline` turns raw query results into dashboard-ready data.
//!
//! Results arrive as [`types::DataFrame`]s (named, typed, equal-length columns). They are
//! reshaped by a registry-driven chain of transformers and rendered as text by a display
//! processor that knows units, decimals, value mappings and thresholds.
//!
//! ## Transform then display
//!
//! ```rust
//! use frame_pipeline::display::DisplayProcessor;
//! use frame_pipeline::transformers::{transform_data_frame, DataTransformerConfig, TransformContext};
//! use frame_pipeline::types::{DataFrame, Field, FieldConfig, FieldType, Value};
//! use serde_json::json;
//!
//! let frame = DataFrame::new(vec![
//!     Field::new("host", FieldType::String, vec!["web".into(), "db".into(), "web".into()]),
//!     Field::new("rss", FieldType::Number, vec![Value::Int64(1 << 20), Value::Int64(3 << 30), Value::Int64(2048)])
//!         .with_config(FieldConfig { unit: Some("bytes".into()), decimals: Some(0), ..FieldConfig::default() }),
//! ]);
//!
//! let configs = vec![DataTransformerConfig::new("splitBy", json!({ "field": "host" }))];
//! let frames = transform_data_frame(&TransformContext::default(), &configs, vec![frame]);
//! assert_eq!(frames.len(), 2);
//!
//! let rss = &frames[0].fields[0];
//! let processor = DisplayProcessor::for_field(rss);
//! let texts: Vec<String> = processor.display_field(rss).into_iter().map(|d| d.text).collect();
//! assert_eq!(texts, vec!["1 MiB", "2 KiB"]);
//! ```
//!
//! ## Durations
//!
//! ```rust
//! use frame_pipeline::duration::{format_duration, parse_duration};
//!
//! let d = parse_duration("1h 30m");
//! assert_eq!(d.hours, Some(1));
//! assert_eq!(format_duration(&d), "1h 30m");
//! ```
//!
//! ## Modules
//!
//! - [`types`]: frames, fields, values and field config
//! - [`duration`]: human duration strings and calendar arithmetic
//! - [`valueformats`]: unit formatter registry
//! - [`display`]: per-field display processor
//! - [`matchers`]: field selection predicates
//! - [`processing`]: row and column primitives
//! - [`transformers`]: transformer registry and pipelines
//! - [`execution`]: parallel runner with throttling and metrics
//! - [`ingestion`]: CSV and DataFrame JSON readers
//! - [`error`]: [`FrameError`]

pub mod display;
pub mod duration;
pub mod error;
pub mod execution;
pub mod ingestion;
pub mod matchers;
pub mod processing;
pub mod transformers;
pub mod types;
pub mod valueformats;

pub use error::{FrameError, FrameResult};
