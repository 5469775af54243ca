//! Row and column primitives used by the transformers.
//!
//! All functions take frames by reference and return new frames; inputs are never mutated.
//!
//! - [`filter()`] / [`filter_by_value()`]: row filtering by predicate
//! - [`head()`]: first N rows
//! - [`sort_by()`]: stable row ordering by one column
//! - [`reduce()`] / [`reduce_field()`]: column reductions (count/sum/min/max/mean/…)
//!
//! ## Example: filter → sort → reduce
//!
//! ```rust
//! use frame_pipeline::processing::{filter_by_value, reduce, sort_by, ReducerId};
//! use frame_pipeline::types::{DataFrame, Field, FieldType, Value};
//!
//! let frame = DataFrame::new(vec![
//!     Field::new("host", FieldType::String, vec!["a".into(), "b".into(), "c".into()]),
//!     Field::new("up", FieldType::Boolean, vec![true.into(), false.into(), true.into()]),
//!     Field::new("load", FieldType::Number, vec![0.5.into(), 2.0.into(), Value::Null]),
//! ]);
//!
//! let up = filter_by_value(&frame, "up", |v| matches!(v, Value::Bool(true))).unwrap();
//! let sorted = sort_by(&up, "host", true).unwrap();
//! assert_eq!(sorted.fields[0].values[0], Value::from("c"));
//!
//! // Nulls are ignored.
//! assert_eq!(reduce(&up, "load", ReducerId::Sum), Some(Value::Float64(0.5)));
//! ```

pub mod filter;
pub mod reduce;
pub mod sort;

pub use filter::{filter, filter_by_value, head};
pub use reduce::{ReducerId, reduce, reduce_field, reduce_values};
pub use sort::{compare_values, sort_by};
