//! Reading frames from files.
//!
//! Most callers use [`read_frames_from_path`] / [`read_frame_from_path`], which pick the
//! format from the extension (or [`IngestionOptions::format`]) and report the outcome to an
//! optional [`IngestionObserver`].
//!
//! - [`csv`]: header row plus inferred column types
//! - [`json`]: DataFrame JSON (`schema` + column-major `data.values`)

pub mod csv;
pub mod json;
pub mod observability;
pub mod unified;

pub use observability::{
    CompositeObserver, FileObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats,
    TracingObserver,
};
pub use unified::{IngestionFormat, IngestionOptions, read_frame_from_path, read_frames_from_path};
