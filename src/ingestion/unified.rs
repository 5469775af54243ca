//! Path-based entrypoint with format detection and observer reporting.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{FrameError, FrameResult};
use crate::types::DataFrame;

use super::csv::{CsvOptions, read_csv_from_path};
use super::json::read_json_from_path;
use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionFormat {
    Csv,
    /// DataFrame JSON, one frame or an array.
    Json,
}

impl IngestionFormat {
    /// Format for a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Options for [`read_frames_from_path`]. Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// `None` detects the format from the extension.
    pub format: Option<IngestionFormat>,
    pub csv: CsvOptions,
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Failures at or above this severity also call `on_alert`.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("csv", &self.csv)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            csv: CsvOptions::default(),
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Read every frame stored at `path`.
///
/// With an observer configured, reports `on_success` with frame and row counts, or
/// `on_failure` plus `on_alert` once the failure severity reaches `alert_at_or_above`.
/// I/O failures are [`IngestionSeverity::Critical`]; bad content is
/// [`IngestionSeverity::Error`].
///
/// ```no_run
/// use std::sync::Arc;
///
/// use frame_pipeline::ingestion::{read_frames_from_path, IngestionOptions, TracingObserver};
///
/// # fn main() -> Result<(), frame_pipeline::FrameError> {
/// let opts = IngestionOptions {
///     observer: Some(Arc::new(TracingObserver)),
///     ..Default::default()
/// };
/// let frames = read_frames_from_path("metrics.json", &opts)?;
/// println!("frames={}", frames.len());
/// # Ok(())
/// # }
/// ```
pub fn read_frames_from_path(path: impl AsRef<Path>, options: &IngestionOptions) -> FrameResult<Vec<DataFrame>> {
    let path = path.as_ref();
    let format = match options.format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };

    let result = match format {
        IngestionFormat::Csv => read_csv_from_path(path, &options.csv).map(|f| vec![f]),
        IngestionFormat::Json => read_json_from_path(path),
    };

    if let Some(observer) = options.observer.as_deref() {
        let ctx = IngestionContext {
            path: path.to_path_buf(),
            format,
        };
        report(observer, &ctx, options.alert_at_or_above, &result);
    }
    result
}

fn report(
    observer: &dyn IngestionObserver,
    ctx: &IngestionContext,
    alert_at: IngestionSeverity,
    result: &FrameResult<Vec<DataFrame>>,
) {
    let error = match result {
        Ok(frames) => {
            let stats = IngestionStats {
                frames: frames.len(),
                rows: frames.iter().map(|f| f.length).sum(),
            };
            return observer.on_success(ctx, stats);
        }
        Err(e) => e,
    };
    let severity = severity_for_error(error);
    observer.on_failure(ctx, severity, error);
    if severity >= alert_at {
        observer.on_alert(ctx, severity, error);
    }
}

/// Read the first frame stored at `path`. A file holding no frames is a schema mismatch.
pub fn read_frame_from_path(path: impl AsRef<Path>, options: &IngestionOptions) -> FrameResult<DataFrame> {
    let path = path.as_ref();
    read_frames_from_path(path, options)?
        .into_iter()
        .next()
        .ok_or_else(|| FrameError::SchemaMismatch {
            message: format!("no frames in {}", path.display()),
        })
}

fn severity_for_error(e: &FrameError) -> IngestionSeverity {
    match e {
        FrameError::Io(_) => IngestionSeverity::Critical,
        FrameError::Csv(err) if matches!(err.kind(), ::csv::ErrorKind::Io(_)) => IngestionSeverity::Critical,
        FrameError::Json(err) if err.is_io() => IngestionSeverity::Critical,
        _ => IngestionSeverity::Error,
    }
}

fn infer_format_from_path(path: &Path) -> FrameResult<IngestionFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| FrameError::SchemaMismatch {
            message: format!("cannot infer format: path has no extension ({})", path.display()),
        })?;

    IngestionFormat::from_extension(ext).ok_or_else(|| FrameError::SchemaMismatch {
        message: format!("cannot infer format from extension '{ext}' for path ({})", path.display()),
    })
}
