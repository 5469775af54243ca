use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{SecondsFormat, Utc};

use crate::error::FrameError;

use super::unified::IngestionFormat;

/// Severity used for observer callbacks and alert thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    Info,
    Warning,
    /// The read failed on bad content.
    Error,
    /// The read failed on I/O.
    Critical,
}

/// What was being read.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    pub path: PathBuf,
    pub format: IngestionFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    pub frames: usize,
    /// Rows over all frames.
    pub rows: usize,
}

/// Observer interface for ingestion outcomes.
pub trait IngestionObserver: Send + Sync {
    fn on_success(&self, _ctx: &IngestionContext, _stats: IngestionStats) {}

    fn on_failure(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _error: &FrameError) {}

    /// Called when a failure meets the alert threshold. Defaults to [`Self::on_failure`].
    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &FrameError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Fans callbacks out to several observers, in order.
#[derive(Default, Clone)]
pub struct CompositeObserver(Vec<Arc<dyn IngestionObserver>>);

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn IngestionObserver>>) -> Self {
        Self(observers)
    }

    pub fn push(&mut self, observer: Arc<dyn IngestionObserver>) {
        self.0.push(observer);
    }

    fn each(&self, f: impl Fn(&dyn IngestionObserver)) {
        self.0.iter().for_each(|o| f(o.as_ref()));
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompositeObserver({} observers)", self.0.len())
    }
}

impl IngestionObserver for CompositeObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.each(|o| o.on_success(ctx, stats));
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &FrameError) {
        self.each(|o| o.on_failure(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &FrameError) {
        self.each(|o| o.on_alert(ctx, severity, error));
    }
}

/// Reports ingestion through `tracing`: successes at debug, failures at info, alerts at warn.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl IngestionObserver for TracingObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        tracing::debug!(
            format = ?ctx.format,
            path = %ctx.path.display(),
            frames = stats.frames,
            rows = stats.rows,
            "ingested"
        );
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &FrameError) {
        tracing::info!(?severity, format = ?ctx.format, path = %ctx.path.display(), %error, "ingestion failed");
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &FrameError) {
        tracing::warn!(?severity, format = ?ctx.format, path = %ctx.path.display(), %error, "ingestion alert");
    }
}

/// Appends one line per event to a log file. Write failures are ignored.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{} {line}", Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
    }
}

impl IngestionObserver for FileObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.append_line(&format!(
            "ok format={:?} path={} frames={} rows={}",
            ctx.format,
            ctx.path.display(),
            stats.frames,
            stats.rows
        ));
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &FrameError) {
        self.append_line(&format!(
            "fail severity={severity:?} format={:?} path={} err={error}",
            ctx.format,
            ctx.path.display(),
        ));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &FrameError) {
        self.append_line(&format!(
            "ALERT severity={severity:?} format={:?} path={} err={error}",
            ctx.format,
            ctx.path.display(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_observer_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("ingest.log");
        let observer = FileObserver::new(&log);
        let ctx = IngestionContext {
            path: PathBuf::from("cpu.csv"),
            format: IngestionFormat::Csv,
        };

        observer.on_success(&ctx, IngestionStats { frames: 1, rows: 3 });
        observer.on_alert(&ctx, IngestionSeverity::Critical, &FrameError::UnknownId("x".into()));

        let text = std::fs::read_to_string(&log).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("ok format=Csv path=cpu.csv frames=1 rows=3"));
        assert!(lines[1].contains("ALERT severity=Critical"));
    }

    #[test]
    fn composite_reaches_every_observer() {
        let dir = tempfile::tempdir().unwrap();
        let (a, b) = (dir.path().join("a.log"), dir.path().join("b.log"));
        let mut composite = CompositeObserver::default();
        composite.push(Arc::new(FileObserver::new(&a)));
        composite.push(Arc::new(FileObserver::new(&b)));

        let ctx = IngestionContext {
            path: PathBuf::from("frames.json"),
            format: IngestionFormat::Json,
        };
        composite.on_failure(&ctx, IngestionSeverity::Error, &FrameError::UnknownId("x".into()));

        for log in [a, b] {
            assert!(std::fs::read_to_string(log).unwrap().contains("fail severity=Error format=Json"));
        }
    }
}
