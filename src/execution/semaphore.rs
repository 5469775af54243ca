use std::sync::{Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Blocking counting semaphore bounding the chunks in flight.
pub(crate) struct Semaphore {
    permits: Mutex<usize>,
    cv: Condvar,
}

impl Semaphore {
    pub(crate) fn new(permits: usize) -> Self {
        debug_assert!(permits > 0, "permits must be > 0");
        Self {
            permits: Mutex::new(permits),
            cv: Condvar::new(),
        }
    }

    /// Take one permit, blocking until one is free. Returns the time spent waiting.
    pub(crate) fn acquire(&self) -> Duration {
        let start = Instant::now();
        let mut waited = false;
        let mut permits = self.permits.lock().unwrap_or_else(PoisonError::into_inner);
        while *permits == 0 {
            waited = true;
            permits = self.cv.wait(permits).unwrap_or_else(PoisonError::into_inner);
        }
        *permits -= 1;
        if waited { start.elapsed() } else { Duration::ZERO }
    }

    pub(crate) fn release(&self) {
        let mut permits = self.permits.lock().unwrap_or_else(PoisonError::into_inner);
        *permits += 1;
        self.cv.notify_one();
    }
}
