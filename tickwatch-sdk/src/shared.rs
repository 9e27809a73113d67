//! A cloneable, lock-guarded handle around a stopwatch registry.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tickwatch_types::TimingSnapshot;

use crate::Stopwatch;

/// Shared handle for hosts that record timings from more than one thread.
///
/// The registry itself performs no internal locking; this wrapper is the
/// external lock such hosts are expected to supply. Clone it freely - all
/// clones point at the same registry.
///
/// # Example
///
/// ```rust
/// use tickwatch_sdk::{SharedStopwatch, Stopwatch};
///
/// let shared = SharedStopwatch::new(Stopwatch::new());
///
/// let worker = shared.clone();
/// std::thread::spawn(move || {
///     worker.record_micros("decode", 1200);
/// })
/// .join()
/// .unwrap();
///
/// assert!(shared.snapshot().get("decode").is_some());
/// ```
#[derive(Clone)]
pub struct SharedStopwatch {
    inner: Arc<Mutex<Stopwatch>>,
}

impl SharedStopwatch {
    /// Wrap a registry for shared use.
    pub fn new(stopwatch: Stopwatch) -> Self {
        Self {
            inner: Arc::new(Mutex::new(stopwatch)),
        }
    }

    /// See [`Stopwatch::record`].
    pub fn record(&self, name: &str, duration: Duration) {
        self.inner.lock().record(name, duration);
    }

    /// See [`Stopwatch::record_micros`].
    pub fn record_micros(&self, name: &str, duration_micros: i64) {
        self.inner.lock().record_micros(name, duration_micros);
    }

    /// See [`Stopwatch::tick`].
    pub fn tick(&self, name: &str) {
        self.inner.lock().tick(name);
    }

    /// See [`Stopwatch::tock`].
    pub fn tock(&self, name: &str) {
        self.inner.lock().tock(name);
    }

    /// See [`Stopwatch::pulse`].
    pub fn pulse(&self, name: &str) {
        self.inner.lock().pulse(name);
    }

    /// Time a closure under the lock's protection and record it.
    ///
    /// The lock is held for the closure's whole duration, which also
    /// serializes the timed sections themselves. For long sections prefer
    /// sampling timestamps outside the lock and calling
    /// [`SharedStopwatch::record_micros`].
    pub fn time<R>(&self, name: &str, f: impl FnOnce() -> R) -> R {
        self.inner.lock().time(name, f)
    }

    /// See [`Stopwatch::snapshot`].
    pub fn snapshot(&self) -> TimingSnapshot {
        self.inner.lock().snapshot()
    }

    /// See [`Stopwatch::maybe_export`].
    pub fn maybe_export(&self) -> bool {
        self.inner.lock().maybe_export()
    }

    /// Run `f` with exclusive access to the underlying registry, for
    /// operations the forwarding methods don't cover.
    pub fn with<R>(&self, f: impl FnOnce(&mut Stopwatch) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl fmt::Debug for SharedStopwatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedStopwatch").finish_non_exhaustive()
    }
}
