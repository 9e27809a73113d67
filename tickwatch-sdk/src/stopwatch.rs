//! The stopwatch registry: measurement bookkeeping and export gating.

use std::collections::BTreeMap;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use tickwatch_types::{Millis, TimingSnapshot};

use crate::clock::wall_clock_micros;
use crate::export::{UdpExporter, DEFAULT_DESTINATION, DEFAULT_EXPORT_INTERVAL};

/// An in-process registry of named region timings.
///
/// The registry keeps two independent tables: the latest duration per name
/// and the in-flight start timestamp per name. A name may appear in one,
/// both, or neither. Measurement operations run inline on whichever thread
/// calls them, mutate only these tables, and never fail; export is
/// caller-driven and rate limited.
///
/// All mutators take `&mut self` - the registry performs no internal
/// locking, so exclusive access is enforced by the borrow checker. Hosts
/// that record from several threads wrap the registry in
/// [`SharedStopwatch`](crate::SharedStopwatch).
///
/// # Example
///
/// ```rust
/// use tickwatch_sdk::Stopwatch;
///
/// let mut stopwatch = Stopwatch::new();
/// stopwatch.record_micros("render", 2500);
/// stopwatch.pulse("frame_ok");
///
/// let snapshot = stopwatch.snapshot();
/// assert_eq!(snapshot.get("render").unwrap().as_f32(), 2.5);
/// ```
#[derive(Debug)]
#[cfg_attr(not(feature = "timing"), allow(dead_code))]
pub struct Stopwatch {
    timings: BTreeMap<String, Millis>,
    pending: BTreeMap<String, u64>,
    signature: u64,
    exporter: Option<UdpExporter>,
}

impl Stopwatch {
    /// Create a measurement-only registry with no export destination.
    ///
    /// Never fails: no socket is opened. Use [`Stopwatch::builder`] for a
    /// registry that exports.
    pub fn new() -> Self {
        Self {
            timings: BTreeMap::new(),
            pending: BTreeMap::new(),
            signature: wall_clock_micros(),
            exporter: None,
        }
    }

    /// Create a builder for configuring the registry.
    pub fn builder() -> StopwatchBuilder {
        StopwatchBuilder::new()
    }

    /// Store the latest duration for `name`, given in microseconds.
    ///
    /// Non-positive durations are discarded silently, preserving any prior
    /// value; this tolerates clock-resolution artifacts without producing
    /// spurious zero or negative entries.
    pub fn record_micros(&mut self, name: &str, duration_micros: i64) {
        #[cfg(feature = "timing")]
        {
            let value = Millis::from_micros(duration_micros);
            if value.is_positive() {
                self.timings.insert(name.to_string(), value);
            }
        }
        #[cfg(not(feature = "timing"))]
        {
            let _ = (name, duration_micros);
        }
    }

    /// Store the latest duration for `name`.
    ///
    /// Same positive-value-only rule as [`Stopwatch::record_micros`]: a zero
    /// duration is a silent no-op.
    pub fn record(&mut self, name: &str, duration: Duration) {
        self.record_micros(name, duration.as_micros() as i64);
    }

    /// Start the named interval at the given wall-clock timestamp,
    /// overwriting any prior unmatched start for that name.
    pub fn tick_at(&mut self, name: &str, start_micros: u64) {
        #[cfg(feature = "timing")]
        {
            self.pending.insert(name.to_string(), start_micros);
        }
        #[cfg(not(feature = "timing"))]
        {
            let _ = (name, start_micros);
        }
    }

    /// Start the named interval at the current wall-clock time.
    pub fn tick(&mut self, name: &str) {
        #[cfg(feature = "timing")]
        {
            self.tick_at(name, wall_clock_micros());
        }
        #[cfg(not(feature = "timing"))]
        {
            let _ = name;
        }
    }

    /// Stop the named interval at the given wall-clock timestamp and store
    /// the elapsed duration, subject to the positive-value-only rule.
    ///
    /// The start entry is consumed, so a stale start cannot pair with a
    /// later unrelated tock of the same name. A tock with no matching tick
    /// is a defined no-op: the prior stored value, if any, survives.
    pub fn tock_at(&mut self, name: &str, end_micros: u64) {
        #[cfg(feature = "timing")]
        {
            let Some(start_micros) = self.pending.remove(name) else {
                tracing::trace!(target: "tickwatch", name, "tock without matching tick");
                return;
            };
            self.record_micros(name, end_micros as i64 - start_micros as i64);
        }
        #[cfg(not(feature = "timing"))]
        {
            let _ = (name, end_micros);
        }
    }

    /// Stop the named interval at the current wall-clock time.
    pub fn tock(&mut self, name: &str) {
        #[cfg(feature = "timing")]
        {
            self.tock_at(name, wall_clock_micros());
        }
        #[cfg(not(feature = "timing"))]
        {
            let _ = name;
        }
    }

    /// Heartbeat marker: store the sentinel value `1` for `name`,
    /// overwriting any measured duration. Signals "this code path executed"
    /// rather than "this code path took N ms".
    pub fn pulse(&mut self, name: &str) {
        #[cfg(feature = "timing")]
        {
            self.timings.insert(name.to_string(), Millis::PULSE);
        }
        #[cfg(not(feature = "timing"))]
        {
            let _ = name;
        }
    }

    /// Time a closure and record its elapsed wall-clock duration under
    /// `name`. Returns the closure's value. Prefer the
    /// [`time_block!`](crate::time_block) macro at call sites.
    pub fn time<R>(&mut self, name: &str, f: impl FnOnce() -> R) -> R {
        #[cfg(feature = "timing")]
        {
            let start_micros = wall_clock_micros();
            let result = f();
            let end_micros = wall_clock_micros();
            self.record_micros(name, end_micros as i64 - start_micros as i64);
            result
        }
        #[cfg(not(feature = "timing"))]
        {
            let _ = name;
            f()
        }
    }

    /// Read-only view of the current timings, in name order.
    pub fn timings(&self) -> &BTreeMap<String, Millis> {
        &self.timings
    }

    /// Owned copy of the current timings together with the export signature.
    pub fn snapshot(&self) -> TimingSnapshot {
        TimingSnapshot {
            signature: self.signature,
            timings: self.timings.clone(),
        }
    }

    /// The export signature included in every packet. Derived from the
    /// registry's construction time unless overridden.
    pub fn signature(&self) -> u64 {
        self.signature
    }

    /// Override the export signature, e.g. to tag packets from a specific
    /// subsystem.
    pub fn set_signature(&mut self, signature: u64) {
        self.signature = signature;
    }

    /// Export the current snapshot if the export interval has elapsed since
    /// the last send, judged against the given wall-clock timestamp.
    ///
    /// Returns whether a datagram went out. Within the rate-limit window, or
    /// without a configured destination, this is a silent no-op. Send
    /// failures are swallowed.
    pub fn maybe_export_at(&mut self, now_micros: u64) -> bool {
        #[cfg(feature = "timing")]
        {
            let due = self
                .exporter
                .as_ref()
                .is_some_and(|exporter| exporter.due(now_micros));
            if !due {
                return false;
            }

            let snapshot = self.snapshot();
            if let Some(exporter) = self.exporter.as_mut() {
                exporter.send(now_micros, &snapshot);
            }
            true
        }
        #[cfg(not(feature = "timing"))]
        {
            let _ = now_micros;
            false
        }
    }

    /// Export the current snapshot if the export interval has elapsed,
    /// judged against the current wall-clock time.
    pub fn maybe_export(&mut self) -> bool {
        #[cfg(feature = "timing")]
        {
            self.maybe_export_at(wall_clock_micros())
        }
        #[cfg(not(feature = "timing"))]
        {
            false
        }
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for configuring a [`Stopwatch`].
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use tickwatch_sdk::Stopwatch;
///
/// let stopwatch = Stopwatch::builder()
///     .destination("127.0.0.1:45454".parse().unwrap())
///     .interval(Duration::from_secs(10))
///     .build()
///     .expect("failed to open export socket");
/// ```
#[derive(Debug, Clone)]
pub struct StopwatchBuilder {
    destination: Option<SocketAddr>,
    interval: Duration,
    signature: Option<u64>,
}

impl StopwatchBuilder {
    /// Create a builder targeting the default loopback destination with the
    /// default export interval.
    pub fn new() -> Self {
        Self {
            destination: Some(DEFAULT_DESTINATION),
            interval: DEFAULT_EXPORT_INTERVAL,
            signature: None,
        }
    }

    /// Set the export destination.
    pub fn destination(mut self, destination: SocketAddr) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Disable export entirely; the registry only keeps the tables.
    pub fn no_export(mut self) -> Self {
        self.destination = None;
        self
    }

    /// Set the minimum time between two exported datagrams.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Override the export signature. Defaults to the registry's
    /// construction time in microseconds.
    pub fn signature(mut self, signature: u64) -> Self {
        self.signature = Some(signature);
        self
    }

    /// Build the registry, opening the outbound socket.
    ///
    /// Fails fast: if the socket cannot be opened the error surfaces here,
    /// and never from a measurement operation. The first export window
    /// starts now, so nothing is sent until one full interval has passed.
    pub fn build(self) -> io::Result<Stopwatch> {
        let now_micros = wall_clock_micros();

        #[cfg(feature = "timing")]
        let exporter = match self.destination {
            Some(destination) => Some(UdpExporter::new(destination, self.interval, now_micros)?),
            None => None,
        };
        #[cfg(not(feature = "timing"))]
        let exporter = {
            let _ = (self.destination, self.interval);
            None
        };

        Ok(Stopwatch {
            timings: BTreeMap::new(),
            pending: BTreeMap::new(),
            signature: self.signature.unwrap_or(now_micros),
            exporter,
        })
    }
}

impl Default for StopwatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}
