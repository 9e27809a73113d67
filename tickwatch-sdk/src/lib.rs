//! # tickwatch-sdk
//!
//! A lightweight in-process stopwatch registry. It measures elapsed
//! wall-clock durations for named code regions and periodically exports the
//! latest measurements, rate limited, as one binary datagram to a collector
//! listening on loopback UDP.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use tickwatch_sdk::{time_block, Stopwatch};
//!
//! fn main() -> std::io::Result<()> {
//!     let mut stopwatch = Stopwatch::builder().build()?;
//!
//!     // Time a block inline with the code it wraps.
//!     time_block!(stopwatch, "render", {
//!         // ... render ...
//!     });
//!
//!     // Or bracket an interval by hand.
//!     stopwatch.tick("upload");
//!     // ... upload ...
//!     stopwatch.tock("upload");
//!
//!     // Mark that a code path executed at all.
//!     stopwatch.pulse("frame_ok");
//!
//!     // Drive export from the host's own loop; sends are rate limited
//!     // and fire-and-forget.
//!     stopwatch.maybe_export();
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Inline measurement**: record durations, bracket tick/tock intervals,
//!   or pulse heartbeat markers
//! - **Snapshot table**: only the latest value per name is kept, in name
//!   order
//! - **Best-effort export**: one UDP datagram per interval, loss tolerated,
//!   no background thread
//! - **Zero-overhead opt-out**: build with `default-features = false` and
//!   every operation compiles to a no-op
//!
//! The registry performs no internal locking; a host that records from more
//! than one thread wraps it in [`SharedStopwatch`], which supplies the
//! external lock.

mod clock;
#[cfg_attr(not(feature = "timing"), allow(dead_code))]
mod export;
mod macros;
mod shared;
mod stopwatch;

pub use clock::wall_clock_micros;
pub use export::{DEFAULT_DESTINATION, DEFAULT_EXPORT_INTERVAL};
pub use shared::SharedStopwatch;
pub use stopwatch::{Stopwatch, StopwatchBuilder};

// Re-export the schema types for convenience.
pub use tickwatch_types::{wire, Millis, TimingSnapshot};
