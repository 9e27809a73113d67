//! # tickwatch-types
//!
//! Wire schema for tickwatch timing snapshots. This crate defines the value
//! and container types a timing registry produces and the binary packet
//! format it exports, so that producers (instrumented processes) and
//! collectors (listeners on the receiving end of the datagrams) share one
//! schema crate.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: core types work without any
//!   serialization framework
//! - **Optional serde**: enable the `serde` feature for JSON etc.
//! - **Exact packet layout**: the [`wire`] codec computes sizes in one pass
//!   and writes fields in a second, with no padding between entries
//!
//! ## Features
//!
//! - `std` (default): standard library support
//! - `serde`: serde serialization for snapshot types
//!
//! ## Example
//!
//! ```rust
//! use tickwatch_types::{wire, TimingSnapshot};
//!
//! let snapshot = TimingSnapshot::builder()
//!     .signature(42)
//!     .timing("render", 2.5)
//!     .timing("upload", 0.75)
//!     .build();
//!
//! let packet = wire::encode(&snapshot);
//! let decoded = wire::decode(&packet).unwrap();
//! assert_eq!(decoded, snapshot);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod duration;
mod snapshot;
pub mod wire;

pub use duration::*;
pub use snapshot::*;
pub use wire::WireError;

/// Default UDP port collectors listen on for exported snapshots.
pub const DEFAULT_EXPORT_PORT: u16 = 45454;
