//! Duration representation for serialization.
//!
//! Fractional milliseconds are the canonical unit for exported timings. The
//! wire format stores each value as a 4-byte float, so the value type
//! deliberately carries `f32` precision.

use core::fmt;
use core::time::Duration;

/// A duration in fractional milliseconds.
///
/// This is the value type of a snapshot entry. Besides measured durations it
/// can hold the heartbeat sentinel [`Millis::PULSE`], which marks "this code
/// path executed" rather than "this code path took N ms".
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Millis(pub f32);

impl Millis {
    /// The sentinel stored by a pulse (heartbeat) operation.
    pub const PULSE: Millis = Millis(1.0);

    /// Create from a raw millisecond value.
    pub const fn from_f32(ms: f32) -> Self {
        Self(ms)
    }

    /// Convert a signed microsecond count to milliseconds.
    ///
    /// The count is signed because interval arithmetic against a
    /// non-monotonic wall clock can yield negative durations; registries
    /// filter those out with [`Millis::is_positive`].
    pub fn from_micros(micros: i64) -> Self {
        Self(micros as f32 / 1000.0)
    }

    /// Get the raw millisecond value.
    pub const fn as_f32(&self) -> f32 {
        self.0
    }

    /// Whether the value is strictly positive.
    ///
    /// Registries store only positive values, which tolerates
    /// clock-resolution artifacts without producing spurious zero or
    /// negative entries.
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }
}

impl From<Duration> for Millis {
    fn from(d: Duration) -> Self {
        Self((d.as_secs_f64() * 1000.0) as f32)
    }
}

impl From<f32> for Millis {
    fn from(ms: f32) -> Self {
        Self(ms)
    }
}

impl From<f64> for Millis {
    fn from(ms: f64) -> Self {
        Self(ms as f32)
    }
}

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_micros_divides_by_thousand() {
        assert_eq!(Millis::from_micros(2500).as_f32(), 2.5);
        assert_eq!(Millis::from_micros(1_000_000).as_f32(), 1000.0);
    }

    #[test]
    fn from_micros_handles_negative_counts() {
        let m = Millis::from_micros(-500);
        assert_eq!(m.as_f32(), -0.5);
        assert!(!m.is_positive());
    }

    #[test]
    fn zero_is_not_positive() {
        assert!(!Millis::from_micros(0).is_positive());
        assert!(Millis::from_micros(1).is_positive());
    }

    #[test]
    fn from_duration() {
        let m = Millis::from(Duration::from_micros(1500));
        assert_eq!(m.as_f32(), 1.5);
    }

    #[test]
    fn from_floats() {
        assert_eq!(Millis::from(2.5f32).as_f32(), 2.5);
        assert_eq!(Millis::from(2.5f64).as_f32(), 2.5);
    }

    #[test]
    fn pulse_sentinel_is_one() {
        assert_eq!(Millis::PULSE.as_f32(), 1.0);
        assert!(Millis::PULSE.is_positive());
    }

    #[test]
    fn display_format() {
        assert_eq!(alloc::format!("{}", Millis(2.5)), "2.5");
    }
}
