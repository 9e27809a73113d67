//! Wall-clock sampling.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in microseconds since the Unix epoch.
///
/// This is the timestamp source for tick/tock intervals and export gating.
/// The system clock is not monotonic: an adjustment backward during an
/// interval yields a non-positive duration, which the registry's
/// positive-value filter silently discards.
pub fn wall_clock_micros() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_past_2020() {
        // 2020-01-01T00:00:00Z in microseconds.
        assert!(wall_clock_micros() > 1_577_836_800_000_000);
    }
}
