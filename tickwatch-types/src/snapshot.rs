//! Snapshot - a point-in-time view of named timings.

use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;

use crate::Millis;

/// A point-in-time snapshot of named region timings.
///
/// This is the top-level type a timing registry exports. Only the latest
/// value per name is kept, so this is a snapshot table, not a time series.
/// Entries iterate in name order, which fixes the serialization order of
/// the wire packet.
///
/// # Example
///
/// ```rust
/// use tickwatch_types::TimingSnapshot;
///
/// let snapshot = TimingSnapshot::builder()
///     .signature(7)
///     .timing("render", 2.5)
///     .timing("frame_ok", 1.0)
///     .build();
///
/// assert_eq!(snapshot.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingSnapshot {
    /// Process-lifetime constant identifying the producing instance, so a
    /// collector can tell which process a packet came from.
    pub signature: u64,

    /// Latest duration per region name, keyed and iterated in name order.
    pub timings: BTreeMap<String, Millis>,
}

impl TimingSnapshot {
    /// Create an empty snapshot carrying the given signature.
    pub fn new(signature: u64) -> Self {
        Self {
            signature,
            timings: BTreeMap::new(),
        }
    }

    /// Create a builder for constructing snapshots.
    pub fn builder() -> TimingSnapshotBuilder {
        TimingSnapshotBuilder::new()
    }

    /// Check if the snapshot has no entries.
    pub fn is_empty(&self) -> bool {
        self.timings.is_empty()
    }

    /// Number of entries in the snapshot.
    pub fn len(&self) -> usize {
        self.timings.len()
    }

    /// Get the value for a specific region name.
    pub fn get(&self, name: &str) -> Option<Millis> {
        self.timings.get(name).copied()
    }

    /// Iterate over all entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Millis)> {
        self.timings.iter()
    }
}

/// Renders the textual dump: one `name: value ms` line per entry, in name
/// order, for callers that want to inspect timings directly instead of
/// relying on network export.
impl fmt::Display for TimingSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.timings {
            writeln!(f, "{}: {}ms", name, value)?;
        }
        Ok(())
    }
}

/// Builder for constructing `TimingSnapshot` instances.
#[derive(Debug, Default)]
pub struct TimingSnapshotBuilder {
    signature: u64,
    timings: BTreeMap<String, Millis>,
}

impl TimingSnapshotBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the export signature.
    pub fn signature(mut self, signature: u64) -> Self {
        self.signature = signature;
        self
    }

    /// Add a timing entry, replacing any previous value for the name.
    pub fn timing(mut self, name: impl Into<String>, value: impl Into<Millis>) -> Self {
        self.timings.insert(name.into(), value.into());
        self
    }

    /// Build the snapshot.
    pub fn build(self) -> TimingSnapshot {
        TimingSnapshot {
            signature: self.signature,
            timings: self.timings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_entries() {
        let snapshot = TimingSnapshot::builder()
            .signature(99)
            .timing("render", 2.5)
            .timing("upload", 0.75)
            .build();

        assert_eq!(snapshot.signature, 99);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("render"), Some(Millis(2.5)));
        assert_eq!(snapshot.get("upload"), Some(Millis(0.75)));
    }

    #[test]
    fn entries_iterate_in_name_order() {
        let snapshot = TimingSnapshot::builder()
            .timing("charlie", 3.0)
            .timing("alpha", 1.0)
            .timing("bravo", 2.0)
            .build();

        let names: alloc::vec::Vec<&str> =
            snapshot.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["alpha", "bravo", "charlie"]);
    }

    #[test]
    fn later_entry_replaces_earlier_one() {
        let snapshot = TimingSnapshot::builder()
            .timing("render", 2.5)
            .timing("render", 4.0)
            .build();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("render"), Some(Millis(4.0)));
    }

    #[test]
    fn display_dumps_one_line_per_entry() {
        let snapshot = TimingSnapshot::builder()
            .timing("render", 2.5)
            .timing("frame_ok", 1.0)
            .build();

        let dump = alloc::format!("{}", snapshot);
        assert_eq!(dump, "frame_ok: 1ms\nrender: 2.5ms\n");
    }

    #[test]
    fn empty_snapshot() {
        let snapshot = TimingSnapshot::new(5);
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.len(), 0);
        assert_eq!(snapshot.get("anything"), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrip() {
        let snapshot = TimingSnapshot::builder()
            .signature(7)
            .timing("render", 2.5)
            .build();

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: TimingSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(snapshot, parsed);
    }
}
