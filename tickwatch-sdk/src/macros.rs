//! Call-site convenience macros.
//!
//! The macros expand to plain method calls, so a build with the `timing`
//! feature disabled compiles them down to no-ops along with everything else.

/// Time an arbitrary block and record its elapsed wall-clock duration under
/// `name` in one call. Yields the block's value.
///
/// # Example
///
/// ```rust
/// use tickwatch_sdk::{time_block, Stopwatch};
///
/// let mut stopwatch = Stopwatch::new();
/// let frames = time_block!(stopwatch, "simulate", {
///     // ... simulation step ...
///     60
/// });
/// assert_eq!(frames, 60);
/// ```
#[macro_export]
macro_rules! time_block {
    ($stopwatch:expr, $name:expr, $body:expr) => {
        $stopwatch.time($name, || $body)
    };
}

/// Start the named interval at the current wall-clock time.
#[macro_export]
macro_rules! tick {
    ($stopwatch:expr, $name:expr) => {
        $stopwatch.tick($name)
    };
}

/// Stop the named interval at the current wall-clock time and record the
/// elapsed duration.
#[macro_export]
macro_rules! tock {
    ($stopwatch:expr, $name:expr) => {
        $stopwatch.tock($name)
    };
}
