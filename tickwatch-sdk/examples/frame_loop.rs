//! A simulated frame loop instrumented with tickwatch.
//!
//! Run a collector first if you want to see the datagrams, e.g.:
//! `socat -u udp-recv:45454 - | xxd`

use std::time::Duration;

use tickwatch_sdk::{time_block, Stopwatch};

fn main() -> std::io::Result<()> {
    let mut stopwatch = Stopwatch::builder()
        .interval(Duration::from_secs(1))
        .build()?;

    for frame in 0..120 {
        stopwatch.tick("frame");

        time_block!(stopwatch, "simulate", {
            std::thread::sleep(Duration::from_millis(2));
        });
        time_block!(stopwatch, "render", {
            std::thread::sleep(Duration::from_millis(6));
        });

        if frame % 30 == 0 {
            stopwatch.pulse("checkpoint");
        }

        stopwatch.tock("frame");
        stopwatch.maybe_export();
    }

    // Inspect the final values directly, without the network.
    print!("{}", stopwatch.snapshot());
    Ok(())
}
