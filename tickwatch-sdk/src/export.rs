//! Best-effort UDP export of timing snapshots.

use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};
use std::time::Duration;

use tickwatch_types::{wire, TimingSnapshot, DEFAULT_EXPORT_PORT};

/// Default export destination: a collector on loopback.
pub const DEFAULT_DESTINATION: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_EXPORT_PORT);

/// Default minimum time between two exported datagrams.
pub const DEFAULT_EXPORT_INTERVAL: Duration = Duration::from_millis(10_000);

/// Outbound socket plus the rate-limit clock gating actual transmission.
///
/// The socket is opened once for the registry's lifetime and closed with it.
/// Sends are fire-and-forget: no retry, no acknowledgment, no backpressure.
#[derive(Debug)]
pub(crate) struct UdpExporter {
    socket: UdpSocket,
    destination: SocketAddr,
    interval_micros: u64,
    last_send_micros: u64,
}

impl UdpExporter {
    /// Open the outbound socket. The first export window starts at
    /// `now_micros`, so nothing is sent until one full interval has passed.
    pub(crate) fn new(
        destination: SocketAddr,
        interval: Duration,
        now_micros: u64,
    ) -> io::Result<Self> {
        let bind_addr: SocketAddr = match destination {
            SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        };
        let socket = UdpSocket::bind(bind_addr)?;
        socket.set_nonblocking(true)?;

        Ok(Self {
            socket,
            destination,
            interval_micros: interval.as_micros() as u64,
            last_send_micros: now_micros,
        })
    }

    /// Whether a full interval has elapsed since the last send.
    pub(crate) fn due(&self, now_micros: u64) -> bool {
        now_micros.saturating_sub(self.last_send_micros) >= self.interval_micros
    }

    /// Serialize and transmit one snapshot, then restart the window.
    ///
    /// Send failures are swallowed; this is best-effort telemetry and must
    /// never surface an error to the instrumented host.
    pub(crate) fn send(&mut self, now_micros: u64, snapshot: &TimingSnapshot) {
        let packet = wire::encode(snapshot);
        if let Err(err) = self.socket.send_to(&packet, self.destination) {
            tracing::trace!(target: "tickwatch", %err, "snapshot send failed");
        }
        self.last_send_micros = now_micros;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_due_until_interval_elapses() {
        let exporter =
            UdpExporter::new(DEFAULT_DESTINATION, Duration::from_millis(10_000), 1_000_000)
                .unwrap();

        assert!(!exporter.due(1_000_000));
        assert!(!exporter.due(10_999_999));
        assert!(exporter.due(11_000_000));
        assert!(exporter.due(50_000_000));
    }

    #[test]
    fn due_tolerates_clock_going_backwards() {
        let exporter =
            UdpExporter::new(DEFAULT_DESTINATION, Duration::from_millis(10_000), 5_000_000)
                .unwrap();

        // now < last_send must not wrap around into "due".
        assert!(!exporter.due(1_000_000));
    }

    #[test]
    fn send_restarts_the_window_even_without_a_listener() {
        let mut exporter =
            UdpExporter::new(DEFAULT_DESTINATION, Duration::from_millis(10_000), 0).unwrap();
        let snapshot = TimingSnapshot::new(1);

        assert!(exporter.due(10_000_000));
        exporter.send(10_000_000, &snapshot);
        assert!(!exporter.due(10_000_001));
        assert!(exporter.due(20_000_000));
    }
}
