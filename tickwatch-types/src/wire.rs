//! Binary packet codec for exported snapshots.
//!
//! Packet layout, with all integers and floats in native byte order (both
//! ends are assumed colocated or byte-order-agreed out of band):
//!
//! 1. 4-byte signed integer: total packet size in bytes, including this field
//! 2. 8-byte unsigned integer: export signature
//! 3. Repeated, one per entry in name order: the name bytes, a NUL
//!    terminator, then the 4-byte float value in milliseconds
//!
//! There is no padding or alignment between entries. The encoder computes the
//! total size in one pass and writes fields in a second; the decoder is the
//! exact mirror and is what collectors use on the receiving end.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use thiserror::Error;

use crate::{Millis, TimingSnapshot};

/// Size of the fixed packet header: length field plus signature.
const HEADER_LEN: usize = 4 + 8;

/// Errors produced when decoding a packet.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    /// Packet is shorter than the fixed header.
    #[error("packet shorter than the {HEADER_LEN}-byte header")]
    TruncatedHeader,

    /// The length field disagrees with the actual packet size.
    #[error("length field declares {declared} bytes but packet has {actual}")]
    LengthMismatch { declared: i32, actual: usize },

    /// An entry name runs to the end of the packet with no NUL terminator.
    #[error("entry name is missing its NUL terminator")]
    UnterminatedName,

    /// An entry name is not valid UTF-8.
    #[error("entry name is not valid UTF-8")]
    InvalidName,

    /// An entry value is cut short by the end of the packet.
    #[error("entry value is truncated")]
    TruncatedValue,
}

/// Total packet size in bytes for a snapshot: `4 + 8 + Σ(len(name) + 1 + 4)`.
pub fn encoded_len(snapshot: &TimingSnapshot) -> usize {
    HEADER_LEN
        + snapshot
            .timings
            .keys()
            .map(|name| name.len() + 1 + 4)
            .sum::<usize>()
}

/// Serialize a snapshot into one packet.
///
/// Region names must not contain interior NUL bytes; a NUL would cut the
/// name short on the receiving end.
pub fn encode(snapshot: &TimingSnapshot) -> Vec<u8> {
    let len = encoded_len(snapshot);
    let mut packet = Vec::with_capacity(len);

    packet.extend_from_slice(&(len as i32).to_ne_bytes());
    packet.extend_from_slice(&snapshot.signature.to_ne_bytes());

    for (name, value) in &snapshot.timings {
        debug_assert!(
            !name.as_bytes().contains(&0),
            "region names must not contain NUL bytes"
        );
        packet.extend_from_slice(name.as_bytes());
        packet.push(0);
        packet.extend_from_slice(&value.as_f32().to_ne_bytes());
    }

    packet
}

/// Deserialize a packet produced by [`encode`].
pub fn decode(packet: &[u8]) -> Result<TimingSnapshot, WireError> {
    if packet.len() < HEADER_LEN {
        return Err(WireError::TruncatedHeader);
    }

    let declared = i32::from_ne_bytes([packet[0], packet[1], packet[2], packet[3]]);
    if declared < 0 || declared as usize != packet.len() {
        return Err(WireError::LengthMismatch {
            declared,
            actual: packet.len(),
        });
    }

    let signature = u64::from_ne_bytes([
        packet[4], packet[5], packet[6], packet[7], packet[8], packet[9], packet[10], packet[11],
    ]);

    let mut timings = BTreeMap::new();
    let mut rest = &packet[HEADER_LEN..];
    while !rest.is_empty() {
        let nul = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(WireError::UnterminatedName)?;
        let name = core::str::from_utf8(&rest[..nul]).map_err(|_| WireError::InvalidName)?;
        rest = &rest[nul + 1..];

        if rest.len() < 4 {
            return Err(WireError::TruncatedValue);
        }
        let value = f32::from_ne_bytes([rest[0], rest[1], rest[2], rest[3]]);
        rest = &rest[4..];

        timings.insert(String::from(name), Millis(value));
    }

    Ok(TimingSnapshot { signature, timings })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TimingSnapshot {
        TimingSnapshot::builder()
            .signature(0xDEAD_BEEF_CAFE_F00D)
            .timing("a", 1.5)
            .timing("bb", 2.25)
            .build()
    }

    #[test]
    fn encoded_len_matches_formula() {
        // 4 + 8 + (1 + 1 + 4) + (2 + 1 + 4)
        assert_eq!(encoded_len(&sample()), 29);
        assert_eq!(encode(&sample()).len(), 29);
    }

    #[test]
    fn empty_snapshot_is_header_only() {
        let snapshot = TimingSnapshot::new(3);
        let packet = encode(&snapshot);
        assert_eq!(packet.len(), 12);
        assert_eq!(decode(&packet).unwrap(), snapshot);
    }

    #[test]
    fn roundtrip_recovers_entries_exactly() {
        let snapshot = sample();
        let decoded = decode(&encode(&snapshot)).unwrap();

        assert_eq!(decoded.signature, snapshot.signature);
        assert_eq!(decoded.get("a"), Some(Millis(1.5)));
        assert_eq!(decoded.get("bb"), Some(Millis(2.25)));
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn length_field_includes_itself() {
        let packet = encode(&sample());
        let declared = i32::from_ne_bytes([packet[0], packet[1], packet[2], packet[3]]);
        assert_eq!(declared as usize, packet.len());
    }

    #[test]
    fn entries_are_written_in_name_order() {
        let snapshot = TimingSnapshot::builder()
            .timing("zz", 1.0)
            .timing("aa", 2.0)
            .build();
        let packet = encode(&snapshot);

        // First name after the header must be "aa".
        assert_eq!(&packet[12..14], b"aa");
        assert_eq!(packet[14], 0);
    }

    #[test]
    fn decode_rejects_short_packet() {
        assert_eq!(decode(&[0u8; 5]), Err(WireError::TruncatedHeader));
    }

    #[test]
    fn decode_rejects_length_mismatch() {
        let mut packet = encode(&sample());
        packet.pop();
        assert!(matches!(
            decode(&packet),
            Err(WireError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn decode_rejects_unterminated_name() {
        // 1.1f32 encodes with no zero bytes, so once the terminator is
        // clobbered there is no NUL anywhere in the entry section.
        let snapshot = TimingSnapshot::builder().timing("abc", 1.1).build();
        let mut packet = encode(&snapshot);
        packet[15] = b'd';
        assert_eq!(decode(&packet), Err(WireError::UnterminatedName));
    }

    #[test]
    fn decode_rejects_truncated_value() {
        let snapshot = TimingSnapshot::builder().timing("abc", 1.0).build();
        let mut packet = encode(&snapshot);
        packet.truncate(packet.len() - 2);
        let new_len = packet.len() as i32;
        packet[0..4].copy_from_slice(&new_len.to_ne_bytes());
        assert_eq!(decode(&packet), Err(WireError::TruncatedValue));
    }

    #[test]
    fn decode_rejects_invalid_utf8_name() {
        let snapshot = TimingSnapshot::builder().timing("ab", 1.0).build();
        let mut packet = encode(&snapshot);
        packet[12] = 0xFF;
        packet[13] = 0xFE;
        assert_eq!(decode(&packet), Err(WireError::InvalidName));
    }

    #[test]
    fn signature_survives_roundtrip() {
        let snapshot = TimingSnapshot::new(u64::MAX);
        assert_eq!(decode(&encode(&snapshot)).unwrap().signature, u64::MAX);
    }
}
