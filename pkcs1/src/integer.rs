//! Sign handling for DER INTEGER content.
//!
//! Key components are unsigned magnitudes, while a DER INTEGER is two's
//! complement. A magnitude whose first byte has the high bit set needs a
//! `0x00` prefix to stay positive on the wire, and that prefix is dropped
//! again on the way back.
//!
//! The pair is not a perfect inverse: a magnitude that already starts with
//! `0x00` loses that byte after a round trip.

/// Prepends `0x00` when the first byte has its high bit set.
pub fn normalize(magnitude: &[u8]) -> Vec<u8> {
    match magnitude.first() {
        Some(first) if first & 0x80 != 0 => {
            let mut content = Vec::with_capacity(magnitude.len() + 1);
            content.push(0x00);
            content.extend_from_slice(magnitude);
            content
        }
        _ => magnitude.to_vec(),
    }
}

/// Drops a single leading `0x00`.
pub fn denormalize(content: &[u8]) -> Vec<u8> {
    match content.split_first() {
        Some((&0x00, rest)) => rest.to_vec(),
        _ => content.to_vec(),
    }
}
