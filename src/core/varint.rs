//! # Variable-length unsigned integers over the polyline alphabet
//!
//! Each character carries 5 payload bits plus a continuation flag (0x20),
//! least significant group first. The last character of a value has the
//! flag cleared, so every value takes at least one character.
//!
//! For example, 300 (`0b1_0010_1100`) encodes as `sJ`:
//! - `s` = 44 = 0x20 | 12: continuation set, bits 0-4
//! - `J` = 9: continuation clear, bits 5-9

use crate::core::alphabet::{decode_char, encode_char};
use crate::core::constants::{VARINT_CONTINUATION, VARINT_PAYLOAD_BITS, VARINT_PAYLOAD_MASK};
use crate::error::PolylineError;

/// Appends the encoding of `value` to `out`.
pub fn encode_into(value: u64, out: &mut String) {
    let mut value = value;
    while value > VARINT_PAYLOAD_MASK {
        let group = (value & VARINT_PAYLOAD_MASK) | VARINT_CONTINUATION;
        out.push(encode_char(group as u8) as char);
        value >>= VARINT_PAYLOAD_BITS;
    }
    out.push(encode_char(value as u8) as char);
}

/// Encodes `value` into a new string.
pub fn encode(value: u64) -> String {
    let mut out = String::with_capacity(encoded_len(value));
    encode_into(value, &mut out);
    out
}

/// Number of characters [`encode`] produces for `value`.
pub fn encoded_len(value: u64) -> usize {
    let bits = (u64::BITS - value.leading_zeros()) as usize;
    bits.div_ceil(VARINT_PAYLOAD_BITS as usize).max(1)
}

/// Decodes one value starting at `index`.
///
/// ## Returns
/// * `Ok((value, next_index))` - the value and the index of the first unread byte
/// * `Err(PolylineError)` - on a byte outside the alphabet, on input ending
///   while a continuation is expected, or on a value wider than 64 bits
pub fn decode(bytes: &[u8], index: usize) -> Result<(u64, usize), PolylineError> {
    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    for (offset, &byte) in bytes.iter().enumerate().skip(index) {
        let group = decode_char(byte).ok_or(PolylineError::InvalidCharacter { byte, offset })?
            as u64;
        let payload = group & VARINT_PAYLOAD_MASK;

        if shift >= u64::BITS || (payload << shift) >> shift != payload {
            return Err(PolylineError::VarintOverflow);
        }
        result |= payload << shift;

        if group & VARINT_CONTINUATION == 0 {
            return Ok((result, offset + 1));
        }
        shift += VARINT_PAYLOAD_BITS;
    }

    Err(PolylineError::PrematureEnd)
}
