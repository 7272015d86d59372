use crate::core::constants::{DECODING_OFFSET, DECODING_TABLE, ENCODING_TABLE};

/// Returns the alphabet byte for a 6-bit value.
///
/// Only the low six bits of `value` are used.
#[inline]
pub fn encode_char(value: u8) -> u8 {
    ENCODING_TABLE[(value & 0x3F) as usize]
}

/// Returns the 6-bit value for an alphabet byte, or `None` if the byte is not part of the alphabet.
#[inline]
pub fn decode_char(byte: u8) -> Option<u8> {
    let index = byte.checked_sub(DECODING_OFFSET)? as usize;
    match DECODING_TABLE.get(index) {
        Some(&value) if value >= 0 => Some(value as u8),
        _ => None,
    }
}
