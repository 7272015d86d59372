/// Format version written as the first header varint
pub const FORMAT_VERSION: u64 = 1;

/// Largest precision (decimal digits) that fits the 4-bit header fields
pub const MAX_PRECISION: u8 = 15;

/// Precision used for latitude/longitude when none is given
pub const DEFAULT_PRECISION: u8 = 5;

/// Encoding alphabet, index 0-63
pub const ENCODING_TABLE: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Lowest byte value in the alphabet (`-`)
pub(crate) const DECODING_OFFSET: u8 = b'-';

/// Inverse of [`ENCODING_TABLE`], indexed by `byte - DECODING_OFFSET`, -1 for bytes outside the alphabet
#[rustfmt::skip]
pub(crate) const DECODING_TABLE: [i8; 78] = [
    62, -1, -1, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61, -1, -1, -1, -1, -1, -1, -1,
     0,  1,  2,  3,  4,  5,  6,  7,  8,  9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19,
    20, 21, 22, 23, 24, 25, -1, -1, -1, -1, 63, -1, 26, 27, 28, 29, 30, 31, 32, 33,
    34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 44, 45, 46, 47, 48, 49, 50, 51,
];

/// Payload bits per encoded character
pub(crate) const VARINT_PAYLOAD_BITS: u32 = 5;

/// Mask of the payload bits of a 6-bit group
pub(crate) const VARINT_PAYLOAD_MASK: u64 = 0x1F;

/// Continuation flag of a 6-bit group
pub(crate) const VARINT_CONTINUATION: u64 = 0x20;
