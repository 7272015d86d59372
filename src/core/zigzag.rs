/// Maps a signed delta to an unsigned value: 0, -1, 1, -2, ... become 0, 1, 2, 3, ...
#[inline]
pub fn encode(value: i64) -> u64 {
    let shifted = (value << 1) as u64;
    if value < 0 { !shifted } else { shifted }
}

/// Inverse of [`encode`], exact over the full `i64` range.
#[inline]
pub fn decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}
