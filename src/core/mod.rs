pub mod alphabet;
pub mod constants;
pub mod varint;
pub mod zigzag;

pub use constants::{DEFAULT_PRECISION, ENCODING_TABLE, FORMAT_VERSION, MAX_PRECISION};
