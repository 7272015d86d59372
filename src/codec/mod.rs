mod converter;
pub mod decoder;
pub mod encoder;
pub mod header;

pub use decoder::{Decoder, decode, decode_header, peek_third_dimension};
pub use encoder::encode;
pub use header::{Header, ThirdDimension};
