/// Error type for flexpolyline-rs operations.
#[derive(Debug, Clone, PartialEq)]
pub enum PolylineError {
    /// Empty coordinate list on encode, or a blank string on decode.
    InvalidArgument(String),
    /// A precision, third dimension kind or coordinate value outside its bounds.
    OutOfRange(String),
    /// The header declares a format version other than the supported one.
    UnsupportedVersion(u64),
    /// The packed header value uses bits outside the defined layout.
    InvalidHeader(u64),
    /// A byte outside the encoding alphabet.
    InvalidCharacter { byte: u8, offset: usize },
    /// The input ended while a varint continuation character was expected.
    PrematureEnd,
    /// The input ended in the middle of a coordinate group.
    TruncatedEncoding { coordinate: usize },
    /// A varint does not fit in 64 bits.
    VarintOverflow,
    /// Failed to parse the textual polyline representation.
    ParseError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    GeometryParseError(String),
    /// CSV parsing or reading error.
    CsvError(String),
    /// File I/O or serialization error.
    IoError(String),
}

impl std::fmt::Display for PolylineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolylineError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            PolylineError::OutOfRange(msg) => write!(f, "Out of range: {}", msg),
            PolylineError::UnsupportedVersion(v) => write!(f, "Unsupported version: {}", v),
            PolylineError::InvalidHeader(v) => write!(f, "Invalid header value: {}", v),
            PolylineError::InvalidCharacter { byte, offset } => {
                if byte.is_ascii_graphic() {
                    write!(f, "Invalid character '{}' at offset {}", *byte as char, offset)
                } else {
                    write!(f, "Invalid byte 0x{:02x} at offset {}", byte, offset)
                }
            }
            PolylineError::PrematureEnd => write!(f, "Premature end of input inside a varint"),
            PolylineError::TruncatedEncoding { coordinate } => {
                write!(f, "Truncated encoding in coordinate {}", coordinate)
            }
            PolylineError::VarintOverflow => write!(f, "Varint exceeds 64 bits"),
            PolylineError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            PolylineError::GeometryParseError(msg) => write!(f, "Geometry parse error: {}", msg),
            PolylineError::CsvError(msg) => write!(f, "CSV error: {}", msg),
            PolylineError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for PolylineError {}
